use super::{emit_fragment, fetch_listing, strings, CatchSource, CollectContext, ListingSettings};
use crate::config::SourceConfig;
use crate::domain::model::SourceOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;

pub const TAG: &str = "point";

/// Tackle-chain result board. Results are table rows or list items, one
/// catch per entry; there is no body text worth falling back to.
pub struct PointSource {
    settings: ListingSettings,
}

impl PointSource {
    pub fn defaults() -> ListingSettings {
        ListingSettings {
            urls: strings(&[
                "https://www.point-i.jp/fishings?pref=28",
                "https://www.point-i.jp/fishings",
            ]),
            selectors: strings(&["table tr", "li[class*=result]", "div[class*=result]"]),
            whole_text_fallback: false,
            max_fragments: 30,
            reporter_label: "ポイント".to_string(),
        }
    }

    pub fn new(config: &SourceConfig) -> Self {
        Self {
            settings: Self::defaults().with_overrides(config),
        }
    }
}

#[async_trait]
impl CatchSource for PointSource {
    fn tag(&self) -> &str {
        TAG
    }

    async fn try_collect(&self, ctx: &CollectContext<'_>, outcome: &mut SourceOutcome) -> Result<()> {
        let rows = fetch_listing(ctx, TAG, &self.settings, &mut outcome.diagnostics).await?;

        let with_records = rows
            .iter()
            .filter(|row| emit_fragment(ctx, outcome, &row.text, &self.settings.reporter_label) > 0)
            .count();
        tracing::debug!("🧾 {}: {}/{} row(s) produced records", TAG, with_records, rows.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::StubFetcher;
    use crate::core::extractor::Extractor;
    use crate::core::locations::default_locations;
    use crate::core::vocabulary::{default_methods, default_species};
    use std::time::Duration;

    const BOARD: &str = r#"
        <html><body>
          <table>
            <tr><th>日付</th><th>場所</th><th>釣果</th></tr>
            <tr><td>10/14</td><td>六アイ</td><td>タチウオ 85cm 4本 テンヤ</td></tr>
            <tr><td>10/15</td><td>林崎漁港</td><td>ガシラ 18cm 6匹 穴釣り / メバル 2匹</td></tr>
          </table>
        </body></html>
    "#;

    fn extractor() -> Extractor {
        Extractor::new(default_species(), default_methods(), default_locations()).unwrap()
    }

    fn ctx<'a>(fetcher: &'a StubFetcher, extractor: &'a Extractor) -> CollectContext<'a> {
        CollectContext {
            fetcher,
            extractor,
            default_date: "10/16",
            min_body_length: 10,
            politeness_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_rows_become_records() {
        let fetcher =
            StubFetcher::default().with_page("https://www.point-i.jp/fishings?pref=28", 200, BOARD);
        let extractor = extractor();
        let source = PointSource::new(&SourceConfig::default());

        let outcome = source.collect(&ctx(&fetcher, &extractor)).await;

        let summary: Vec<(&str, &str, String)> = outcome
            .records
            .iter()
            .map(|c| (c.location_id.as_str(), c.record.species.as_str(), c.record.count.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("六甲アイランド", "タチウオ", "4匹".to_string()),
                ("林崎漁港", "ガシラ", "6匹".to_string()),
                ("林崎漁港", "メバル", "6匹".to_string()),
            ]
        );
        assert_eq!(outcome.records[0].record.timestamp, "10/14");
        assert_eq!(outcome.records[0].record.method, "テンヤ");
        assert_eq!(outcome.records[1].record.method, "穴釣り");
        assert!(outcome.records.iter().all(|c| c.record.reporter_label == "ポイント"));
    }

    #[tokio::test]
    async fn test_unmatched_layout_is_a_diagnostic_not_a_failure() {
        let fetcher = StubFetcher::default().with_page(
            "https://www.point-i.jp/fishings?pref=28",
            200,
            "<html><body><p>本日の釣果情報はありません</p></body></html>",
        );
        let extractor = extractor();
        let source = PointSource::new(&SourceConfig::default());

        let outcome = source.collect(&ctx(&fetcher, &extractor)).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].contains("no selector matched"));
    }
}
