use super::{emit_fragment, fetch_listing, strings, CatchSource, CollectContext, ListingSettings};
use crate::config::SourceConfig;
use crate::domain::model::SourceOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;

pub const TAG: &str = "fishingmax";

/// Tackle-shop blog: each post is one report, usually naming the spot and
/// the catch in its body.
pub struct FishingMaxSource {
    settings: ListingSettings,
}

impl FishingMaxSource {
    pub fn defaults() -> ListingSettings {
        ListingSettings {
            urls: strings(&[
                "https://fishingmax.co.jp/blog/category/fishing-result",
                "https://fishingmax.co.jp/blog",
            ]),
            selectors: strings(&["article", "div[class*=post]", "div[class*=entry]"]),
            whole_text_fallback: true,
            max_fragments: 10,
            reporter_label: "フィッシングマックス".to_string(),
        }
    }

    pub fn new(config: &SourceConfig) -> Self {
        Self {
            settings: Self::defaults().with_overrides(config),
        }
    }
}

#[async_trait]
impl CatchSource for FishingMaxSource {
    fn tag(&self) -> &str {
        TAG
    }

    async fn try_collect(&self, ctx: &CollectContext<'_>, outcome: &mut SourceOutcome) -> Result<()> {
        let fragments = fetch_listing(ctx, TAG, &self.settings, &mut outcome.diagnostics).await?;

        for fragment in &fragments {
            emit_fragment(ctx, outcome, &fragment.text, &self.settings.reporter_label);
        }
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

    const BLOG: &str = r#"
        <html><body>
          <article><h2>10/15 須磨海釣り公園</h2><p>アジ20匹、サイズ18cmをサビキで確認</p></article>
          <article><h2>大阪南港</h2><p>サバ 12匹</p></article>
          <article><h2>明石港の様子</h2><p>メバル 24cm エビ撒き</p></article>
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
    async fn test_collects_records_from_posts() {
        let fetcher = StubFetcher::default().with_page(
            "https://fishingmax.co.jp/blog/category/fishing-result",
            200,
            BLOG,
        );
        let extractor = extractor();
        let source = FishingMaxSource::new(&SourceConfig::default());

        let outcome = source.collect(&ctx(&fetcher, &extractor)).await;

        assert_eq!(outcome.tag, "fishingmax");
        assert_eq!(outcome.records.len(), 2);

        let suma = &outcome.records[0];
        assert_eq!(suma.location_id, "須磨海釣り公園");
        assert_eq!(suma.record.species, "アジ");
        assert_eq!(suma.record.size_description, "18cm");
        assert_eq!(suma.record.count.to_string(), "20匹");
        assert_eq!(suma.record.timestamp, "10/15");
        assert_eq!(suma.record.reporter_label, "フィッシングマックス");
        assert_eq!(suma.record.method, "サビキ");

        let akashi = &outcome.records[1];
        assert_eq!(akashi.location_id, "明石港");
        assert_eq!(akashi.record.timestamp, "10/16");
        assert_eq!(akashi.record.count.to_string(), "数匹");
        // only the primary URL was needed
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_second_url() {
        let fetcher = StubFetcher::default()
            .with_page("https://fishingmax.co.jp/blog/category/fishing-result", 503, "maintenance mode")
            .with_page("https://fishingmax.co.jp/blog", 200, BLOG);
        let extractor = extractor();
        let source = FishingMaxSource::new(&SourceConfig::default());

        let outcome = source.collect(&ctx(&fetcher, &extractor)).await;

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].contains("503"));
    }

    #[tokio::test]
    async fn test_timeouts_on_every_url_give_empty_outcome() {
        let fetcher = StubFetcher::default();
        let extractor = extractor();
        let source = FishingMaxSource::new(&SourceConfig::default());

        let outcome = source.collect(&ctx(&fetcher, &extractor)).await;

        assert!(outcome.records.is_empty());
        // one per URL plus the overall failure
        assert_eq!(outcome.diagnostics.len(), 3);
        assert!(outcome.diagnostics[0].contains("timed out"));
        assert_eq!(fetcher.requested().len(), 2);
    }
}
