use super::html::{first_text, select_fragments};
use super::{emit_fragment, fetch_listing, strings, CatchSource, CollectContext, ListingSettings};
use crate::config::SourceConfig;
use crate::domain::model::SourceOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

pub const TAG: &str = "anglers";

const DEFAULT_DETAIL_LIMIT: usize = 5;

/// Angler-posted catch log. Listing cards link to detail pages that carry
/// the full text, the poster's name and usually the method.
pub struct AnglersSource {
    settings: ListingSettings,
    detail_limit: usize,
    detail_selectors: Vec<String>,
    reporter_selectors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DetailPage {
    text: String,
    reporter: Option<String>,
}

fn parse_detail(html: &str, url: &str, detail_selectors: &[String], reporter_selectors: &[String]) -> DetailPage {
    let text = select_fragments(html, url, detail_selectors, 1, true)
        .fragments
        .into_iter()
        .next()
        .map(|f| f.text)
        .unwrap_or_default();

    DetailPage {
        text,
        reporter: first_text(html, reporter_selectors),
    }
}

impl AnglersSource {
    pub fn defaults() -> ListingSettings {
        ListingSettings {
            urls: strings(&[
                "https://anglers.jp/prefectures/28/catches",
                "https://anglers.jp/catches",
            ]),
            selectors: strings(&[
                "div[class*=catch-card]",
                "li[class*=catch]",
                "a[href*='/catches/']",
            ]),
            whole_text_fallback: false,
            max_fragments: 20,
            reporter_label: "アングラーズ".to_string(),
        }
    }

    pub fn new(config: &SourceConfig) -> Self {
        let detail_selectors = if config.detail_selectors.is_empty() {
            strings(&["div[class*=catch-detail]", "article", "main"])
        } else {
            config.detail_selectors.clone()
        };
        let reporter_selectors = if config.reporter_selectors.is_empty() {
            strings(&["[class*=user-name]", "[class*=username]", ".user .name"])
        } else {
            config.reporter_selectors.clone()
        };

        Self {
            settings: Self::defaults().with_overrides(config),
            detail_limit: config.detail_limit.unwrap_or(DEFAULT_DETAIL_LIMIT),
            detail_selectors,
            reporter_selectors,
        }
    }

    async fn read_detail(
        &self,
        ctx: &CollectContext<'_>,
        url: &str,
        diagnostics: &mut Vec<String>,
    ) -> Option<DetailPage> {
        match ctx.fetcher.fetch(url).await {
            Ok(page) if page.is_usable(ctx.min_body_length) => Some(parse_detail(
                &page.body,
                &page.url,
                &self.detail_selectors,
                &self.reporter_selectors,
            )),
            Ok(page) => {
                diagnostics.push(format!("{}: unusable detail page (status {})", url, page.status));
                None
            }
            Err(e) => {
                warn!("⚠️ {}: detail page skipped: {}", TAG, e);
                diagnostics.push(format!("{}: {}", url, e));
                None
            }
        }
    }
}

#[async_trait]
impl CatchSource for AnglersSource {
    fn tag(&self) -> &str {
        TAG
    }

    async fn try_collect(&self, ctx: &CollectContext<'_>, outcome: &mut SourceOutcome) -> Result<()> {
        let cards = fetch_listing(ctx, TAG, &self.settings, &mut outcome.diagnostics).await?;
        let mut detail_fetches = 0;

        for card in &cards {
            let detail = match &card.link {
                Some(link) if detail_fetches < self.detail_limit => {
                    detail_fetches += 1;
                    // the listing page already hit this host
                    if !ctx.politeness_delay.is_zero() {
                        tokio::time::sleep(ctx.politeness_delay).await;
                    }
                    self.read_detail(ctx, link, &mut outcome.diagnostics).await
                }
                _ => None,
            };

            match detail {
                Some(page) => {
                    let text = format!("{} {}", card.text, page.text);
                    let reporter = page
                        .reporter
                        .as_deref()
                        .unwrap_or(&self.settings.reporter_label);
                    emit_fragment(ctx, outcome, &text, reporter);
                }
                None => {
                    emit_fragment(ctx, outcome, &card.text, &self.settings.reporter_label);
                }
            }
        }

        debug!("🔗 {}: {} detail page(s) fetched", TAG, detail_fetches);
        Ok(())
    }
}
