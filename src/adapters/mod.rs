//! Adapters: the concrete sources, HTTP transport and local storage.
//!
//! Every source implements [`CatchSource`]. Collection never fails: a source
//! that cannot produce anything returns an empty outcome with diagnostics.

pub mod anglers;
pub mod fishing_max;
pub mod html;
pub mod http;
pub mod point;
pub mod storage;

use crate::config::{SourceConfig, SourcesConfig};
use crate::core::extractor::{Extractor, FragmentOrigin};
use crate::domain::model::{SourceOutcome, SourcedCatch};
use crate::domain::ports::Fetcher;
use crate::utils::error::{CatchError, Result};
use async_trait::async_trait;
use html::Fragment;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shared, read-only inputs for one collection pass.
pub struct CollectContext<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub extractor: &'a Extractor,
    /// `M/D` token used when a fragment carries no date of its own.
    pub default_date: &'a str,
    pub min_body_length: usize,
    pub politeness_delay: Duration,
}

/// Listing-page settings after applying config overrides to a source's
/// built-ins.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSettings {
    pub urls: Vec<String>,
    pub selectors: Vec<String>,
    pub whole_text_fallback: bool,
    pub max_fragments: usize,
    pub reporter_label: String,
}

impl ListingSettings {
    pub fn with_overrides(mut self, config: &SourceConfig) -> Self {
        if !config.urls.is_empty() {
            self.urls = config.urls.clone();
        }
        if !config.selectors.is_empty() {
            self.selectors = config.selectors.clone();
        }
        if let Some(fallback) = config.whole_text_fallback {
            self.whole_text_fallback = fallback;
        }
        if let Some(max) = config.max_fragments {
            self.max_fragments = max;
        }
        if let Some(label) = &config.reporter_label {
            self.reporter_label = label.clone();
        }
        self
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
pub trait CatchSource: Send + Sync {
    fn tag(&self) -> &str;

    /// Collect into `outcome`. An error here discards whatever was gathered.
    async fn try_collect(&self, ctx: &CollectContext<'_>, outcome: &mut SourceOutcome) -> Result<()>;

    async fn collect(&self, ctx: &CollectContext<'_>) -> SourceOutcome {
        let mut outcome = SourceOutcome::new(self.tag());

        match self.try_collect(ctx, &mut outcome).await {
            Ok(()) => info!(
                "📡 {}: {} record(s), {} diagnostic(s)",
                self.tag(),
                outcome.records.len(),
                outcome.diagnostics.len()
            ),
            Err(e) => {
                warn!("⚠️ {}: {} ({})", self.tag(), e, e.recovery_suggestion());
                outcome.records.clear();
                outcome.diagnostics.push(e.to_string());
            }
        }

        outcome
    }
}

/// Fetch the first usable listing page and cut it into fragments.
pub async fn fetch_listing(
    ctx: &CollectContext<'_>,
    tag: &str,
    settings: &ListingSettings,
    diagnostics: &mut Vec<String>,
) -> Result<Vec<Fragment>> {
    let page = html::fetch_first_usable(
        ctx.fetcher,
        &settings.urls,
        ctx.min_body_length,
        ctx.politeness_delay,
        diagnostics,
    )
    .await
    .ok_or_else(|| CatchError::NoUsableDocument {
        source_tag: tag.to_string(),
        attempted: settings.urls.len(),
    })?;

    let selection = html::select_fragments(
        &page.body,
        &page.url,
        &settings.selectors,
        settings.max_fragments,
        settings.whole_text_fallback,
    );
    debug!(
        "🔎 {}: {} fragment(s) via {}",
        tag,
        selection.fragments.len(),
        selection.matched_by.as_deref().unwrap_or("nothing")
    );
    diagnostics.extend(selection.diagnostics);

    Ok(selection.fragments)
}

/// Run the extractor over one fragment and append its records. Returns how
/// many were added; fragments naming no known location add none.
pub fn emit_fragment(
    ctx: &CollectContext<'_>,
    outcome: &mut SourceOutcome,
    text: &str,
    reporter_label: &str,
) -> usize {
    let origin = FragmentOrigin {
        source_tag: &outcome.tag,
        reporter_label,
        default_date: ctx.default_date,
    };

    let Some((location_id, records)) = ctx.extractor.records_from_fragment(text, origin) else {
        debug!("⏭️ {}: fragment names no known location", outcome.tag);
        return 0;
    };

    let added = records.len();
    outcome
        .records
        .extend(records.into_iter().map(|record| SourcedCatch {
            location_id: location_id.clone(),
            record,
        }));
    added
}

/// Enabled sources in their fixed order.
pub fn build_sources(config: &SourcesConfig) -> Vec<Box<dyn CatchSource>> {
    let mut sources: Vec<Box<dyn CatchSource>> = Vec::new();

    if config.fishingmax.enabled {
        sources.push(Box::new(fishing_max::FishingMaxSource::new(&config.fishingmax)));
    }
    if config.anglers.enabled {
        sources.push(Box::new(anglers::AnglersSource::new(&config.anglers)));
    }
    if config.point.enabled {
        sources.push(Box::new(point::PointSource::new(&config.point)));
    }

    sources
}
