use crate::adapters::http::HttpFetcher;
use crate::adapters::{build_sources, CatchSource, CollectContext};
use crate::config::AppConfig;
use crate::core::astronomy::{snapshot, Site};
use crate::core::calendar::{full_date, next_weekend, short_date, short_date_with_weekday};
use crate::core::extractor::Extractor;
use crate::core::merge::{group_by_location, merge, MergePolicy};
use crate::core::recommend::Ranker;
use crate::core::seasonal::seasonal_table;
use crate::domain::model::{Report, SourceOutcome, SourceSummary, SpotReport, WeekendOutlook};
use crate::domain::ports::{Fetcher, Pipeline, Storage};
use crate::render::{history_rows, render_page, to_csv, PageCopy};
use crate::utils::error::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Wall-clock time at the site, from its fixed UTC offset.
pub fn site_now(site: &Site) -> NaiveDateTime {
    let offset_minutes = (site.utc_offset_hours * 60.0).round() as i64;
    Utc::now().naive_utc() + Duration::minutes(offset_minutes)
}

/// Collect from every enabled source, merge with seasonal data, rank, and
/// write the JSON, HTML and CSV outputs.
pub struct CatchPipeline<S: Storage> {
    storage: S,
    config: AppConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Extractor,
    sources: Vec<Box<dyn CatchSource>>,
    ranker: Ranker,
    today: NaiveDate,
}

impl<S: Storage> CatchPipeline<S> {
    pub fn new(storage: S, config: AppConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config.http)?);
        Self::with_fetcher(storage, config, fetcher)
    }

    pub fn with_fetcher(storage: S, config: AppConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let extractor = Extractor::new(
            config.species.clone(),
            config.methods.clone(),
            config.locations.clone(),
        )?;
        let ranker = Ranker::new(config.report.recommendation_count)?;
        let sources = build_sources(&config.sources);
        let today = site_now(&config.site).date();

        Ok(Self {
            storage,
            config,
            fetcher,
            extractor,
            sources,
            ranker,
            today,
        })
    }

    /// Build the report as of `date` instead of the site's current date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = date;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn source_tags(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.tag()).collect()
    }

    fn policy(&self) -> MergePolicy {
        MergePolicy {
            min_evidence: self.config.report.min_evidence,
            max_records: self.config.report.max_records,
        }
    }

    fn page_copy(&self) -> PageCopy {
        PageCopy {
            title: self.config.report.title.clone(),
            footer: self.config.report.footer.clone(),
            data_credit: self.config.report.data_credit.clone(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for CatchPipeline<S> {
    async fn extract(&self) -> Result<Vec<SourceOutcome>> {
        if self.config.report.offline {
            info!("📴 Offline mode, skipping {} source(s)", self.sources.len());
            return Ok(Vec::new());
        }

        let default_date = short_date(self.today);
        let ctx = CollectContext {
            fetcher: self.fetcher.as_ref(),
            extractor: &self.extractor,
            default_date: &default_date,
            min_body_length: self.config.http.min_body_length,
            politeness_delay: std::time::Duration::from_millis(self.config.http.politeness_delay_ms),
        };

        let mut outcomes = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            debug!("📡 Collecting from {}", source.tag());
            outcomes.push(source.collect(&ctx).await);
        }
        Ok(outcomes)
    }

    async fn transform(&self, outcomes: Vec<SourceOutcome>) -> Result<Report> {
        let sources: Vec<SourceSummary> = outcomes
            .iter()
            .map(|o| SourceSummary {
                tag: o.tag.clone(),
                records: o.records.len(),
                diagnostics: o.diagnostics.clone(),
            })
            .collect();

        let live = outcomes
            .into_iter()
            .flat_map(|o| o.records)
            .filter(|c| c.record.is_well_formed());
        let scraped = group_by_location(live);

        let locations = self.extractor.locations().entries();
        let species = self.extractor.species();
        let seasonal = seasonal_table(self.today, species);
        let merged = merge(&scraped, &seasonal, locations, self.policy());

        let site = &self.config.site;
        let today = snapshot(self.today, site);
        let tomorrow = snapshot(self.today + Duration::days(1), site);
        let (saturday, sunday) = next_weekend(self.today);
        let saturday_snapshot = snapshot(saturday, site);

        let recommendations = self.ranker.rank(&merged, locations, species, &tomorrow);
        let weekend_picks = self.ranker.rank(&merged, locations, species, &saturday_snapshot);
        debug!(
            "⭐ {} pick(s) for tomorrow ({}), {} for the weekend ({})",
            recommendations.len(),
            tomorrow.tide_type,
            weekend_picks.len(),
            saturday_snapshot.tide_type
        );

        let spots = merged
            .into_iter()
            .filter_map(|m| {
                let location = self.extractor.locations().get(&m.location_id)?;
                Some(SpotReport {
                    id: m.location_id,
                    area: location.area.clone(),
                    distance_km: location.distance_km,
                    info: location.info.clone(),
                    live_count: m.live_count,
                    catches: m.records,
                })
            })
            .collect();

        Ok(Report {
            last_updated: site_now(site).format("%Y-%m-%d %H:%M").to_string(),
            date_label: full_date(self.today),
            spots,
            today,
            tomorrow,
            recommendations,
            weekend: WeekendOutlook {
                label: format!(
                    "{}・{}",
                    short_date_with_weekday(saturday),
                    short_date_with_weekday(sunday)
                ),
                saturday: saturday_snapshot,
                picks: weekend_picks,
            },
            sources,
        })
    }

    async fn load(&self, report: Report) -> Result<String> {
        let files = &self.config.report;

        let json = serde_json::to_string_pretty(&report)?;
        self.storage.write_file(&files.json_file, json.as_bytes()).await?;

        let recent = history_rows(&report, files.history_limit);
        let page = render_page(&report, &self.page_copy(), &recent)?;
        self.storage.write_file(&files.html_file, page.as_bytes()).await?;

        let csv = to_csv(&recent)?;
        self.storage.write_file(&files.history_file, &csv).await?;

        debug!(
            "💾 Wrote {}, {} and {} ({} history row(s))",
            files.json_file,
            files.html_file,
            files.history_file,
            recent.len()
        );
        Ok(self.storage.locate(&files.json_file))
    }
}
