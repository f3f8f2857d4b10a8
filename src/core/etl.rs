use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use tracing::{debug, info};

/// Runs a pipeline's three phases in order. Any phase error ends the run.
pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        info!("🚀 Starting catch report run");
        self.monitor.log_stats("Start");

        info!("📡 Collecting catch reports...");
        let outcomes = self.pipeline.extract().await?;
        let live: usize = outcomes.iter().map(|o| o.records.len()).sum();
        let failed = outcomes.iter().filter(|o| o.records.is_empty()).count();
        info!(
            "📥 Collected {} live record(s) from {} source(s), {} without results",
            live,
            outcomes.len(),
            failed
        );
        for outcome in &outcomes {
            for diagnostic in &outcome.diagnostics {
                debug!("🩺 {}: {}", outcome.tag, diagnostic);
            }
        }
        self.monitor.log_stats("Extract");

        info!("🔄 Merging and ranking...");
        let report = self.pipeline.transform(outcomes).await?;
        info!(
            "🗺️ {} spot(s), {} catch(es) ({} live), {} recommendation(s)",
            report.spots.len(),
            report.total_catches(),
            report.live_catches(),
            report.recommendations.len()
        );
        self.monitor.log_stats("Transform");

        info!("💾 Writing outputs...");
        let location = self.pipeline.load(report).await?;
        info!("📁 Report saved to: {}", location);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(location)
    }
}
