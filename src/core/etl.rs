use crate::domain::model::Leaderboard;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::sync::Arc;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: Arc<SystemMonitor>,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: Arc::new(SystemMonitor::new(false)),
        }
    }

    /// Shares one monitor across engines so peak memory covers the whole run.
    pub fn with_monitor(pipeline: P, monitor: Arc<SystemMonitor>) -> Self {
        Self { pipeline, monitor }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        let report = self.preview().await?;
        let source = self.pipeline.source_name();

        let output_path = self.pipeline.load(report).await?;
        self.monitor.log_stats(source, "load");
        tracing::info!("📁 {} -> {}", source, output_path);

        Ok(output_path)
    }

    /// Extract and transform only; nothing is written.
    pub async fn preview(&self) -> Result<Leaderboard> {
        let source = self.pipeline.source_name();
        tracing::info!("🚀 Processing {}", source);

        let rows = self.pipeline.extract().await?;
        tracing::debug!("Extracted {} rows from {}", rows.len(), source);
        self.monitor.log_stats(source, "extract");

        let report = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Built {} categories ({} racers, {} stages) from {}",
            report.categories.len(),
            report.racer_count(),
            report.stage_count(),
            source
        );
        self.monitor.log_stats(source, "transform");

        Ok(report)
    }
}
