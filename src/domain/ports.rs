use crate::domain::model::{Leaderboard, RawRow};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Turns a normalized leaderboard into the bytes of an output artifact.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &Leaderboard) -> Result<Vec<u8>>;

    /// File extension of the rendered artifact, without the dot.
    fn extension(&self) -> &'static str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Name of the input this pipeline processes, used in log lines.
    fn source_name(&self) -> &str;
    async fn extract(&self) -> Result<Vec<RawRow>>;
    async fn transform(&self, rows: Vec<RawRow>) -> Result<Leaderboard>;
    async fn load(&self, report: Leaderboard) -> Result<String>;
}
