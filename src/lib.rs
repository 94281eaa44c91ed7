//! Race-timing CSV exports to per-category results spreadsheets.
//!
//! Each export is decoded by column position, grouped by category, ordered,
//! scored from a points table and rendered into an `.xlsx` workbook.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::RacePipeline;
pub use app::render::XlsxRenderer;
pub use config::{cli::LocalStorage, settings::Settings};
pub use crate::core::{batch::BatchRunner, etl::EtlEngine};
pub use utils::error::{EtlError, Result};
