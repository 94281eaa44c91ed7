pub mod batch;
pub mod decoder;
pub mod etl;
pub mod grouper;
pub mod leaderboard;
pub mod stages;

pub use crate::domain::model::{Leaderboard, RacerRecord, RawRow};
pub use crate::domain::ports::{Pipeline, ReportRenderer, Storage};
pub use crate::utils::error::Result;
