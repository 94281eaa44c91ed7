pub mod race_pipeline;

pub use race_pipeline::RacePipeline;
