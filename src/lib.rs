pub mod flood_pipeline;
pub mod logger;
