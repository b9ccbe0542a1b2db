#![allow(clippy::missing_docs_in_private_items, clippy::result_large_err)]

pub mod pipeline;
pub mod resolver;
pub mod scanner;
pub mod seed;
pub mod synthesizer;
pub mod uploader;

pub use pipeline::{IngestionMode, IngestionPipeline, IngestionReport, PipelineConfig};
pub use seed::{seed_sample_catalog, SeedReport};
