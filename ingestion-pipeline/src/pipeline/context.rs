use common::{error::AppError, storage::db::SurrealDbClient};
use tracing::error;

use crate::{
    resolver::EntityResolver,
    synthesizer::{AttributeSynthesizer, SynthesisProfile},
    uploader::AssetUploader,
};

use super::{config::PipelineConfig, IngestionMode, IngestionReport};

pub struct RunContext<'a> {
    pub mode: IngestionMode,
    pub db: &'a SurrealDbClient,
    pub uploader: &'a dyn AssetUploader,
    pub pipeline_config: &'a PipelineConfig,
    pub resolver: EntityResolver,
    pub synthesizer: AttributeSynthesizer,
    pub report: IngestionReport,
}

impl<'a> RunContext<'a> {
    pub fn new(
        mode: IngestionMode,
        db: &'a SurrealDbClient,
        uploader: &'a dyn AssetUploader,
        pipeline_config: &'a PipelineConfig,
    ) -> Self {
        let profile = match mode {
            IngestionMode::Full => SynthesisProfile::Standard,
            IngestionMode::ProductsOnly => SynthesisProfile::Extended,
        };
        let synthesizer = match pipeline_config.synthesizer_seed {
            Some(seed) => AttributeSynthesizer::seeded(profile, seed),
            None => AttributeSynthesizer::new(profile),
        };

        Self {
            mode,
            db,
            uploader,
            pipeline_config,
            resolver: EntityResolver::new(),
            synthesizer,
            report: IngestionReport::default(),
        }
    }

    pub fn abort(&mut self, err: AppError) -> AppError {
        error!(
            mode = ?self.mode,
            error = %err,
            "catalog ingestion aborted"
        );
        err
    }
}
