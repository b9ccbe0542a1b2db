mod config;
mod context;
mod stages;
mod state;

pub use config::{PipelineConfig, DEFAULT_MAX_IMAGES_PER_PRODUCT};

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use common::{
    error::AppError,
    storage::{db::SurrealDbClient, store::StorageManager},
    utils::config::AppConfig,
};
use tracing::info;

use crate::uploader::{AssetUploader, ObjectStoreUploader};

use self::{
    context::RunContext,
    stages::{clear_collections, ingest_categories, ingest_products, ingest_subcategories},
    state::ready,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionMode {
    /// Clear everything and rebuild categories, subcategories and products.
    Full,
    /// Keep categories and subcategories, rebuild products against them.
    ProductsOnly,
}

/// Per-run counters. Skips and failed uploads are informational; only errors
/// that abort the run surface as `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub categories_created: usize,
    pub categories_skipped: usize,
    pub subcategories_created: usize,
    pub subcategories_skipped: usize,
    pub products_created: usize,
    pub products_skipped: usize,
    pub images_uploaded: usize,
    pub images_failed: usize,
}

impl fmt::Display for IngestionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "categories: {} created, {} skipped",
            self.categories_created, self.categories_skipped
        )?;
        writeln!(
            f,
            "subcategories: {} created, {} skipped",
            self.subcategories_created, self.subcategories_skipped
        )?;
        writeln!(
            f,
            "products: {} created, {} skipped",
            self.products_created, self.products_skipped
        )?;
        write!(
            f,
            "images: {} uploaded, {} failed",
            self.images_uploaded, self.images_failed
        )
    }
}

#[allow(clippy::module_name_repetitions)]
pub struct IngestionPipeline {
    db: Arc<SurrealDbClient>,
    uploader: Arc<dyn AssetUploader>,
    pipeline_config: PipelineConfig,
}

impl IngestionPipeline {
    pub fn new(
        db: Arc<SurrealDbClient>,
        storage: StorageManager,
        config: &AppConfig,
        pipeline_config: PipelineConfig,
    ) -> Self {
        let uploader = ObjectStoreUploader::new(
            storage,
            config.asset_namespace.clone(),
            config.asset_public_url.clone(),
        );

        Self::with_uploader(db, Arc::new(uploader), pipeline_config)
    }

    pub fn with_uploader(
        db: Arc<SurrealDbClient>,
        uploader: Arc<dyn AssetUploader>,
        pipeline_config: PipelineConfig,
    ) -> Self {
        Self {
            db,
            uploader,
            pipeline_config,
        }
    }

    #[tracing::instrument(skip_all, fields(mode = ?mode))]
    pub async fn run(&self, mode: IngestionMode) -> Result<IngestionReport, AppError> {
        let mut ctx = RunContext::new(
            mode,
            self.db.as_ref(),
            self.uploader.as_ref(),
            &self.pipeline_config,
        );

        let machine = ready();

        let pipeline_started = Instant::now();

        let stage_start = Instant::now();
        let machine = clear_collections(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let clear_duration = stage_start.elapsed();

        let stage_start = Instant::now();
        let machine = ingest_categories(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let categories_duration = stage_start.elapsed();

        let stage_start = Instant::now();
        let machine = ingest_subcategories(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let subcategories_duration = stage_start.elapsed();

        let stage_start = Instant::now();
        let _machine = ingest_products(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let products_duration = stage_start.elapsed();

        let total_duration = pipeline_started.elapsed();
        let clear_ms = Self::duration_millis(clear_duration);
        let categories_ms = Self::duration_millis(categories_duration);
        let subcategories_ms = Self::duration_millis(subcategories_duration);
        let products_ms = Self::duration_millis(products_duration);
        info!(
            mode = ?mode,
            total_ms = Self::duration_millis(total_duration),
            clear_ms,
            categories_ms,
            subcategories_ms,
            products_ms,
            categories_created = ctx.report.categories_created,
            subcategories_created = ctx.report.subcategories_created,
            products_created = ctx.report.products_created,
            "catalog ingestion finished"
        );

        Ok(ctx.report)
    }

    fn duration_millis(duration: Duration) -> u64 {
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
    }
}
