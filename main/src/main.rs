use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use common::{
    storage::{db::SurrealDbClient, store::StorageManager},
    utils::config::{get_config, AppConfig},
};
use ingestion_pipeline::{
    pipeline::DEFAULT_MAX_IMAGES_PER_PRODUCT, seed_sample_catalog, IngestionMode,
    IngestionPipeline, PipelineConfig,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "kirana", version, about = "Catalog ingestion for the kirana store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clear the catalog and rebuild it from the asset directory tree
    Full(IngestArgs),
    /// Rebuild products only, keeping existing categories and subcategories
    Products(IngestArgs),
    /// Replace the catalog with the built-in sample dataset
    Seed,
}

#[derive(Debug, Args)]
struct IngestArgs {
    /// Asset tree root holding category/, subcategory/ and product/
    #[arg(long, env = "ASSETS_DIR", default_value = "./assets")]
    assets_dir: PathBuf,

    /// Override the category image directory
    #[arg(long)]
    categories_dir: Option<PathBuf>,

    /// Override the subcategory image directory
    #[arg(long)]
    subcategories_dir: Option<PathBuf>,

    /// Override the product image directory
    #[arg(long)]
    products_dir: Option<PathBuf>,

    /// Maximum images persisted per product
    #[arg(long, default_value_t = DEFAULT_MAX_IMAGES_PER_PRODUCT)]
    max_images: usize,

    /// Fixed seed for attribute synthesis
    #[arg(long)]
    seed: Option<u64>,
}

impl IngestArgs {
    fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::from_assets_dir(&self.assets_dir);
        if let Some(dir) = &self.categories_dir {
            config.categories_dir.clone_from(dir);
        }
        if let Some(dir) = &self.subcategories_dir {
            config.subcategories_dir.clone_from(dir);
        }
        if let Some(dir) = &self.products_dir {
            config.products_dir.clone_from(dir);
        }
        config.max_images_per_product = self.max_images;
        config.synthesizer_seed = self.seed;
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = get_config().context("failed to load configuration")?;

    let db = Arc::new(
        SurrealDbClient::new(
            &config.surrealdb_address,
            &config.surrealdb_username,
            &config.surrealdb_password,
            &config.surrealdb_namespace,
            &config.surrealdb_database,
        )
        .await
        .context("failed to connect to SurrealDB")?,
    );
    db.ensure_initialized()
        .await
        .context("failed to initialize catalog schema")?;

    match cli.command {
        Command::Full(args) => run_ingestion(db, &config, &args, IngestionMode::Full).await,
        Command::Products(args) => {
            run_ingestion(db, &config, &args, IngestionMode::ProductsOnly).await
        }
        Command::Seed => {
            let report = seed_sample_catalog(&db)
                .await
                .context("failed to seed the sample catalog")?;
            println!(
                "seeded {} categories, {} subcategories, {} products",
                report.categories, report.subcategories, report.products
            );
            Ok(())
        }
    }
}

async fn run_ingestion(
    db: Arc<SurrealDbClient>,
    config: &AppConfig,
    args: &IngestArgs,
    mode: IngestionMode,
) -> anyhow::Result<()> {
    let storage = StorageManager::new(config)
        .await
        .context("failed to initialize asset storage")?;
    let pipeline = IngestionPipeline::new(db, storage, config, args.pipeline_config());

    info!(mode = ?mode, assets = %args.assets_dir.display(), "starting catalog ingestion");
    let report = pipeline.run(mode).await.context("catalog ingestion failed")?;
    println!("{report}");

    Ok(())
}
