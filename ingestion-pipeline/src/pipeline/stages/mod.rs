use std::path::Path;

use common::{
    error::AppError,
    storage::{
        db::SurrealDbClient,
        types::{category::Category, product::Product, subcategory::Subcategory, StoredObject},
    },
};
use futures::future::join_all;
use state_machines::core::GuardError;
use tracing::{debug, info, instrument, warn};

use crate::{
    resolver::{EntityResolver, SubcategoryRef},
    scanner,
};

use super::{
    context::RunContext,
    state::{
        CatalogMachine, CategoriesIngested, Cleared, ProductsIngested, Ready,
        SubcategoriesIngested,
    },
    IngestionMode,
};

#[instrument(level = "trace", skip_all, fields(mode = ?ctx.mode))]
pub async fn clear_collections(
    machine: CatalogMachine<(), Ready>,
    ctx: &mut RunContext<'_>,
) -> Result<CatalogMachine<(), Cleared>, AppError> {
    let products = ctx.db.drop_table::<Product>().await?;

    if ctx.mode == IngestionMode::Full {
        let subcategories = ctx.db.drop_table::<Subcategory>().await?;
        let categories = ctx.db.drop_table::<Category>().await?;
        info!(
            products = products.len(),
            subcategories = subcategories.len(),
            categories = categories.len(),
            "catalog collections cleared"
        );
    } else {
        info!(
            products = products.len(),
            "product collection cleared; categories and subcategories kept"
        );
    }

    machine
        .clear()
        .map_err(|(_, guard)| map_guard_error("clear", &guard))
}

#[instrument(level = "trace", skip_all, fields(mode = ?ctx.mode))]
pub async fn ingest_categories(
    machine: CatalogMachine<(), Cleared>,
    ctx: &mut RunContext<'_>,
) -> Result<CatalogMachine<(), CategoriesIngested>, AppError> {
    if ctx.mode == IngestionMode::ProductsOnly {
        ctx.resolver = EntityResolver::load(ctx.db).await?;
        info!(
            categories = ctx.resolver.category_count(),
            subcategories = ctx.resolver.subcategory_count(),
            "resolver loaded from existing catalog"
        );
        return machine
            .categories()
            .map_err(|(_, guard)| map_guard_error("categories", &guard));
    }

    for file in scanner::list_image_files(&ctx.pipeline_config.categories_dir)? {
        let name = display_name(&file);
        let path = ctx.pipeline_config.categories_dir.join(&file);

        let url = match ctx.uploader.upload(&path, "categories").await {
            Ok(url) => {
                ctx.report.images_uploaded = ctx.report.images_uploaded.saturating_add(1);
                url
            }
            Err(err) => {
                warn!(
                    category = %name,
                    error = %err,
                    "category image upload failed; skipping category"
                );
                ctx.report.images_failed = ctx.report.images_failed.saturating_add(1);
                ctx.report.categories_skipped = ctx.report.categories_skipped.saturating_add(1);
                continue;
            }
        };

        let category = Category::new(name.clone(), url);
        let category_id = category.id.clone();
        match persist_record(ctx.db, category, "category", &name).await {
            PersistOutcome::Persisted => {
                ctx.resolver.insert_category(&name, category_id)?;
                ctx.report.categories_created = ctx.report.categories_created.saturating_add(1);
            }
            PersistOutcome::SkippedDuplicate | PersistOutcome::Failed => {
                ctx.report.categories_skipped = ctx.report.categories_skipped.saturating_add(1);
            }
        }
    }

    debug!(
        created = ctx.report.categories_created,
        skipped = ctx.report.categories_skipped,
        "categories ingested"
    );

    machine
        .categories()
        .map_err(|(_, guard)| map_guard_error("categories", &guard))
}

#[instrument(level = "trace", skip_all, fields(mode = ?ctx.mode))]
pub async fn ingest_subcategories(
    machine: CatalogMachine<(), CategoriesIngested>,
    ctx: &mut RunContext<'_>,
) -> Result<CatalogMachine<(), SubcategoriesIngested>, AppError> {
    if ctx.mode == IngestionMode::ProductsOnly {
        return machine
            .subcategories()
            .map_err(|(_, guard)| map_guard_error("subcategories", &guard));
    }

    for category_dir in scanner::list_subdirectories(&ctx.pipeline_config.subcategories_dir)? {
        let Some(category_id) = ctx
            .resolver
            .resolve_category(&category_dir)
            .map(str::to_string)
        else {
            warn!(
                category = %category_dir,
                "no category for directory; skipping its subcategories"
            );
            ctx.report.subcategories_skipped = ctx.report.subcategories_skipped.saturating_add(1);
            continue;
        };

        let dir_path = ctx.pipeline_config.subcategories_dir.join(&category_dir);
        for file in scanner::list_image_files(&dir_path)? {
            let name = display_name(&file);
            let path = dir_path.join(&file);

            let url = match ctx.uploader.upload(&path, "subcategories").await {
                Ok(url) => {
                    ctx.report.images_uploaded = ctx.report.images_uploaded.saturating_add(1);
                    url
                }
                Err(err) => {
                    warn!(
                        subcategory = %name,
                        error = %err,
                        "subcategory image upload failed; skipping subcategory"
                    );
                    ctx.report.images_failed = ctx.report.images_failed.saturating_add(1);
                    ctx.report.subcategories_skipped =
                        ctx.report.subcategories_skipped.saturating_add(1);
                    continue;
                }
            };

            let subcategory = Subcategory::new(name.clone(), url, category_id.clone());
            let subcategory_id = subcategory.id.clone();
            match persist_record(ctx.db, subcategory, "subcategory", &name).await {
                PersistOutcome::Persisted => {
                    ctx.resolver.insert_subcategory(
                        &category_dir,
                        &name,
                        subcategory_id,
                        category_id.clone(),
                    )?;
                    ctx.report.subcategories_created =
                        ctx.report.subcategories_created.saturating_add(1);
                }
                PersistOutcome::SkippedDuplicate | PersistOutcome::Failed => {
                    ctx.report.subcategories_skipped =
                        ctx.report.subcategories_skipped.saturating_add(1);
                }
            }
        }
    }

    debug!(
        created = ctx.report.subcategories_created,
        skipped = ctx.report.subcategories_skipped,
        "subcategories ingested"
    );

    machine
        .subcategories()
        .map_err(|(_, guard)| map_guard_error("subcategories", &guard))
}

#[instrument(level = "trace", skip_all, fields(mode = ?ctx.mode))]
pub async fn ingest_products(
    machine: CatalogMachine<(), SubcategoriesIngested>,
    ctx: &mut RunContext<'_>,
) -> Result<CatalogMachine<(), ProductsIngested>, AppError> {
    let products_dir = ctx.pipeline_config.products_dir.clone();
    if !products_dir.exists() {
        if ctx.mode == IngestionMode::ProductsOnly {
            return Err(AppError::NotFound(format!(
                "product directory not found: {}",
                products_dir.display()
            )));
        }
        info!(
            path = %products_dir.display(),
            "product directory absent; no products to ingest"
        );
        return machine
            .products()
            .map_err(|(_, guard)| map_guard_error("products", &guard));
    }

    for category_dir in scanner::list_subdirectories(&products_dir)? {
        let category_path = products_dir.join(&category_dir);
        for subcategory_dir in scanner::list_subdirectories(&category_path)? {
            let subcategory_path = category_path.join(&subcategory_dir);
            let product_dirs = scanner::list_subdirectories(&subcategory_path)?;

            let Some(parent) = ctx
                .resolver
                .resolve_subcategory(&category_dir, &subcategory_dir)
                .cloned()
            else {
                warn!(
                    key = %EntityResolver::composite_key(&category_dir, &subcategory_dir),
                    products = product_dirs.len(),
                    "no catalog entry for directory pair; skipping its products"
                );
                ctx.report.products_skipped = ctx
                    .report
                    .products_skipped
                    .saturating_add(product_dirs.len());
                continue;
            };

            for product_dir in product_dirs {
                ingest_single_product(ctx, &subcategory_path, &product_dir, &parent).await?;
            }
        }
    }

    debug!(
        created = ctx.report.products_created,
        skipped = ctx.report.products_skipped,
        images_uploaded = ctx.report.images_uploaded,
        images_failed = ctx.report.images_failed,
        "products ingested"
    );

    machine
        .products()
        .map_err(|(_, guard)| map_guard_error("products", &guard))
}

async fn ingest_single_product(
    ctx: &mut RunContext<'_>,
    subcategory_path: &Path,
    product_dir: &str,
    parent: &SubcategoryRef,
) -> Result<(), AppError> {
    let product_path = subcategory_path.join(product_dir);
    let images = scanner::list_image_files(&product_path)?;
    if images.is_empty() {
        warn!(product = %product_dir, "no image files; skipping product");
        ctx.report.products_skipped = ctx.report.products_skipped.saturating_add(1);
        return Ok(());
    }

    let uploader = ctx.uploader;
    let uploads = images
        .iter()
        .take(ctx.pipeline_config.max_images_per_product)
        .map(|file| {
            let path = product_path.join(file);
            async move { uploader.upload(&path, "products").await }
        });

    let mut urls = Vec::new();
    for result in join_all(uploads).await {
        match result {
            Ok(url) => {
                ctx.report.images_uploaded = ctx.report.images_uploaded.saturating_add(1);
                urls.push(url);
            }
            Err(err) => {
                warn!(
                    product = %product_dir,
                    error = %err,
                    "product image upload failed; dropping image"
                );
                ctx.report.images_failed = ctx.report.images_failed.saturating_add(1);
            }
        }
    }

    if urls.is_empty() {
        warn!(product = %product_dir, "every image upload failed; skipping product");
        ctx.report.products_skipped = ctx.report.products_skipped.saturating_add(1);
        return Ok(());
    }

    let attributes = ctx.synthesizer.synthesize(product_dir);
    let image_count = urls.len();
    let product = Product::new(
        product_dir.to_string(),
        urls,
        parent.category_id.clone(),
        parent.subcategory_id.clone(),
        attributes.price,
        attributes.unit,
        attributes.stock,
        attributes.discount,
        attributes.description,
    );

    match persist_record(ctx.db, product, "product", product_dir).await {
        PersistOutcome::Persisted => {
            ctx.report.products_created = ctx.report.products_created.saturating_add(1);
            debug!(product = %product_dir, images = image_count, "product created");
        }
        PersistOutcome::SkippedDuplicate | PersistOutcome::Failed => {
            ctx.report.products_skipped = ctx.report.products_skipped.saturating_add(1);
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum PersistOutcome {
    Persisted,
    SkippedDuplicate,
    Failed,
}

/// Persists one record, demoting per-record failures to warnings so a single
/// bad record cannot abort the run.
async fn persist_record<T>(db: &SurrealDbClient, item: T, kind: &str, name: &str) -> PersistOutcome
where
    T: StoredObject + Send + Sync + 'static,
{
    match db.store_item(item).await {
        Ok(Some(_)) => PersistOutcome::Persisted,
        Ok(None) => {
            warn!(record = kind, name = %name, "store returned no record; skipping");
            PersistOutcome::Failed
        }
        Err(surrealdb::Error::Db(surrealdb::error::Db::RecordExists { .. })) => {
            warn!(record = kind, name = %name, "record already exists; skipping");
            PersistOutcome::SkippedDuplicate
        }
        Err(err) => {
            warn!(record = kind, name = %name, error = %err, "failed to persist record; skipping");
            PersistOutcome::Failed
        }
    }
}

/// Entity name for an image file: the stem of its file name.
fn display_name(file_name: &str) -> String {
    Path::new(file_name).file_stem().map_or_else(
        || file_name.to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

fn map_guard_error(event: &str, guard: &GuardError) -> AppError {
    AppError::InternalError(format!(
        "invalid catalog ingestion transition during {event}: {guard:?}"
    ))
}
