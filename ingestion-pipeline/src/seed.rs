use common::{
    error::AppError,
    storage::{
        db::SurrealDbClient,
        types::{category::Category, product::Product, subcategory::Subcategory},
    },
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub subcategories: usize,
    pub products: usize,
}

const CATEGORY_SEED: [(&str, &str); 8] = [
    (
        "Vegetables & Fruits",
        "https://cdn-icons-png.flaticon.com/512/135/135620.png",
    ),
    (
        "Dairy & Breakfast",
        "https://cdn-icons-png.flaticon.com/512/3050/3050158.png",
    ),
    (
        "Munchies",
        "https://cdn-icons-png.flaticon.com/512/3480/3480822.png",
    ),
    (
        "Cold Drinks & Juices",
        "https://cdn-icons-png.flaticon.com/512/2718/2718537.png",
    ),
    (
        "Instant & Frozen Food",
        "https://cdn-icons-png.flaticon.com/512/1046/1046784.png",
    ),
    (
        "Tea, Coffee & Health Drinks",
        "https://cdn-icons-png.flaticon.com/512/924/924514.png",
    ),
    (
        "Bakery & Biscuits",
        "https://cdn-icons-png.flaticon.com/512/3081/3081840.png",
    ),
    (
        "Sweet Tooth",
        "https://cdn-icons-png.flaticon.com/512/2553/2553691.png",
    ),
];

/// Subcategory name and the index of its parent in [`CATEGORY_SEED`].
const SUBCATEGORY_SEED: [(&str, usize); 8] = [
    ("Fresh Vegetables", 0),
    ("Fresh Fruits", 0),
    ("Milk", 1),
    ("Bread & Pav", 1),
    ("Chips & Crisps", 2),
    ("Namkeen", 2),
    ("Soft Drinks", 3),
    ("Juices", 3),
];

struct ProductSeed {
    name: &'static str,
    image: &'static str,
    unit: &'static str,
    stock: u32,
    price: u32,
    discount: u32,
    description: &'static str,
    category: usize,
    subcategory: usize,
}

const PRODUCT_SEED: [ProductSeed; 10] = [
    ProductSeed {
        name: "Fresh Tomato",
        image: "https://cdn-icons-png.flaticon.com/512/1202/1202045.png",
        unit: "1 kg",
        stock: 100,
        price: 40,
        discount: 5,
        description: "Fresh and juicy tomatoes",
        category: 0,
        subcategory: 0,
    },
    ProductSeed {
        name: "Fresh Potato",
        image: "https://cdn-icons-png.flaticon.com/512/2224/2224066.png",
        unit: "1 kg",
        stock: 150,
        price: 30,
        discount: 0,
        description: "Farm fresh potatoes",
        category: 0,
        subcategory: 0,
    },
    ProductSeed {
        name: "Fresh Onion",
        image: "https://cdn-icons-png.flaticon.com/512/1652/1652121.png",
        unit: "1 kg",
        stock: 120,
        price: 35,
        discount: 10,
        description: "Premium quality onions",
        category: 0,
        subcategory: 0,
    },
    ProductSeed {
        name: "Apple",
        image: "https://cdn-icons-png.flaticon.com/512/415/415733.png",
        unit: "1 kg",
        stock: 80,
        price: 150,
        discount: 15,
        description: "Sweet and crunchy apples",
        category: 0,
        subcategory: 1,
    },
    ProductSeed {
        name: "Banana",
        image: "https://cdn-icons-png.flaticon.com/512/2909/2909761.png",
        unit: "1 dozen",
        stock: 200,
        price: 50,
        discount: 0,
        description: "Fresh bananas",
        category: 0,
        subcategory: 1,
    },
    ProductSeed {
        name: "Amul Milk",
        image: "https://cdn-icons-png.flaticon.com/512/869/869636.png",
        unit: "500 ml",
        stock: 100,
        price: 28,
        discount: 0,
        description: "Full cream milk",
        category: 1,
        subcategory: 2,
    },
    ProductSeed {
        name: "Brown Bread",
        image: "https://cdn-icons-png.flaticon.com/512/3081/3081986.png",
        unit: "400g",
        stock: 50,
        price: 45,
        discount: 5,
        description: "Healthy brown bread",
        category: 1,
        subcategory: 3,
    },
    ProductSeed {
        name: "Lays Chips",
        image: "https://cdn-icons-png.flaticon.com/512/2553/2553642.png",
        unit: "50g",
        stock: 200,
        price: 20,
        discount: 0,
        description: "Classic salted chips",
        category: 2,
        subcategory: 4,
    },
    ProductSeed {
        name: "Coca Cola",
        image: "https://cdn-icons-png.flaticon.com/512/2405/2405479.png",
        unit: "750 ml",
        stock: 150,
        price: 40,
        discount: 10,
        description: "Refreshing cold drink",
        category: 3,
        subcategory: 6,
    },
    ProductSeed {
        name: "Mango Juice",
        image: "https://cdn-icons-png.flaticon.com/512/1625/1625048.png",
        unit: "1 L",
        stock: 80,
        price: 80,
        discount: 5,
        description: "Fresh mango juice",
        category: 3,
        subcategory: 7,
    },
];

/// Clears the catalog and loads the built-in sample dataset.
///
/// Seed subcategories carry no image of their own. Links are resolved from
/// the constant tables before anything is written, so a partial write cannot
/// leave dangling references behind.
pub async fn seed_sample_catalog(db: &SurrealDbClient) -> Result<SeedReport, AppError> {
    db.drop_table::<Product>().await?;
    db.drop_table::<Subcategory>().await?;
    db.drop_table::<Category>().await?;

    let categories: Vec<Category> = CATEGORY_SEED
        .iter()
        .map(|(name, image)| Category::new((*name).to_string(), (*image).to_string()))
        .collect();

    let subcategories: Vec<Subcategory> = SUBCATEGORY_SEED
        .iter()
        .map(|(name, parent)| {
            Subcategory::new(
                (*name).to_string(),
                String::new(),
                categories[*parent].id.clone(),
            )
        })
        .collect();

    let products: Vec<Product> = PRODUCT_SEED
        .iter()
        .map(|seed| {
            Product::new(
                seed.name.to_string(),
                vec![seed.image.to_string()],
                categories[seed.category].id.clone(),
                subcategories[seed.subcategory].id.clone(),
                seed.price,
                seed.unit.to_string(),
                seed.stock,
                seed.discount,
                seed.description.to_string(),
            )
        })
        .collect();

    let categories = db.insert_many(categories).await?;
    let subcategories = db.insert_many(subcategories).await?;
    let products = db.insert_many(products).await?;

    let report = SeedReport {
        categories: categories.len(),
        subcategories: subcategories.len(),
        products: products.len(),
    };
    info!(
        categories = report.categories,
        subcategories = report.subcategories,
        products = report.products,
        "sample catalog seeded"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn setup_db() -> SurrealDbClient {
        SurrealDbClient::memory("seed_test", &Uuid::new_v4().to_string())
            .await
            .expect("Failed to create in-memory SurrealDB")
    }

    #[tokio::test]
    async fn seeds_the_full_sample_dataset() {
        let db = setup_db().await;

        let report = seed_sample_catalog(&db).await.expect("seed succeeds");
        assert_eq!(report.categories, 8);
        assert_eq!(report.subcategories, 8);
        assert_eq!(report.products, 10);

        let categories: Vec<Category> = db.get_all_stored_items().await.expect("fetch categories");
        let subcategories: Vec<Subcategory> = db
            .get_all_stored_items()
            .await
            .expect("fetch subcategories");
        let products: Vec<Product> = db.get_all_stored_items().await.expect("fetch products");

        let vegetables = categories
            .iter()
            .find(|c| c.name == "Vegetables & Fruits")
            .expect("seeded category");
        let fresh_vegetables = subcategories
            .iter()
            .find(|s| s.name == "Fresh Vegetables")
            .expect("seeded subcategory");
        assert_eq!(fresh_vegetables.category, vec![vegetables.id.clone()]);

        let tomato = products
            .iter()
            .find(|p| p.name == "Fresh Tomato")
            .expect("seeded product");
        assert_eq!(tomato.category, vec![vegetables.id.clone()]);
        assert_eq!(tomato.subcategory, vec![fresh_vegetables.id.clone()]);
        assert_eq!(tomato.price, 40);
        assert_eq!(tomato.unit, "1 kg");
    }

    #[tokio::test]
    async fn reseeding_replaces_rather_than_accumulates() {
        let db = setup_db().await;

        seed_sample_catalog(&db).await.expect("first seed");
        let report = seed_sample_catalog(&db).await.expect("second seed");
        assert_eq!(report.categories, 8);

        let products: Vec<Product> = db.get_all_stored_items().await.expect("fetch products");
        assert_eq!(products.len(), 10);
    }
}
