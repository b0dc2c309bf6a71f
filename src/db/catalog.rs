/// Built-in product catalog
///
/// A small fixed grocery catalog, priced in rupees. Used to seed the
/// products table and as a standalone `CatalogSource`.

use crate::db::models::CatalogProduct;
use crate::db::store::CatalogSource;
use crate::error::Result;

pub struct StaticCatalog {
    products: Vec<CatalogProduct>,
}

impl StaticCatalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        let rows: &[(&str, &str, &str, f64)] = &[
            ("Amul Gold Milk 1L", "Amul", "Dairy", 65.0),
            ("Britannia White Bread 400g", "Britannia", "Bakery", 35.0),
            ("Parle G Biscuits 300g", "Parle", "Snacks", 25.0),
            ("Tata Salt Iodized 1kg", "Tata", "Spices", 28.0),
            ("Colgate Toothpaste 100g", "Colgate", "Household", 90.0),
            ("Dove Shampoo 340ml", "Dove", "Household", 250.0),
            ("Almond Milk (Alpro) 1L", "Alpro", "Dairy", 240.0),
            ("Apple - Red Delicious (1kg)", "FreshFarm", "Produce", 180.0),
            ("Minute Maid Orange Juice 1L", "Minute Maid", "Drinks", 145.0),
            ("Organic Bananas (1 dozen)", "GreenLeaf", "Produce", 60.0),
            ("Maggi Masala Noodles 2x70g", "Maggi", "Snacks", 20.0),
            ("Saffola Gold Oil 1L", "Saffola", "Household", 220.0),
            ("Bread - Whole Wheat 400g", "LocalBakery", "Bakery", 40.0),
            ("Paneer 200g", "LocalDairy", "Dairy", 110.0),
            ("Oreo Chocolate Biscuits 150g", "Oreo", "Snacks", 60.0),
        ];

        let products = rows
            .iter()
            .enumerate()
            .map(|(i, (name, brand, category, price))| {
                CatalogProduct::new(i as i64 + 1, name, brand, category, *price)
            })
            .collect();

        Self { products }
    }
}

impl CatalogSource for StaticCatalog {
    async fn all_products(&self) -> Result<Vec<CatalogProduct>> {
        Ok(self.products.clone())
    }
}
