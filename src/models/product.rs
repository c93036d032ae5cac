use serde::{Deserialize, Serialize};

/// A price-list row. All data columns are free-text and optional; only the id
/// is server-assigned and stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub article_no: Option<String>,
    pub product_service: Option<String>,
    pub in_price: Option<String>,
    pub price: Option<String>,
    pub unit: Option<String>,
    pub in_stock: Option<String>,
    pub description: Option<String>,
}

/// The writable subset of a product. A PUT replaces every column with these
/// values; fields absent from the request body become NULL. Unknown JSON keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFields {
    pub article_no: Option<String>,
    pub product_service: Option<String>,
    pub in_price: Option<String>,
    pub price: Option<String>,
    pub unit: Option<String>,
    pub in_stock: Option<String>,
    pub description: Option<String>,
}

impl From<&Product> for ProductFields {
    fn from(p: &Product) -> Self {
        ProductFields {
            article_no: p.article_no.clone(),
            product_service: p.product_service.clone(),
            in_price: p.in_price.clone(),
            price: p.price.clone(),
            unit: p.unit.clone(),
            in_stock: p.in_stock.clone(),
            description: p.description.clone(),
        }
    }
}
