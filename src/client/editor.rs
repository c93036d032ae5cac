use crate::models::product::{Product, ProductFields};

/// The editable columns of a price-list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    ArticleNo,
    ProductService,
    InPrice,
    Price,
    Unit,
    InStock,
    Description,
}

/// What a blur on a row should send to the backend. Rows still carrying a
/// temporary id have never been persisted, so they create; everything else
/// updates in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePlan {
    Create { temp_id: i64, fields: ProductFields },
    Update { id: i64, fields: ProductFields },
}

/// Local state of the price-list table. Field edits land here immediately
/// (optimistic); the backend only hears about a row when its field loses
/// focus, so write volume is one request per field-edit session, not per
/// keystroke. A failed save is the caller's to log; the local edit stands.
#[derive(Debug, Default)]
pub struct PriceListEditor {
    rows: Vec<Product>,
    next_temp_id: i64,
    pub search_article: String,
    pub search_product: String,
}

impl PriceListEditor {
    pub fn new(rows: Vec<Product>) -> Self {
        Self {
            rows,
            next_temp_id: -1,
            search_article: String::new(),
            search_product: String::new(),
        }
    }

    /// Temporary ids are negative, outside the server's AUTOINCREMENT space,
    /// so they can never collide with a server-assigned id.
    pub fn is_temp(id: i64) -> bool {
        id < 0
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    /// Both search boxes must match (case-insensitive substring); an empty
    /// box matches everything.
    pub fn filtered(&self) -> Vec<&Product> {
        let article = self.search_article.to_lowercase();
        let product = self.search_product.to_lowercase();
        self.rows
            .iter()
            .filter(|p| {
                let article_match = article.is_empty()
                    || p.article_no
                        .as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(&article));
                let product_match = product.is_empty()
                    || p.product_service
                        .as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(&product));
                article_match && product_match
            })
            .collect()
    }

    /// Applies an edit to local state only. Returns false for an unknown id.
    pub fn edit_field(&mut self, id: i64, field: ProductField, value: impl Into<String>) -> bool {
        let Some(row) = self.rows.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        let value = Some(value.into());
        match field {
            ProductField::ArticleNo => row.article_no = value,
            ProductField::ProductService => row.product_service = value,
            ProductField::InPrice => row.in_price = value,
            ProductField::Price => row.price = value,
            ProductField::Unit => row.unit = value,
            ProductField::InStock => row.in_stock = value,
            ProductField::Description => row.description = value,
        }
        true
    }

    /// Snapshot to persist when a field on this row loses focus.
    pub fn commit_on_blur(&self, id: i64) -> Option<SavePlan> {
        let row = self.rows.iter().find(|p| p.id == id)?;
        let fields = ProductFields::from(row);
        Some(if Self::is_temp(id) {
            SavePlan::Create { temp_id: id, fields }
        } else {
            SavePlan::Update { id, fields }
        })
    }

    /// Prepends a blank row under a fresh temporary id and returns that id.
    /// The row is visible immediately, before any backend round-trip.
    pub fn add_new(&mut self) -> i64 {
        let id = self.next_temp_id;
        self.next_temp_id -= 1;
        self.rows.insert(
            0,
            Product {
                id,
                article_no: None,
                product_service: None,
                in_price: None,
                price: None,
                unit: None,
                in_stock: None,
                description: None,
            },
        );
        id
    }

    /// Swaps a temporary row for the server-created product once the create
    /// round-trip completes, keeping the row's position.
    pub fn reconcile(&mut self, temp_id: i64, created: Product) -> bool {
        match self.rows.iter_mut().find(|p| p.id == temp_id) {
            Some(row) => {
                *row = created;
                true
            }
            None => false,
        }
    }

    /// Drops a row locally after a delete (or to undo a failed create).
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.rows.len();
        self.rows.retain(|p| p.id != id);
        self.rows.len() < before
    }
}
