use sqlx::sqlite::SqlitePool;

use crate::models::product::{Product, ProductFields};

/// All products, id ascending. No pagination; callers filter client-side.
pub async fn list(db: &SqlitePool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn create(db: &SqlitePool, fields: &ProductFields) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (article_no, product_service, in_price, price, unit, in_stock, description) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&fields.article_no)
    .bind(&fields.product_service)
    .bind(&fields.in_price)
    .bind(&fields.price)
    .bind(&fields.unit)
    .bind(&fields.in_stock)
    .bind(&fields.description)
    .fetch_one(db)
    .await
}

/// Full-row replace. Concurrent updates to the same id are last-write-wins;
/// there is no version check. Returns false when the id does not exist.
pub async fn update(
    db: &SqlitePool,
    id: i64,
    fields: &ProductFields,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE products SET article_no = ?, product_service = ?, in_price = ?, price = ?, \
         unit = ?, in_stock = ?, description = ? WHERE id = ?",
    )
    .bind(&fields.article_no)
    .bind(&fields.product_service)
    .bind(&fields.in_price)
    .bind(&fields.price)
    .bind(&fields.unit)
    .bind(&fields.in_stock)
    .bind(&fields.description)
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Permanent removal. The id is never reused for a later product.
pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
