//! Product repository for catalog queries.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use pixelport_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

/// Raw row as stored in `products`.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    image: String,
    category: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            image: row.image,
            category: row.category,
        }
    }
}

/// Repository for catalog reads. Stateless; the catalog is never written
/// from the storefront.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by a case-insensitive name
    /// substring and/or an exact category tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(
        &self,
        term: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, name, price, image, category FROM products WHERE 1=1",
        );

        if let Some(term) = term.filter(|t| !t.is_empty()) {
            query.push(" AND name ILIKE ");
            query.push_bind(format!("%{term}%"));
        }
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            query.push(" AND category = ");
            query.push_bind(category.to_owned());
        }
        query.push(" ORDER BY id");

        let rows: Vec<ProductRow> = query.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// List the distinct category tags, sorted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT category FROM products ORDER BY category")
                .fetch_all(self.pool)
                .await?;
        Ok(rows.into_iter().map(|(category,)| category).collect())
    }

    /// Fetch a single product. Used by cart-add to take the authoritative
    /// price snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price, image, category FROM products WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;
        Ok(row.map(Product::from))
    }
}
