//! Order repository: the checkout write path and receipt/history reads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use pixelport_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::cart::CartLine;
use crate::models::Order;

/// One joined row of an order's receipt: header columns repeated per line.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReceiptRow {
    /// Order ID.
    pub order_id: i32,
    /// Buyer's user ID.
    pub user_id: i32,
    /// Buyer display name.
    pub buyer_name: String,
    /// Order timestamp.
    pub created_at: DateTime<Utc>,
    /// Order total as persisted at checkout.
    pub total: Decimal,
    /// Product name for this line.
    pub product_name: String,
    /// Units bought.
    pub quantity: i32,
    /// Unit price snapshot at sale time.
    pub unit_price: Decimal,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    total: Decimal,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            total: row.total,
            created_at: row.created_at,
        }
    }
}

/// Repository for order persistence and retrieval.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist one order: the header row plus a batched multi-row insert of
    /// its lines, in a single transaction.
    ///
    /// The header insert must complete first to yield the generated order
    /// ID the lines reference. Nothing is committed unless both inserts
    /// succeed, so a failure can never leave an orphaned header.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement or the commit
    /// fails; the transaction is rolled back on drop.
    pub async fn create(
        &self,
        user_id: UserId,
        total: Decimal,
        lines: &[CartLine],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (order_id,): (i32,) =
            sqlx::query_as("INSERT INTO orders (user_id, total) VALUES ($1, $2) RETURNING id")
                .bind(user_id.as_i32())
                .bind(total)
                .fetch_one(&mut *tx)
                .await?;

        let mut insert = QueryBuilder::<Postgres>::new(
            "INSERT INTO order_lines (order_id, product_id, quantity, unit_price) ",
        );
        insert.push_values(lines, |mut row, line| {
            row.push_bind(order_id)
                .push_bind(line.product_id.as_i32())
                .push_bind(i32::try_from(line.quantity).unwrap_or(i32::MAX))
                .push_bind(line.unit_price);
        });
        insert.build().execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(OrderId::new(order_id))
    }

    /// Fetch the joined receipt rows for one order: header, buyer name, and
    /// one row per line with the product's name. Empty when the order does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn receipt_rows(&self, order_id: OrderId) -> Result<Vec<ReceiptRow>, RepositoryError> {
        let rows: Vec<ReceiptRow> = sqlx::query_as(
            "SELECT o.id AS order_id, o.user_id, u.name AS buyer_name, \
                    o.created_at, o.total, \
                    p.name AS product_name, l.quantity, l.unit_price \
             FROM orders o \
             JOIN users u ON u.id = o.user_id \
             JOIN order_lines l ON l.order_id = o.id \
             JOIN products p ON p.id = l.product_id \
             WHERE o.id = $1 \
             ORDER BY l.product_id",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// All orders owned by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, user_id, total, created_at FROM orders \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
