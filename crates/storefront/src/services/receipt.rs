//! Receipt and order-history service.
//!
//! Reconstructs a past order from its persisted rows and renders it as a
//! PDF ticket. History is a plain newest-first listing.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use pixelport_core::{OrderId, UserId};

use crate::db::RepositoryError;
use crate::db::orders::{OrderRepository, ReceiptRow};
use crate::models::{Order, Receipt, ReceiptLine};

/// Errors from receipt building or rendering.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// No order with that ID (or it has no lines).
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// PDF rendering failed.
    #[error("pdf rendering failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Receipt and history service.
pub struct ReceiptService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> ReceiptService<'a> {
    /// Create a new receipt service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Reconstruct the receipt for one order.
    ///
    /// # Errors
    ///
    /// Returns `ReceiptError::NotFound` if the join yields zero rows.
    pub async fn build(&self, order_id: OrderId) -> Result<Receipt, ReceiptError> {
        let rows = self.orders.receipt_rows(order_id).await?;
        assemble(rows).ok_or(ReceiptError::NotFound(order_id))
    }

    /// All orders owned by `user_id`, newest first. Empty is fine.
    ///
    /// # Errors
    ///
    /// Returns `ReceiptError::Repository` if the query fails.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<Order>, ReceiptError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }
}

/// Fold the joined rows into a receipt. `None` when there are no rows.
///
/// Every row repeats the header columns; the header is taken from the
/// first row and each row contributes one line.
fn assemble(rows: Vec<ReceiptRow>) -> Option<Receipt> {
    let first = rows.first()?;

    let mut receipt = Receipt {
        order_id: OrderId::new(first.order_id),
        user_id: UserId::new(first.user_id),
        buyer_name: first.buyer_name.clone(),
        created_at: first.created_at,
        grand_total: first.total,
        lines: Vec::with_capacity(rows.len()),
    };

    for row in &rows {
        receipt.lines.push(ReceiptLine {
            quantity: row.quantity,
            product_name: row.product_name.clone(),
            line_total: row.unit_price * Decimal::from(row.quantity),
        });
    }

    Some(receipt)
}

/// Render a receipt as a single-page A4 PDF.
///
/// Layout mirrors the printed ticket: centered store title, order header,
/// one line per item, grand total at the bottom right.
///
/// # Errors
///
/// Returns `ReceiptError::Pdf` if the document cannot be built.
pub fn render_pdf(receipt: &Receipt) -> Result<Vec<u8>, ReceiptError> {
    let (doc, page, layer) = PdfDocument::new("Pixelport receipt", Mm(210.0), Mm(297.0), "receipt");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let layer = doc.get_page(page).get_layer(layer);

    layer.use_text("PIXELPORT", 22.0, Mm(78.0), Mm(272.0), &bold);
    layer.use_text(
        format!(
            "Order #{} | {}",
            receipt.order_id,
            receipt.created_at.format("%Y-%m-%d %H:%M")
        ),
        10.0,
        Mm(70.0),
        Mm(263.0),
        &regular,
    );
    layer.use_text(
        format!("Sold to: {}", receipt.buyer_name),
        10.0,
        Mm(70.0),
        Mm(258.0),
        &regular,
    );

    let mut y = 244.0;
    for line in &receipt.lines {
        layer.use_text(
            format!(
                "{} x {}  -  ${:.2}",
                line.quantity, line.product_name, line.line_total
            ),
            12.0,
            Mm(25.0),
            Mm(y),
            &regular,
        );
        y -= 7.0;
    }

    layer.use_text(
        format!("TOTAL PAID: ${:.2}", receipt.grand_total),
        16.0,
        Mm(120.0),
        Mm(y - 12.0),
        &bold,
    );

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(product: &str, quantity: i32, unit_price: &str) -> ReceiptRow {
        ReceiptRow {
            order_id: 7,
            user_id: 3,
            buyer_name: "Ada".to_string(),
            created_at: Utc::now(),
            total: "25.00".parse().unwrap(),
            product_name: product.to_string(),
            quantity,
            unit_price: unit_price.parse().unwrap(),
        }
    }

    #[test]
    fn assemble_returns_none_for_zero_rows() {
        assert!(assemble(Vec::new()).is_none());
    }

    #[test]
    fn assemble_builds_header_and_lines() {
        let receipt = assemble(vec![row("Asteroid Rally", 2, "10.00"), row("Moon Cab", 1, "5.00")])
            .unwrap();

        assert_eq!(receipt.order_id, OrderId::new(7));
        assert_eq!(receipt.buyer_name, "Ada");
        assert_eq!(receipt.grand_total, "25.00".parse().unwrap());
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].line_total, "20.00".parse().unwrap());
        assert_eq!(receipt.lines[1].line_total, "5.00".parse().unwrap());
    }

    #[test]
    fn rendered_pdf_has_pdf_magic_bytes() {
        let receipt = assemble(vec![row("Asteroid Rally", 2, "10.00")]).unwrap();
        let bytes = render_pdf(&receipt).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
