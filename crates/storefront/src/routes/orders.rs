//! Order history and PDF ticket route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::header,
    response::{AppendHeaders, IntoResponse, Response},
};
use tower_sessions::Session;

use pixelport_core::OrderId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::services::{ReceiptService, receipt};
use crate::state::AppState;

use super::Nav;

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/history.html")]
pub struct HistoryTemplate {
    pub orders: Vec<Order>,
    pub nav: Nav,
}

/// List the logged-in user's past orders, newest first.
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<HistoryTemplate> {
    let orders = ReceiptService::new(state.pool()).history(user.id).await?;
    let nav = Nav::load(&session).await?;

    Ok(HistoryTemplate { orders, nav })
}

/// Stream the PDF receipt for one of the user's orders.
///
/// Another user's order (or an unknown ID) is a 404, never an empty
/// document.
pub async fn ticket(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Response> {
    let order_id = OrderId::new(id);
    let built = ReceiptService::new(state.pool()).build(order_id).await?;

    if built.user_id != user.id {
        return Err(AppError::NotFound(format!("order {order_id}")));
    }

    let bytes = receipt::render_pdf(&built)?;

    let headers = AppendHeaders([
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"ticket-{order_id}.pdf\""),
        ),
    ]);

    Ok((headers, bytes).into_response())
}
