//! Cart route handlers.
//!
//! The cart itself is a value in the session (see `models::cart`); these
//! handlers load it, apply one mutation, and write it back. The add flow
//! takes the price snapshot from the catalog row, not the request body.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use pixelport_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session::{load_cart, save_cart};
use crate::models::{Cart, QuantityChange, clamp_quantity};
use crate::state::AppState;

use super::Nav;

/// Add-to-cart form data.
///
/// `quantity` stays a raw string so bad input can be coerced to 1 instead
/// of rejected.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i32,
    pub quantity: Option<String>,
}

/// Quantity-update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: i32,
    pub action: QuantityChange,
}

/// JSON body returned by the quantity-update endpoint.
#[derive(Debug, Serialize)]
pub struct CartUpdateResponse {
    pub success: bool,
    #[serde(rename = "newQty")]
    pub new_qty: u32,
    pub total: Decimal,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub cart: Cart,
    pub nav: Nav,
}

/// Display the cart page.
pub async fn show(session: Session) -> Result<CartTemplate> {
    let cart = load_cart(&session).await?;
    let nav = Nav::load(&session).await?;
    Ok(CartTemplate { cart, nav })
}

/// Add a product to the cart and bounce back to the catalog with a toast.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product_id = ProductId::new(form.id);
    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let quantity = clamp_quantity(form.quantity.as_deref());

    let mut cart = load_cart(&session).await?;
    cart.add(&product, quantity);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/?added=true"))
}

/// Remove a line item. Absence is not an error.
pub async fn remove(session: Session, Path(id): Path<i32>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    cart.remove(ProductId::new(id));
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Apply a one-unit quantity change and return the new state as JSON.
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Json<CartUpdateResponse>> {
    let mut cart = load_cart(&session).await?;
    let update = cart.update(ProductId::new(form.id), form.action);
    save_cart(&session, &cart).await?;

    Ok(Json(CartUpdateResponse {
        success: true,
        new_qty: update.new_quantity,
        total: update.total,
    }))
}
