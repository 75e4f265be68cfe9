//! Catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::state::AppState;

use super::Nav;

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Free-text name substring filter.
    pub search: Option<String>,
    /// Exact category filter.
    pub cat: Option<String>,
    /// Set by the cart-add redirect to show the toast.
    pub added: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub active_cat: String,
    pub active_search: String,
    pub show_toast: bool,
    pub nav: Nav,
}

/// Display the catalog, filtered by the query parameters.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogTemplate> {
    let repo = ProductRepository::new(state.pool());
    let products = repo
        .search(query.search.as_deref(), query.cat.as_deref())
        .await?;
    let categories = repo.categories().await?;
    let nav = Nav::load(&session).await?;

    Ok(CatalogTemplate {
        products,
        categories,
        active_cat: query.cat.unwrap_or_default(),
        active_search: query.search.unwrap_or_default(),
        show_toast: query.added.as_deref() == Some("true"),
        nav,
    })
}
