//! Authentication route handlers: login, registration, logout.
//!
//! Domain failures (wrong password, taken email) re-render the form with
//! an inline message; only infrastructure failures become error responses.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::set_current_user;
use crate::models::CurrentUser;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

use super::Nav;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub nav: Nav,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub nav: Nav,
}

/// Display the login page.
pub async fn login_page(session: Session) -> Result<LoginTemplate> {
    Ok(LoginTemplate {
        error: None,
        nav: Nav::load(&session).await?,
    })
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                name: user.name,
                email: user.email,
            };
            set_current_user(&session, &current).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::Repository(e)) => Err(AppError::Database(e)),
        Err(e @ AuthError::PasswordHash) => Err(AppError::Auth(e)),
        Err(_) => {
            tracing::debug!(email = %form.email, "login rejected");
            Ok(LoginTemplate {
                error: Some("Invalid email or password".to_string()),
                nav: Nav::load(&session).await?,
            }
            .into_response())
        }
    }
}

/// Display the registration page.
pub async fn register_page(session: Session) -> Result<RegisterTemplate> {
    Ok(RegisterTemplate {
        error: None,
        nav: Nav::load(&session).await?,
    })
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    match AuthService::new(state.pool())
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "account registered");
            Ok(Redirect::to("/login").into_response())
        }
        Err(AuthError::Repository(e)) => Err(AppError::Database(e)),
        Err(e @ AuthError::PasswordHash) => Err(AppError::Auth(e)),
        Err(e) => {
            let message = match e {
                AuthError::EmailTaken => "That email is already registered".to_string(),
                AuthError::InvalidEmail(err) => err.to_string(),
                AuthError::WeakPassword(msg) => msg,
                _ => "Registration failed".to_string(),
            };
            Ok(RegisterTemplate {
                error: Some(message),
                nav: Nav::load(&session).await?,
            }
            .into_response())
        }
    }
}

/// End the session and return to the catalog.
pub async fn logout(session: Session) -> Result<Redirect> {
    session.flush().await?;
    Ok(Redirect::to("/"))
}
