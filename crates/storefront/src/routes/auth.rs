//! Authentication route handlers.
//!
//! Login replaces the session principal wholesale; logout flushes the whole
//! session. The login page is also the redirect target the authorization
//! gate sends denied guests to, carrying the originally requested path.

use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use shopsphere_core::{Role, UserId};

use crate::error::Result;
use crate::middleware::{clear_current_user, set_current_user};
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form and Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Path to return to after login (set by the authorization gate).
    pub return_to: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Query parameters on the login prompt.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub return_to: Option<String>,
}

// =============================================================================
// Views
// =============================================================================

/// The session principal as shown to the client.
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalView {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl PrincipalView {
    pub(crate) fn build(user: &crate::models::CurrentUser) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Login prompt data.
#[derive(Debug, Clone, Serialize)]
pub struct LoginPromptView {
    pub message: &'static str,
    pub return_to: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login prompt.
///
/// This is where the gate redirects denied guests; `return_to` is echoed so
/// the client can post it back with the credentials. The prompt itself is
/// anonymous-only: an authenticated principal is sent home.
pub async fn login_page(
    _guest: crate::middleware::RequireGuest,
    Query(query): Query<LoginQuery>,
) -> Json<LoginPromptView> {
    Json(LoginPromptView {
        message: "authentication required",
        return_to: sanitize_return_path(query.return_to),
    })
}

/// Handle login form submission.
///
/// On success the session principal is replaced wholesale. If the gate
/// carried a return path, the response redirects there; otherwise the
/// principal is returned.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.users());
    let user = auth.login(&form.email, &form.password).await?;

    let current = user.to_current();
    set_current_user(&session, &current).await?;
    tracing::info!(user_id = %current.id, role = %current.role, "Login");

    let response = match sanitize_return_path(form.return_to) {
        Some(path) => Redirect::to(&path).into_response(),
        None => Json(PrincipalView::build(&current)).into_response(),
    };
    Ok(response)
}

/// Handle registration form submission.
///
/// New accounts get the `user` role and are logged in immediately.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.users());
    let user = auth.register(&form.email, &form.password, &form.name).await?;

    let current = user.to_current();
    set_current_user(&session, &current).await?;
    tracing::info!(user_id = %current.id, "Registered");

    Ok((StatusCode::CREATED, Json(PrincipalView::build(&current))).into_response())
}

/// Handle logout.
///
/// Clears the principal and destroys the whole session (cart included).
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_user(&session).await?;

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Ok(Redirect::to("/").into_response())
}

/// Only accept same-site absolute paths as post-login destinations.
fn sanitize_return_path(path: Option<String>) -> Option<String> {
    path.filter(|p| p.starts_with('/') && !p.starts_with("//"))
}
