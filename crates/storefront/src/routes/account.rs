//! Account route handlers (any authenticated principal).

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{RequireUser, set_current_user};
use crate::routes::auth::PrincipalView;
use crate::routes::checkout::OrderView;
use crate::state::AppState;

/// Account overview data.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub user: PrincipalView,
    pub order_count: usize,
}

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
}

/// Display the account overview.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Json<AccountView> {
    let order_count = state.orders().for_customer(user.id).await.len();

    Json(AccountView {
        user: PrincipalView::build(&user),
        order_count,
    })
}

/// Display the caller's order history.
pub async fn orders(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Json<Vec<OrderView>> {
    let currency = state.currency();
    let orders = state
        .orders()
        .for_customer(user.id)
        .await
        .iter()
        .map(|order| OrderView::build(order, currency))
        .collect();

    Json(orders)
}

/// Update profile fields.
///
/// Only profile data changes here; the role is untouched (role changes go
/// through the superadmin console).
#[instrument(skip(state, session, user))]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
    Form(form): Form<ProfileForm>,
) -> Result<Json<PrincipalView>> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_owned()));
    }

    let updated = state
        .users()
        .update_name(user.id, name.to_owned())
        .await
        .ok_or_else(|| AppError::NotFound(format!("user {}", user.id)))?;

    // Keep the session principal in sync with the store
    let current = updated.to_current();
    set_current_user(&session, &current).await?;

    Ok(Json(PrincipalView::build(&current)))
}
