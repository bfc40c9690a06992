//! Superadmin console route handlers (superadmin role only).

use axum::{
    Form, Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopsphere_core::{Role, UserId};

use crate::error::{AppError, Result};
use crate::middleware::RequireSuperAdmin;
use crate::models::StoredUser;
use crate::routes::checkout::OrderView;
use crate::state::AppState;

/// User management row data.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub join_date: DateTime<Utc>,
}

impl UserView {
    fn build(user: &StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            name: user.name.clone(),
            role: user.role,
            join_date: user.join_date,
        }
    }
}

/// Role change form data.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

/// Deletion result data.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedView {
    pub deleted: bool,
}

/// List all user accounts.
pub async fn users(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> Json<Vec<UserView>> {
    let users = state.users().all().await.iter().map(UserView::build).collect();
    Json(users)
}

/// Change a user's role.
///
/// This is the only place a role changes outside login/logout; the affected
/// user's next navigation re-evaluates every gate against the new role.
#[instrument(skip(state, admin))]
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<i64>,
    Form(form): Form<RoleForm>,
) -> Result<Json<UserView>> {
    let role: Role = form.role.parse().map_err(AppError::BadRequest)?;

    let user = state
        .users()
        .update_role(UserId::new(id), role)
        .await
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    tracing::info!(user_id = %user.id, %role, superadmin = %admin.email, "Role changed");
    Ok(Json(UserView::build(&user)))
}

/// Delete a user account.
#[instrument(skip(state, admin))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<i64>,
) -> Json<DeletedView> {
    let deleted = state.users().remove(UserId::new(id)).await;
    if deleted {
        tracing::info!(user_id = id, superadmin = %admin.email, "User deleted");
    }
    Json(DeletedView { deleted })
}

/// List every order across the store.
pub async fn orders(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> Json<Vec<OrderView>> {
    let currency = state.currency();
    let orders = state
        .orders()
        .all()
        .await
        .iter()
        .map(|order| OrderView::build(order, currency))
        .collect();

    Json(orders)
}
