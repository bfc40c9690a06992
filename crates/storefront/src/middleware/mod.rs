//! Request middleware and extractors.

pub mod auth;
pub mod session;

pub use auth::{
    CurrentPrincipal, RequireAdmin, RequireGuest, RequireSuperAdmin, RequireUser,
    clear_current_user, set_current_user,
};
pub use session::create_session_layer;
