//! Authorization extractors.
//!
//! Each extractor evaluates a [`RouteRule`] against the session principal on
//! every request, so a role change (login, logout, role edit) changes the
//! decision on the next navigation. A denial is not an error: the rejection
//! renders as the redirect the rule decided on.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use shopsphere_core::Role;
use shopsphere_core::authz::{AccessDecision, RedirectTarget, RouteRule};

use crate::models::{CurrentUser, session_keys};

/// Rule for routes any authenticated principal may use.
fn user_rule() -> RouteRule {
    RouteRule::new([Role::User, Role::Admin, Role::SuperAdmin])
}

/// Rule for the admin console.
fn admin_rule() -> RouteRule {
    RouteRule::new([Role::Admin, Role::SuperAdmin])
}

/// Rule for the superadmin console.
fn superadmin_rule() -> RouteRule {
    RouteRule::new([Role::SuperAdmin])
}

/// Rule for anonymous-only routes (the login prompt).
fn guest_rule() -> RouteRule {
    RouteRule::new([Role::Guest])
}

/// Rejection carrying the redirect a denied principal is sent on.
pub struct GateRejection(RedirectTarget);

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let RedirectTarget { path, return_to } = self.0;
        let location = match return_to {
            Some(from) => format!("{path}?return_to={}", urlencoding::encode(&from)),
            None => path,
        };
        Redirect::to(&location).into_response()
    }
}

/// Read the session principal, if any.
///
/// A missing session, a missing entry, or an undeserializable entry all mean
/// "guest" - authorization never fails on bad session state.
async fn read_principal(parts: &mut Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Evaluate a rule for the request and hand back the admitted principal.
async fn gate(parts: &mut Parts, rule: &RouteRule) -> Result<CurrentUser, GateRejection> {
    let principal = read_principal(parts).await;
    let role = principal.as_ref().map_or(Role::Guest, |user| user.role);
    // Nested routers strip their prefix from `parts.uri`; the original
    // request path is what the redirect must return the user to.
    let requested = parts
        .extensions
        .get::<axum::extract::OriginalUri>()
        .map_or_else(|| parts.uri.path().to_owned(), |uri| uri.path().to_owned());
    let requested = requested.as_str();

    match rule.evaluate(role, requested) {
        AccessDecision::Granted => principal.ok_or_else(|| {
            // A granted guest can only happen on a public rule; the Require*
            // extractors all carry non-empty allow-lists, so treat it as a
            // missing login.
            GateRejection(RedirectTarget {
                path: shopsphere_core::authz::DEFAULT_LOGIN_PATH.to_owned(),
                return_to: Some(requested.to_owned()),
            })
        }),
        AccessDecision::Redirect(target) => Err(GateRejection(target)),
    }
}

/// Extractor that optionally gets the current principal.
///
/// Never rejects; an anonymous request yields `None`.
pub struct CurrentPrincipal(pub Option<CurrentUser>);

impl CurrentPrincipal {
    /// The effective role, defaulting to guest.
    #[must_use]
    pub fn role(&self) -> Role {
        self.0.as_ref().map_or(Role::Guest, |user| user.role)
    }
}

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_principal(parts).await))
    }
}

/// Extractor that requires any authenticated principal.
///
/// Guests are redirected to the login page with the requested path carried
/// along.
///
/// # Example
///
/// ```rust,ignore
/// async fn account_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        gate(parts, &user_rule()).await.map(Self)
    }
}

/// Extractor that requires the admin console allow-list (admin or superadmin).
///
/// Guests are redirected to login; authenticated principals without the role
/// are redirected home (privilege escalation attempt).
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        gate(parts, &admin_rule()).await.map(Self)
    }
}

/// Extractor that requires the superadmin role.
pub struct RequireSuperAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        gate(parts, &superadmin_rule()).await.map(Self)
    }
}

/// Extractor for anonymous-only routes.
///
/// An already-authenticated principal has nothing to do on the login prompt
/// and is sent home instead.
pub struct RequireGuest;

impl<S> FromRequestParts<S> for RequireGuest
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = read_principal(parts).await;
        let role = principal.as_ref().map_or(Role::Guest, |user| user.role);

        match guest_rule().evaluate(role, parts.uri.path()) {
            AccessDecision::Granted => Ok(Self),
            AccessDecision::Redirect(target) => Err(GateRejection(target)),
        }
    }
}

/// Helper to set the current principal in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current principal from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
