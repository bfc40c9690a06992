//! Role-based route authorization.
//!
//! A [`RouteRule`] is the allow-list attached to a protected route group; a
//! rule with an empty allow-list describes a public route. Evaluation is a
//! pure decision: it never fails, and a denial is not an error but a
//! [`RedirectTarget`] the caller navigates to instead of rendering the
//! requested view.
//!
//! Rules carry no state of their own, so callers must evaluate on every
//! navigation - a role change (login, logout) changes the decision.

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Default path unauthenticated principals are redirected to.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

/// Default path under-privileged authenticated principals are redirected to.
pub const DEFAULT_FALLBACK_PATH: &str = "/";

/// The allow-list for a protected route group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    allowed_roles: Vec<Role>,
    login_path: String,
    fallback_path: String,
}

impl RouteRule {
    /// Create a rule admitting exactly the given roles.
    ///
    /// An empty role list means the route is public and every principal is
    /// admitted.
    #[must_use]
    pub fn new(allowed_roles: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed_roles: allowed_roles.into(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            fallback_path: DEFAULT_FALLBACK_PATH.to_owned(),
        }
    }

    /// A rule for a public route: no allow-list, always authorized.
    #[must_use]
    pub fn public() -> Self {
        Self::new(Vec::new())
    }

    /// Override where unauthenticated principals are sent.
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Override where authenticated but under-privileged principals are sent.
    #[must_use]
    pub fn with_fallback_path(mut self, path: impl Into<String>) -> Self {
        self.fallback_path = path.into();
        self
    }

    /// Whether this rule admits every principal.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.allowed_roles.is_empty()
    }

    /// Whether the role is in the allow-list (or the rule is public).
    #[must_use]
    pub fn allows(&self, role: Role) -> bool {
        self.is_public() || self.allowed_roles.contains(&role)
    }

    /// Decide admission for a principal requesting a path.
    ///
    /// Denied guests are sent to the login path with the requested path
    /// carried along, so login can return them; denied authenticated
    /// principals (privilege escalation) are sent to the fallback path.
    #[must_use]
    pub fn evaluate(&self, role: Role, requested_path: &str) -> AccessDecision {
        if self.allows(role) {
            return AccessDecision::Granted;
        }

        if role.is_authenticated() {
            AccessDecision::Redirect(RedirectTarget {
                path: self.fallback_path.clone(),
                return_to: None,
            })
        } else {
            AccessDecision::Redirect(RedirectTarget {
                path: self.login_path.clone(),
                return_to: Some(requested_path.to_owned()),
            })
        }
    }
}

/// Outcome of evaluating a [`RouteRule`] against a principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the requested view.
    Granted,
    /// Navigate elsewhere instead of rendering the requested view.
    Redirect(RedirectTarget),
}

impl AccessDecision {
    /// Whether the principal was admitted.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Where a denied principal is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Redirect destination path.
    pub path: String,
    /// The originally requested path, carried so the destination can send
    /// the principal back after a successful login.
    pub return_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_rule() -> RouteRule {
        RouteRule::new([Role::Admin, Role::SuperAdmin])
    }

    #[test]
    fn test_admin_rule_decision_table() {
        let rule = admin_rule();

        assert!(rule.evaluate(Role::Admin, "/admin/dashboard").is_granted());
        assert!(
            rule.evaluate(Role::SuperAdmin, "/admin/dashboard")
                .is_granted()
        );
        assert!(!rule.evaluate(Role::User, "/admin/dashboard").is_granted());
        assert!(!rule.evaluate(Role::Guest, "/admin/dashboard").is_granted());
    }

    #[test]
    fn test_guest_denial_carries_return_path() {
        let rule = admin_rule();

        let AccessDecision::Redirect(target) = rule.evaluate(Role::Guest, "/admin/orders") else {
            panic!("guest should be redirected");
        };
        assert_eq!(target.path, DEFAULT_LOGIN_PATH);
        assert_eq!(target.return_to.as_deref(), Some("/admin/orders"));
    }

    #[test]
    fn test_privilege_escalation_falls_back_home() {
        let rule = admin_rule();

        let AccessDecision::Redirect(target) = rule.evaluate(Role::User, "/admin/orders") else {
            panic!("user should be redirected");
        };
        assert_eq!(target.path, DEFAULT_FALLBACK_PATH);
        assert_eq!(target.return_to, None);
    }

    #[test]
    fn test_empty_allow_list_is_public() {
        let rule = RouteRule::public();

        assert!(rule.is_public());
        for role in [Role::Guest, Role::User, Role::Admin, Role::SuperAdmin] {
            assert!(rule.evaluate(role, "/products").is_granted());
        }
    }

    #[test]
    fn test_superadmin_only_rule() {
        let rule = RouteRule::new([Role::SuperAdmin]);

        assert!(rule.evaluate(Role::SuperAdmin, "/superadmin").is_granted());
        assert!(!rule.evaluate(Role::Admin, "/superadmin").is_granted());
    }

    #[test]
    fn test_custom_paths() {
        let rule = RouteRule::new([Role::User])
            .with_login_path("/signin")
            .with_fallback_path("/home");

        let AccessDecision::Redirect(guest) = rule.evaluate(Role::Guest, "/account") else {
            panic!("guest should be redirected");
        };
        assert_eq!(guest.path, "/signin");

        let AccessDecision::Redirect(admin) = rule.evaluate(Role::Admin, "/account") else {
            panic!("admin should be redirected");
        };
        assert_eq!(admin.path, "/home");
    }

    #[test]
    fn test_reevaluation_after_role_change() {
        let rule = admin_rule();

        // Same rule, different principal after login/logout - decision flips.
        assert!(!rule.evaluate(Role::Guest, "/admin").is_granted());
        assert!(rule.evaluate(Role::Admin, "/admin").is_granted());
        assert!(!rule.evaluate(Role::Guest, "/admin").is_granted());
    }
}
