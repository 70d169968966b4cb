//! Auth capability seam
//!
//! Authentication is an external collaborator: the core only needs an
//! opaque identity for the operator creating a restaurant. Session
//! management, tokens, and redirects live behind this trait.

/// Identity yielded by the auth collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The opaque auth capability the core consumes
pub trait AuthProvider {
    /// The currently signed-in user, if any
    fn current_user(&self) -> Option<UserIdentity>;

    /// Start a login flow that returns to `redirect_path` afterwards
    fn login(&self, redirect_path: &str);

    fn logout(&self);
}

/// Fixed-identity provider for tests and local development
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<UserIdentity>,
}

impl StaticAuth {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user: Some(UserIdentity::new(user_id)),
        }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }

    fn login(&self, redirect_path: &str) {
        tracing::debug!(redirect_path, "static auth: login requested");
    }

    fn logout(&self) {
        tracing::debug!("static auth: logout requested");
    }
}
