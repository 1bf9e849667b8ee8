//! # Credential Store
//!
//! Decides whether an admin login attempt succeeds.
//!
//! The storefront has a single admin account. Credentials come from
//! configuration rather than source code, and are compared in plaintext:
//! this guards the admin panel of a single-browser shop, nothing more.

use crate::config::AdminConfig;

/// Verifies admin login attempts.
pub trait CredentialStore {
    /// True iff `email` and `password` are exactly the admin pair.
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// A single configured email/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    admin: AdminConfig,
}

impl StaticCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        StaticCredentials {
            admin: AdminConfig {
                email: email.into(),
                password: password.into(),
            },
        }
    }
}

impl From<AdminConfig> for StaticCredentials {
    fn from(admin: AdminConfig) -> Self {
        StaticCredentials { admin }
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        email == self.admin.email && password == self.admin.password
    }
}
