//! Identity provider contract and the local file-backed implementation
//!
//! The workflow only needs account creation and sign-in from its identity
//! provider. [`LocalIdentity`] keeps salted SHA-256 credential records in the
//! document store's `auth_users` collection; the signed-in user is remembered
//! in a session file under the project directory.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;

use crate::store::{collections, DocumentStore, Filter, StoreError};

/// Authentication failures, surfaced verbatim as messages and never retried
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for {email}")]
    EmailTaken { email: String },

    #[error("Password must be at least 6 characters")]
    WeakPassword,

    #[error("User profile not found")]
    ProfileMissing,

    #[error("Login successful, but user role is not defined")]
    RoleMissing,

    #[error("Not signed in. Run 'cft login' first")]
    NotSignedIn,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Account creation and sign-in, as required from the identity provider
pub trait IdentityProvider {
    /// Create an account, returning the new user id
    fn create_user(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Verify credentials, returning the user id
    fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError>;
}

/// Credential record stored in `auth_users`
#[derive(Debug, Serialize, Deserialize)]
struct Credential {
    email: String,
    salt: String,
    password_hash: String,
}

/// Identity provider backed by the project's own document store
pub struct LocalIdentity<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> LocalIdentity<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn find_credential(&self, email: &str) -> Result<Option<(String, Credential)>, AuthError> {
        let docs = self.store.query(
            collections::AUTH_USERS,
            &[Filter::eq("email", email)],
            None,
            Some(1),
        )?;
        match docs.into_iter().next() {
            Some(doc) => {
                let cred: Credential = doc.parse()?;
                Ok(Some((doc.id, cred)))
            }
            None => Ok(None),
        }
    }
}

impl<S: DocumentStore> IdentityProvider for LocalIdentity<'_, S> {
    fn create_user(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if password.len() < 6 {
            return Err(AuthError::WeakPassword);
        }
        if self.find_credential(email)?.is_some() {
            return Err(AuthError::EmailTaken {
                email: email.to_string(),
            });
        }

        let salt = new_salt();
        let credential = json!({
            "email": email,
            "salt": salt,
            "password_hash": hash_password(&salt, password),
        });
        let id = self.store.add(collections::AUTH_USERS, credential)?;
        Ok(id)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let (id, cred) = self
            .find_credential(email)?
            .ok_or(AuthError::InvalidCredentials)?;
        if hash_password(&cred.salt, password) != cred.password_hash {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(id)
    }
}

fn new_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex(&bytes)
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex(&hasher.finalize())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// The signed-in user, persisted at `.cft/session.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

impl Session {
    pub fn load(path: &Path) -> Option<Session> {
        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str(&contents).ok()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let contents = serde_yml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, contents)
    }

    pub fn clear(path: &Path) -> std::io::Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
