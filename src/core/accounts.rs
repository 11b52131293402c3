//! Client account provisioning
//!
//! Creating a client is a two-step: an identity-provider account first, then
//! the profile document under the new user id. Like resubmission, this is
//! create-then-write rather than a transaction; a failure in between leaves
//! an account without a profile, which the login role check surfaces.

use thiserror::Error;

use crate::core::auth::{AuthError, IdentityProvider};
use crate::core::catalog::{self, CatalogError};
use crate::entities::{Role, UserProfile};
use crate::store::{collections, DocumentStore, Filter, OrderBy, StoreError};

#[derive(Debug, Error)]
pub enum AccountsError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Provision a client: identity account plus profile bound to a module.
///
/// The module must exist before any account is created.
pub fn create_client<S: DocumentStore, I: IdentityProvider>(
    store: &S,
    identity: &I,
    organization_name: &str,
    email: &str,
    password: &str,
    module_name: &str,
) -> Result<(String, UserProfile), AccountsError> {
    catalog::get_module(store, module_name)?;

    let user_id = identity.create_user(email, password)?;
    let profile = UserProfile::client(organization_name.to_string(), module_name.to_string());
    let body = serde_json::to_value(&profile).map_err(|e| StoreError::Serialize {
        message: e.to_string(),
    })?;
    store.set(collections::USERS, &user_id, body)?;
    Ok((user_id, profile))
}

/// Write the administrator profile for an existing identity account
pub fn create_admin_profile<S: DocumentStore>(
    store: &S,
    user_id: &str,
    display_name: &str,
) -> Result<UserProfile, AccountsError> {
    let profile = UserProfile::admin(display_name.to_string());
    let body = serde_json::to_value(&profile).map_err(|e| StoreError::Serialize {
        message: e.to_string(),
    })?;
    store.set(collections::USERS, user_id, body)?;
    Ok(profile)
}

/// Load a user's profile document
pub fn get_profile<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<Option<UserProfile>, AccountsError> {
    match store.get(collections::USERS, user_id)? {
        Some(doc) => Ok(Some(doc.parse()?)),
        None => Ok(None),
    }
}

/// Load a profile and fail the way the login door does: no profile document
/// or no usable role is an auth error, not a blank screen.
pub fn require_profile<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<UserProfile, AccountsError> {
    let doc = store
        .get(collections::USERS, user_id)?
        .ok_or(AccountsError::Auth(AuthError::ProfileMissing))?;
    if doc.body.get("role").is_none() {
        return Err(AccountsError::Auth(AuthError::RoleMissing));
    }
    Ok(doc.parse()?)
}

/// All client profiles, ordered by organization name ascending
pub fn list_clients<S: DocumentStore>(
    store: &S,
) -> Result<Vec<(String, UserProfile)>, AccountsError> {
    let docs = store.query(
        collections::USERS,
        &[Filter::eq("role", Role::Client.to_string())],
        Some(&OrderBy::asc("organizationName")),
        None,
    )?;
    let mut clients = Vec::with_capacity(docs.len());
    for doc in docs {
        let profile: UserProfile = doc.parse()?;
        clients.push((doc.id, profile));
    }
    Ok(clients)
}
