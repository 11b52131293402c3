//! Per-command application context
//!
//! Discovers the project, loads config and session, and enforces the role
//! split at the command boundary: factor/module/client/queue/review are the
//! admin portal, submit/status/report the client portal.

use miette::{bail, IntoDiagnostic, Result};

use crate::core::auth::{AuthError, Session};
use crate::core::{accounts, Config, Project};
use crate::entities::{Role, UserProfile};
use crate::store::FsStore;

pub struct AppContext {
    pub project: Project,
    pub config: Config,
    pub store: FsStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let project = Project::discover().into_diagnostic()?;
        let config = Config::load(&project);
        let store = project.store();
        Ok(Self {
            project,
            config,
            store,
        })
    }

    /// The current session, or the sign-in hint
    pub fn session(&self) -> Result<Session> {
        Session::load(&self.project.session_path())
            .ok_or(AuthError::NotSignedIn)
            .into_diagnostic()
    }

    /// Session plus profile, failing like the login door on a missing
    /// profile or role
    pub fn signed_in(&self) -> Result<(Session, UserProfile)> {
        let session = self.session()?;
        let profile = accounts::require_profile(&self.store, &session.user_id).into_diagnostic()?;
        Ok((session, profile))
    }

    pub fn require_admin(&self) -> Result<Session> {
        let (session, profile) = self.signed_in()?;
        if profile.role != Role::Admin {
            bail!("This command requires the admin role (signed in as {})", profile.role);
        }
        Ok(session)
    }

    pub fn require_client(&self) -> Result<(Session, UserProfile)> {
        let (session, profile) = self.signed_in()?;
        if profile.role != Role::Client {
            bail!("This command requires a client account (signed in as {})", profile.role);
        }
        Ok((session, profile))
    }
}
