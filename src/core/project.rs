//! Project discovery and initialization
//!
//! A project is a directory containing `.cft/` with the document store and
//! config inside. Commands discover the project by walking up from the
//! current directory, so they work from any subdirectory.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::store::FsStore;

const PROJECT_DIR: &str = ".cft";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not inside a cft project. Run 'cft init' to create one here")]
    NotInProject,

    #[error("A cft project already exists at {path}")]
    AlreadyInitialized { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a discovered project root
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Walk up from the current directory to find the project root
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Walk up from an explicit starting directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = Some(start);
        while let Some(d) = dir {
            if d.join(PROJECT_DIR).is_dir() {
                return Ok(Self {
                    root: d.to_path_buf(),
                });
            }
            dir = d.parent();
        }
        Err(ProjectError::NotInProject)
    }

    /// Create the project skeleton under the given directory
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let dot = path.join(PROJECT_DIR);
        if dot.exists() {
            return Err(ProjectError::AlreadyInitialized {
                path: path.display().to_string(),
            });
        }
        std::fs::create_dir_all(dot.join("store"))?;
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dot_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Root directory of the file-backed document store
    pub fn store_root(&self) -> PathBuf {
        self.dot_dir().join("store")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dot_dir().join("config.yaml")
    }

    pub fn session_path(&self) -> PathBuf {
        self.dot_dir().join("session.yaml")
    }

    /// Open the project's document store
    pub fn store(&self) -> FsStore {
        FsStore::new(self.store_root())
    }
}
