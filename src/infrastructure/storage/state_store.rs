//! JSON file persistence for the run state

use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::domain::state::RunState;
use crate::shared::errors::StateError;

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous run's state.
    ///
    /// A missing file starts from empty state. A corrupt file is moved aside
    /// so the next persist does not destroy it, then also starts from empty.
    pub fn load(&self) -> Result<RunState, StateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No state at {}, starting fresh", self.path.display());
                return Ok(RunState::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<RunState>(&content) {
            Ok(state) => {
                info!("Loaded state for {} targets from {}", state.target_count(), self.path.display());
                Ok(state)
            }
            Err(e) => {
                let aside = self.corrupt_path();
                error!(
                    "❌ State file {} is malformed ({}), moving it to {} and starting fresh",
                    self.path.display(),
                    e,
                    aside.display()
                );
                fs::rename(&self.path, &aside)?;
                Ok(RunState::new())
            }
        }
    }

    /// Write the whole document atomically: temp file, then rename over the old one.
    pub fn persist(&self, state: &RunState) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.sibling("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        info!("Saved state for {} targets to {}", state.target_count(), self.path.display());
        Ok(())
    }

    fn corrupt_path(&self) -> PathBuf {
        self.sibling(&format!("corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S")))
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(format!(".{}", suffix));
        self.path.with_file_name(name)
    }
}
