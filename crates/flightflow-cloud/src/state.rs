//! State management for deployments
//!
//! Two layers live here:
//!
//! - [`StateBlob`]: the opaque, versioned resource state carried inside a
//!   [`DeploymentRecord`].
//! - [`StateManager`]: the `.flightflow/state.json` file a host uses to keep
//!   deployment records between runs.

use crate::error::{CloudError, Result};
use crate::record::DeploymentRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

const STATE_VERSION: u32 = 1;
const STATE_DIR: &str = ".flightflow";
const STATE_FILE: &str = "state.json";
const STATE_BACKUP: &str = "state.json.backup";
const STATE_STAGING: &str = "state.json.tmp";
const LOCK_FILE: &str = "lock.json";

/// Age after which a lock left by a crashed run is replaced
pub const LOCK_STALE_HOURS: i64 = 1;

/// Lifecycle of a single declared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Registered but not created yet
    Declared,
    Created,
    Destroyed,
    /// Created, then left behind by a failed operation
    Orphaned,
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lifecycle::Declared => write!(f, "declared"),
            Lifecycle::Created => write!(f, "created"),
            Lifecycle::Destroyed => write!(f, "destroyed"),
            Lifecycle::Orphaned => write!(f, "orphaned"),
        }
    }
}

/// State of one resource inside a [`StateBlob`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub lifecycle: Lifecycle,

    /// Handler-specific state
    #[serde(default)]
    pub state: serde_json::Value,
}

impl ResourceEntry {
    pub fn declared() -> Self {
        Self {
            lifecycle: Lifecycle::Declared,
            state: serde_json::Value::Null,
        }
    }

    pub fn created(state: serde_json::Value) -> Self {
        Self {
            lifecycle: Lifecycle::Created,
            state,
        }
    }
}

/// Versioned resource state
///
/// Serialized as `{"version": "<n>", "payload": {...}}` so blobs written
/// by older resource sets stay loadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version", content = "payload")]
pub enum StateBlob {
    /// Only the deployment name is known
    #[serde(rename = "0")]
    Legacy { name: String },

    /// Per-resource state keyed by resource name
    #[serde(rename = "1")]
    V1 {
        resources: BTreeMap<String, ResourceEntry>,
    },
}

impl StateBlob {
    pub fn legacy(name: impl Into<String>) -> Self {
        StateBlob::Legacy { name: name.into() }
    }

    pub fn version(&self) -> u32 {
        match self {
            StateBlob::Legacy { .. } => 0,
            StateBlob::V1 { .. } => 1,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| CloudError::InvalidState(format!("unreadable state blob: {}", e)))
    }
}

/// Contents of `.flightflow/state.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// State file version
    pub version: u32,

    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,

    /// Deployment records indexed by formation name
    pub deployments: BTreeMap<String, DeploymentRecord>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            updated_at: Utc::now(),
            deployments: BTreeMap::new(),
        }
    }
}

impl StateFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record
    pub fn set_record(&mut self, record: DeploymentRecord) {
        self.deployments.insert(record.name.clone(), record);
        self.updated_at = Utc::now();
    }

    /// Remove a record
    pub fn remove_record(&mut self, name: &str) -> Option<DeploymentRecord> {
        let result = self.deployments.remove(name);
        if result.is_some() {
            self.updated_at = Utc::now();
        }
        result
    }

    pub fn get_record(&self, name: &str) -> Option<&DeploymentRecord> {
        self.deployments.get(name)
    }
}

/// Operation that holds the state lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockOperation {
    Deploy,
    Destroy,
}

impl std::fmt::Display for LockOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockOperation::Deploy => write!(f, "deploy"),
            LockOperation::Destroy => write!(f, "destroy"),
        }
    }
}

/// Deployment records of one project, kept under `.flightflow/`
pub struct StateManager {
    dir: PathBuf,
}

impl StateManager {
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            dir: project_root.as_ref().join(STATE_DIR),
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Load the stored records; a missing file is an empty state
    pub async fn load(&self) -> Result<StateFile> {
        let path = self.path(STATE_FILE);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No state file at {}", path.display());
                return Ok(StateFile::new());
            }
            Err(e) => return Err(e.into()),
        };

        let state: StateFile = serde_json::from_str(&content)?;
        if state.version > STATE_VERSION {
            return Err(CloudError::StateError(format!(
                "{} was written by a newer flightflow (version {}, supported {})",
                path.display(),
                state.version,
                STATE_VERSION
            )));
        }

        tracing::debug!(deployments = state.deployments.len(), "Loaded state");
        Ok(state)
    }

    /// Write the records
    ///
    /// The new content goes to a temporary file that replaces `state.json`
    /// in one rename; the previous file is copied to `state.json.backup`.
    pub async fn save(&self, state: &StateFile) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path(STATE_FILE);
        if fs::try_exists(&path).await? {
            fs::copy(&path, self.path(STATE_BACKUP)).await?;
        }

        let staging = self.path(STATE_STAGING);
        fs::write(&staging, serde_json::to_string_pretty(state)?).await?;
        fs::rename(&staging, &path).await?;

        tracing::debug!(deployments = state.deployments.len(), "Saved state");
        Ok(())
    }

    /// Take the project lock for `operation` on `formation`
    ///
    /// A lock younger than [`LOCK_STALE_HOURS`] blocks the call. Older or
    /// unreadable lock files are replaced.
    pub async fn acquire_lock(
        &self,
        operation: LockOperation,
        formation: &str,
    ) -> Result<StateLock> {
        fs::create_dir_all(&self.dir).await?;
        let lock_path = self.path(LOCK_FILE);

        if let Some(held) = read_lock(&lock_path).await {
            let age = Utc::now().signed_duration_since(held.acquired_at);
            if age < chrono::Duration::hours(LOCK_STALE_HOURS) {
                return Err(CloudError::LockError(format!(
                    "{} of formation {} is in progress on {} since {}",
                    held.operation, held.formation, held.holder, held.acquired_at
                )));
            }
            tracing::warn!(
                operation = %held.operation,
                formation = %held.formation,
                holder = %held.holder,
                "Replacing stale state lock"
            );
        }

        let info = LockInfo {
            operation,
            formation: formation.to_string(),
            holder: std::env::var("HOSTNAME")
                .or_else(|_| std::env::var("HOST"))
                .unwrap_or_else(|_| "unknown".to_string()),
            acquired_at: Utc::now(),
        };
        fs::write(&lock_path, serde_json::to_string_pretty(&info)?).await?;

        tracing::debug!(%operation, %formation, "Acquired state lock");
        Ok(StateLock {
            lock_path,
            released: false,
        })
    }
}

/// Contents of `lock.json`
#[derive(Debug, Serialize, Deserialize)]
struct LockInfo {
    operation: LockOperation,
    formation: String,
    holder: String,
    acquired_at: DateTime<Utc>,
}

async fn read_lock(path: &Path) -> Option<LockInfo> {
    let content = fs::read_to_string(path).await.ok()?;
    match serde_json::from_str(&content) {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable lock file {}", path.display());
            None
        }
    }
}

/// Held project lock; removed on [`StateLock::release`] or drop
pub struct StateLock {
    lock_path: PathBuf,
    released: bool,
}

impl StateLock {
    pub async fn release(mut self) -> Result<()> {
        self.released = true;
        match fs::remove_file(&self.lock_path).await {
            Ok(()) => {
                tracing::debug!("Released state lock");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if !self.released {
            let _ = std::fs::remove_file(&self.lock_path);
        }
    }
}
