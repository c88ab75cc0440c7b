//! FlightFlow Cloud
//!
//! Provider-neutral building blocks for deployment orchestration:
//!
//! - [`ResourceManager`] / [`ResourceHandler`]: declared resources with an
//!   explicit lifecycle
//! - [`StateBlob`]: versioned, serializable resource state
//! - [`DeploymentRecord`] and [`HealthReport`]: what a deploy hands back to
//!   its host
//! - [`Reporter`]: where progress messages go
//! - [`StateManager`]: the `.flightflow/state.json` store used by hosts
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               flight CLI (host)                  │
//! │        deploy / destroy / status / validate      │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │              flightflow-cloud                    │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │  Resources   │  │  State Mgmt  │  Reporter   │
//! │  └──────────────┘  └──────────────┘             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!          ┌────────▼────────┐
//!          │    seaplane     │
//!          │    provider     │
//!          └─────────────────┘
//! ```

pub mod error;
pub mod health;
pub mod record;
pub mod reporter;
pub mod resource;
pub mod state;

// Re-exports
pub use error::{CloudError, Result};
pub use health::{Health, HealthReport};
pub use record::DeploymentRecord;
pub use reporter::{MemoryReporter, NoopReporter, ReportEvent, Reporter, StepStatus};
pub use resource::{ResourceContext, ResourceHandler, ResourceManager};
pub use state::{
    LOCK_STALE_HOURS, Lifecycle, LockOperation, ResourceEntry, StateBlob, StateFile, StateLock,
    StateManager,
};
