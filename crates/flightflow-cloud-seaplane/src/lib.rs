//! Seaplane provider for FlightFlow
//!
//! Deploys a container image as a Seaplane formation and tears it down
//! again.
//!
//! # Flow
//!
//! - deploy: identity token → `POST /v1/formations/{name}` → `GET` the URL
//! - destroy: identity token → `DELETE /v1/formations/{name}?force=true`
//! - status: local only, no API call
//!
//! # Example
//!
//! ```ignore
//! use flightflow_cloud::NoopReporter;
//! use flightflow_cloud_seaplane::{PlatformOptions, SeaplanePlatform};
//! use flightflow_core::DeployConfig;
//!
//! let config = DeployConfig::new("demoapp", "web", api_key);
//! let platform = SeaplanePlatform::new(config, PlatformOptions::default())?;
//!
//! let record = platform.deploy("registry.example/demoapp:latest", &NoopReporter).await?;
//! println!("{}", record.url);
//!
//! platform.destroy(&record, &NoopReporter).await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod formation;
pub mod platform;
pub mod resource;

pub use auth::{Authenticator, SessionToken};
pub use client::{COMPUTE_API_BASE, DEFAULT_TIMEOUT, Endpoints, IDENTITY_API_BASE, build_client};
pub use error::{Result, SeaplaneError};
pub use formation::{CreateOutcome, FormationController};
pub use platform::{PlatformOptions, STATUS_MESSAGE, SeaplanePlatform};
pub use resource::{DEPLOYMENT_RESOURCE, DeploymentResource, DeploymentState};
