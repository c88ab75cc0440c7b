//! Health reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Health {
    Unknown,
    Alive,
    Ready,
    Down,
    Error,
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Health::Unknown => write!(f, "unknown"),
            Health::Alive => write!(f, "alive"),
            Health::Ready => write!(f, "ready"),
            Health::Down => write!(f, "down"),
            Health::Error => write!(f, "error"),
        }
    }
}

/// Result of a status check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub health: Health,

    /// Human readable description
    pub message: String,

    pub generated_at: DateTime<Utc>,

    /// Whether the deployment lives on a platform outside the host
    pub external: bool,
}

impl HealthReport {
    pub fn new(health: Health, message: impl Into<String>) -> Self {
        Self {
            health,
            message: message.into(),
            generated_at: Utc::now(),
            external: true,
        }
    }
}
