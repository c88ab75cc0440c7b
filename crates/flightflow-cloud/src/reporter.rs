//! Progress reporting
//!
//! Orchestration code talks to a [`Reporter`] instead of printing directly,
//! so the host decides how progress is rendered.

use crate::health::Health;
use std::sync::Mutex;

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Ok,
    Warning,
    Error,
}

/// Sink for user-facing progress messages
pub trait Reporter: Send + Sync {
    /// Replace the current in-progress status line
    fn update(&self, message: &str);

    /// Record a finished step
    fn step(&self, status: StepStatus, message: &str);

    /// Record a health transition of the deployment
    fn health(&self, health: Health) {
        let _ = health;
    }
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn update(&self, _message: &str) {}

    fn step(&self, _status: StepStatus, _message: &str) {}
}

/// Event captured by [`MemoryReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Update(String),
    Step(StepStatus, String),
    Health(Health),
}

/// Reporter that keeps every event in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Messages of steps with the given status
    pub fn steps(&self, status: StepStatus) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Step(s, msg) if *s == status => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn health_events(&self) -> Vec<Health> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Health(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        // A poisoned lock only means another thread panicked mid-push
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for MemoryReporter {
    fn update(&self, message: &str) {
        self.lock().push(ReportEvent::Update(message.to_string()));
    }

    fn step(&self, status: StepStatus, message: &str) {
        self.lock().push(ReportEvent::Step(status, message.to_string()));
    }

    fn health(&self, health: Health) {
        self.lock().push(ReportEvent::Health(health));
    }
}
