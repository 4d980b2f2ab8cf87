//! Event catalog seam
//!
//! Event CRUD lives outside the core; reservation reads only need a
//! summary of the owning event for display. [`EventCatalog`] is the narrow
//! interface the surrounding system implements; [`StaticCatalog`] is the
//! in-process implementation used by tests and embedded deployments.

use async_trait::async_trait;
use dashmap::DashMap;

use shared::models::EventSummary;

/// Read-only view of the event catalog. A missing event is not an error:
/// enrichment is best-effort and reservation data stays authoritative.
#[async_trait]
pub trait EventCatalog: Send + Sync {
    async fn event_summary(&self, event_id: &str) -> Option<EventSummary>;
}

/// In-memory catalog keyed by event id.
#[derive(Default)]
pub struct StaticCatalog {
    events: DashMap<String, EventSummary>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace an event summary.
    pub fn register(&self, event: EventSummary) {
        self.events.insert(event.id.clone(), event);
    }
}

#[async_trait]
impl EventCatalog for StaticCatalog {
    async fn event_summary(&self, event_id: &str) -> Option<EventSummary> {
        self.events.get(event_id).map(|e| e.clone())
    }
}
