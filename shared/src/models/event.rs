//! Event Summary
//!
//! The core does not persist events; this is the read-only summary shape
//! returned by the event-catalog collaborator for enriched reservation
//! views.

use serde::{Deserialize, Serialize};

/// Summary of the event a ticket type belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}
