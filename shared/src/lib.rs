//! Shared types for the ticket reservation core
//!
//! Domain models, request/response envelopes and utility types consumed by
//! both the core service crate and the surrounding request-handling layer.

pub mod models;
pub mod request;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use request::{Page, Paginated};
pub use types::{Requester, Role};
