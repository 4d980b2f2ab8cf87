//! Ticket Core - event-ticketing reservation backbone
//!
//! # Architecture overview
//!
//! The crate implements the inventory/reservation/receipt core of an
//! event-ticketing backend. HTTP routing, authentication and event CRUD
//! live outside; they call in with an already-resolved
//! [`shared::types::Requester`] and receive typed results.
//!
//! - **Database** (`db`): SQLite pool service plus the three stores —
//!   ticket inventory, reservation ledger, receipt issuer
//! - **Reservations** (`reservations`): the transactional orchestrator
//!   exposing create / confirm-and-pay / cancel / query
//! - **Catalog** (`catalog`): narrow seam to the external event catalog
//! - **Money / Token** (`money`, `token`): amount derivation and receipt
//!   verification tokens
//!
//! # Module structure
//!
//! ```text
//! ticket-core/src/
//! ├── config.rs       # env-driven configuration
//! ├── error.rs        # domain error taxonomy
//! ├── db/             # pool service, migrations, repositories
//! ├── reservations/   # orchestrator
//! ├── catalog.rs      # event-catalog seam
//! ├── money.rs        # cent arithmetic
//! ├── token.rs        # verification tokens
//! └── utils/          # logger, validation helpers
//! ```

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod money;
pub mod reservations;
pub mod token;
pub mod utils;

// Re-export public types
pub use catalog::{EventCatalog, StaticCatalog};
pub use config::Config;
pub use db::DbService;
pub use db::repository::{
    ReceiptIssuer, RepoError, RepoResult, ReservationLedger, ReserveOutcome, TicketInventory,
};
pub use error::{TicketError, TicketResult};
pub use reservations::ReservationService;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
