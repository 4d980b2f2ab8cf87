//! Domain Models
//!
//! Entities and their explicit create/update payloads. Update payloads
//! enumerate exactly the mutable fields per entity; anything else is
//! rejected at the boundary instead of being forwarded to storage.

// Catalog
pub mod event;
pub mod ticket_type;

// Reservation lifecycle
pub mod receipt;
pub mod reservation;

// Re-exports
pub use event::EventSummary;
pub use receipt::{NewReceipt, PaymentInput, PaymentOutcome, PaymentStatus, Receipt};
pub use reservation::{
    NewReservation, Reservation, ReservationCreate, ReservationDetails, ReservationFilter,
    ReservationStatus,
};
pub use ticket_type::{TicketType, TicketTypeCreate, TicketTypeFilter, TicketTypeUpdate};
