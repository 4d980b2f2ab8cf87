//! Reservation Service
//!
//! Orchestrates inventory, ledger and receipts. Invariants owned here:
//! no oversell, monotonic status lifecycle (cancel excepted), inventory
//! released at most once per reservation, exactly one receipt per paid
//! reservation. The stores own only row-level consistency.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use shared::models::{
    NewReceipt, NewReservation, PaymentInput, PaymentOutcome, PaymentStatus, Receipt, Reservation,
    ReservationCreate, ReservationDetails, ReservationFilter, ReservationStatus,
};
use shared::request::{Page, Paginated};
use shared::types::Requester;

use crate::catalog::EventCatalog;
use crate::db::DbService;
use crate::db::repository::{
    RepoError, ReceiptIssuer, ReservationLedger, ReserveOutcome, TicketInventory,
};
use crate::error::{TicketError, TicketResult};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::{money, token};

/// The reservation lifecycle orchestrator.
///
/// Construction takes the storage service and the event-catalog
/// collaborator explicitly; there is no ambient global state.
#[derive(Clone)]
pub struct ReservationService {
    db: DbService,
    catalog: Arc<dyn EventCatalog>,
}

impl ReservationService {
    pub fn new(db: DbService, catalog: Arc<dyn EventCatalog>) -> Self {
        Self { db, catalog }
    }

    /// Claim inventory and open a `pending` reservation.
    ///
    /// The inventory decrement is the first statement of the transaction;
    /// if the ledger insert (or any later check) fails, the decrement
    /// rolls back with it — no inventory leak.
    pub async fn create_reservation(
        &self,
        requester: &Requester,
        input: ReservationCreate,
    ) -> TicketResult<Reservation> {
        input
            .validate()
            .map_err(|e| TicketError::Validation(e.to_string()))?;

        let mut tx = self.db.begin().await?;

        let ticket =
            match TicketInventory::reserve(&mut tx, &input.ticket_type_id, input.quantity).await? {
                ReserveOutcome::Reserved(ticket) => ticket,
                ReserveOutcome::Insufficient { available } => {
                    return Err(TicketError::OutOfStock { available });
                }
                ReserveOutcome::Inactive => {
                    return Err(TicketError::Validation(format!(
                        "ticket type {} is not on sale",
                        input.ticket_type_id
                    )));
                }
                ReserveOutcome::NotFound => {
                    return Err(TicketError::NotFound {
                        entity: "ticket type",
                        id: input.ticket_type_id,
                    });
                }
            };

        if input.quantity > ticket.purchase_limit {
            return Err(TicketError::Validation(format!(
                "quantity {} exceeds the per-purchase limit of {}",
                input.quantity, ticket.purchase_limit
            )));
        }

        let reservation = ReservationLedger::insert(
            &mut tx,
            NewReservation {
                user_id: requester.user_id.clone(),
                ticket_type_id: ticket.id.clone(),
                quantity: input.quantity,
                status: ReservationStatus::Pending,
            },
        )
        .await?;

        DbService::commit(tx).await?;

        info!(
            reservation_id = %reservation.id,
            ticket_type_id = %ticket.id,
            user_id = %requester.user_id,
            quantity = reservation.quantity,
            remaining = ticket.available_quantity,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Confirm a pending reservation and issue its receipt.
    ///
    /// The pending→confirmed transition is the guard: of two racing
    /// confirmations exactly one matches the row, the other reads back the
    /// new status and fails with `InvalidState`. The receipt's UNIQUE
    /// reservation index backs this up with `AlreadyIssued`.
    pub async fn confirm_and_pay(
        &self,
        requester: &Requester,
        reservation_id: &str,
        payment: PaymentInput,
    ) -> TicketResult<PaymentOutcome> {
        validate_required_text(reservation_id, "reservation_id", MAX_SHORT_TEXT_LEN)?;
        payment
            .validate()
            .map_err(|e| TicketError::Validation(e.to_string()))?;

        let mut tx = self.db.begin().await?;

        let reservation = match ReservationLedger::transition(
            &mut tx,
            reservation_id,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
        )
        .await?
        {
            Some(reservation) => reservation,
            None => {
                let existing = ReservationLedger::find_by_id(&mut tx, reservation_id)
                    .await?
                    .ok_or_else(|| TicketError::NotFound {
                        entity: "reservation",
                        id: reservation_id.to_string(),
                    })?;
                if !requester.owns(&existing.user_id) {
                    return Err(TicketError::Unauthorized);
                }
                return Err(TicketError::InvalidState {
                    status: existing.status,
                });
            }
        };

        // Payment is owner-only; admins do not pay on behalf of users.
        if !requester.owns(&reservation.user_id) {
            return Err(TicketError::Unauthorized);
        }

        let ticket = TicketInventory::find_by_id(&mut tx, &reservation.ticket_type_id)
            .await?
            .ok_or_else(|| TicketError::NotFound {
                entity: "ticket type",
                id: reservation.ticket_type_id.clone(),
            })?;

        // Amount is derived from the price captured now, never supplied.
        let amount_cents = money::line_total(ticket.price_cents, reservation.quantity)?;

        let receipt = match ReceiptIssuer::issue(
            &mut tx,
            NewReceipt {
                reservation_id: reservation.id.clone(),
                user_id: reservation.user_id.clone(),
                ticket_type_id: ticket.id.clone(),
                verification_token: token::verification_token(&reservation.id),
                amount_cents,
                payment_method: payment.method.clone(),
                payment_status: PaymentStatus::Completed,
            },
        )
        .await
        {
            Ok(receipt) => receipt,
            Err(RepoError::Duplicate(_)) => {
                return Err(TicketError::AlreadyIssued {
                    reservation_id: reservation.id.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let event = self.catalog.event_summary(&ticket.event_id).await;

        DbService::commit(tx).await?;

        info!(
            reservation_id = %reservation.id,
            receipt_id = %receipt.id,
            amount_cents = receipt.amount_cents,
            payment_method = %receipt.payment_method,
            "reservation confirmed and receipt issued"
        );
        Ok(PaymentOutcome {
            reservation,
            receipt,
            ticket,
            event,
        })
    }

    /// Cancel a reservation and return its units to inventory.
    ///
    /// The not-yet-canceled guard makes the release happen exactly once:
    /// a second cancel (concurrent or later) matches zero rows and reports
    /// `InvalidState` without touching stock. The receipt, if any, stays —
    /// receipts are immutable financial records.
    pub async fn cancel_reservation(
        &self,
        requester: &Requester,
        reservation_id: &str,
    ) -> TicketResult<Reservation> {
        validate_required_text(reservation_id, "reservation_id", MAX_SHORT_TEXT_LEN)?;

        let mut tx = self.db.begin().await?;

        let reservation = match ReservationLedger::cancel(&mut tx, reservation_id).await? {
            Some(reservation) => reservation,
            None => {
                let existing = ReservationLedger::find_by_id(&mut tx, reservation_id)
                    .await?
                    .ok_or_else(|| TicketError::NotFound {
                        entity: "reservation",
                        id: reservation_id.to_string(),
                    })?;
                if !may_manage(requester, &existing.user_id) {
                    return Err(TicketError::Unauthorized);
                }
                return Err(TicketError::InvalidState {
                    status: existing.status,
                });
            }
        };

        if !may_manage(requester, &reservation.user_id) {
            // Roll back the guarded transition along with everything else.
            return Err(TicketError::Unauthorized);
        }

        let ticket =
            TicketInventory::release(&mut tx, &reservation.ticket_type_id, reservation.quantity)
                .await?;

        DbService::commit(tx).await?;

        info!(
            reservation_id = %reservation.id,
            ticket_type_id = %ticket.id,
            released = reservation.quantity,
            available = ticket.available_quantity,
            "reservation canceled"
        );
        Ok(reservation)
    }

    /// Read one reservation, enriched with its ticket type and event
    /// summary. Owner, admin or organizer.
    pub async fn get_reservation(
        &self,
        requester: &Requester,
        reservation_id: &str,
    ) -> TicketResult<ReservationDetails> {
        validate_required_text(reservation_id, "reservation_id", MAX_SHORT_TEXT_LEN)?;

        let mut conn = self.db.acquire().await?;

        let reservation = ReservationLedger::find_by_id(&mut conn, reservation_id)
            .await?
            .ok_or_else(|| TicketError::NotFound {
                entity: "reservation",
                id: reservation_id.to_string(),
            })?;

        if !may_view(requester, &reservation.user_id) {
            return Err(TicketError::Unauthorized);
        }

        let ticket_details =
            TicketInventory::find_by_id(&mut conn, &reservation.ticket_type_id).await?;
        let event_details = match &ticket_details {
            Some(ticket) => self.catalog.event_summary(&ticket.event_id).await,
            None => None,
        };

        Ok(ReservationDetails {
            reservation,
            ticket_details,
            event_details,
        })
    }

    /// Paginated listing. Admins see every row; anyone else is narrowed to
    /// their own reservations regardless of the filter they passed.
    pub async fn list_reservations(
        &self,
        requester: &Requester,
        mut filter: ReservationFilter,
        page: Page,
    ) -> TicketResult<Paginated<Reservation>> {
        if !requester.role.is_admin() {
            filter.user_id = Some(requester.user_id.clone());
        }

        let mut conn = self.db.acquire().await?;
        let items = ReservationLedger::list(&mut conn, &filter, page).await?;
        let total = ReservationLedger::count(&mut conn, &filter).await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// The receipt of one reservation. Owner or admin.
    pub async fn get_receipt(
        &self,
        requester: &Requester,
        reservation_id: &str,
    ) -> TicketResult<Receipt> {
        validate_required_text(reservation_id, "reservation_id", MAX_SHORT_TEXT_LEN)?;

        let mut conn = self.db.acquire().await?;

        let reservation = ReservationLedger::find_by_id(&mut conn, reservation_id)
            .await?
            .ok_or_else(|| TicketError::NotFound {
                entity: "reservation",
                id: reservation_id.to_string(),
            })?;

        if !may_manage(requester, &reservation.user_id) {
            return Err(TicketError::Unauthorized);
        }

        ReceiptIssuer::find_by_reservation(&mut conn, reservation_id)
            .await?
            .ok_or_else(|| TicketError::NotFound {
                entity: "receipt",
                id: reservation_id.to_string(),
            })
    }

    /// One user's receipts, newest first. Self or admin.
    pub async fn list_user_receipts(
        &self,
        requester: &Requester,
        user_id: &str,
    ) -> TicketResult<Vec<Receipt>> {
        validate_required_text(user_id, "user_id", MAX_SHORT_TEXT_LEN)?;

        if !may_manage(requester, user_id) {
            return Err(TicketError::Unauthorized);
        }

        let mut conn = self.db.acquire().await?;
        Ok(ReceiptIssuer::list_by_user(&mut conn, user_id).await?)
    }
}

/// Owner or admin: mutate/inspect sensitive rows.
fn may_manage(requester: &Requester, owner_id: &str) -> bool {
    requester.owns(owner_id) || requester.role.is_admin()
}

/// Owner, admin or organizer: read-only enriched views.
fn may_view(requester: &Requester, owner_id: &str) -> bool {
    requester.owns(owner_id) || requester.role.is_staff()
}
