//! Ticket Inventory Store
//!
//! Owns the `ticket_types` relation and its contended
//! `available_quantity` counter. The reserve/release pair are single
//! conditional UPDATE statements: the availability check and the decrement
//! happen in one step, so two concurrent reservations whose combined
//! quantity exceeds stock can never both succeed, no matter how calls
//! interleave. A separate read-then-write pair would reintroduce exactly
//! that race.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use shared::models::{TicketType, TicketTypeCreate, TicketTypeFilter, TicketTypeUpdate};
use shared::models::ticket_type::DEFAULT_PURCHASE_LIMIT;
use shared::util::now_millis;

use super::{RepoError, RepoResult};

/// Result of an atomic reserve attempt.
#[derive(Debug, Clone)]
pub enum ReserveOutcome {
    /// Decrement applied; carries the updated row.
    Reserved(TicketType),
    /// Guard failed: not enough stock. Carries what is actually left.
    Insufficient { available: i64 },
    /// Guard failed: the ticket type is not on sale.
    Inactive,
    /// No such ticket type.
    NotFound,
}

pub struct TicketInventory;

impl TicketInventory {
    /// Atomically claim `quantity` units.
    ///
    /// The WHERE clause is the guard: the row is only touched while it is
    /// active and has at least `quantity` units left. On a miss, one
    /// follow-up read distinguishes the three failure shapes.
    pub async fn reserve(
        conn: &mut SqliteConnection,
        ticket_type_id: &str,
        quantity: i64,
    ) -> RepoResult<ReserveOutcome> {
        let updated = sqlx::query_as::<_, TicketType>(
            "UPDATE ticket_types \
             SET available_quantity = available_quantity - ?, updated_at = ? \
             WHERE id = ? AND is_active = 1 AND available_quantity >= ? \
             RETURNING *",
        )
        .bind(quantity)
        .bind(now_millis())
        .bind(ticket_type_id)
        .bind(quantity)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(ticket) = updated {
            return Ok(ReserveOutcome::Reserved(ticket));
        }

        match Self::find_by_id(conn, ticket_type_id).await? {
            None => Ok(ReserveOutcome::NotFound),
            Some(t) if !t.is_active => Ok(ReserveOutcome::Inactive),
            Some(t) => Ok(ReserveOutcome::Insufficient {
                available: t.available_quantity,
            }),
        }
    }

    /// Return `quantity` units to stock (cancellation path). At-most-once
    /// per reservation is the caller's job; the ledger's status guard
    /// provides it.
    pub async fn release(
        conn: &mut SqliteConnection,
        ticket_type_id: &str,
        quantity: i64,
    ) -> RepoResult<TicketType> {
        sqlx::query_as::<_, TicketType>(
            "UPDATE ticket_types \
             SET available_quantity = available_quantity + ?, updated_at = ? \
             WHERE id = ? \
             RETURNING *",
        )
        .bind(quantity)
        .bind(now_millis())
        .bind(ticket_type_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("ticket type {ticket_type_id}")))
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        ticket_type_id: &str,
    ) -> RepoResult<Option<TicketType>> {
        Ok(sqlx::query_as::<_, TicketType>(
            "SELECT * FROM ticket_types WHERE id = ?",
        )
        .bind(ticket_type_id)
        .fetch_optional(&mut *conn)
        .await?)
    }

    /// Insert a new ticket type (organizer/admin workflow entry point).
    pub async fn insert(
        conn: &mut SqliteConnection,
        create: TicketTypeCreate,
    ) -> RepoResult<TicketType> {
        let now = now_millis();
        sqlx::query_as::<_, TicketType>(
            "INSERT INTO ticket_types \
             (id, event_id, name, price_cents, available_quantity, purchase_limit, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(create.event_id)
        .bind(create.name)
        .bind(create.price_cents)
        .bind(create.available_quantity)
        .bind(create.purchase_limit.unwrap_or(DEFAULT_PURCHASE_LIMIT))
        .bind(create.is_active.unwrap_or(true))
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepoError::from)
    }

    /// Patch the mutable fields. `available_quantity` is not among them;
    /// inventory only moves through [`Self::reserve`] and [`Self::release`].
    pub async fn update(
        conn: &mut SqliteConnection,
        ticket_type_id: &str,
        update: TicketTypeUpdate,
    ) -> RepoResult<TicketType> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE ticket_types SET updated_at = ");
        qb.push_bind(now_millis());
        if let Some(name) = update.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(price_cents) = update.price_cents {
            qb.push(", price_cents = ").push_bind(price_cents);
        }
        if let Some(purchase_limit) = update.purchase_limit {
            qb.push(", purchase_limit = ").push_bind(purchase_limit);
        }
        if let Some(is_active) = update.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }
        qb.push(" WHERE id = ").push_bind(ticket_type_id.to_string());
        qb.push(" RETURNING *");

        qb.build_query_as::<TicketType>()
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("ticket type {ticket_type_id}")))
    }

    pub async fn delete(conn: &mut SqliteConnection, ticket_type_id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM ticket_types WHERE id = ?")
            .bind(ticket_type_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Catalog listing with optional filters, oldest first.
    pub async fn list(
        conn: &mut SqliteConnection,
        filter: &TicketTypeFilter,
    ) -> RepoResult<Vec<TicketType>> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM ticket_types WHERE 1=1");
        if let Some(event_id) = &filter.event_id {
            qb.push(" AND event_id = ").push_bind(event_id.clone());
        }
        if let Some(name) = &filter.name {
            qb.push(" AND name LIKE ").push_bind(format!("%{name}%"));
        }
        if let Some(is_active) = filter.is_active {
            qb.push(" AND is_active = ").push_bind(is_active);
        }
        qb.push(" ORDER BY created_at ASC, id ASC");

        Ok(qb
            .build_query_as::<TicketType>()
            .fetch_all(&mut *conn)
            .await?)
    }

    /// All ticket types of one event, most expensive first.
    pub async fn list_by_event(
        conn: &mut SqliteConnection,
        event_id: &str,
    ) -> RepoResult<Vec<TicketType>> {
        Ok(sqlx::query_as::<_, TicketType>(
            "SELECT * FROM ticket_types WHERE event_id = ? ORDER BY price_cents DESC",
        )
        .bind(event_id)
        .fetch_all(&mut *conn)
        .await?)
    }
}
