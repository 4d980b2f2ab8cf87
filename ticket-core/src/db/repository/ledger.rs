//! Reservation Ledger
//!
//! Owns the `reservations` relation: inserts, reads, filtered listings and
//! status writes. The ledger stores status transitions but does not decide
//! their legality — that is the orchestrator's job. For race-prone
//! transitions it offers guarded single-statement variants
//! ([`ReservationLedger::transition`], [`ReservationLedger::cancel`])
//! whose WHERE clause makes the losing side of a race observe zero rows
//! instead of overwriting the winner.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use shared::models::{NewReservation, Reservation, ReservationFilter, ReservationStatus};
use shared::request::Page;
use shared::util::now_millis;

use super::{RepoError, RepoResult};

pub struct ReservationLedger;

impl ReservationLedger {
    /// Insert a reservation row. No inventory checks here; the orchestrator
    /// performs those in the same unit of work.
    pub async fn insert(
        conn: &mut SqliteConnection,
        new: NewReservation,
    ) -> RepoResult<Reservation> {
        let now = now_millis();
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations \
             (id, user_id, ticket_type_id, quantity, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(new.user_id)
        .bind(new.ticket_type_id)
        .bind(new.quantity)
        .bind(new.status)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepoError::from)
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        reservation_id: &str,
    ) -> RepoResult<Option<Reservation>> {
        Ok(
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
                .bind(reservation_id)
                .fetch_optional(&mut *conn)
                .await?,
        )
    }

    /// One user's reservations, oldest first (display stability).
    pub async fn list_by_user(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> RepoResult<Vec<Reservation>> {
        Ok(sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?)
    }

    /// Administrative listing: optional filters, paginated, oldest first.
    pub async fn list(
        conn: &mut SqliteConnection,
        filter: &ReservationFilter,
        page: Page,
    ) -> RepoResult<Vec<Reservation>> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM reservations WHERE 1=1");
        Self::push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at ASC, id ASC");
        qb.push(" LIMIT ").push_bind(page.limit());
        qb.push(" OFFSET ").push_bind(page.offset());

        Ok(qb
            .build_query_as::<Reservation>()
            .fetch_all(&mut *conn)
            .await?)
    }

    /// Row count for the same filter shape as [`Self::list`].
    pub async fn count(
        conn: &mut SqliteConnection,
        filter: &ReservationFilter,
    ) -> RepoResult<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM reservations WHERE 1=1");
        Self::push_filter(&mut qb, filter);

        Ok(qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await?)
    }

    /// Unconditional status overwrite. Callers that might race must use
    /// [`Self::transition`] or [`Self::cancel`] instead.
    pub async fn set_status(
        conn: &mut SqliteConnection,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(status)
        .bind(now_millis())
        .bind(reservation_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("reservation {reservation_id}")))
    }

    /// Guarded transition: applies only while the row is in `from`.
    /// Returns `None` when the reservation is missing or in another state;
    /// the caller reads the row to tell which.
    pub async fn transition(
        conn: &mut SqliteConnection,
        reservation_id: &str,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> RepoResult<Option<Reservation>> {
        Ok(sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = ?, updated_at = ? \
             WHERE id = ? AND status = ? \
             RETURNING *",
        )
        .bind(to)
        .bind(now_millis())
        .bind(reservation_id)
        .bind(from)
        .fetch_optional(&mut *conn)
        .await?)
    }

    /// Guarded cancel: any not-yet-canceled status goes to `canceled`.
    /// The guard is what makes a concurrent double-cancel release
    /// inventory exactly once — the second caller matches zero rows.
    pub async fn cancel(
        conn: &mut SqliteConnection,
        reservation_id: &str,
    ) -> RepoResult<Option<Reservation>> {
        Ok(sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = ?, updated_at = ? \
             WHERE id = ? AND status != ? \
             RETURNING *",
        )
        .bind(ReservationStatus::Canceled)
        .bind(now_millis())
        .bind(reservation_id)
        .bind(ReservationStatus::Canceled)
        .fetch_optional(&mut *conn)
        .await?)
    }

    fn push_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &ReservationFilter) {
        if let Some(user_id) = &filter.user_id {
            qb.push(" AND user_id = ").push_bind(user_id.clone());
        }
        if let Some(ticket_type_id) = &filter.ticket_type_id {
            qb.push(" AND ticket_type_id = ")
                .push_bind(ticket_type_id.clone());
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
    }
}
