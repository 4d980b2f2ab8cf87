//! Receipt Issuer
//!
//! Owns the `receipts` relation. Receipts are append-only: issued exactly
//! once per reservation (UNIQUE index on `reservation_id`), never updated
//! or deleted. A duplicate issue attempt — including one racing a
//! concurrent confirmation — surfaces as [`RepoError::Duplicate`].

use sqlx::SqliteConnection;
use uuid::Uuid;

use shared::models::{NewReceipt, Receipt};
use shared::util::now_millis;

use super::{RepoResult, map_unique};

pub struct ReceiptIssuer;

impl ReceiptIssuer {
    /// Insert the receipt row; the id and issue time are generated here.
    pub async fn issue(conn: &mut SqliteConnection, new: NewReceipt) -> RepoResult<Receipt> {
        sqlx::query_as::<_, Receipt>(
            "INSERT INTO receipts \
             (id, reservation_id, user_id, ticket_type_id, verification_token, amount_cents, payment_method, payment_status, issued_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(new.reservation_id.clone())
        .bind(new.user_id)
        .bind(new.ticket_type_id)
        .bind(new.verification_token)
        .bind(new.amount_cents)
        .bind(new.payment_method)
        .bind(new.payment_status)
        .bind(now_millis())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique(e, &format!("receipt for reservation {}", new.reservation_id)))
    }

    pub async fn find_by_reservation(
        conn: &mut SqliteConnection,
        reservation_id: &str,
    ) -> RepoResult<Option<Receipt>> {
        Ok(
            sqlx::query_as::<_, Receipt>("SELECT * FROM receipts WHERE reservation_id = ?")
                .bind(reservation_id)
                .fetch_optional(&mut *conn)
                .await?,
        )
    }

    /// One user's receipts, newest first.
    pub async fn list_by_user(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> RepoResult<Vec<Receipt>> {
        Ok(sqlx::query_as::<_, Receipt>(
            "SELECT * FROM receipts WHERE user_id = ? ORDER BY issued_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?)
    }
}
