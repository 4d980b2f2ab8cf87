//! Shared test fixtures: a throwaway SQLite database plus a wired service.
#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use shared::models::{EventSummary, TicketType, TicketTypeCreate};
use ticket_core::{DbService, ReservationService, StaticCatalog, TicketInventory};

pub struct TestEnv {
    pub db: DbService,
    pub service: ReservationService,
    pub catalog: Arc<StaticCatalog>,
    _dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("tickets.db");
        let db = DbService::new(path.to_str().expect("utf-8 path"))
            .await
            .expect("open database");
        let catalog = Arc::new(StaticCatalog::new());
        let service = ReservationService::new(db.clone(), catalog.clone());
        Self {
            db,
            service,
            catalog,
            _dir: dir,
        }
    }

    /// Insert a ticket type with the given stock, default limit and active.
    pub async fn seed_ticket(
        &self,
        event_id: &str,
        name: &str,
        price_cents: i64,
        quantity: i64,
    ) -> TicketType {
        let mut conn = self.db.acquire().await.expect("conn");
        TicketInventory::insert(
            &mut conn,
            TicketTypeCreate {
                event_id: event_id.into(),
                name: name.into(),
                price_cents,
                available_quantity: quantity,
                purchase_limit: None,
                is_active: None,
            },
        )
        .await
        .expect("seed ticket type")
    }

    /// Current available quantity of a ticket type.
    pub async fn available(&self, ticket_type_id: &str) -> i64 {
        let mut conn = self.db.acquire().await.expect("conn");
        TicketInventory::find_by_id(&mut conn, ticket_type_id)
            .await
            .expect("query ticket type")
            .expect("ticket type exists")
            .available_quantity
    }

    /// Register an event summary in the in-memory catalog.
    pub fn seed_event(&self, id: &str, title: &str) {
        self.catalog.register(EventSummary {
            id: id.into(),
            title: title.into(),
            date: Some("2026-09-12".into()),
            location: Some("Porto".into()),
            category: Some("musique".into()),
        });
    }
}
