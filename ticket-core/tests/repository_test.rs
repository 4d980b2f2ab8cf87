//! Repository-level contract tests: atomic inventory adjustments, ledger
//! status writes and the receipt uniqueness guarantee, exercised directly
//! against a throwaway database.

mod common;

use std::time::Duration;

use common::TestEnv;
use shared::models::{
    NewReceipt, NewReservation, PaymentStatus, ReservationFilter, ReservationStatus,
    TicketTypeFilter, TicketTypeUpdate,
};
use shared::request::Page;
use ticket_core::{
    ReceiptIssuer, RepoError, ReservationLedger, ReserveOutcome, TicketInventory,
};

#[tokio::test]
async fn ticket_type_crud_round_trip() {
    let env = TestEnv::new().await;
    let ticket = env.seed_ticket("ev-1", "Standard", 2500, 30).await;

    assert_eq!(ticket.purchase_limit, 10, "default purchase limit");
    assert!(ticket.is_active, "active by default");

    let mut conn = env.db.acquire().await.unwrap();

    let fetched = TicketInventory::find_by_id(&mut conn, &ticket.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.name, "Standard");
    assert_eq!(fetched.available_quantity, 30);

    let updated = TicketInventory::update(
        &mut conn,
        &ticket.id,
        TicketTypeUpdate {
            name: Some("Early Bird".into()),
            price_cents: Some(2000),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Early Bird");
    assert_eq!(updated.price_cents, 2000);
    // untouched fields survive a partial update
    assert_eq!(updated.available_quantity, 30);

    let missing = TicketInventory::update(&mut conn, "nope", TicketTypeUpdate::default()).await;
    assert!(matches!(missing, Err(RepoError::NotFound(_))));

    assert!(TicketInventory::delete(&mut conn, &ticket.id).await.unwrap());
    assert!(!TicketInventory::delete(&mut conn, &ticket.id).await.unwrap());
}

#[tokio::test]
async fn ticket_type_listing_and_filters() {
    let env = TestEnv::new().await;
    let cheap = env.seed_ticket("ev-1", "Standard", 2000, 10).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let pricey = env.seed_ticket("ev-1", "VIP", 9000, 5).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    env.seed_ticket("ev-2", "Standard", 1500, 10).await;

    let mut conn = env.db.acquire().await.unwrap();

    let by_event = TicketInventory::list_by_event(&mut conn, "ev-1")
        .await
        .unwrap();
    assert_eq!(by_event.len(), 2);
    // most expensive first
    assert_eq!(by_event[0].id, pricey.id);
    assert_eq!(by_event[1].id, cheap.id);

    let filtered = TicketInventory::list(
        &mut conn,
        &TicketTypeFilter {
            name: Some("VIP".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, pricey.id);

    TicketInventory::update(
        &mut conn,
        &pricey.id,
        TicketTypeUpdate {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let active_only = TicketInventory::list(
        &mut conn,
        &TicketTypeFilter {
            event_id: Some("ev-1".into()),
            is_active: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(active_only.len(), 1);
    assert_eq!(active_only[0].id, cheap.id);
}

#[tokio::test]
async fn reserve_outcomes() {
    let env = TestEnv::new().await;
    let ticket = env.seed_ticket("ev-1", "Standard", 2500, 5).await;
    let mut conn = env.db.acquire().await.unwrap();

    match TicketInventory::reserve(&mut conn, &ticket.id, 3).await.unwrap() {
        ReserveOutcome::Reserved(t) => assert_eq!(t.available_quantity, 2),
        other => panic!("expected Reserved, got {other:?}"),
    }

    match TicketInventory::reserve(&mut conn, &ticket.id, 3).await.unwrap() {
        ReserveOutcome::Insufficient { available } => assert_eq!(available, 2),
        other => panic!("expected Insufficient, got {other:?}"),
    }

    match TicketInventory::reserve(&mut conn, "nope", 1).await.unwrap() {
        ReserveOutcome::NotFound => {}
        other => panic!("expected NotFound, got {other:?}"),
    }

    TicketInventory::update(
        &mut conn,
        &ticket.id,
        TicketTypeUpdate {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    match TicketInventory::reserve(&mut conn, &ticket.id, 1).await.unwrap() {
        ReserveOutcome::Inactive => {}
        other => panic!("expected Inactive, got {other:?}"),
    }

    let released = TicketInventory::release(&mut conn, &ticket.id, 3)
        .await
        .unwrap();
    assert_eq!(released.available_quantity, 5);

    let missing = TicketInventory::release(&mut conn, "nope", 1).await;
    assert!(matches!(missing, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn ledger_inserts_lists_and_counts() {
    let env = TestEnv::new().await;
    let ticket = env.seed_ticket("ev-1", "Standard", 2500, 50).await;
    let mut conn = env.db.acquire().await.unwrap();

    let first = ReservationLedger::insert(
        &mut conn,
        NewReservation {
            user_id: "u-1".into(),
            ticket_type_id: ticket.id.clone(),
            quantity: 2,
            status: ReservationStatus::Pending,
        },
    )
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = ReservationLedger::insert(
        &mut conn,
        NewReservation {
            user_id: "u-1".into(),
            ticket_type_id: ticket.id.clone(),
            quantity: 1,
            status: ReservationStatus::Confirmed,
        },
    )
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    ReservationLedger::insert(
        &mut conn,
        NewReservation {
            user_id: "u-2".into(),
            ticket_type_id: ticket.id.clone(),
            quantity: 4,
            status: ReservationStatus::Pending,
        },
    )
    .await
    .unwrap();

    let mine = ReservationLedger::list_by_user(&mut conn, "u-1")
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
    // oldest first
    assert_eq!(mine[0].id, first.id);
    assert_eq!(mine[1].id, second.id);

    let pending = ReservationLedger::list(
        &mut conn,
        &ReservationFilter {
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        },
        Page::default(),
    )
    .await
    .unwrap();
    assert_eq!(pending.len(), 2);

    let total = ReservationLedger::count(&mut conn, &ReservationFilter::default())
        .await
        .unwrap();
    assert_eq!(total, 3);

    let confirmed = ReservationLedger::count(
        &mut conn,
        &ReservationFilter {
            status: Some(ReservationStatus::Confirmed),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(confirmed, 1);
}

#[tokio::test]
async fn ledger_status_writes() {
    let env = TestEnv::new().await;
    let ticket = env.seed_ticket("ev-1", "Standard", 2500, 50).await;
    let mut conn = env.db.acquire().await.unwrap();

    let reservation = ReservationLedger::insert(
        &mut conn,
        NewReservation {
            user_id: "u-1".into(),
            ticket_type_id: ticket.id.clone(),
            quantity: 1,
            status: ReservationStatus::Pending,
        },
    )
    .await
    .unwrap();

    // unconditional overwrite
    let overwritten =
        ReservationLedger::set_status(&mut conn, &reservation.id, ReservationStatus::Confirmed)
            .await
            .unwrap();
    assert_eq!(overwritten.status, ReservationStatus::Confirmed);

    // guarded transition only fires from the expected status
    let miss = ReservationLedger::transition(
        &mut conn,
        &reservation.id,
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
    )
    .await
    .unwrap();
    assert!(miss.is_none());

    // guarded cancel fires once, then misses
    let canceled = ReservationLedger::cancel(&mut conn, &reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(canceled.status, ReservationStatus::Canceled);
    assert!(
        ReservationLedger::cancel(&mut conn, &reservation.id)
            .await
            .unwrap()
            .is_none()
    );

    let missing = ReservationLedger::set_status(&mut conn, "nope", ReservationStatus::Canceled).await;
    assert!(matches!(missing, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn receipt_uniqueness_and_listing() {
    let env = TestEnv::new().await;
    let ticket = env.seed_ticket("ev-1", "Standard", 2500, 50).await;
    let mut conn = env.db.acquire().await.unwrap();

    let reservation = ReservationLedger::insert(
        &mut conn,
        NewReservation {
            user_id: "u-1".into(),
            ticket_type_id: ticket.id.clone(),
            quantity: 2,
            status: ReservationStatus::Confirmed,
        },
    )
    .await
    .unwrap();

    let new_receipt = |token: &str| NewReceipt {
        reservation_id: reservation.id.clone(),
        user_id: "u-1".into(),
        ticket_type_id: ticket.id.clone(),
        verification_token: token.into(),
        amount_cents: 5000,
        payment_method: "credit_card".into(),
        payment_status: PaymentStatus::Completed,
    };

    let receipt = ReceiptIssuer::issue(&mut conn, new_receipt("tok-a"))
        .await
        .unwrap();
    assert_eq!(receipt.amount_cents, 5000);

    // second issue for the same reservation loses at the unique index
    let dup = ReceiptIssuer::issue(&mut conn, new_receipt("tok-b")).await;
    assert!(matches!(dup, Err(RepoError::Duplicate(_))));

    let found = ReceiptIssuer::find_by_reservation(&mut conn, &reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, receipt.id);

    let listed = ReceiptIssuer::list_by_user(&mut conn, "u-1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(ReceiptIssuer::list_by_user(&mut conn, "u-2")
        .await
        .unwrap()
        .is_empty());
}
