use hotel_booking_engine::adapters::http::{ApiClient, HttpBookingGateway, HttpRoomCatalog};
use hotel_booking_engine::domain::*;
use hotel_booking_engine::ports::{BookingGateway, RoomCatalog, SubmitOutcome};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// テスト用セットアップ
// ============================================================================

fn date(s: &str) -> DateOnly {
    s.parse().unwrap()
}

fn room_json() -> serde_json::Value {
    json!({
        "id": 1,
        "roomNumber": 101,
        "type": "DOUBLE",
        "price": 100,
        "available": true,
        "description": "Sea view",
        "imageUrl": null
    })
}

fn client(server: &MockServer, token: Option<&str>) -> Arc<ApiClient> {
    Arc::new(
        ApiClient::new(
            format!("{}/api/v1/", server.uri()),
            token.map(str::to_string),
        )
        .unwrap(),
    )
}

fn new_booking() -> NewBooking {
    NewBooking {
        user_id: UserId::new(42),
        room_id: RoomId::new(1),
        start_date: date("2025-01-10"),
        end_date: date("2025-01-12"),
        total_price: 300.0,
    }
}

// ============================================================================
// RoomCatalog
// ============================================================================

#[tokio::test]
async fn test_fetch_room() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_json()))
        .mount(&server)
        .await;

    let catalog = HttpRoomCatalog::new(client(&server, None));
    let room = catalog.fetch_room(RoomId::new(1)).await.unwrap().unwrap();

    assert_eq!(room.id, RoomId::new(1));
    assert_eq!(room.room_type, "DOUBLE");
    assert_eq!(room.price, 100.0);
}

#[tokio::test]
async fn test_fetch_missing_room_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let catalog = HttpRoomCatalog::new(client(&server, None));
    let room = catalog.fetch_room(RoomId::new(9)).await.unwrap();

    assert!(room.is_none());
}

#[tokio::test]
async fn test_list_rooms() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([room_json()])))
        .mount(&server)
        .await;

    let catalog = HttpRoomCatalog::new(client(&server, None));
    let rooms = catalog.list_rooms().await.unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_number, 101);
}

#[tokio::test]
async fn test_fetch_reserved_periods_accepts_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/dates-reserved/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "startDate": "2025-01-10", "endDate": "2025-01-11" },
            { "startDate": "2025-02-01T00:00:00", "endDate": "2025-02-03T00:00:00" }
        ])))
        .mount(&server)
        .await;

    let catalog = HttpRoomCatalog::new(client(&server, None));
    let periods = catalog.fetch_reserved_periods(RoomId::new(1)).await.unwrap();

    assert_eq!(
        periods,
        vec![
            ReservedPeriod::new(date("2025-01-10"), date("2025-01-11")),
            ReservedPeriod::new(date("2025-02-01"), date("2025-02-03")),
        ]
    );
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/dates-reserved/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let catalog = HttpRoomCatalog::new(client(&server, None));
    let result = catalog.fetch_reserved_periods(RoomId::new(1)).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_unreachable_backend_is_an_error() {
    // 何も待ち受けていないポート
    let client = Arc::new(ApiClient::new("http://127.0.0.1:9/api/v1", None).unwrap());
    let catalog = HttpRoomCatalog::new(client);

    assert!(catalog.fetch_reserved_periods(RoomId::new(1)).await.is_err());
}

// ============================================================================
// BookingGateway
// ============================================================================

#[tokio::test]
async fn test_submit_booking_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/client/add-booking"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({
            "userId": 42,
            "roomId": 1,
            "startDate": "2025-01-10",
            "endDate": "2025-01-12",
            "totalPrice": 300.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "room": room_json(),
            "startDate": "2025-01-10",
            "endDate": "2025-01-12",
            "totalPrice": 300,
            "status": "PENDING"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpBookingGateway::new(client(&server, Some("secret")));
    let outcome = gateway.submit_booking(new_booking()).await.unwrap();

    match outcome {
        SubmitOutcome::Created(booking) => {
            assert_eq!(booking.id, BookingId::new(5));
            assert_eq!(booking.status, BookingStatus::Pending);
        }
        other => panic!("expected Created, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_booking_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/client/add-booking"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Room is already booked for these dates"
        })))
        .mount(&server)
        .await;

    let gateway = HttpBookingGateway::new(client(&server, Some("secret")));
    let outcome = gateway.submit_booking(new_booking()).await.unwrap();

    match outcome {
        SubmitOutcome::Conflict { message } => {
            assert_eq!(message, "Room is already booked for these dates");
        }
        other => panic!("expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_booking_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/admin/bookings/update/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "room": room_json(),
            "startDate": "2025-01-10",
            "endDate": "2025-01-12",
            "totalPrice": 300,
            "status": "CONFIRMED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpBookingGateway::new(client(&server, Some("secret")));
    let outcome = gateway
        .update_booking(BookingId::new(7), new_booking())
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Created(b) if b.id == BookingId::new(7)));
}

#[tokio::test]
async fn test_unauthorized_submit_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/client/add-booking"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let gateway = HttpBookingGateway::new(client(&server, None));
    let result = gateway.submit_booking(new_booking()).await;

    assert!(result.is_err());
}
