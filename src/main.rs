use hotel_booking_engine::{
    adapters::http::{ApiClient, HttpBookingGateway, HttpRoomCatalog},
    adapters::mock::{
        BookingGateway as MockBookingGateway, CurrentUser as MockCurrentUser,
        RoomCatalog as MockRoomCatalog, SessionStore as MockSessionStore,
    },
    api::{handlers::AppState, router::create_router},
    application::booking::ServiceDependencies,
    config::AppConfig,
    domain::{Room, RoomId},
    ports::{BookingGateway, CurrentUser, RoomCatalog},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// デモ用の客室（BOOKING_USE_MOCK=true のとき）
fn demo_rooms() -> Vec<Room> {
    [(1, 101, "SINGLE", 80.0), (2, 102, "DOUBLE", 100.0), (3, 201, "SUITE", 250.0)]
        .into_iter()
        .map(|(id, room_number, room_type, price)| Room {
            id: RoomId::new(id),
            room_number,
            room_type: room_type.to_string(),
            price,
            available: true,
            description: String::new(),
            image_url: None,
        })
        .collect()
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hotel_booking_engine=debug,tower_http=debug,axum=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize adapters
    let (room_catalog, booking_gateway): (Arc<dyn RoomCatalog>, Arc<dyn BookingGateway>) =
        if config.use_mock {
            tracing::info!("Using in-memory room catalog and booking gateway");
            let catalog = Arc::new(MockRoomCatalog::new());
            for room in demo_rooms() {
                catalog.add_room(room);
            }
            let gateway = Arc::new(MockBookingGateway::new(catalog.clone()));
            (
                catalog as Arc<dyn RoomCatalog>,
                gateway as Arc<dyn BookingGateway>,
            )
        } else {
            tracing::info!("Booking backend: {}", config.api_base_url);
            let client = Arc::new(
                ApiClient::new(config.api_base_url.clone(), config.api_token.clone())
                    .expect("Failed to create backend client"),
            );
            let catalog: Arc<dyn RoomCatalog> = Arc::new(HttpRoomCatalog::new(client.clone()));
            let gateway: Arc<dyn BookingGateway> = Arc::new(HttpBookingGateway::new(client));
            (catalog, gateway)
        };

    let current_user: Arc<dyn CurrentUser> = match config.user {
        Some(identity) => {
            tracing::info!(user_id = identity.id.value(), role = %identity.role, "Signed in");
            Arc::new(MockCurrentUser::signed_in(identity))
        }
        None => Arc::new(MockCurrentUser::new()),
    };

    // Create service dependencies
    let service_deps = ServiceDependencies {
        room_catalog,
        booking_gateway,
        current_user,
    };

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps,
        session_store: Arc::new(MockSessionStore::new()),
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
