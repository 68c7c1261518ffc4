pub mod booking_gateway;
pub mod client;
pub mod error;
pub mod room_catalog;

pub use booking_gateway::BookingGateway as HttpBookingGateway;
pub use client::ApiClient;
pub use error::HttpClientError;
pub use room_catalog::RoomCatalog as HttpRoomCatalog;
