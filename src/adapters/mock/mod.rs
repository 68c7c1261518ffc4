pub mod booking_gateway;
pub mod current_user;
pub mod room_catalog;
pub mod session_store;

pub use booking_gateway::BookingGateway;
pub use current_user::CurrentUser;
pub use room_catalog::RoomCatalog;
pub use session_store::SessionStore;
