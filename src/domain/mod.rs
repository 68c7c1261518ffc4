pub mod availability;
pub mod booking;
pub mod calendar;
pub mod commands;
pub mod errors;
pub mod events;
pub mod interval;
pub mod pricing;
pub mod reserved;
pub mod room;
pub mod selection;
pub mod session;
pub mod user;
pub mod value_objects;

pub use booking::*;
pub use errors::*;
pub use events::*;
pub use interval::*;
pub use reserved::*;
pub use room::*;
pub use selection::SelectionState;
pub use session::*;
pub use user::*;
pub use value_objects::*;
