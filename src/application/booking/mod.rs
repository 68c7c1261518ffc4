mod booking_service;
mod errors;

pub use booking_service::{
    ServiceDependencies, close_booking_session, list_rooms, open_booking_session,
    open_booking_session_until, open_degraded_booking_session, quote, refresh_reserved_periods,
    select_date, submit_booking,
};
pub use errors::{BookingApplicationError, Result};
