use crate::domain::{Booking, BookingId, BookingStatus, DateRange, NewBooking, ReservedPeriod};
use crate::ports::booking_gateway::{BookingGateway as BookingGatewayTrait, Result, SubmitOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use super::room_catalog::RoomCatalog;

/// Mock implementation of BookingGateway
///
/// Plays the role of the authoritative server: every submission is checked
/// against the reserved periods held by the shared mock RoomCatalog, and an
/// accepted booking is added to them.
pub struct BookingGateway {
    catalog: Arc<RoomCatalog>,
    bookings: Mutex<HashMap<BookingId, Booking>>,
    next_id: AtomicI64,
}

impl BookingGateway {
    pub fn new(catalog: Arc<RoomCatalog>) -> Self {
        Self {
            catalog,
            bookings: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Bookings accepted so far
    pub fn bookings(&self) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self.bookings.lock().unwrap().values().cloned().collect();
        bookings.sort_by_key(|b| b.id.value());
        bookings
    }

    /// Register an existing booking (and its reserved period)
    pub fn add_existing_booking(&self, booking: Booking) {
        self.catalog.add_reserved_period(
            booking.room.id,
            ReservedPeriod::new(booking.start_date, booking.end_date),
        );
        self.bookings.lock().unwrap().insert(booking.id, booking);
    }

    fn conflicting_period(
        &self,
        request: &NewBooking,
        range: &DateRange,
        own: Option<ReservedPeriod>,
    ) -> Option<ReservedPeriod> {
        self.catalog
            .reserved_periods(request.room_id)
            .into_iter()
            .filter(|p| Some(*p) != own)
            .find(|p| p.as_range().is_some_and(|r| r.overlaps(range)))
    }

    fn accept(&self, id: BookingId, request: NewBooking, range: DateRange) -> Result<Booking> {
        let room = self
            .catalog
            .room(request.room_id)
            .ok_or_else(|| format!("room {} does not exist", request.room_id))?;

        let booking = Booking {
            id,
            room,
            start_date: range.start(),
            end_date: range.end(),
            total_price: request.total_price,
            status: BookingStatus::Pending,
        };

        self.catalog
            .add_reserved_period(request.room_id, ReservedPeriod::from(range));
        self.bookings.lock().unwrap().insert(id, booking.clone());
        Ok(booking)
    }
}

#[async_trait]
impl BookingGatewayTrait for BookingGateway {
    async fn submit_booking(&self, request: NewBooking) -> Result<SubmitOutcome> {
        let range = request.range().ok_or("end date is before start date")?;

        if let Some(period) = self.conflicting_period(&request, &range, None) {
            return Ok(SubmitOutcome::Conflict {
                message: format!(
                    "room already booked from {} to {}",
                    period.start_date, period.end_date
                ),
            });
        }

        let id = BookingId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let booking = self.accept(id, request, range)?;
        Ok(SubmitOutcome::Created(booking))
    }

    async fn update_booking(
        &self,
        booking_id: BookingId,
        request: NewBooking,
    ) -> Result<SubmitOutcome> {
        let range = request.range().ok_or("end date is before start date")?;

        let existing = self
            .bookings
            .lock()
            .unwrap()
            .get(&booking_id)
            .cloned()
            .ok_or_else(|| format!("booking {} does not exist", booking_id))?;
        let own = ReservedPeriod::new(existing.start_date, existing.end_date);

        if let Some(period) = self.conflicting_period(&request, &range, Some(own)) {
            return Ok(SubmitOutcome::Conflict {
                message: format!(
                    "room already booked from {} to {}",
                    period.start_date, period.end_date
                ),
            });
        }

        self.catalog.remove_reserved_period(existing.room.id, own);
        let booking = self.accept(booking_id, request, range)?;
        Ok(SubmitOutcome::Created(booking))
    }
}
