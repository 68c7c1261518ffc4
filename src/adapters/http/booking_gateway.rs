use crate::domain::{Booking, BookingId, NewBooking};
use crate::ports::booking_gateway::{BookingGateway as BookingGatewayTrait, Result, SubmitOutcome};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

use super::client::{ApiClient, WriteResponse};

/// REST implementation of BookingGateway
///
/// - New bookings: `POST /client/add-booking`
/// - Date changes: `PUT /admin/bookings/update/{id}`
///
/// A `409 Conflict` answer is the server rejecting overlapping dates and is
/// reported as `SubmitOutcome::Conflict`, not as an error.
pub struct BookingGateway {
    client: Arc<ApiClient>,
}

impl BookingGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn into_outcome(response: WriteResponse<Booking>) -> SubmitOutcome {
    match response {
        WriteResponse::Accepted(booking) => SubmitOutcome::Created(booking),
        WriteResponse::Conflict(message) => SubmitOutcome::Conflict { message },
    }
}

#[async_trait]
impl BookingGatewayTrait for BookingGateway {
    async fn submit_booking(&self, request: NewBooking) -> Result<SubmitOutcome> {
        let response = self
            .client
            .write_json(Method::POST, "/client/add-booking", &request)
            .await?;
        Ok(into_outcome(response))
    }

    async fn update_booking(
        &self,
        booking_id: BookingId,
        request: NewBooking,
    ) -> Result<SubmitOutcome> {
        let response = self
            .client
            .write_json(
                Method::PUT,
                &format!("/admin/bookings/update/{}", booking_id),
                &request,
            )
            .await?;
        Ok(into_outcome(response))
    }
}
