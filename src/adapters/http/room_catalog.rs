use crate::domain::{ReservedPeriod, Room, RoomId};
use crate::ports::room_catalog::{Result, RoomCatalog as RoomCatalogTrait};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::client::ApiClient;

/// REST implementation of RoomCatalog
///
/// Uses the public room endpoints, which need no authentication:
/// - `GET /rooms`
/// - `GET /rooms/{id}`
/// - `GET /rooms/dates-reserved/{id}`
pub struct RoomCatalog {
    client: Arc<ApiClient>,
}

impl RoomCatalog {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoomCatalogTrait for RoomCatalog {
    async fn fetch_room(&self, room_id: RoomId) -> Result<Option<Room>> {
        let room = self
            .client
            .get_optional_json::<Room>(&format!("/rooms/{}", room_id))
            .await?;
        Ok(room)
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let rooms: Vec<Room> = self.client.get_json("/rooms").await?;
        info!("Fetched {} rooms", rooms.len());
        Ok(rooms)
    }

    async fn fetch_reserved_periods(&self, room_id: RoomId) -> Result<Vec<ReservedPeriod>> {
        let periods: Vec<ReservedPeriod> = self
            .client
            .get_json(&format!("/rooms/dates-reserved/{}", room_id))
            .await?;
        info!(%room_id, "Fetched {} reserved periods", periods.len());
        Ok(periods)
    }
}
