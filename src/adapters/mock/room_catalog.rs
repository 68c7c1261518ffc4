use crate::domain::{ReservedPeriod, Room, RoomId};
use crate::ports::room_catalog::{Result, RoomCatalog as RoomCatalogTrait};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Mock implementation of RoomCatalog
///
/// Keeps rooms and reserved periods in memory.
/// Can simulate an unreachable backend and a slow reserved-period fetch.
pub struct RoomCatalog {
    rooms: Mutex<HashMap<RoomId, Room>>,
    reserved: Mutex<HashMap<RoomId, Vec<ReservedPeriod>>>,
    reserved_unreachable: AtomicBool,
    fetch_delay: Mutex<Option<Duration>>,
}

impl RoomCatalog {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            reserved: Mutex::new(HashMap::new()),
            reserved_unreachable: AtomicBool::new(false),
            fetch_delay: Mutex::new(None),
        }
    }

    /// Register a room
    pub fn add_room(&self, room: Room) {
        self.rooms.lock().unwrap().insert(room.id, room);
    }

    /// Register a reserved period for a room
    pub fn add_reserved_period(&self, room_id: RoomId, period: ReservedPeriod) {
        self.reserved
            .lock()
            .unwrap()
            .entry(room_id)
            .or_default()
            .push(period);
    }

    /// Remove a reserved period (used when a booking moves to other dates)
    pub fn remove_reserved_period(&self, room_id: RoomId, period: ReservedPeriod) {
        if let Some(periods) = self.reserved.lock().unwrap().get_mut(&room_id) {
            periods.retain(|p| *p != period);
        }
    }

    /// Current reserved periods of a room
    pub fn reserved_periods(&self, room_id: RoomId) -> Vec<ReservedPeriod> {
        self.reserved
            .lock()
            .unwrap()
            .get(&room_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn room(&self, room_id: RoomId) -> Option<Room> {
        self.rooms.lock().unwrap().get(&room_id).cloned()
    }

    /// Make reserved-period fetches fail as if the backend were down
    pub fn set_reserved_periods_unreachable(&self, unreachable: bool) {
        self.reserved_unreachable
            .store(unreachable, Ordering::SeqCst);
    }

    /// Delay reserved-period fetches
    pub fn set_fetch_delay(&self, delay: Option<Duration>) {
        *self.fetch_delay.lock().unwrap() = delay;
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomCatalogTrait for RoomCatalog {
    async fn fetch_room(&self, room_id: RoomId) -> Result<Option<Room>> {
        Ok(self.room(room_id))
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.lock().unwrap().values().cloned().collect();
        rooms.sort_by_key(|r| r.id.value());
        Ok(rooms)
    }

    async fn fetch_reserved_periods(&self, room_id: RoomId) -> Result<Vec<ReservedPeriod>> {
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.reserved_unreachable.load(Ordering::SeqCst) {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "reserved periods endpoint unreachable",
            )));
        }

        Ok(self.reserved_periods(room_id))
    }
}
