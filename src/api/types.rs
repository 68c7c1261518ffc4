use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::calendar::CalendarDay;
use crate::domain::{
    Availability, Booking, BookingId, BookingSession, DateOnly, DateRange, EditingBooking,
    InvalidRange, ReservedPeriod, Room, RoomId, SelectionEvent, SelectionState,
    commands::OpenBookingSession,
};

/// 予約セッション開始リクエスト（POST /booking-sessions）
#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub room_id: i64,
    /// 既存予約の日付変更時のみ
    pub editing: Option<EditingRequest>,
    /// 予約済み期間の取得に失敗しても「予約なし」として開く
    #[serde(default)]
    pub degraded: bool,
}

/// 編集対象の既存予約
#[derive(Debug, Deserialize)]
pub struct EditingRequest {
    pub booking_id: i64,
    pub start_date: DateOnly,
    pub end_date: DateOnly,
}

impl OpenSessionRequest {
    pub fn to_command(&self) -> Result<OpenBookingSession, InvalidRange> {
        let editing = match &self.editing {
            Some(e) => Some(EditingBooking {
                booking_id: BookingId::new(e.booking_id),
                range: DateRange::new(e.start_date, e.end_date)?,
            }),
            None => None,
        };

        Ok(OpenBookingSession {
            room_id: RoomId::new(self.room_id),
            editing,
        })
    }
}

/// 予約セッション開始レスポンス
#[derive(Debug, Serialize)]
pub struct SessionOpenedResponse {
    pub session_id: Uuid,
    pub room: Room,
    pub availability: Availability,
    pub reserved_periods: Vec<ReservedPeriod>,
}

impl From<&BookingSession> for SessionOpenedResponse {
    fn from(session: &BookingSession) -> Self {
        Self {
            session_id: session.session_id.value(),
            room: session.room.clone(),
            availability: session.availability,
            reserved_periods: session.reserved.iter().map(|r| (*r).into()).collect(),
        }
    }
}

/// カレンダー取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// 省略時は`today`の年
    pub year: Option<i32>,
    /// 省略時は`today`の月
    pub month: Option<u32>,
    /// 省略時はサーバーのローカル日付
    pub today: Option<DateOnly>,
}

/// カレンダーレスポンス
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub availability: Availability,
    pub selection: SelectionState,
    pub total_price: f64,
    pub days: Vec<CalendarDay>,
}

/// 日付選択リクエスト
#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: DateOnly,
    pub today: Option<DateOnly>,
}

/// 日付選択レスポンス
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selection: SelectionState,
    pub event: SelectionEvent,
    pub total_price: f64,
}

/// 予約済み期間再取得レスポンス
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub availability: Availability,
    pub reserved_periods: Vec<ReservedPeriod>,
}

/// 予約送信レスポンス
#[derive(Debug, Serialize)]
pub struct BookingSubmittedResponse {
    pub booking: Booking,
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
