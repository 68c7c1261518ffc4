use serde::{Deserialize, Serialize};

use super::{DateOnly, EditingBooking, RoomId};

/// コマンド：予約セッションを開く（予約ダイアログを開く）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBookingSession {
    pub room_id: RoomId,
    /// 既存予約の編集時のみ
    pub editing: Option<EditingBooking>,
}

/// コマンド：カレンダーの日付を選ぶ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectDate {
    pub date: DateOnly,
    pub today: DateOnly,
}
