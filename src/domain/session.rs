use serde::Serialize;

use super::availability::AvailabilityContext;
use super::calendar::{CalendarDay, YearMonth, calendar_month};
use super::{
    BookingSessionId, DateOnly, DateRange, EditingBooking, ReservedPeriodSet, Room, SelectionState,
};

/// 予約済み期間の信頼度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// バックエンドから取得済み
    Verified,
    /// 取得に失敗し「予約なし」として扱っている（利用者が明示的に了承した場合のみ）
    Degraded,
}

/// 予約セッション - 予約ダイアログ1回分の状態
///
/// 予約済み期間はセッション開始時に取得し、セッション中は変更しない
/// （サーバー側の競合後に明示的に再取得する場合を除く）。
#[derive(Debug, Clone)]
pub struct BookingSession {
    pub session_id: BookingSessionId,
    pub room: Room,
    pub reserved: ReservedPeriodSet,
    pub editing: Option<EditingBooking>,
    pub selection: SelectionState,
    pub availability: Availability,
    /// サーバーが競合で拒否したため、再取得するまで送信できない
    pub needs_refresh: bool,
}

impl BookingSession {
    pub fn new(
        room: Room,
        reserved: ReservedPeriodSet,
        editing: Option<EditingBooking>,
        availability: Availability,
    ) -> Self {
        Self {
            session_id: BookingSessionId::new(),
            room,
            reserved,
            editing,
            selection: SelectionState::Empty,
            availability,
            needs_refresh: false,
        }
    }

    pub fn editing_range(&self) -> Option<DateRange> {
        self.editing.map(|e| e.range)
    }

    /// このセッションの判定文脈
    pub fn context(&self, today: DateOnly) -> AvailabilityContext<'_> {
        AvailabilityContext::new(&self.reserved, today)
            .with_editing(self.editing_range())
            .with_selection(&self.selection)
    }

    /// 月表示のカレンダー
    pub fn calendar(&self, month: YearMonth, today: DateOnly) -> Vec<CalendarDay> {
        calendar_month(month, &self.context(today))
    }

    /// 現在の選択での合計金額
    pub fn quote(&self) -> f64 {
        self.selection.total_price(self.room.price)
    }

    pub fn is_degraded(&self) -> bool {
        self.availability == Availability::Degraded
    }
}
