use thiserror::Error;

use crate::domain::{BookingId, BookingSessionId, BookingValidationError, DateOnly, RoomId};

/// 予約アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 期間が不正（終了日が開始日より前、または選択が未完了）
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// 送信前の検証で予約済み期間との重なりを検出
    #[error("Selected dates conflict with reserved period {start}..{end}")]
    DateConflict { start: DateOnly, end: DateOnly },

    /// サーバーが競合で拒否した（他の利用者が先に予約した）
    #[error("Booking rejected by server: {0}")]
    ServerConflict(String),

    /// サーバー側の競合の後、予約済み期間を再取得していない
    #[error("Reserved periods must be refreshed before another attempt")]
    RefreshRequired,

    /// 編集する予約の期間が、取得した予約済み期間のどれとも一致しない
    #[error("Editing range does not match the reserved period of booking {0}")]
    EditingRangeMismatch(BookingId),

    /// 客室が存在しない
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    /// 客室が予約受付停止中
    #[error("Room {0} is not available for booking")]
    RoomUnavailable(RoomId),

    /// サインインしていない
    #[error("Sign-in required")]
    Unauthenticated,

    /// 予約セッションが存在しない（閉じられた・期限切れ）
    #[error("Booking session {0:?} not found")]
    SessionNotFound(BookingSessionId),

    /// 客室・予約済み期間の取得、または予約送信の通信エラー
    #[error("Network failure")]
    NetworkFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// セッション保存先のエラー
    #[error("Session store error")]
    SessionStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<BookingValidationError> for BookingApplicationError {
    fn from(err: BookingValidationError) -> Self {
        match err {
            BookingValidationError::IncompleteSelection => BookingApplicationError::InvalidRange(
                "both start and end dates must be selected".to_string(),
            ),
            BookingValidationError::DateConflict { period } => {
                BookingApplicationError::DateConflict {
                    start: period.start_date,
                    end: period.end_date,
                }
            }
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
