use crate::domain::{Booking, BookingId, NewBooking};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約送信の結果
///
/// サーバー側の競合は通信エラーと区別して扱う。
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 予約が作成・変更された
    Created(Booking),
    /// 他の予約と競合したためサーバーが拒否した
    Conflict { message: String },
}

/// 予約ゲートウェイポート
///
/// 最終的な空き判定はサーバーが行う。クライアント側の検証は最善努力にすぎない。
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// 新しい予約を送信する
    async fn submit_booking(&self, request: NewBooking) -> Result<SubmitOutcome>;

    /// 既存予約の日付を変更する
    async fn update_booking(
        &self,
        booking_id: BookingId,
        request: NewBooking,
    ) -> Result<SubmitOutcome>;
}
