use crate::domain::{BookingSession, BookingSessionId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約セッションの保存先ポート
///
/// APIの呼び出し間で開いているセッションを保持する。
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// セッションを保存する（新規・更新の両方）
    async fn save(&self, session: BookingSession) -> Result<()>;

    /// IDでセッションを取得する
    async fn get(&self, session_id: BookingSessionId) -> Result<Option<BookingSession>>;

    /// セッションを破棄する（ダイアログを閉じたとき）
    async fn remove(&self, session_id: BookingSessionId) -> Result<Option<BookingSession>>;
}
