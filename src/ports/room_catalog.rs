use crate::domain::{ReservedPeriod, Room, RoomId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 客室カタログポート
///
/// 客室情報と予約済み期間の取得を抽象化する。
/// 予約コンテキストは客室の価格と予約可否だけを知る。
#[async_trait]
pub trait RoomCatalog: Send + Sync {
    /// 客室を取得する
    ///
    /// 存在しない場合は`None`を返す。
    async fn fetch_room(&self, room_id: RoomId) -> Result<Option<Room>>;

    /// 全客室を取得する
    async fn list_rooms(&self) -> Result<Vec<Room>>;

    /// 客室の予約済み期間を取得する
    ///
    /// 予約セッションを開くたびに1回だけ呼ばれる。
    async fn fetch_reserved_periods(&self, room_id: RoomId) -> Result<Vec<ReservedPeriod>>;
}
