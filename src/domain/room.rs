use serde::{Deserialize, Serialize};

use super::RoomId;

/// 客室（予約コンテキストからは読み取り専用）
///
/// 予約エンジンが使うのは`price`（1泊の料金）と`available`のみ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub room_number: i32,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: f64,
    pub available: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
