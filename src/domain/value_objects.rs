use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::InvalidDate;

/// バックエンドとの境界で使う日付フォーマット
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 客室ID - バックエンドの客室リソースへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 予約ID - バックエンドが採番する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 利用者ID - 認証コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 予約セッションID
///
/// 予約ダイアログを開いてから閉じるまでの1回の選択セッションを識別する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingSessionId(Uuid);

impl BookingSessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingSessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// 時刻を持たない暦日
///
/// 不変条件：比較は常に (年, 月, 日) で行う。
/// 時刻付きの値は `from_datetime` で0時に正規化してから扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateOnly(NaiveDate);

impl DateOnly {
    /// 年月日から作成する
    ///
    /// # エラー
    /// 暦に存在しない日付の場合は`InvalidDate`を返す
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidDate> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 時刻を切り捨てて暦日にする
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self(datetime.date_naive())
    }

    /// ローカルタイムゾーンでの今日
    pub fn today() -> Self {
        Self::from_datetime(&chrono::Local::now())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 日曜始まりの曜日番号（日曜=0）
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// `self`から`other`までの日数（整数日）
    pub fn days_until(&self, other: DateOnly) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// `days`日後（負なら前）。暦で扱える範囲を超える場合は`None`
    pub fn add_days(&self, days: i64) -> Option<Self> {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    /// 翌日（暦で扱える最終日なら`None`）
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl fmt::Display for DateOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateOnly {
    type Err = InvalidDate;

    /// `YYYY-MM-DD` を解析する
    ///
    /// `2025-01-10T00:00:00` のような時刻付きの値は日付部分だけを使う。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let date_part = match trimmed.char_indices().nth(10) {
            Some((idx, 'T' | ' ')) => &trimmed[..idx],
            _ => trimmed,
        };

        NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map(Self)
            .map_err(|_| InvalidDate(s.to_string()))
    }
}

impl Serialize for DateOnly {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateOnly {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn date(s: &str) -> DateOnly {
        s.parse().unwrap()
    }

    #[test]
    fn test_date_only_parse_and_display() {
        let d = date("2025-01-10");
        assert_eq!(d.year(), 2025);
        assert_eq!(d.month(), 1);
        assert_eq!(d.day(), 10);
        assert_eq!(d.to_string(), "2025-01-10");
    }

    #[test]
    fn test_date_only_parse_drops_time_of_day() {
        assert_eq!(date("2025-01-10T23:59:59"), date("2025-01-10"));
        assert_eq!(date("2025-01-10 08:00:00"), date("2025-01-10"));
    }

    #[test]
    fn test_date_only_parse_rejects_garbage() {
        assert!("2025-13-01".parse::<DateOnly>().is_err());
        assert!("10/01/2025".parse::<DateOnly>().is_err());
        assert!("".parse::<DateOnly>().is_err());
    }

    #[test]
    fn test_date_only_from_ymd_invalid() {
        let result = DateOnly::from_ymd(2025, 2, 30);
        assert_eq!(result, Err(InvalidDate("2025-02-30".to_string())));
    }

    #[test]
    fn test_date_only_from_datetime_normalizes_to_midnight() {
        let late = Utc.with_ymd_and_hms(2025, 3, 30, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 3, 30, 0, 15, 0).unwrap();
        assert_eq!(DateOnly::from_datetime(&late), DateOnly::from_datetime(&early));

        // タイムゾーンのローカル日付を使う
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let local = tokyo.with_ymd_and_hms(2025, 3, 31, 1, 0, 0).unwrap();
        assert_eq!(DateOnly::from_datetime(&local), date("2025-03-31"));
    }

    #[test]
    fn test_date_only_day_arithmetic_across_dst_boundary() {
        // 欧州の夏時間切替日をまたいでも整数日で数える
        let start = date("2025-03-29");
        let end = date("2025-04-01");
        assert_eq!(start.days_until(end), 3);
        assert_eq!(end.days_until(start), -3);
        assert_eq!(start.add_days(3), Some(end));
        assert_eq!(end.add_days(-3), Some(start));
        assert_eq!(date("2024-02-28").succ(), Some(date("2024-02-29")));
    }

    #[test]
    fn test_date_only_arithmetic_at_calendar_limits() {
        let last = DateOnly::from_naive(NaiveDate::MAX);
        assert_eq!(last.succ(), None);
        assert_eq!(last.add_days(1), None);
        assert_eq!(last.add_days(-1).and_then(|d| d.succ()), Some(last));

        let first = DateOnly::from_naive(NaiveDate::MIN);
        assert_eq!(first.add_days(-1), None);
        assert_eq!(first.add_days(i64::MAX), None);
    }

    #[test]
    fn test_date_only_ordering() {
        assert!(date("2025-01-09") < date("2025-01-10"));
        assert!(date("2024-12-31") < date("2025-01-01"));
    }

    #[test]
    fn test_date_only_serde_uses_plain_date() {
        let json = serde_json::to_string(&date("2025-01-05")).unwrap();
        assert_eq!(json, "\"2025-01-05\"");

        let back: DateOnly = serde_json::from_str("\"2025-01-05\"").unwrap();
        assert_eq!(back, date("2025-01-05"));

        assert!(serde_json::from_str::<DateOnly>("\"not-a-date\"").is_err());
    }

    #[test]
    fn test_weekday_from_sunday() {
        // 2025-06-01 は日曜日
        assert_eq!(date("2025-06-01").weekday_from_sunday(), 0);
        assert_eq!(date("2025-06-07").weekday_from_sunday(), 6);
    }

    #[test]
    fn test_booking_session_id_creation() {
        let id1 = BookingSessionId::new();
        let id2 = BookingSessionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_numeric_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&RoomId::new(7)).unwrap(), "7");
        let id: BookingId = serde_json::from_str("42").unwrap();
        assert_eq!(id.value(), 42);
    }
}
