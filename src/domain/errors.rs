use std::fmt;

use super::{DateOnly, ReservedPeriod};

/// 日付の解析エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate(pub String);

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date (expected YYYY-MM-DD): {}", self.0)
    }
}

impl std::error::Error for InvalidDate {}

/// 期間のエラー：終了日が開始日より前
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRange {
    pub start: DateOnly,
    pub end: DateOnly,
}

impl fmt::Display for InvalidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "end date {} is before start date {}", self.end, self.start)
    }
}

impl std::error::Error for InvalidRange {}

/// 月の指定エラー（1〜12以外、または暦で表示できる範囲外）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for InvalidMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "month {}-{} cannot be displayed", self.year, self.month)
    }
}

impl std::error::Error for InvalidMonth {}

/// 予約送信前の検証エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    /// 開始日・終了日の両方が選ばれていない
    IncompleteSelection,
    /// 既存の予約期間と重なっている
    DateConflict { period: ReservedPeriod },
}
