use serde::Serialize;

use super::{DateOnly, InvalidRange};

/// 両端を含む日付の期間 `[start, end]`
///
/// 不変条件：start <= end
/// `new`以外に構築手段がないため、逆転した期間は存在できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: DateOnly,
    end: DateOnly,
}

impl DateRange {
    /// 期間を作成する
    ///
    /// # エラー
    /// end < start の場合は`InvalidRange`を返す
    pub fn new(start: DateOnly, end: DateOnly) -> Result<Self, InvalidRange> {
        if end < start {
            return Err(InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// 1日だけの期間
    pub fn single(date: DateOnly) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> DateOnly {
        self.start
    }

    pub fn end(&self) -> DateOnly {
        self.end
    }

    /// `date`が期間内か（両端を含む）
    pub fn contains(&self, date: DateOnly) -> bool {
        self.start <= date && date <= self.end
    }

    /// `other`全体がこの期間に収まるか
    pub fn contains_range(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// 重なり判定
    ///
    /// 両端を含む2区間は `a.start <= b.end && b.start <= a.end` のとき重なる。
    /// 重なり判定はすべてこのメソッドを通す。
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// 泊数（両端の日を含めて数える：1日の滞在は1泊）
    pub fn nights(&self) -> i64 {
        self.start.days_until(self.end) + 1
    }

    /// 期間内の日付を昇順に列挙する
    pub fn days(&self) -> impl Iterator<Item = DateOnly> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| if *d < end { d.succ() } else { None })
    }
}

/// 重なり判定（`DateRange::overlaps`の関数形）
pub fn overlaps(a: &DateRange, b: &DateRange) -> bool {
    a.overlaps(b)
}
