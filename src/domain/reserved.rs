use serde::{Deserialize, Serialize};

use super::{DateOnly, DateRange};

/// 予約済み期間（バックエンドの`dates-reserved`の1要素）
///
/// 両端を含む。`start_date <= d <= end_date` の日付 d は予約済み。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedPeriod {
    pub start_date: DateOnly,
    pub end_date: DateOnly,
}

impl ReservedPeriod {
    pub fn new(start_date: DateOnly, end_date: DateOnly) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// 期間として解釈する。逆転している場合は`None`
    pub fn as_range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date).ok()
    }
}

impl From<DateRange> for ReservedPeriod {
    fn from(range: DateRange) -> Self {
        Self::new(range.start(), range.end())
    }
}

/// 1つの客室の予約済み期間の集合
///
/// 順序は意味を持たない。期間同士が重ならないことは前提とし、検証しない。
/// 選択セッション中は不変。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedPeriodSet {
    periods: Vec<DateRange>,
}

impl ReservedPeriodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateRange> {
        self.periods.iter()
    }

    /// `range`と両端が一致する予約期間があるか
    pub fn contains_period(&self, range: &DateRange) -> bool {
        self.periods.iter().any(|p| p == range)
    }

    /// 編集した予約の期間を差し替える
    pub fn replace(&mut self, old: &DateRange, new: DateRange) {
        self.periods.retain(|p| p != old);
        self.periods.push(new);
    }

    /// `date`がいずれかの予約期間に含まれるか
    pub fn is_reserved(&self, date: DateOnly) -> bool {
        self.periods.iter().any(|p| p.contains(date))
    }

    /// `range`と重なる最初の予約期間
    ///
    /// `editing`（編集中の予約自身の期間）に完全に収まる予約期間は
    /// その予約自身のものとみなして除外する。
    pub fn first_overlapping(
        &self,
        range: &DateRange,
        editing: Option<DateRange>,
    ) -> Option<DateRange> {
        self.periods
            .iter()
            .filter(|p| !editing.is_some_and(|own| own.contains_range(p)))
            .find(|p| p.overlaps(range))
            .copied()
    }

    /// `range`の中で最初の予約済みの日
    ///
    /// `editing`（編集中の予約自身の期間）に含まれる日は数えない。
    /// 期間ごとに重なりの両端だけを見るので、`range`の長さによらない。
    pub fn first_reserved_day(
        &self,
        range: &DateRange,
        editing: Option<DateRange>,
    ) -> Option<DateOnly> {
        self.periods
            .iter()
            .filter(|p| p.overlaps(range))
            .filter_map(|p| {
                let first = p.start().max(range.start());
                let last = p.end().min(range.end());
                match editing {
                    // 自身の期間の後ろにはみ出した部分
                    Some(own) if own.contains(first) => {
                        own.end().succ().filter(|d| *d <= last)
                    }
                    _ => Some(first),
                }
            })
            .min()
    }
}

impl FromIterator<DateRange> for ReservedPeriodSet {
    fn from_iter<I: IntoIterator<Item = DateRange>>(iter: I) -> Self {
        Self {
            periods: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateOnly {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn test_reserved_period_deserializes_backend_shape() {
        let json = r#"[{"startDate":"2025-01-07","endDate":"2025-01-08"}]"#;
        let periods: Vec<ReservedPeriod> = serde_json::from_str(json).unwrap();
        assert_eq!(
            periods,
            vec![ReservedPeriod::new(date("2025-01-07"), date("2025-01-08"))]
        );
    }

    #[test]
    fn test_reversed_period_has_no_range() {
        let period = ReservedPeriod::new(date("2025-01-08"), date("2025-01-07"));
        assert_eq!(period.as_range(), None);
    }

    #[test]
    fn test_is_reserved_checks_every_period() {
        let set: ReservedPeriodSet = [
            range("2025-01-20", "2025-01-22"),
            range("2025-01-07", "2025-01-08"),
        ]
        .into_iter()
        .collect();

        assert!(set.is_reserved(date("2025-01-07")));
        assert!(set.is_reserved(date("2025-01-22")));
        assert!(!set.is_reserved(date("2025-01-15")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_first_overlapping_finds_conflict() {
        let set: ReservedPeriodSet = [range("2025-01-07", "2025-01-08")].into_iter().collect();
        let found = set.first_overlapping(&range("2025-01-05", "2025-01-10"), None);
        assert_eq!(found, Some(range("2025-01-07", "2025-01-08")));
    }

    #[test]
    fn test_first_overlapping_skips_editing_booking_own_period() {
        let own = range("2025-01-07", "2025-01-08");
        let set: ReservedPeriodSet = [own].into_iter().collect();

        // 自分の予約を縮める・そのまま保つ
        let found = set.first_overlapping(&range("2025-01-07", "2025-01-07"), Some(own));
        assert_eq!(found, None);

        // 他人の予約は除外されない
        let other: ReservedPeriodSet = [range("2025-01-09", "2025-01-10")].into_iter().collect();
        let found = other.first_overlapping(&range("2025-01-07", "2025-01-09"), Some(own));
        assert_eq!(found, Some(range("2025-01-09", "2025-01-10")));
    }

    #[test]
    fn test_first_reserved_day_picks_earliest_across_periods() {
        let set: ReservedPeriodSet = [
            range("2025-01-20", "2025-01-22"),
            range("2025-01-07", "2025-01-08"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.first_reserved_day(&range("2025-01-05", "2025-01-25"), None),
            Some(date("2025-01-07"))
        );
        // 期間の途中から始まる
        assert_eq!(
            set.first_reserved_day(&range("2025-01-21", "2025-01-25"), None),
            Some(date("2025-01-21"))
        );
        assert_eq!(
            set.first_reserved_day(&range("2025-01-09", "2025-01-19"), None),
            None
        );
    }

    #[test]
    fn test_first_reserved_day_skips_editing_booking_days() {
        let own = range("2025-01-10", "2025-01-11");
        let set: ReservedPeriodSet = [own, range("2025-01-13", "2025-01-14")]
            .into_iter()
            .collect();

        assert_eq!(
            set.first_reserved_day(&range("2025-01-09", "2025-01-15"), Some(own)),
            Some(date("2025-01-13"))
        );

        // 自身の期間にかかる他の予約は、はみ出した日から数える
        let straddling: ReservedPeriodSet = [range("2025-01-11", "2025-01-12")]
            .into_iter()
            .collect();
        assert_eq!(
            straddling.first_reserved_day(&range("2025-01-10", "2025-01-12"), Some(own)),
            Some(date("2025-01-12"))
        );
        assert_eq!(
            straddling.first_reserved_day(&range("2025-01-10", "2025-01-11"), Some(own)),
            None
        );

        // 自身の期間より前から始まる予約はその開始日
        let before: ReservedPeriodSet = [range("2025-01-08", "2025-01-10")]
            .into_iter()
            .collect();
        assert_eq!(
            before.first_reserved_day(&range("2025-01-05", "2025-01-11"), Some(own)),
            Some(date("2025-01-08"))
        );
    }

    #[test]
    fn test_first_reserved_day_over_very_long_range() {
        let set: ReservedPeriodSet = [range("9999-12-30", "9999-12-31")].into_iter().collect();

        assert_eq!(
            set.first_reserved_day(&range("2025-01-01", "9999-12-31"), None),
            Some(date("9999-12-30"))
        );
        assert_eq!(
            set.first_reserved_day(&range("2025-01-01", "9999-12-29"), None),
            None
        );
    }

    #[test]
    fn test_replace_moves_edited_period() {
        let own = range("2025-01-10", "2025-01-11");
        let mut set: ReservedPeriodSet = [own, range("2025-01-20", "2025-01-21")]
            .into_iter()
            .collect();
        assert!(set.contains_period(&own));
        assert!(!set.contains_period(&range("2025-01-10", "2025-01-12")));

        set.replace(&own, range("2025-01-14", "2025-01-15"));

        assert!(!set.contains_period(&own));
        assert!(set.contains_period(&range("2025-01-14", "2025-01-15")));
        assert!(!set.is_reserved(date("2025-01-10")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_set_never_conflicts() {
        let set = ReservedPeriodSet::new();
        assert!(set.is_empty());
        assert!(!set.is_reserved(date("2025-01-01")));
        assert_eq!(
            set.first_overlapping(&range("2025-01-01", "2025-12-31"), None),
            None
        );
    }
}
