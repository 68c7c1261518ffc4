use serde::Serialize;

use super::availability::{
    AvailabilityContext, is_disabled, is_hinted_unavailable, is_in_range, is_selected,
};
use super::{DateOnly, InvalidMonth};

/// カレンダー1画面のマス数（6週 × 7日）
pub const CALENDAR_GRID_CELLS: usize = 42;

/// 年月
///
/// 不変条件：その月の42マスすべてが暦で扱える範囲に収まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
    #[serde(skip)]
    grid_start: DateOnly,
}

impl YearMonth {
    /// # エラー
    /// 月が1〜12以外、またはマス目が暦の範囲を超える場合は`InvalidMonth`を返す
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        grid_start_of(year, month)
            .map(|grid_start| Self {
                year,
                month,
                grid_start,
            })
            .ok_or(InvalidMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// `date`がこの月の日か
    pub fn contains(&self, date: DateOnly) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Result<Self, InvalidMonth> {
        match self.month {
            12 => Self::new(self.year.saturating_add(1), 1),
            m => Self::new(self.year, m + 1),
        }
    }

    pub fn previous(&self) -> Result<Self, InvalidMonth> {
        match self.month {
            1 => Self::new(self.year.saturating_sub(1), 12),
            m => Self::new(self.year, m - 1),
        }
    }
}

/// 1日を含む週の日曜日。42マス目まで暦に収まらなければ`None`
fn grid_start_of(year: i32, month: u32) -> Option<DateOnly> {
    let first = DateOnly::from_ymd(year, month, 1).ok()?;
    let grid_start = first.add_days(-i64::from(first.weekday_from_sunday()))?;
    grid_start.add_days(CALENDAR_GRID_CELLS as i64 - 1)?;
    Some(grid_start)
}

/// カレンダーの1マス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: DateOnly,
    /// 表示中の月の日か（前後の月の埋め草ならfalse）
    pub in_month: bool,
    pub disabled: bool,
    pub hinted_unavailable: bool,
    pub selected: bool,
    pub in_range: bool,
}

/// 純粋関数：月表示のマス目
///
/// 1日を含む週の日曜日から42日分。前月末・翌月初で埋める。
pub fn month_grid(month: YearMonth) -> Vec<DateOnly> {
    std::iter::successors(Some(month.grid_start), |d| d.succ())
        .take(CALENDAR_GRID_CELLS)
        .collect()
}

/// 純粋関数：月表示の各マスの状態を計算する
pub fn calendar_month(month: YearMonth, ctx: &AvailabilityContext<'_>) -> Vec<CalendarDay> {
    month_grid(month)
        .into_iter()
        .map(|date| CalendarDay {
            date,
            in_month: month.contains(date),
            disabled: is_disabled(date, ctx),
            hinted_unavailable: is_hinted_unavailable(date, ctx),
            selected: is_selected(date, ctx.selection),
            in_range: is_in_range(date, ctx.selection),
        })
        .collect()
}
