use serde::Serialize;

use super::availability::{AvailabilityContext, is_disabled};
use super::events::{RejectReason, SelectionEvent};
use super::pricing;
use super::{DateOnly, DateRange};

// ============================================================================
// 型安全な状態パターン
// ============================================================================

/// 日付範囲の選択状態
///
/// 状態遷移：
/// - Empty → StartOnly（開始日を選択）
/// - StartOnly → StartOnly（より前の日付で開始日を置き換え）
/// - StartOnly → Complete（終了日を選択）
/// - Complete → StartOnly（もう一度選ぶと最初からやり直し）
///
/// 「終了日があるなら開始日もあり start <= end」は
/// Completeが`DateRange`を持つことで型として保証される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Empty,
    StartOnly {
        start: DateOnly,
    },
    Complete {
        range: DateRange,
    },
}

impl SelectionState {
    pub fn start(&self) -> Option<DateOnly> {
        match self {
            SelectionState::Empty => None,
            SelectionState::StartOnly { start } => Some(*start),
            SelectionState::Complete { range } => Some(range.start()),
        }
    }

    pub fn end(&self) -> Option<DateOnly> {
        match self {
            SelectionState::Complete { range } => Some(range.end()),
            _ => None,
        }
    }

    /// 確定した期間（Completeのときのみ）
    pub fn range(&self) -> Option<DateRange> {
        match self {
            SelectionState::Complete { range } => Some(*range),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SelectionState::Complete { .. })
    }

    /// 選択を破棄する（ダイアログを閉じたとき・予約送信に成功したとき）
    pub fn reset(&mut self) {
        *self = SelectionState::Empty;
    }

    /// 現在の選択での合計金額
    pub fn total_price(&self, nightly_price: f64) -> f64 {
        let range = self.range().map(|r| (r.start(), r.end()));
        pricing::compute_total(range, nightly_price)
    }
}

/// 純粋関数：日付を選択する
///
/// ビジネスルール：
/// - 選択不可の日付は無視する（状態は変わらない。エラーではない）
/// - Empty・Completeから：選んだ日を開始日にする
/// - StartOnlyから：
///   - 開始日より前なら開始日を置き換える
///   - そうでなければ [開始日, 選んだ日] に予約済みの日が
///     1日でもあれば拒否する（編集中の予約自身の期間は数えない）
///
/// 副作用なし。新しい状態とイベントを返す。
pub fn select_date(
    state: SelectionState,
    date: DateOnly,
    ctx: &AvailabilityContext<'_>,
) -> (SelectionState, SelectionEvent) {
    if is_disabled(date, ctx) {
        return (
            state,
            SelectionEvent::Rejected {
                date,
                reason: RejectReason::DateDisabled,
            },
        );
    }

    match state {
        SelectionState::Empty | SelectionState::Complete { .. } => (
            SelectionState::StartOnly { start: date },
            SelectionEvent::StartSelected { date },
        ),
        SelectionState::StartOnly { start } => {
            // 開始日より前なら期間を作れない → 開始日を置き換える
            let Ok(candidate) = DateRange::new(start, date) else {
                return (
                    SelectionState::StartOnly { start: date },
                    SelectionEvent::StartReanchored {
                        previous: start,
                        date,
                    },
                );
            };

            let conflict = ctx.reserved.first_reserved_day(&candidate, ctx.editing);

            match conflict {
                Some(first_conflict) => (
                    state,
                    SelectionEvent::Rejected {
                        date,
                        reason: RejectReason::RangeConflict { first_conflict },
                    },
                ),
                None => (
                    SelectionState::Complete { range: candidate },
                    SelectionEvent::RangeCompleted { range: candidate },
                ),
            }
        }
    }
}
