use serde::Serialize;

use super::{DateOnly, DateRange};

/// 日付選択が拒否された理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// 選択不可の日付（過去日・予約済み）
    DateDisabled,
    /// 開始日から選んだ日までに予約済みの日がある
    RangeConflict { first_conflict: DateOnly },
}

/// イベント：日付選択の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// 開始日が選ばれた（空の状態・完了状態から）
    StartSelected { date: DateOnly },
    /// より前の日付が選ばれ、開始日が置き換わった
    StartReanchored { previous: DateOnly, date: DateOnly },
    /// 終了日が選ばれ、期間が確定した
    RangeCompleted { range: DateRange },
    /// 選択は拒否され、状態は変わらない
    Rejected {
        date: DateOnly,
        #[serde(flatten)]
        reason: RejectReason,
    },
}

impl SelectionEvent {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SelectionEvent::Rejected { .. })
    }
}
