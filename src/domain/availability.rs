use super::{DateOnly, DateRange, ReservedPeriodSet, SelectionState};

/// 開始日だけが選ばれている間、予約済みの日を強調表示する先読み日数
pub const LOOKAHEAD_HINT_DAYS: i64 = 30;

const NO_SELECTION: SelectionState = SelectionState::Empty;

/// 日付が選択可能かを判定するための文脈
///
/// 予約済み期間はセッション開始時に取得したものを借用する。
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityContext<'a> {
    pub reserved: &'a ReservedPeriodSet,
    pub today: DateOnly,
    /// 編集中の予約自身の期間（自己除外に使う）
    pub editing: Option<DateRange>,
    /// 進行中の選択（先読みヒントにのみ影響する）
    pub selection: &'a SelectionState,
}

impl<'a> AvailabilityContext<'a> {
    pub fn new(reserved: &'a ReservedPeriodSet, today: DateOnly) -> Self {
        Self {
            reserved,
            today,
            editing: None,
            selection: &NO_SELECTION,
        }
    }

    pub fn with_editing(self, editing: Option<DateRange>) -> Self {
        Self { editing, ..self }
    }

    pub fn with_selection(self, selection: &'a SelectionState) -> Self {
        Self { selection, ..self }
    }

    /// 編集中の予約の期間内か
    pub fn is_own_booking(&self, date: DateOnly) -> bool {
        self.editing.is_some_and(|own| own.contains(date))
    }
}

/// 純粋関数：日付が選択不可か
///
/// 規則（上から順に評価し、最初に当てはまったものを採用）：
/// 1. 今日より前 → 選択不可
/// 2. 編集中の予約自身の期間内 → 選択可（3より優先）
/// 3. いずれかの予約期間内 → 選択不可
/// 4. それ以外 → 選択可
pub fn is_disabled(date: DateOnly, ctx: &AvailabilityContext<'_>) -> bool {
    if date < ctx.today {
        return true;
    }

    if ctx.is_own_booking(date) {
        return false;
    }

    ctx.reserved.is_reserved(date)
}

/// 純粋関数：先読みヒント
///
/// 開始日のみ選択済みのとき、開始日の翌日から`LOOKAHEAD_HINT_DAYS`日未満の
/// 予約済みの日を示す。表示上のヒントであり、選択の可否には使わない。
pub fn is_hinted_unavailable(date: DateOnly, ctx: &AvailabilityContext<'_>) -> bool {
    let SelectionState::StartOnly { start } = *ctx.selection else {
        return false;
    };

    // 暦の終端を超える窓は終端まで
    let in_window = start
        .add_days(LOOKAHEAD_HINT_DAYS)
        .is_none_or(|window_end| date < window_end);

    date > start && in_window && !ctx.is_own_booking(date) && ctx.reserved.is_reserved(date)
}

/// 選択の開始日または終了日と一致するか
pub fn is_selected(date: DateOnly, selection: &SelectionState) -> bool {
    selection.start() == Some(date) || selection.end() == Some(date)
}

/// 選択済み期間の内側か（両端は含まない）
pub fn is_in_range(date: DateOnly, selection: &SelectionState) -> bool {
    match selection {
        SelectionState::Complete { range } => range.start() < date && date < range.end(),
        _ => false,
    }
}
