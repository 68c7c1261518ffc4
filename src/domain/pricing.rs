use super::DateOnly;

/// 純粋関数：合計金額を計算する
///
/// ビジネスルール：
/// - 期間がない、または end < start の場合は0
/// - 泊数 = (end - start の日数) + 1（1日の滞在も1泊と数える）
/// - 合計 = 泊数 × 1泊の料金
///
/// 日数は暦日の整数演算で求めるため、夏時間による端数は生じない。
pub fn compute_total(range: Option<(DateOnly, DateOnly)>, nightly_price: f64) -> f64 {
    let Some((start, end)) = range else {
        return 0.0;
    };

    if end < start {
        return 0.0;
    }

    let nights = start.days_until(end) + 1;
    nights as f64 * nightly_price
}
