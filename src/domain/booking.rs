use serde::{Deserialize, Serialize};

use super::{
    BookingId, BookingValidationError, DateOnly, DateRange, ReservedPeriodSet, Room, RoomId,
    SelectionState, UserId,
};

/// 予約ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// 予約（作成後にバックエンドが返すもの）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub room: Room,
    pub start_date: DateOnly,
    pub end_date: DateOnly,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// 予約作成・変更の要求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub start_date: DateOnly,
    pub end_date: DateOnly,
    pub total_price: f64,
}

impl NewBooking {
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date).ok()
    }
}

/// 編集中の既存予約
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditingBooking {
    pub booking_id: BookingId,
    pub range: DateRange,
}

/// 純粋関数：予約送信前の最終検証
///
/// ビジネスルール：
/// - 開始日・終了日の両方が選ばれていること
/// - 予約済み期間と重ならないこと（取得後に他の予約が入った場合の最後の砦）
/// - 編集中の予約自身の期間に収まる予約済み期間は除外する
///
/// 副作用なし。送信してよい期間を返す。
pub fn validate_submission(
    selection: &SelectionState,
    reserved: &ReservedPeriodSet,
    editing: Option<DateRange>,
) -> Result<DateRange, BookingValidationError> {
    let range = selection
        .range()
        .ok_or(BookingValidationError::IncompleteSelection)?;

    match reserved.first_overlapping(&range, editing) {
        Some(period) => Err(BookingValidationError::DateConflict {
            period: period.into(),
        }),
        None => Ok(range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReservedPeriod;

    fn date(s: &str) -> DateOnly {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    // TDD: validate_submission() のテスト
    #[test]
    fn test_incomplete_selection_is_rejected() {
        let reserved = ReservedPeriodSet::new();

        let result = validate_submission(&SelectionState::Empty, &reserved, None);
        assert_eq!(result, Err(BookingValidationError::IncompleteSelection));

        let start_only = SelectionState::StartOnly {
            start: date("2025-01-05"),
        };
        let result = validate_submission(&start_only, &reserved, None);
        assert_eq!(result, Err(BookingValidationError::IncompleteSelection));
    }

    #[test]
    fn test_overlap_with_reserved_period_is_conflict() {
        let reserved: ReservedPeriodSet = [range("2025-01-10", "2025-01-11")].into_iter().collect();
        let selection = SelectionState::Complete {
            range: range("2025-01-08", "2025-01-10"),
        };

        let result = validate_submission(&selection, &reserved, None);
        assert_eq!(
            result,
            Err(BookingValidationError::DateConflict {
                period: ReservedPeriod::new(date("2025-01-10"), date("2025-01-11")),
            })
        );
    }

    #[test]
    fn test_free_range_passes() {
        let reserved: ReservedPeriodSet = [range("2025-01-10", "2025-01-11")].into_iter().collect();
        let selection = SelectionState::Complete {
            range: range("2025-01-12", "2025-01-14"),
        };

        let result = validate_submission(&selection, &reserved, None);
        assert_eq!(result, Ok(range("2025-01-12", "2025-01-14")));
    }

    #[test]
    fn test_editing_booking_own_period_is_not_a_conflict() {
        let own = range("2025-01-10", "2025-01-11");
        let reserved: ReservedPeriodSet = [own].into_iter().collect();
        let selection = SelectionState::Complete {
            range: range("2025-01-10", "2025-01-10"),
        };

        let result = validate_submission(&selection, &reserved, Some(own));
        assert!(result.is_ok());
    }

    #[test]
    fn test_period_straddling_editing_booking_is_conflict() {
        let own = range("2025-01-10", "2025-01-11");
        let selection = SelectionState::Complete {
            range: range("2025-01-10", "2025-01-12"),
        };

        // 自身の期間に一部だけ重なる他の予約は除外されない
        let reserved: ReservedPeriodSet = [own, range("2025-01-11", "2025-01-12")]
            .into_iter()
            .collect();
        let result = validate_submission(&selection, &reserved, Some(own));
        assert_eq!(
            result,
            Err(BookingValidationError::DateConflict {
                period: ReservedPeriod::new(date("2025-01-11"), date("2025-01-12")),
            })
        );

        let reserved: ReservedPeriodSet = [range("2025-01-11", "2025-01-12")].into_iter().collect();
        let result = validate_submission(&selection, &reserved, Some(own));
        assert!(matches!(
            result,
            Err(BookingValidationError::DateConflict { .. })
        ));
    }

    #[test]
    fn test_new_booking_serializes_backend_request() {
        let request = NewBooking {
            user_id: UserId::new(5),
            room_id: RoomId::new(3),
            start_date: date("2025-01-10"),
            end_date: date("2025-01-12"),
            total_price: 300.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": 5,
                "roomId": 3,
                "startDate": "2025-01-10",
                "endDate": "2025-01-12",
                "totalPrice": 300.0,
            })
        );
    }

    #[test]
    fn test_booking_deserializes_backend_response() {
        let json = r#"{
            "id": 9,
            "user": null,
            "room": {"id":3,"roomNumber":101,"type":"DOUBLE","price":100,"available":true,"description":"","imageUrl":null},
            "startDate": "2025-01-10",
            "endDate": "2025-01-12",
            "totalPrice": 300,
            "status": "PENDING"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, BookingId::new(9));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, 300.0);
    }
}
