use crate::application::booking::{
    BookingApplicationError, ServiceDependencies, close_booking_session,
    list_rooms as execute_list_rooms, open_booking_session, open_degraded_booking_session, quote,
    refresh_reserved_periods, select_date as execute_select_date,
    submit_booking as execute_submit_booking,
};
use crate::domain::calendar::YearMonth;
use crate::domain::commands::SelectDate;
use crate::domain::{BookingSession, BookingSessionId, DateOnly, Room};
use crate::ports::SessionStore;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        BookingSubmittedResponse, CalendarQuery, CalendarResponse, OpenSessionRequest,
        RefreshResponse, SelectDateRequest, SelectionResponse, SessionOpenedResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub session_store: Arc<dyn SessionStore>,
}

async fn load_session(state: &AppState, session_id: Uuid) -> Result<BookingSession, ApiError> {
    let session_id = BookingSessionId::from_uuid(session_id);

    state
        .session_store
        .get(session_id)
        .await
        .map_err(BookingApplicationError::SessionStoreError)?
        .ok_or_else(|| BookingApplicationError::SessionNotFound(session_id).into())
}

async fn save_session(state: &AppState, session: BookingSession) -> Result<(), ApiError> {
    state
        .session_store
        .save(session)
        .await
        .map_err(|e| BookingApplicationError::SessionStoreError(e).into())
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /rooms - 客室一覧
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = execute_list_rooms(&state.service_deps).await?;
    Ok(Json(rooms))
}

/// GET /booking-sessions/:id/calendar - 月表示のカレンダー
///
/// 各マスに選択不可・先読みヒント・選択中・範囲内の判定を付けて返す。
/// 年月を省略した場合は`today`の月を表示する。
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let session = load_session(&state, session_id).await?;

    let today = query.today.unwrap_or_else(DateOnly::today);
    let month = YearMonth::new(
        query.year.unwrap_or_else(|| today.year()),
        query.month.unwrap_or_else(|| today.month()),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(CalendarResponse {
        year: month.year(),
        month: month.month(),
        availability: session.availability,
        selection: session.selection,
        total_price: quote(&session),
        days: session.calendar(month, today),
    }))
}

// ============================================================================
// Command handlers (POST / DELETE)
// ============================================================================

/// POST /booking-sessions - 予約ダイアログを開く
///
/// 客室と予約済み期間を取得してセッションを作る。
/// `degraded: true`の場合のみ、予約済み期間の取得失敗を「予約なし」として扱う。
pub async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionOpenedResponse>), ApiError> {
    let cmd = req
        .to_command()
        .map_err(|e| BookingApplicationError::InvalidRange(e.to_string()))?;

    let session = if req.degraded {
        open_degraded_booking_session(&state.service_deps, cmd).await?
    } else {
        open_booking_session(&state.service_deps, cmd).await?
    };

    let response = SessionOpenedResponse::from(&session);
    save_session(&state, session).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /booking-sessions/:id/select - カレンダーの日付を選ぶ
///
/// 拒否された選択もエラーではなく、`rejected`イベントとして200で返す。
pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SelectDateRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut session = load_session(&state, session_id).await?;

    let cmd = SelectDate {
        date: req.date,
        today: req.today.unwrap_or_else(DateOnly::today),
    };
    let event = execute_select_date(&mut session, cmd);

    let response = SelectionResponse {
        selection: session.selection,
        event,
        total_price: quote(&session),
    };
    save_session(&state, session).await?;

    Ok(Json(response))
}

/// POST /booking-sessions/:id/refresh - 予約済み期間を再取得
pub async fn refresh_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let mut session = load_session(&state, session_id).await?;

    refresh_reserved_periods(&state.service_deps, &mut session).await?;

    let response = RefreshResponse {
        availability: session.availability,
        reserved_periods: session.reserved.iter().map(|r| (*r).into()).collect(),
    };
    save_session(&state, session).await?;

    Ok(Json(response))
}

/// POST /booking-sessions/:id/submit - 予約を送信
///
/// 強制されるビジネスルール:
/// - サインインしていること
/// - 開始日・終了日が選ばれていること
/// - 予約済み期間と重ならないこと
/// - サーバー側の競合の後は再取得が済んでいること
///
/// 失敗してもセッションの状態（競合後の再取得要求を含む）は保存する。
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<BookingSubmittedResponse>), ApiError> {
    let mut session = load_session(&state, session_id).await?;

    let result = execute_submit_booking(&state.service_deps, &mut session).await;
    save_session(&state, session).await?;

    let booking = result?;
    Ok((StatusCode::CREATED, Json(BookingSubmittedResponse { booking })))
}

/// DELETE /booking-sessions/:id - 予約ダイアログを閉じる
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let session_id = BookingSessionId::from_uuid(session_id);

    let session = state
        .session_store
        .remove(session_id)
        .await
        .map_err(BookingApplicationError::SessionStoreError)?
        .ok_or(BookingApplicationError::SessionNotFound(session_id))?;

    close_booking_session(session);
    Ok(StatusCode::NO_CONTENT)
}
