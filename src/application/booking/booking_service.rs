use crate::domain::{
    self, Availability, Booking, BookingSession, DateRange, EditingBooking, NewBooking,
    ReservedPeriod,
    ReservedPeriodSet, Room, RoomId, SelectionEvent, commands::*,
};
use crate::ports::*;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞いは持たず、各関数に明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub room_catalog: Arc<dyn RoomCatalog>,
    pub booking_gateway: Arc<dyn BookingGateway>,
    pub current_user: Arc<dyn CurrentUser>,
}

/// 客室を取得するヘルパー関数
///
/// # エラー
/// - NetworkFailure: 取得失敗
/// - RoomNotFound: 客室が存在しない
async fn fetch_room(deps: &ServiceDependencies, room_id: RoomId) -> Result<Room> {
    deps.room_catalog
        .fetch_room(room_id)
        .await
        .map_err(|e| {
            error!(%room_id, "Failed to fetch room: {}", e);
            BookingApplicationError::NetworkFailure(e)
        })?
        .ok_or(BookingApplicationError::RoomNotFound(room_id))
}

/// 予約済み期間を取得するヘルパー関数
async fn fetch_reserved_periods(
    deps: &ServiceDependencies,
    room_id: RoomId,
) -> Result<Vec<ReservedPeriod>> {
    deps.room_catalog
        .fetch_reserved_periods(room_id)
        .await
        .map_err(BookingApplicationError::NetworkFailure)
}

/// 取得した予約済み期間から集合を組み立てるヘルパー関数
///
/// 終了日が開始日より前の期間は判定に使えないため除外する。
fn build_reserved_set(room_id: RoomId, periods: Vec<ReservedPeriod>) -> ReservedPeriodSet {
    periods
        .into_iter()
        .filter_map(|period| {
            let range = period.as_range();
            if range.is_none() {
                warn!(
                    %room_id,
                    start = %period.start_date,
                    end = %period.end_date,
                    "Dropping reserved period with end before start"
                );
            }
            range
        })
        .collect()
}

/// 予約受付停止中の客室は新規予約できない（既存予約の編集は可）
fn ensure_bookable(room: &Room, cmd: &OpenBookingSession) -> Result<()> {
    if !room.available && cmd.editing.is_none() {
        return Err(BookingApplicationError::RoomUnavailable(room.id));
    }
    Ok(())
}

/// 編集する予約の期間が取得した予約済み期間の1つと一致することを確かめる
///
/// 一致しない期間を自己除外に使うと、他の予約の日まで選べてしまう。
fn ensure_editing_matches(
    reserved: &ReservedPeriodSet,
    editing: Option<EditingBooking>,
) -> Result<()> {
    match editing {
        Some(editing) if !reserved.contains_period(&editing.range) => {
            warn!(
                booking_id = %editing.booking_id,
                start = %editing.range.start(),
                end = %editing.range.end(),
                "Editing range does not match any reserved period"
            );
            Err(BookingApplicationError::EditingRangeMismatch(
                editing.booking_id,
            ))
        }
        _ => Ok(()),
    }
}

/// 客室一覧を取得する
pub async fn list_rooms(deps: &ServiceDependencies) -> Result<Vec<Room>> {
    deps.room_catalog.list_rooms().await.map_err(|e| {
        error!("Failed to list rooms: {}", e);
        BookingApplicationError::NetworkFailure(e)
    })
}

/// 予約セッションを開く
///
/// 客室と予約済み期間を並行して取得する。
/// どちらかの取得に失敗した場合はセッションを開かない
/// （「予約なし」として扱う場合は`open_degraded_booking_session`を明示的に使う）。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - セッション開始コマンド
///
/// # エラー
/// - NetworkFailure: 取得失敗
/// - RoomNotFound / RoomUnavailable
/// - EditingRangeMismatch: 編集する予約の期間が予約済み期間と一致しない
pub async fn open_booking_session(
    deps: &ServiceDependencies,
    cmd: OpenBookingSession,
) -> Result<BookingSession> {
    let (room, periods) = futures::try_join!(
        fetch_room(deps, cmd.room_id),
        fetch_reserved_periods(deps, cmd.room_id),
    )?;

    ensure_bookable(&room, &cmd)?;

    let reserved = build_reserved_set(cmd.room_id, periods);
    ensure_editing_matches(&reserved, cmd.editing)?;
    let session = BookingSession::new(room, reserved, cmd.editing, Availability::Verified);

    info!(
        session_id = %session.session_id.value(),
        room_id = %cmd.room_id,
        reserved_periods = session.reserved.len(),
        editing = session.editing.is_some(),
        "Booking session opened"
    );

    Ok(session)
}

/// 予約セッションを開く（ダイアログが閉じられたら結果を捨てる）
///
/// 取得が終わる前に`closed`が完了した場合は`None`を返し、
/// 取得結果はどこにも反映しない。
pub async fn open_booking_session_until<F>(
    deps: &ServiceDependencies,
    cmd: OpenBookingSession,
    closed: F,
) -> Result<Option<BookingSession>>
where
    F: Future<Output = ()>,
{
    let room_id = cmd.room_id;

    tokio::select! {
        biased;
        _ = closed => {
            debug!(%room_id, "Booking dialog closed before reserved periods arrived");
            Ok(None)
        }
        result = open_booking_session(deps, cmd) => result.map(Some),
    }
}

/// 縮退モードで予約セッションを開く
///
/// 利用者が縮退モードを了承した場合のみ使う。
/// 予約済み期間の取得に失敗したら空の集合で開き、`Availability::Degraded`とする。
/// 客室の取得は必須。
pub async fn open_degraded_booking_session(
    deps: &ServiceDependencies,
    cmd: OpenBookingSession,
) -> Result<BookingSession> {
    let room = fetch_room(deps, cmd.room_id).await?;
    ensure_bookable(&room, &cmd)?;

    let (reserved, availability) = match fetch_reserved_periods(deps, cmd.room_id).await {
        Ok(periods) => (
            build_reserved_set(cmd.room_id, periods),
            Availability::Verified,
        ),
        Err(e) => {
            warn!(
                room_id = %cmd.room_id,
                "Reserved periods unavailable, opening session in degraded mode: {}",
                e
            );
            (ReservedPeriodSet::new(), Availability::Degraded)
        }
    };

    // 縮退時は集合が空なので、自己除外で選べるようになる日はない
    if availability == Availability::Verified {
        ensure_editing_matches(&reserved, cmd.editing)?;
    }

    Ok(BookingSession::new(room, reserved, cmd.editing, availability))
}

/// カレンダーの日付を選ぶ
///
/// ドメイン層の状態遷移を適用し、結果のイベントを返す。
/// 拒否された選択はエラーではなく、状態は変わらない。
pub fn select_date(session: &mut BookingSession, cmd: SelectDate) -> SelectionEvent {
    let (next, event) = {
        let ctx = session.context(cmd.today);
        domain::selection::select_date(session.selection, cmd.date, &ctx)
    };
    session.selection = next;

    if let SelectionEvent::Rejected { date, reason } = event {
        debug!(
            session_id = %session.session_id.value(),
            %date,
            ?reason,
            "Date selection rejected"
        );
    }

    event
}

/// 現在の選択の合計金額
pub fn quote(session: &BookingSession) -> f64 {
    session.quote()
}

/// 予約を送信する
///
/// ビジネスルール：
/// - サーバー側の競合の後は、予約済み期間を再取得するまで送信不可
/// - サインインしていること
/// - 送信前に予約済み期間との重なりを再検証する（通信は行わない）
/// - サーバーが競合で拒否した場合は`ServerConflict`とし、再取得を要求する
/// - 成功したら選択を破棄する（編集時は自身の期間を新しい日付に差し替える）
///
/// # エラー
/// - RefreshRequired / Unauthenticated
/// - InvalidRange / DateConflict: ローカル検証の失敗。選択は保持される
/// - ServerConflict: サーバー側の競合
/// - NetworkFailure: 送信時の通信エラー
pub async fn submit_booking(
    deps: &ServiceDependencies,
    session: &mut BookingSession,
) -> Result<Booking> {
    if session.needs_refresh {
        return Err(BookingApplicationError::RefreshRequired);
    }

    let user = deps
        .current_user
        .current_user()
        .await
        .ok_or(BookingApplicationError::Unauthenticated)?;

    let range: DateRange = domain::validate_submission(
        &session.selection,
        &session.reserved,
        session.editing_range(),
    )?;

    let request = NewBooking {
        user_id: user.id,
        room_id: session.room.id,
        start_date: range.start(),
        end_date: range.end(),
        total_price: session.quote(),
    };

    let outcome = match session.editing {
        Some(editing) => {
            deps.booking_gateway
                .update_booking(editing.booking_id, request)
                .await
        }
        None => deps.booking_gateway.submit_booking(request).await,
    }
    .map_err(|e| {
        error!(
            session_id = %session.session_id.value(),
            "Booking submission failed: {}",
            e
        );
        BookingApplicationError::NetworkFailure(e)
    })?;

    match outcome {
        SubmitOutcome::Created(booking) => {
            info!(
                session_id = %session.session_id.value(),
                booking_id = %booking.id,
                room_id = %session.room.id,
                start = %booking.start_date,
                end = %booking.end_date,
                total_price = booking.total_price,
                "Booking submitted"
            );
            if let Some(editing) = session.editing.as_mut() {
                session.reserved.replace(&editing.range, range);
                editing.range = range;
            }
            session.selection.reset();
            Ok(booking)
        }
        SubmitOutcome::Conflict { message } => {
            warn!(
                session_id = %session.session_id.value(),
                room_id = %session.room.id,
                "Server rejected booking with conflict: {}",
                message
            );
            session.needs_refresh = true;
            Err(BookingApplicationError::ServerConflict(message))
        }
    }
}

/// 予約済み期間を再取得する
///
/// サーバー側の競合の後に呼ぶ。縮退モードのセッションは取得に成功すれば通常に戻る。
/// 選択は保持するため、新しい期間と重なる場合は次の送信で`DateConflict`になる。
pub async fn refresh_reserved_periods(
    deps: &ServiceDependencies,
    session: &mut BookingSession,
) -> Result<()> {
    let periods = fetch_reserved_periods(deps, session.room.id).await?;
    let reserved = build_reserved_set(session.room.id, periods);
    ensure_editing_matches(&reserved, session.editing)?;

    session.reserved = reserved;
    session.availability = Availability::Verified;
    session.needs_refresh = false;

    debug!(
        session_id = %session.session_id.value(),
        reserved_periods = session.reserved.len(),
        "Reserved periods refreshed"
    );

    Ok(())
}

/// 予約セッションを閉じる（選択は破棄される）
pub fn close_booking_session(session: BookingSession) {
    debug!(
        session_id = %session.session_id.value(),
        "Booking session closed"
    );
}
