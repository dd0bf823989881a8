//! # 할 일(Task) 라우트 핸들러
//!
//! 할 일 집합체의 CRUD를 처리하는 HTTP 핸들러 함수들입니다.
//! 실제 일관성 로직(트랜잭션, 태그 교체, 소유 검증)은 전부
//! `db::tasks`에 있고, 여기서는 추출과 상태 코드 매핑만 합니다.
//!
//! ## 엔드포인트
//! - `GET    /api/tasks`     → 목록 조회 (`?category_id=&status=&tag_id=`)
//! - `POST   /api/tasks`     → 생성 (201)
//! - `GET    /api/tasks/:id` → 단일 조회
//! - `PUT    /api/tasks/:id` → 수정 (전체 교체)
//! - `DELETE /api/tasks/:id` → 삭제 (삭제된 스냅샷을 200으로 반환)
//!
//! ## Axum 핸들러 패턴
//! 각 함수는 Axum의 **추출자(Extractor)** 패턴을 따릅니다:
//! - `State(state)`: 애플리케이션 공유 상태 (DB 풀 등)
//! - `auth: AuthUser`: Authorization 헤더의 JWT에서 추출한 요청자 신원
//!   (토큰이 없거나 잘못되면 핸들러 진입 전에 401로 거부됩니다)
//! - `Path(id)` / `Query(filter)` / `Json(req)`: 경로/쿼리/본문 추출

use crate::{
    db,              // 데이터베이스 접근 계층
    error::AppError, // 에러 타입 (자동으로 HTTP 에러 응답으로 변환됨)
    middleware::auth::AuthUser,
    models::*,       // 요청/응답 구조체들
};
use axum::{
    extract::{Path, Query, State}, // Axum 추출자
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

// #[derive(Clone)]: Axum의 State Extractor는 내부적으로 AppState를
// clone하므로 필수입니다. SqlitePool은 Arc를 사용하므로 clone해도
// 실제 풀이 복제되지 않습니다.

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 전역 가변 상태 대신 생성 시 한 번 만들어 명시적으로 주입합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
    /// JWT 토큰 만료 시간(초)
    pub jwt_expires_in: i64,
}

/// `GET /tasks` — 요청자의 할 일 목록을 필터와 함께 조회합니다.
///
/// `Query(filter)`: 쿼리 스트링을 `TaskFilter`로 파싱합니다.
/// 없는 파라미터는 None이 됩니다.
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Value>, AppError> {
    let tasks = db::list_tasks(&state.pool, &auth.user_id, &filter).await?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// `POST /tasks` — 새 할 일을 생성합니다.
///
/// 성공 시 `201 Created`와 함께 하이드레이션된 뷰를 반환합니다.
/// 반환 타입의 튜플 `(StatusCode, Json<TaskView>)`을 Axum이
/// (상태코드, 본문) 응답으로 변환합니다.
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskView>), AppError> {
    let task = db::create_task(&state.pool, &auth.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /tasks/:id` — 단일 할 일을 조회합니다.
///
/// 없거나 다른 사용자 소유면 404 — 두 경우는 구분되지 않습니다.
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, AppError> {
    let task = db::get_task(&state.pool, &id, &auth.user_id)
        .await?
        // ok_or_else(): Option<TaskView>를 Result로 변환 — None이면 404
        .ok_or_else(|| {
            AppError::NotFound("Task not found or does not belong to user".to_string())
        })?;
    Ok(Json(task))
}

/// `PUT /tasks/:id` — 할 일을 수정합니다 (본문은 생성과 동일).
///
/// 태그 집합은 본문의 tags로 **통째로** 교체됩니다.
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskView>, AppError> {
    let task = db::update_task(&state.pool, &id, &auth.user_id, &req).await?;
    Ok(Json(task))
}

/// `DELETE /tasks/:id` — 할 일을 삭제합니다.
///
/// 단순 확인 응답이 아니라 삭제 직전 상태의 스냅샷(태그, 카테고리
/// 포함)을 200으로 반환합니다.
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, AppError> {
    let task = db::delete_task(&state.pool, &id, &auth.user_id).await?;
    Ok(Json(task))
}
