//! # 태그 API 라우트 핸들러
//!
//! 태그 CRUD를 위한 HTTP 핸들러 함수들입니다.
//! 카테고리와 같은 패턴: JWT 인증 필수, 요청자 소유 범위로 제한.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/tags | `list_tags` | 내 태그 목록 |
//! | POST | /api/tags | `create_tag` | 새 태그 생성 |
//! | GET | /api/tags/:id | `get_tag` | 단일 태그 조회 |
//! | PUT | /api/tags/:id | `update_tag` | 태그 이름 변경 |
//! | DELETE | /api/tags/:id | `delete_tag` | 태그 삭제 (204) |

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::routes::tasks::AppState;

/// `GET /tags` — 요청자의 태그 목록을 조회합니다.
pub async fn list_tags(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let tags = db::list_tags(&state.pool, &auth.user_id).await?;
    let views: Vec<TagView> = tags.into_iter().map(TagView::from).collect();
    Ok(Json(json!({ "tags": views })))
}

/// `POST /tags` — 새 태그를 생성합니다.
///
/// 같은 사용자 안에서 이름이 중복이면 422(conflict)를 반환합니다.
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagView>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let tag = db::create_tag(&state.pool, &auth.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

/// `GET /tags/:id` — 단일 태그를 조회합니다.
pub async fn get_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TagView>, AppError> {
    let tag = db::get_tag(&state.pool, &id, &auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Tag not found or does not belong to user".to_string())
        })?;
    Ok(Json(tag.into()))
}

/// `PUT /tags/:id` — 태그 이름을 변경합니다.
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateTagRequest>,
) -> Result<Json<TagView>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let tag = db::update_tag(&state.pool, &id, &auth.user_id, &req)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Tag not found or does not belong to user".to_string())
        })?;
    Ok(Json(tag.into()))
}

/// `DELETE /tags/:id` — 태그를 삭제합니다.
///
/// 삭제 성공 시 본문 없이 `204 No Content`만 반환합니다.
/// 할 일에 붙어 있던 연결(조인 행)도 함께 제거됩니다.
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = db::delete_tag(&state.pool, &id, &auth.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound(
            "Tag not found or does not belong to user".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}
