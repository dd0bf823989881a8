//! # 카테고리 API 라우트 핸들러
//!
//! 카테고리 CRUD를 위한 HTTP 핸들러 함수들입니다.
//! 모든 엔드포인트는 JWT 인증이 필요하며, 요청자 소유의 카테고리만
//! 보이고 만질 수 있습니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/categories | `list_categories` | 내 카테고리 목록 |
//! | POST | /api/categories | `create_category` | 새 카테고리 생성 |
//! | GET | /api/categories/:id | `get_category` | 단일 카테고리 조회 |
//! | PUT | /api/categories/:id | `update_category` | 카테고리 이름 변경 |
//! | DELETE | /api/categories/:id | `delete_category` | 삭제 (스냅샷 반환) |

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

/// `GET /categories` — 요청자의 카테고리 목록을 조회합니다.
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let categories = db::list_categories(&state.pool, &auth.user_id).await?;
    // 목록 응답도 외부 형태(camelCase 뷰)로 매핑합니다 — 입력 순서 보존
    let views: Vec<CategoryView> = categories.into_iter().map(CategoryView::from).collect();
    Ok(Json(json!({ "categories": views })))
}

/// `POST /categories` — 새 카테고리를 생성합니다.
///
/// 이름이 비어 있으면 422, 같은 사용자의 이름 중복이면 422(conflict).
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryView>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let category = db::create_category(&state.pool, &auth.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// `GET /categories/:id` — 단일 카테고리를 조회합니다.
pub async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CategoryView>, AppError> {
    let category = db::get_category(&state.pool, &id, &auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Category not found or does not belong to user".to_string())
        })?;
    Ok(Json(category.into()))
}

/// `PUT /categories/:id` — 카테고리 이름을 변경합니다.
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryView>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let category = db::update_category(&state.pool, &id, &auth.user_id, &req)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Category not found or does not belong to user".to_string())
        })?;
    Ok(Json(category.into()))
}

/// `DELETE /categories/:id` — 카테고리를 삭제합니다.
///
/// 삭제된 카테고리의 마지막 상태를 200으로 반환합니다.
/// 이 카테고리에 속해 있던 할 일들은 카테고리 없음(NULL)이 됩니다.
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CategoryView>, AppError> {
    let category = db::delete_category(&state.pool, &id, &auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Category not found or does not belong to user".to_string())
        })?;
    Ok(Json(category.into()))
}
