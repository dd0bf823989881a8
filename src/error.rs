//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! ## 상태 코드 매핑
//! | variant | HTTP | 의미 |
//! |---|---|---|
//! | `Validation` | 422 | 필수 필드 누락 등 잘못된 입력 |
//! | `NotFound` | 404 | 없거나 다른 사용자 소유인 리소스 |
//! | `Conflict` | 422 | 사용자별 이름 중복 |
//! | `Unauthorized` | 401 | 인증 실패 |
//! | `Database` / `Internal` | 500 | 저장소/트랜잭션 실패 |

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (404, 422, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 입력 (HTTP 422)
    /// String을 포함하여 구체적인 에러 메시지를 전달합니다.
    /// {0}은 첫 번째 필드(String)를 참조하는 포맷 문법입니다.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 요청한 리소스가 없거나 요청자 소유가 아님 (HTTP 404)
    ///
    /// 다른 사용자 소유의 리소스도 "없음"으로 응답합니다 —
    /// 존재 여부 자체를 숨기는 테넌트 격리(tenant isolation) 규칙입니다.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 사용자별 이름 중복 (HTTP 422)
    ///
    /// 의미상으로는 409 Conflict에 가깝지만,
    /// 이 API의 공개 계약은 중복을 422로 응답합니다.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환(From 트레이트 구현).
    /// 이를 통해 sqlx 호출에 `?` 연산자를 그대로 쓸 수 있습니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

// impl IntoResponse for AppError:
// 핸들러가 Err(AppError)를 반환하면 Axum이 이 메서드를 호출하여
// 적절한 HTTP 응답을 생성합니다.
impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다 (드라이버 에러 비노출).
    fn into_response(self) -> Response {
        // match: 패턴 매칭. enum의 각 variant에 대해 다른 처리를 합니다.
        // (status, code, message) 튜플을 반환합니다.
        let (status, code, message) = match self {
            AppError::Validation(ref msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            AppError::NotFound(ref msg) => {
                (StatusCode::NOT_FOUND, "not_found", msg.clone())
            }
            AppError::Conflict(ref msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "conflict", msg.clone())
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Database(ref e) => {
                // 내부 에러는 로그에만 기록 (서버 관리자용)
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    // 클라이언트에는 일반적인 메시지만 반환
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // JSON 응답 본문을 생성합니다.
        // 결과: { "error": { "code": "not_found", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Axum은 튜플 (상태코드, 본문)을 자동으로 HTTP 응답으로 변환합니다.
        (status, body).into_response()
    }
}
