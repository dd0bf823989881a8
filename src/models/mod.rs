//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `category`: 카테고리 관련 구조체
//! - `tag`: 태그 관련 구조체
//! - `task`: 할 일(task)과 그 응답 뷰 관련 구조체
//! - `user`: 사용자(User) 관련 구조체
//!
//! `pub use X::*;`는 하위 모듈의 모든 공개 항목을
//! 이 모듈에서 바로 접근할 수 있게 재공개(re-export)합니다.
//! 예: `crate::models::task::Task` 대신 `crate::models::Task`로 접근 가능

// pub mod: 하위 모듈을 공개(public)로 선언합니다.
pub mod category;
pub mod tag;
pub mod task;
pub mod user;

// pub use: 하위 모듈의 항목을 현재 모듈에서 재공개합니다.
pub use category::*;
pub use tag::*;
pub use task::*;
pub use user::*;
