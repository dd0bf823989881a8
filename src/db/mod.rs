//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `categories`: 카테고리 CRUD 쿼리 (사용자 소유 범위)
//! - `hydrate`: 할 일에 태그/카테고리 관계를 일괄 로딩하는 하이드레이터
//! - `tags`: 태그 CRUD 쿼리 (사용자 소유 범위)
//! - `tasks`: 할 일 집합체(aggregate) 저장소 — 트랜잭션 쓰기의 중심
//! - `users`: 사용자 인증 관련 쿼리

pub mod categories;
pub mod hydrate;
pub mod tags;
pub mod tasks;
pub mod users;

// 테스트 전용: 인메모리 SQLite 풀과 시드 데이터를 만드는 헬퍼
#[cfg(test)]
pub(crate) mod test_support;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::list_tasks`처럼 바로 접근할 수 있게 합니다.
pub use categories::*;
pub use hydrate::*;
pub use tags::*;
pub use tasks::*;
