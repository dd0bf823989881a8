//! # 태그 모델 정의
//!
//! 태그(Tag)는 할 일에 붙이는 라벨로, 할 일과 다대다(N:M) 관계를 가집니다
//! (`tags_tasks` 조인 테이블 참조). 카테고리와 마찬가지로 사용자별로
//! 소유되며, 이름은 소유자 안에서만 유일합니다.
//!
//! ## 구조체 역할
//! - `Tag`: 데이터베이스의 `tags` 테이블 한 행(row)에 대응
//! - `CreateTagRequest` / `UpdateTagRequest`: 요청 본문(body)
//! - `TagView`: 단독 조회용 camelCase 응답 뷰
//! - `TagRef`: 할 일 응답 안에 중첩되는 축약형 `{id, name}`

use serde::{Deserialize, Serialize};

/// 태그 엔티티 — DB의 `tags` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// 태그 고유 식별자 (UUIDv7 형식 문자열)
    pub id: String,
    /// 태그 이름 (예: "urgent", "home")
    pub name: String,
    /// 소유자의 사용자 ID
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 태그 생성 요청 — `POST /api/tags`의 요청 본문에 해당합니다.
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    /// 생성할 태그 이름 (필수)
    pub name: String,
}

/// 태그 수정 요청 — `PUT /api/tags/:id`의 요청 본문에 해당합니다.
#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    /// 변경할 태그 이름 (필수)
    pub name: String,
}

/// 태그 응답 뷰 — snake_case 타임스탬프를 camelCase로 바꾼 외부 형태입니다.
#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

/// 할 일 응답 안에 중첩되는 축약 태그 — `{id, name}`만 노출합니다.
///
/// 하이드레이터가 조인 쿼리 결과에서 이 형태로 조립합니다.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagRef {
    pub id: String,
    pub name: String,
}
