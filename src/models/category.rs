//! # 카테고리 모델 정의
//!
//! 카테고리(Category)는 할 일을 분류하는 단위로, 사용자별로 소유됩니다.
//! 카테고리 이름은 같은 사용자 안에서만 유일하면 됩니다 — 즉
//! U1의 "Work"와 U2의 "Work"는 서로 다른 카테고리로 공존할 수 있습니다.
//!
//! ## 구조체 역할
//! - `Category`: 데이터베이스의 `categories` 테이블 한 행(row)에 대응
//! - `CreateCategoryRequest` / `UpdateCategoryRequest`: 요청 본문(body)
//! - `CategoryView`: snake_case 타임스탬프를 camelCase로 바꾼 응답 뷰

use serde::{Deserialize, Serialize};

/// 카테고리 엔티티 — DB의 `categories` 테이블 한 행에 대응합니다.
///
/// # derive 매크로 설명
/// - `Serialize` / `Deserialize`: JSON 변환
/// - `sqlx::FromRow`: SQL 쿼리 결과(행)를 이 구조체로 자동 매핑
/// - `Clone`: 값을 복제할 수 있게 합니다 (.clone() 메서드 제공)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// 카테고리 고유 식별자 (UUIDv7 형식 문자열)
    pub id: String,
    /// 카테고리 이름 (예: "Work", "Personal")
    pub name: String,
    /// 소유자의 사용자 ID
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 카테고리 생성 요청 — `POST /api/categories`의 요청 본문에 해당합니다.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// 생성할 카테고리 이름 (필수)
    pub name: String,
}

/// 카테고리 수정 요청 — `PUT /api/categories/:id`의 요청 본문에 해당합니다.
///
/// 카테고리는 이름 외에 변경할 수 있는 속성이 없으므로 name 하나만 받습니다.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    /// 변경할 카테고리 이름 (필수)
    pub name: String,
}

/// 카테고리 응답 뷰 — 외부 응답용 형태입니다.
///
/// DB 행의 snake_case 타임스탬프(`created_at`)를
/// API 계약의 camelCase(`createdAt`)로 바꿔서 내보냅니다.
/// `#[serde(rename = "...")]`이 직렬화 시 필드 이름을 바꿉니다.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

// From<Category>: 엔티티 → 뷰 변환 (순수 매핑, I/O 없음)
impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
