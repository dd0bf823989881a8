//! # 할 일(Task) 모델 정의
//!
//! 할 일은 이 API의 중심 엔티티입니다. 카테고리 하나에 선택적으로 속하고
//! (`category_id`, NULL 허용), 태그 여러 개와 다대다 관계를 가집니다.
//!
//! ## 구조체 역할
//! - `Task`: 데이터베이스의 `tasks` 테이블 한 행(row)에 대응 (관계 미포함)
//! - `CreateTaskRequest` / `UpdateTaskRequest`: 요청 본문(body)
//! - `TaskFilter`: 목록 조회의 쿼리 스트링 필터
//! - `TaskView`: 태그 목록과 카테고리가 합쳐진 완성 응답 뷰
//!
//! `Task`(바닥 행)와 `TaskView`(관계가 채워진 뷰)의 구분이 핵심입니다:
//! 저장소는 `Task`를 다루고, 하이드레이터가 관계를 채워 `TaskView`를
//! 만들고 나서야 외부로 나갑니다.

use serde::{Deserialize, Serialize};

use crate::models::category::{Category, CategoryView};
use crate::models::tag::TagRef;

/// 할 일 상태의 기본값. 스키마의 DEFAULT와 같은 값을 유지해야 합니다.
pub const DEFAULT_STATUS: &str = "pending";

/// 할 일 엔티티 — DB의 `tasks` 테이블 한 행에 대응합니다.
///
/// 태그/카테고리 관계는 포함하지 않습니다. 관계가 필요한 곳에서는
/// 하이드레이터를 거쳐 [`TaskView`]로 변환해서 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// 할 일 고유 식별자 (UUIDv7 형식 문자열)
    pub id: String,
    pub title: String,
    pub description: String,
    /// 자유 형식 상태 라벨 (기본값 "pending", 닫힌 enum 아님)
    pub status: String,
    /// 소속 카테고리 ID — 없으면 None (SQL NULL)
    pub category_id: Option<String>,
    /// 소유자의 사용자 ID
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 할 일 생성 요청 — `POST /api/tasks`의 요청 본문에 해당합니다.
///
/// title만 필수입니다. description/status가 빠지면 각각 ""와
/// "pending"으로 채워지고, tags가 빠지면 빈 태그 집합으로 처리됩니다.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// 할 일 제목 (필수)
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    /// 소속시킬 카테고리 ID (선택) — 반드시 본인 소유 카테고리여야 합니다
    pub category_id: Option<String>,
    /// 붙일 태그 ID 목록 (선택) — 반드시 본인 소유 태그여야 합니다
    pub tags: Option<Vec<String>>,
}

/// 할 일 수정 요청 — `PUT /api/tasks/:id`의 요청 본문에 해당합니다.
///
/// PUT은 전체 교체(full replace) 의미입니다. 생성과 같은 본문을 받고,
/// tags는 기존 태그 집합을 **통째로** 새 집합으로 바꿉니다
/// (빈 배열이면 모든 태그 해제).
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// 할 일 목록 필터 — `GET /api/tasks`의 쿼리 스트링에 해당합니다.
///
/// 지정된 필터는 모두 AND로 결합됩니다.
/// 예: `?status=done&tag_id=...` → 완료 상태이면서 해당 태그가 붙은 할 일
#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    /// 특정 카테고리에 속한 할 일만
    pub category_id: Option<String>,
    /// 특정 상태의 할 일만
    pub status: Option<String>,
    /// 특정 태그가 붙은 할 일만 (조인 테이블에 해당 행이 하나라도 있으면 매칭)
    pub tag_id: Option<String>,
}

/// 완성된 할 일 응답 뷰 — 태그 목록과 카테고리 객체가 합쳐진 형태입니다.
///
/// 외부 계약:
/// `{id, title, description, status, userId, createdAt, updatedAt,
///   tags: [{id, name}], category: {...} | null}`
///
/// `category`는 카테고리가 없으면 JSON `null`로 직렬화됩니다
/// (`Option<T>`의 `None` → `null`).
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    pub tags: Vec<TagRef>,
    pub category: Option<CategoryView>,
}

impl TaskView {
    /// 바닥 행과 하이드레이터가 모아온 관계를 합쳐 뷰를 조립합니다.
    ///
    /// 순수 매핑 함수입니다 — I/O 없음. 어떤 태그/카테고리를 넘길지는
    /// 전적으로 호출자(하이드레이터)의 책임입니다.
    pub fn assemble(task: Task, tags: Vec<TagRef>, category: Option<Category>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            user_id: task.user_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
            tags,
            category: category.map(CategoryView::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: "t-1".to_string(),
            title: "Buy milk".to_string(),
            description: "".to_string(),
            status: DEFAULT_STATUS.to_string(),
            category_id: None,
            user_id: "u-1".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn task_view_renames_timestamps_and_user_id() {
        let view = TaskView::assemble(sample_task(), vec![], None);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00.000Z");
        assert_eq!(json["updatedAt"], "2026-01-01T00:00:00.000Z");
        // snake_case keys must not leak into the external shape
        assert!(json.get("user_id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn task_view_serializes_missing_category_as_null() {
        let view = TaskView::assemble(sample_task(), vec![], None);
        let json = serde_json::to_value(&view).unwrap();

        assert!(json["category"].is_null());
        assert_eq!(json["tags"], serde_json::json!([]));
    }

    #[test]
    fn task_view_nests_tags_and_category() {
        let mut task = sample_task();
        task.category_id = Some("c-1".to_string());
        let category = Category {
            id: "c-1".to_string(),
            name: "Work".to_string(),
            user_id: "u-1".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let tags = vec![TagRef {
            id: "g-1".to_string(),
            name: "urgent".to_string(),
        }];

        let view = TaskView::assemble(task, tags, Some(category));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["tags"][0]["id"], "g-1");
        assert_eq!(json["tags"][0]["name"], "urgent");
        // nested tag carries only {id, name}
        assert!(json["tags"][0].get("createdAt").is_none());
        assert_eq!(json["category"]["name"], "Work");
        assert_eq!(json["category"]["createdAt"], "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn category_view_renames_timestamps() {
        let category = Category {
            id: "c-1".to_string(),
            name: "Work".to_string(),
            user_id: "u-1".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-02T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(CategoryView::from(category)).unwrap();

        assert_eq!(json["createdAt"], "2026-01-01T00:00:00.000Z");
        assert_eq!(json["updatedAt"], "2026-01-02T00:00:00.000Z");
        // owner id is internal, the standalone view does not expose it
        assert!(json.get("user_id").is_none());
    }
}
