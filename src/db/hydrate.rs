//! # 관계 하이드레이터(Relation Hydrator) 모듈
//!
//! 바닥 `tasks` 행 집합을 받아 연관된 태그와 카테고리를 **일괄**
//! 로딩하고, 메모리에서 합쳐 완성 뷰([`TaskView`])로 조립합니다.
//!
//! N개의 할 일에 대해 쿼리를 N번씩 돌리는 대신:
//! 1. 집합 전체의 태그를 조인 테이블 경유 쿼리 **한 번**으로
//! 2. 참조된 카테고리들을 쿼리 **한 번**으로
//! 가져옵니다. 일괄 처리는 성능 최적화일 뿐, 결과는 할 일 하나씩
//! 하이드레이션한 것과 정확히 같아야 합니다.

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 할 일 집합 전체를 일괄 하이드레이션합니다.
///
/// 빈 입력은 쿼리 없이 빈 결과로 단락(short-circuit)됩니다.
/// 출력 순서는 입력 순서를 그대로 보존합니다.
///
/// 태그 쿼리는 소유자 범위로 제한되므로, (쓰기 검증을 우회해) 남의
/// 태그를 가리키는 조인 행이 있더라도 응답에는 절대 나타나지 않습니다.
pub async fn hydrate_many(
    pool: &SqlitePool,
    tasks: Vec<Task>,
) -> Result<Vec<TaskView>, AppError> {
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    // 모든 행은 소유자 범위 쿼리에서 나오므로 user_id는 전부 같습니다
    let user_id = tasks[0].user_id.clone();
    let task_ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    // ── 일괄 쿼리 1: 집합 전체의 태그 (task_id로 키 매김) ──
    // IN (?, ?, ...) 자리표시자를 행 수만큼 동적으로 만듭니다
    let placeholders = vec!["?"; task_ids.len()].join(", ");
    let tag_query = format!(
        "SELECT tags_tasks.task_id, tags.id, tags.name \
         FROM tags \
         INNER JOIN tags_tasks ON tags.id = tags_tasks.tag_id \
         WHERE tags.user_id = ? AND tags_tasks.task_id IN ({placeholders}) \
         ORDER BY tags.name ASC"
    );

    let mut query_builder =
        sqlx::query_as::<_, (String, String, String)>(&tag_query).bind(&user_id);
    for task_id in &task_ids {
        query_builder = query_builder.bind(*task_id);
    }
    let tag_rows = query_builder.fetch_all(pool).await?;

    // task_id → 그 할 일의 태그 목록
    let mut tags_by_task: HashMap<String, Vec<TagRef>> = HashMap::new();
    for (task_id, id, name) in tag_rows {
        tags_by_task
            .entry(task_id)
            .or_default()
            .push(TagRef { id, name });
    }

    // ── 일괄 쿼리 2: 참조된 카테고리들 (NULL 제외, 중복 제거) ──
    let mut category_ids: Vec<&str> = tasks
        .iter()
        .filter_map(|t| t.category_id.as_deref())
        .collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let mut categories_by_id: HashMap<String, Category> = HashMap::new();
    if !category_ids.is_empty() {
        let placeholders = vec!["?"; category_ids.len()].join(", ");
        let category_query = format!(
            "SELECT id, name, user_id, created_at, updated_at \
             FROM categories WHERE user_id = ? AND id IN ({placeholders})"
        );

        let mut query_builder =
            sqlx::query_as::<_, Category>(&category_query).bind(&user_id);
        for category_id in &category_ids {
            query_builder = query_builder.bind(*category_id);
        }
        for category in query_builder.fetch_all(pool).await? {
            categories_by_id.insert(category.id.clone(), category);
        }
    }

    // ── 메모리 병합: 할 일마다 제 태그 목록과 카테고리를 붙입니다 ──
    let views = tasks
        .into_iter()
        .map(|task| {
            // .remove(): 소유권째 꺼내기 — 각 task_id는 한 번만 등장합니다
            let tags = tags_by_task.remove(&task.id).unwrap_or_default();
            let category = task
                .category_id
                .as_ref()
                .and_then(|id| categories_by_id.get(id).cloned());
            TaskView::assemble(task, tags, category)
        })
        .collect();

    Ok(views)
}

/// 할 일 하나를 하이드레이션하는 편의 래퍼입니다.
pub async fn hydrate_one(pool: &SqlitePool, task: Task) -> Result<TaskView, AppError> {
    let mut views = hydrate_many(pool, vec![task]).await?;
    views
        .pop()
        .ok_or(AppError::Internal("Hydration produced no view".to_string()))
}
