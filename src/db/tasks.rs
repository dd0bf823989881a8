//! # 할 일 집합체(aggregate) 저장소 모듈
//!
//! 할 일과 그 관계(태그 다대다, 카테고리 단일 참조)를 **하나의 일관성
//! 단위**로 다루는 모듈입니다. 이 저장소의 책임:
//!
//! - 쓰기(생성/수정/삭제)는 모두 하나의 트랜잭션 안에서 수행 —
//!   할 일 행과 조인 테이블이 어긋난 중간 상태는 외부에서 관찰 불가
//! - 수정 시 태그 집합은 **전체 교체**(기존 조인 행 전부 삭제 후 재삽입,
//!   차이 계산 없음). 빈 집합이면 모든 태그가 해제됩니다.
//! - 삭제는 삭제 직전 상태의 하이드레이션 스냅샷을 반환
//! - 모든 쿼리는 `(id, user_id)`로 범위 제한 — 남의 할 일은 존재하지
//!   않는 것과 구분되지 않습니다 (테넌트 격리)
//! - 참조하는 카테고리/태그가 본인 소유인지 쓰기 전에 검사 —
//!   아니면 `NotFound`로 전체 작업이 실패합니다
//!
//! 읽기 결과는 `hydrate` 모듈을 거쳐 [`TaskView`]로 조립되어 반환됩니다.

use crate::db::hydrate::{hydrate_many, hydrate_one};
use crate::error::AppError;
use crate::models::*;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// 범위 제한된 바닥 행 조회 — 하이드레이션 없이 `tasks` 행만 가져옵니다.
///
/// 다른 사용자 소유의 id를 넘기면 결과는 None입니다.
pub async fn get_task_row(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, status, category_id, user_id, created_at, updated_at
        FROM tasks
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// 단일 할 일을 조회하여 관계가 채워진 뷰로 반환합니다.
///
/// ## 반환값
/// - `Ok(Some(TaskView))`: 조회 성공
/// - `Ok(None)`: 없거나 소유자가 아님 (핸들러에서 404로 변환)
pub async fn get_task(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<TaskView>, AppError> {
    let task = match get_task_row(pool, id, user_id).await? {
        Some(task) => task,
        None => return Ok(None),
    };

    Ok(Some(hydrate_one(pool, task).await?))
}

/// 사용자의 할 일 목록을 필터와 함께 조회합니다.
///
/// 지정된 필터(category_id, status, tag_id)는 모두 AND로 결합되고,
/// 최신 생성순(created_at 내림차순)으로 정렬됩니다. tag_id 필터는
/// 해당 태그의 조인 행이 하나라도 있는 할 일을 매칭합니다.
///
/// ## 동적 쿼리 구성
/// 클라이언트가 보낸 필터만 SQL에 포함해야 하므로, WHERE 절을
/// 문자열로 조립하고 바인딩 값을 같은 순서로 모아둡니다.
pub async fn list_tasks(
    pool: &SqlitePool,
    user_id: &str,
    filter: &TaskFilter,
) -> Result<Vec<TaskView>, AppError> {
    let mut query = String::from(
        "SELECT id, title, description, status, category_id, user_id, created_at, updated_at \
         FROM tasks WHERE user_id = ?",
    );
    // 나중에 SQL의 ? 자리에 순서대로 바인딩할 값들
    let mut bindings: Vec<&str> = vec![user_id];

    if let Some(category_id) = &filter.category_id {
        query.push_str(" AND category_id = ?");
        bindings.push(category_id.as_str());
    }

    if let Some(status) = &filter.status {
        query.push_str(" AND status = ?");
        bindings.push(status.as_str());
    }

    if let Some(tag_id) = &filter.tag_id {
        query.push_str(
            " AND EXISTS (SELECT 1 FROM tags_tasks \
             WHERE tags_tasks.task_id = tasks.id AND tags_tasks.tag_id = ?)",
        );
        bindings.push(tag_id.as_str());
    }

    // created_at이 밀리초 단위라 동률이 생길 수 있어 id(UUIDv7, 시간순)로
    // 2차 정렬합니다
    query.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query_builder = sqlx::query_as::<_, Task>(&query);
    for binding in bindings {
        query_builder = query_builder.bind(binding);
    }

    let tasks = query_builder.fetch_all(pool).await?;

    hydrate_many(pool, tasks).await
}

/// 새 할 일을 생성합니다.
///
/// ## 처리 흐름
/// 1. title 검증 (비어 있으면 `Validation`)
/// 2. category_id가 있으면 본인 소유인지 검증 (아니면 `NotFound` —
///    조용히 NULL로 바꾸지 않습니다)
/// 3. 태그 ID들이 전부 본인 소유인지 검증 (아니면 `NotFound`)
/// 4. 트랜잭션: 할 일 행 삽입 + 조인 행 일괄 삽입 → 커밋
/// 5. 커밋 후 다시 읽어 하이드레이션된 뷰 반환
///
/// 4에서 어떤 문장이든 실패하면 tx가 drop되며 전부 롤백됩니다 —
/// 할 일 행만 남는 부분 상태는 생기지 않습니다.
pub async fn create_task(
    pool: &SqlitePool,
    user_id: &str,
    req: &CreateTaskRequest,
) -> Result<TaskView, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let tag_ids = req.tags.clone().unwrap_or_default();

    if let Some(category_id) = &req.category_id {
        verify_category_owner(pool, category_id, user_id).await?;
    }
    verify_tag_owner(pool, &tag_ids, user_id).await?;

    let id = uuid::Uuid::now_v7().to_string();

    // pool.begin(): 전용 커넥션을 체크아웃하고 트랜잭션을 시작합니다.
    // commit 전에 tx가 drop되면(에러 조기 반환 포함) 자동 롤백 —
    // 커넥션도 풀로 반환되므로 실패가 커넥션을 누수시키지 않습니다.
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO tasks (id, title, description, status, category_id, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.title)
    .bind(req.description.as_deref().unwrap_or(""))
    .bind(req.status.as_deref().unwrap_or(DEFAULT_STATUS))
    .bind(&req.category_id) // Option<String>: None이면 SQL NULL로 바인딩됩니다
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    insert_task_tags(&mut tx, &id, &tag_ids).await?;

    tx.commit().await?;

    // 커밋 후 재조회: DB 기본값(타임스탬프)이 채워진 완전한 행을 반환
    let task = get_task_row(pool, &id, user_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created task".to_string()))?;

    hydrate_one(pool, task).await
}

/// 할 일을 수정합니다 (PUT — 전체 교체 의미).
///
/// 가변 필드(title/description/status/category_id)를 갱신하고,
/// 태그 집합을 새 집합으로 통째로 바꿉니다: 기존 조인 행 전부 삭제 후
/// 재삽입. tags가 빈 배열(또는 생략)이면 모든 태그가 해제됩니다.
///
/// 없는(또는 남의) 할 일이면 `NotFound` — 존재하지만 소유자가 다른
/// 경우도 똑같이 404입니다.
pub async fn update_task(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    req: &UpdateTaskRequest,
) -> Result<TaskView, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    // 쓰기 전에 소유 범위로 존재 확인
    if get_task_row(pool, id, user_id).await?.is_none() {
        return Err(AppError::NotFound(
            "Task not found or does not belong to user".to_string(),
        ));
    }

    let tag_ids = req.tags.clone().unwrap_or_default();

    if let Some(category_id) = &req.category_id {
        verify_category_owner(pool, category_id, user_id).await?;
    }
    verify_tag_owner(pool, &tag_ids, user_id).await?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET title = ?, description = ?, status = ?, category_id = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(&req.title)
    .bind(req.description.as_deref().unwrap_or(""))
    .bind(req.status.as_deref().unwrap_or(DEFAULT_STATUS))
    .bind(&req.category_id)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    // 위의 존재 확인과 이 UPDATE 사이에 행이 사라졌을 수 있습니다.
    // 0행이면 여기서 반환 — tx가 drop되며 롤백됩니다.
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Task not found or does not belong to user".to_string(),
        ));
    }

    // 전체 교체: 기존 조인 행 삭제 → 새 집합 삽입
    sqlx::query("DELETE FROM tags_tasks WHERE task_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_task_tags(&mut tx, id, &tag_ids).await?;

    tx.commit().await?;

    let task = get_task_row(pool, id, user_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve updated task".to_string()))?;

    hydrate_one(pool, task).await
}

/// 할 일을 삭제하고 **삭제 직전의** 하이드레이션 스냅샷을 반환합니다.
///
/// 호출자는 삭제 확인만이 아니라 "무엇이 삭제되었는지"(태그, 카테고리
/// 포함)를 보여줄 수 있어야 하므로, 조인 행을 지우기 **전에** 관계를
/// 하이드레이션해 둡니다.
pub async fn delete_task(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<TaskView, AppError> {
    let task = get_task_row(pool, id, user_id).await?.ok_or_else(|| {
        AppError::NotFound("Task not found or does not belong to user".to_string())
    })?;

    // 삭제 전 스냅샷 — 지운 다음에는 관계를 복원할 수 없습니다
    let snapshot = hydrate_one(pool, task).await?;

    let mut tx = pool.begin().await?;

    // 조인 행을 먼저 지워야 FK 제약에 걸리지 않습니다
    sqlx::query("DELETE FROM tags_tasks WHERE task_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(snapshot)
}

/// 카테고리가 존재하고 요청자 소유인지 검증합니다.
///
/// 존재하지만 남의 카테고리인 경우도 똑같이 `NotFound`입니다 —
/// 존재 여부를 누설하지 않습니다.
async fn verify_category_owner(
    pool: &SqlitePool,
    category_id: &str,
    user_id: &str,
) -> Result<(), AppError> {
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT id FROM categories WHERE id = ? AND user_id = ?")
            .bind(category_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    if existing.is_none() {
        return Err(AppError::NotFound(
            "Category not found or does not belong to user".to_string(),
        ));
    }
    Ok(())
}

/// 태그 ID들이 전부 존재하고 요청자 소유인지 검증합니다.
///
/// 소유한 태그의 개수를 세어 요청한 (중복 제거된) 개수와 비교합니다.
/// 하나라도 없거나 남의 것이면 전체가 `NotFound`로 실패합니다 —
/// 조용히 삽입만 되고 영영 하이드레이션되지 않는 조인 행을 만들지
/// 않습니다.
async fn verify_tag_owner(
    pool: &SqlitePool,
    tag_ids: &[String],
    user_id: &str,
) -> Result<(), AppError> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    // 중복 제거: 같은 id가 두 번 와도 소유 검사는 한 번만 세면 됩니다
    let mut distinct: Vec<&str> = tag_ids.iter().map(|s| s.as_str()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    // IN (?, ?, ...) 자리표시자를 개수만큼 동적으로 만듭니다
    let placeholders = vec!["?"; distinct.len()].join(", ");
    let query = format!(
        "SELECT COUNT(*) FROM tags WHERE user_id = ? AND id IN ({placeholders})"
    );

    let mut query_builder = sqlx::query_as::<_, (i64,)>(&query).bind(user_id);
    for tag_id in &distinct {
        query_builder = query_builder.bind(*tag_id);
    }

    let (count,) = query_builder.fetch_one(pool).await?;

    if count as usize != distinct.len() {
        return Err(AppError::NotFound(
            "Tag not found or does not belong to user".to_string(),
        ));
    }
    Ok(())
}

/// 조인 행을 한 문장으로 일괄 삽입합니다 (트랜잭션 내부 전용).
///
/// `INSERT INTO tags_tasks (tag_id, task_id) VALUES (?, ?), (?, ?), ...`
/// 형태로 행 수만큼 VALUES 그룹을 만들어 바인딩합니다.
/// 같은 태그가 두 번 들어오면 복합 기본키 위반으로 문장 전체가
/// 실패하고, 호출자 쪽 트랜잭션이 롤백됩니다.
async fn insert_task_tags(
    tx: &mut Transaction<'_, Sqlite>,
    task_id: &str,
    tag_ids: &[String],
) -> Result<(), AppError> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    let values = vec!["(?, ?)"; tag_ids.len()].join(", ");
    let query = format!("INSERT INTO tags_tasks (tag_id, task_id) VALUES {values}");

    let mut query_builder = sqlx::query(&query);
    for tag_id in tag_ids {
        query_builder = query_builder.bind(tag_id).bind(task_id);
    }

    query_builder.execute(&mut **tx).await?;
    Ok(())
}
