//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD 쿼리 함수들입니다. 카테고리와 마찬가지로 모든 쿼리는
//! 소유자(user_id)로 범위가 제한되고, 이름 유일성은 쓰기 전에
//! 명시적으로 검사합니다.
//!
//! 태그 삭제는 조인 테이블(`tags_tasks`)의 해당 행들도 함께 지워야
//! 하므로 트랜잭션으로 묶습니다 — 조인 행이 지워진 태그를 가리키는
//! 상태가 외부에서 관찰되면 안 됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 사용자의 모든 태그를 이름순으로 조회합니다.
///
/// `sqlx::query_as::<_, Tag>(sql)`:
/// - `query_as`는 SQL 결과를 지정한 구조체(Tag)로 자동 변환합니다
/// - `<_, Tag>`에서 `_`는 DB 드라이버(SQLite)를 컴파일러가 추론하게 하고,
///   `Tag`는 결과를 매핑할 대상 구조체입니다
pub async fn list_tags(pool: &SqlitePool, user_id: &str) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name, user_id, created_at, updated_at
        FROM tags
        WHERE user_id = ?
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// ID로 태그 하나를 조회합니다 (소유자 범위).
pub async fn get_tag(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name, user_id, created_at, updated_at
        FROM tags
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(tag)
}

/// 새 태그를 생성하고 생성된 태그를 반환합니다.
///
/// 같은 사용자 안에 같은 이름이 이미 있으면 `Conflict`를 반환합니다.
pub async fn create_tag(
    pool: &SqlitePool,
    user_id: &str,
    req: &CreateTagRequest,
) -> Result<Tag, AppError> {
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT id FROM tags WHERE name = ? AND user_id = ?")
            .bind(&req.name)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Tag name already exists for this user".to_string(),
        ));
    }

    // UUIDv7: 시간 기반 UUID로, 생성 순서대로 정렬됩니다
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO tags (id, name, user_id) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&req.name)
        .bind(user_id)
        .execute(pool)
        .await?;

    get_tag(pool, &id, user_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created tag".to_string()))
}

/// 태그 이름을 변경합니다.
///
/// ## 반환값
/// - `Ok(Some(Tag))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 태그가 없거나 소유자가 아님
/// - `Err(Conflict)`: 같은 사용자의 다른 태그가 이미 그 이름을 사용 중
pub async fn update_tag(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    req: &UpdateTagRequest,
) -> Result<Option<Tag>, AppError> {
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT id FROM tags WHERE name = ? AND user_id = ? AND id != ?")
            .bind(&req.name)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Another tag with that name already exists for this user".to_string(),
        ));
    }

    let result = sqlx::query(
        r#"
        UPDATE tags
        SET name = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(&req.name)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_tag(pool, id, user_id).await
}

/// 태그를 삭제합니다. 붙어 있던 조인 행도 같은 트랜잭션에서 지웁니다.
///
/// ## 반환값
/// - `Ok(true)`: 삭제 성공
/// - `Ok(false)`: 해당 ID의 태그가 없거나 소유자가 아님
pub async fn delete_tag(pool: &SqlitePool, id: &str, user_id: &str) -> Result<bool, AppError> {
    // 소유 확인을 먼저 — 남의 태그의 조인 행을 건드리면 안 됩니다
    if get_tag(pool, id, user_id).await?.is_none() {
        return Ok(false);
    }

    // pool.begin(): 전용 커넥션을 체크아웃하고 트랜잭션을 시작합니다.
    // tx가 commit 없이 drop되면 자동으로 롤백됩니다 (커넥션 누수 없음).
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tags_tasks WHERE tag_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    #[tokio::test]
    async fn create_tag_rejects_duplicate_name_for_same_user() {
        let pool = test_pool().await;
        let req = CreateTagRequest {
            name: "urgent".to_string(),
        };

        create_tag(&pool, "u-1", &req).await.unwrap();
        let err = create_tag(&pool, "u-1", &req).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // same name for another user is fine
        create_tag(&pool, "u-2", &req).await.unwrap();
    }

    #[tokio::test]
    async fn tag_is_invisible_to_other_users() {
        let pool = test_pool().await;
        let tag = create_tag(&pool, "u-1", &CreateTagRequest { name: "urgent".into() })
            .await
            .unwrap();

        assert!(get_tag(&pool, &tag.id, "u-2").await.unwrap().is_none());
        assert!(!delete_tag(&pool, &tag.id, "u-2").await.unwrap());
        assert!(get_tag(&pool, &tag.id, "u-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_tag_removes_join_rows() {
        let pool = test_pool().await;
        let tag = create_tag(&pool, "u-1", &CreateTagRequest { name: "urgent".into() })
            .await
            .unwrap();

        sqlx::query("INSERT INTO tasks (id, title, user_id) VALUES ('t-1', 'Buy milk', 'u-1')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO tags_tasks (tag_id, task_id) VALUES (?, 't-1')")
            .bind(&tag.id)
            .execute(&pool)
            .await
            .unwrap();

        assert!(delete_tag(&pool, &tag.id, "u-1").await.unwrap());

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tags_tasks")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
