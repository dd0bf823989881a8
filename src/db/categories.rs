//! # 카테고리 데이터베이스 쿼리 모듈
//!
//! 카테고리 CRUD 쿼리 함수들입니다. 모든 쿼리는 소유자(user_id)로
//! 범위가 제한됩니다 — 다른 사용자의 카테고리는 조회/수정/삭제 모두
//! "없는 것"과 구분되지 않습니다 (테넌트 격리).
//!
//! 이름 유일성(UNIQUE(user_id, name))은 쓰기 전에 명시적으로 검사하여
//! 의미 있는 Conflict 에러를 만들어 반환합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 사용자의 모든 카테고리를 이름순으로 조회합니다.
pub async fn list_categories(pool: &SqlitePool, user_id: &str) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, user_id, created_at, updated_at
        FROM categories
        WHERE user_id = ?
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// ID로 카테고리 하나를 조회합니다 (소유자 범위).
///
/// `fetch_optional`은 결과가 0행이면 None, 1행이면 Some을 반환합니다.
/// 다른 사용자 소유의 id를 넘기면 결과는 None입니다.
pub async fn get_category(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, user_id, created_at, updated_at
        FROM categories
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// 새 카테고리를 생성하고 생성된 카테고리를 반환합니다.
///
/// ## 처리 흐름
/// 1. 같은 사용자 안에 같은 이름이 이미 있으면 `Conflict`
/// 2. UUIDv7로 고유 ID 생성 후 INSERT
/// 3. 방금 생성한 행을 다시 조회하여 반환 (DB 기본값이 적용된 완전한 데이터)
pub async fn create_category(
    pool: &SqlitePool,
    user_id: &str,
    req: &CreateCategoryRequest,
) -> Result<Category, AppError> {
    // 사용자별 이름 중복 검사 (대소문자 구분, 정확히 일치)
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT id FROM categories WHERE name = ? AND user_id = ?")
            .bind(&req.name)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Category name already exists for this user".to_string(),
        ));
    }

    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO categories (id, name, user_id) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&req.name)
        .bind(user_id)
        .execute(pool)
        .await?;

    get_category(pool, &id, user_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created category".to_string()))
}

/// 카테고리 이름을 변경합니다.
///
/// ## 반환값
/// - `Ok(Some(Category))`: 수정 성공, 변경된 카테고리 반환
/// - `Ok(None)`: 해당 ID의 카테고리가 없거나 소유자가 아님
/// - `Err(Conflict)`: 같은 사용자의 **다른** 카테고리가 이미 그 이름을 사용 중
pub async fn update_category(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    req: &UpdateCategoryRequest,
) -> Result<Option<Category>, AppError> {
    // 자기 자신(id)은 제외하고 중복을 검사합니다
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT id FROM categories WHERE name = ? AND user_id = ? AND id != ?")
            .bind(&req.name)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Another category with that name already exists for this user".to_string(),
        ));
    }

    let result = sqlx::query(
        r#"
        UPDATE categories
        SET name = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(&req.name)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    // .rows_affected(): 쿼리에 의해 영향받은 행 수.
    // 0이면 없는(또는 남의) 카테고리 → None (핸들러에서 404로 변환)
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_category(pool, id, user_id).await
}

/// 카테고리를 삭제하고 삭제 직전의 행을 반환합니다.
///
/// 호출자가 "무엇이 삭제되었는지"를 응답으로 보여줄 수 있도록
/// 삭제 전에 행을 캡처해 둡니다.
/// 이 카테고리를 참조하던 할 일들의 `category_id`는
/// 스키마의 `ON DELETE SET NULL`에 따라 NULL이 됩니다.
pub async fn delete_category(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<Category>, AppError> {
    // 삭제 전 스냅샷 (없으면 바로 None)
    let category = match get_category(pool, id, user_id).await? {
        Some(category) => category,
        None => return Ok(None),
    };

    sqlx::query("DELETE FROM categories WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(Some(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    #[tokio::test]
    async fn create_category_rejects_duplicate_name_for_same_user() {
        let pool = test_pool().await;
        let req = CreateCategoryRequest {
            name: "Work".to_string(),
        };

        create_category(&pool, "u-1", &req).await.unwrap();
        let err = create_category(&pool, "u-1", &req).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn category_names_are_scoped_per_user() {
        let pool = test_pool().await;
        let req = CreateCategoryRequest {
            name: "Work".to_string(),
        };

        // same name, different owners → both succeed
        let c1 = create_category(&pool, "u-1", &req).await.unwrap();
        let c2 = create_category(&pool, "u-2", &req).await.unwrap();
        assert_ne!(c1.id, c2.id);
        assert_eq!(c1.name, c2.name);
    }

    #[tokio::test]
    async fn update_category_rejects_name_of_sibling_but_allows_own() {
        let pool = test_pool().await;
        let work = create_category(&pool, "u-1", &CreateCategoryRequest { name: "Work".into() })
            .await
            .unwrap();
        create_category(&pool, "u-1", &CreateCategoryRequest { name: "Home".into() })
            .await
            .unwrap();

        // renaming onto a sibling's name conflicts
        let err = update_category(&pool, &work.id, "u-1", &UpdateCategoryRequest { name: "Home".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // re-submitting the current name is not a conflict with itself
        let same = update_category(&pool, &work.id, "u-1", &UpdateCategoryRequest { name: "Work".into() })
            .await
            .unwrap();
        assert_eq!(same.unwrap().name, "Work");
    }

    #[tokio::test]
    async fn category_is_invisible_to_other_users() {
        let pool = test_pool().await;
        let c = create_category(&pool, "u-1", &CreateCategoryRequest { name: "Work".into() })
            .await
            .unwrap();

        assert!(get_category(&pool, &c.id, "u-2").await.unwrap().is_none());
        assert!(delete_category(&pool, &c.id, "u-2").await.unwrap().is_none());
        // still there for the owner
        assert!(get_category(&pool, &c.id, "u-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_category_returns_snapshot() {
        let pool = test_pool().await;
        let c = create_category(&pool, "u-1", &CreateCategoryRequest { name: "Work".into() })
            .await
            .unwrap();

        let deleted = delete_category(&pool, &c.id, "u-1").await.unwrap().unwrap();
        assert_eq!(deleted.id, c.id);
        assert_eq!(deleted.name, "Work");
        assert!(get_category(&pool, &c.id, "u-1").await.unwrap().is_none());
    }
}
