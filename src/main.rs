//! # Tasken 웹 서버 진입점
//!
//! 이 파일은 Tasken 애플리케이션의 **시작점(entry point)**입니다.
//! Rust 프로그램은 항상 `main()` 함수에서 실행이 시작됩니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

// ── 모듈 선언 ──
// `mod` 키워드는 다른 파일을 모듈로 가져옵니다.
// Rust에서는 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use axum::{
    routing::{get, post}, // HTTP 메서드별 라우팅 함수들
    Router,               // 라우터: URL 경로와 핸들러를 연결하는 구조체
};
use config::Config;
use routes::{tasks::AppState, *};
use sqlx::sqlite::SqlitePoolOptions; // SQLite 연결 풀 설정 옵션
use tower_http::{
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 로깅 미들웨어
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// #[tokio::main]: 비동기 런타임을 시작하는 어트리뷰트 매크로.
// 내부적으로 tokio 런타임을 생성하고 main을 그 안에서 실행합니다.
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok()는 Result를 Option으로 변환하여, .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry()로 로그 수집기를 만들고 필터와 포맷터를 레이어로 쌓습니다.
    tracing_subscriber::registry()
        .with(
            // EnvFilter: RUST_LOG 환경변수로 로그 레벨을 제어합니다.
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasken=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // `?` 연산자: Result가 Err이면 즉시 함수에서 반환(에러 전파)합니다.
    let config = Config::from_env()?;
    tracing::info!("Starting Tasken server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 연결 풀: 연결을 미리 만들어두고 재사용합니다. 쓰기 트랜잭션은
    // 풀에서 전용 커넥션을 체크아웃해 begin…commit/rollback 동안 점유합니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    // sqlx::migrate!는 컴파일 타임에 ./migrations 폴더의 SQL 파일들을 포함시키고,
    // 아직 실행되지 않은 파일만 이름 순서대로 한 번씩 실행합니다.
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 애플리케이션 상태(State) 생성 ──
    // 모든 라우트 핸들러가 공유하는 데이터입니다.
    // SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
    let state = AppState {
        pool: pool.clone(),
        jwt_secret: config.jwt_secret.clone(),
        jwt_expires_in: config.jwt_expires_in,
    };

    // ── 7단계: API 라우터 설정 ──
    // 인증 관련 라우트 (회원가입, 로그인, 내 정보)
    let auth_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/me", get(routes::auth::me));

    // 모든 API 라우트를 하나로 합칩니다.
    let api_routes = Router::new()
        .merge(auth_routes)
        // 할 일(Task) CRUD API
        // .post()를 .route()에 체이닝하면 같은 경로에 여러 HTTP 메서드를 매핑할 수 있습니다.
        .route("/tasks", get(list_tasks).post(create_task))
        // {id}는 URL 경로 파라미터 (Path<String>으로 핸들러에서 추출)
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        // 카테고리(Category) CRUD API
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        // 태그(Tag) CRUD API
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}", get(get_tag).put(update_tag).delete(delete_tag))
        // 헬스체크 API (서버 상태 확인용)
        .route("/health", get(health_check))
        // .with_state(): 이 라우터의 모든 핸들러에서 AppState를 사용할 수 있게 합니다.
        .with_state(state);

    // ── 8단계: CORS 미들웨어 설정 ──
    // 개발 환경에서는 Any(모두 허용)로 설정합니다.
    // 프로덕션에서는 특정 도메인만 허용해야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // .nest(): API 라우트를 /api 경로 아래에 중첩시킵니다.
    // 예: /tasks → /api/tasks
    let app = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // ── 9단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // 이 줄에서 서버가 영원히 실행됩니다 (Ctrl+C로 종료할 때까지).
    axum::serve(listener, app).await?;

    Ok(())
}
