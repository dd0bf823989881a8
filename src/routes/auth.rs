use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::{create_token, AuthUser},
    models::user::*,
    routes::tasks::AppState,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Json};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    // Validate input
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if !req.email.contains('@') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".to_string()));
    }

    // Check if email already exists
    if db_users::find_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    // Create user
    let user_id = uuid::Uuid::now_v7().to_string();
    let user =
        db_users::create_user(&state.pool, &user_id, &req.name, &req.email, &password_hash).await?;

    // Issue the access token
    let token = create_token(&user.id, &state.jwt_secret, state.jwt_expires_in)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    // Find user by email — same generic message for unknown user and bad
    // password, so the response does not reveal which emails exist
    let user = db_users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or(AppError::Unauthorized("Invalid email or password".to_string()))?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let token = create_token(&user.id, &state.jwt_secret, state.jwt_expires_in)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    // Re-resolve the token's user id against the user table — a valid token
    // for a deleted account must not authenticate
    let user = db_users::find_by_id(&state.pool, &auth.user_id)
        .await?
        .ok_or(AppError::Unauthorized("User no longer exists".to_string()))?;

    Ok(Json(user.into()))
}
