//! Registration and login

use shared::error::{AppError, ErrorCode};
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, User};
use sqlx::SqlitePool;
use validator::ValidateEmail;

use crate::auth::JwtService;
use crate::db::repository::{RepoError, member, user};
use crate::error::{ServiceError, ServiceResult};
use crate::util::{hash_password, verify_password};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Create a user and its member profile in one transaction
pub async fn register(pool: &SqlitePool, req: RegisterRequest) -> ServiceResult<User> {
    let username = req.username.trim();
    for (field, value) in [
        ("username", username),
        ("first_name", req.first_name.trim()),
        ("last_name", req.last_name.trim()),
    ] {
        if value.is_empty() {
            return Err(AppError::field(
                field,
                ErrorCode::RequiredField,
                format!("{field} is required"),
            )
            .into());
        }
    }
    let email = req.email.trim();
    if !email.validate_email() {
        return Err(AppError::field(
            "email",
            ErrorCode::ValidationFailed,
            "Enter a valid email address",
        )
        .into());
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::field(
            "password",
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        )
        .into());
    }
    if user::find_by_username(pool, username).await?.is_some() {
        return Err(username_taken(username));
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal("Password hashing failed")
    })?;

    let mut tx = pool.begin().await?;
    let new_user = user::NewUser {
        username,
        email,
        first_name: req.first_name.trim(),
        last_name: req.last_name.trim(),
        hashed_password: &hashed,
        is_staff: false,
    };
    let user_id = match user::insert(&mut tx, &new_user).await {
        Ok(id) => id,
        Err(RepoError::Duplicate(_)) => return Err(username_taken(username)),
        Err(e) => return Err(e.into()),
    };
    let display_name = req.display_name.as_deref().map(str::trim).unwrap_or_default();
    member::insert(&mut tx, user_id, display_name, req.birth_date).await?;
    tx.commit().await?;

    tracing::info!(user_id, username, "User registered");
    user::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Registered user vanished".into()))
}

fn username_taken(username: &str) -> ServiceError {
    AppError::field(
        "username",
        ErrorCode::UsernameExists,
        format!("Username '{username}' is already taken"),
    )
    .into()
}

/// Verify credentials and issue a token
pub async fn login(
    pool: &SqlitePool,
    jwt: &JwtService,
    req: LoginRequest,
) -> ServiceResult<LoginResponse> {
    let found = user::find_by_username(pool, req.username.trim()).await?;
    let Some(found) = found.filter(|u| verify_password(&req.password, &u.hashed_password)) else {
        tracing::warn!(username = %req.username, "Login failed");
        return Err(AppError::invalid_credentials().into());
    };

    let token = jwt
        .generate_token(found.id, &found.username, found.is_staff)
        .map_err(|e| {
            tracing::error!(error = %e, "JWT creation failed");
            AppError::internal("Token creation failed")
        })?;

    tracing::info!(user_id = found.id, "User logged in");
    Ok(LoginResponse {
        token,
        user_id: found.id,
        username: found.username,
        is_staff: found.is_staff,
    })
}
