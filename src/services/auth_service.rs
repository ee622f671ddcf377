use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::auth::{AuthResponse, Claims, LoginRequest, LogoutResponse, RegisterRequest, SessionView},
    entity::profiles::{ActiveModel as ProfileActive, Column as ProfileCol, Entity as Profiles, Model as ProfileModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Profile, Role},
    navigation::{LANDING_PATH, home_path},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn issue_token(user_id: Uuid, role: Role, secret: &str, ttl_hours: i64) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let payload = payload.normalized();
    payload.validate()?;
    if payload.role == Role::Admin {
        return Err(AppError::BadRequest("Admin accounts cannot sign up".into()));
    }

    let exist = Profiles::find()
        .filter(ProfileCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let profile = ProfileActive {
        id: Set(Uuid::new_v4()),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        name: Set(payload.name),
        role: Set(payload.role),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = %profile.id, role = %profile.role, "profile registered");
    audit::record(
        &state.pool,
        Some(profile.id),
        "user_register",
        "profiles",
        serde_json::json!({ "user_id": profile.id, "role": profile.role.as_ref() }),
    )
    .await;

    let resp = authenticated(state, profile)?;
    Ok(ApiResponse::item("User created", resp))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim().to_lowercase();
    let profile = Profiles::find()
        .filter(ProfileCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;

    let profile = match profile {
        Some(p) => p,
        None => return Err(AppError::BadRequest("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&profile.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    audit::record(
        &state.pool,
        Some(profile.id),
        "user_login",
        "profiles",
        serde_json::json!({ "user_id": profile.id }),
    )
    .await;

    let resp = authenticated(state, profile)?;
    Ok(ApiResponse::item("Logged in", resp))
}

pub async fn current_session(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<SessionView>> {
    let profile = Profiles::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Profile no longer exists".into()))?;

    let view = SessionView {
        redirect_to: home_path(Some(profile.role)).to_string(),
        profile: profile_from_entity(profile),
    };
    Ok(ApiResponse::item("Session", view))
}

/// Tokens are stateless; sign-out only records the event and tells the client where to go.
pub async fn logout_user(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<LogoutResponse>> {
    audit::record(
        &state.pool,
        Some(user.user_id),
        "user_logout",
        "profiles",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged out",
        LogoutResponse {
            redirect_to: LANDING_PATH.to_string(),
        },
        Some(Meta::empty()),
    ))
}

fn authenticated(state: &AppState, profile: ProfileModel) -> AppResult<AuthResponse> {
    let token = issue_token(
        profile.id,
        profile.role,
        &state.config.jwt_secret,
        state.config.jwt_ttl_hours,
    )?;
    Ok(AuthResponse {
        token: format!("Bearer {}", token),
        redirect_to: home_path(Some(profile.role)).to_string(),
        profile: profile_from_entity(profile),
    })
}

pub(crate) fn profile_from_entity(model: ProfileModel) -> Profile {
    Profile {
        id: model.id,
        email: model.email,
        name: model.name,
        role: model.role,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
