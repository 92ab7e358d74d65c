use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{ChangePasswordRequest, LoginRequest, RegisterRequest, DEFAULT_ROLE},
        password::{hash_password, verify_password, PasswordScheme},
        repo_types::User,
    },
    state::AppState,
    validation::{check_new_password, check_username},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/change_password/:id", post(change_password))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    if let Err(e) = check_username(&payload.username) {
        warn!(chars = payload.username.chars().count(), "username too long");
        return Err(e.into());
    }

    let role = payload.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());

    let hash = match hash_password(state.config.password_scheme, &payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    // uniqueness is left to the store; a duplicate surfaces as a 500
    let user = match User::create(&state.db, &payload.username, &hash, &role).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, username = %payload.username, "create user failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    info!(user_id = user.id, username = %user.username, role = %user.role, "user registered");
    Ok((StatusCode::CREATED, "user is created"))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    let user = match User::find_by_username(&state.db, &payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(username = %payload.username, "login unknown username");
            return Err((StatusCode::NOT_FOUND, "User not found".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let ok = match verify_password(&payload.password, &user.password) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = user.id, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Incorrect Password".into()));
    }

    // hashes are never migrated on login; just surface rows still on another scheme
    if let Ok(stored) = PasswordScheme::of(&user.password) {
        if stored != state.config.password_scheme {
            info!(user_id = user.id, ?stored, active = ?state.config.password_scheme, "password hash on non-active scheme");
        }
    }

    info!(user_id = user.id, "user logged in");
    Ok((StatusCode::OK, "Login Success"))
}

/// Guards run in order: length policy, user lookup, old-password check.
/// Nothing is written unless all three pass.
#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    if let Err(e) = check_new_password(&payload.new_pass) {
        warn!(user_id = id, "new password too short");
        return Err(e.into());
    }

    let user = match User::find_by_id(&state.db, id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = id, "change_password unknown user");
            return Err((StatusCode::NOT_FOUND, "User not found".into()));
        }
        Err(e) => {
            error!(error = %e, user_id = id, "find_by_id failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    match verify_password(&payload.old_pass, &user.password) {
        Ok(true) => {}
        Ok(false) => {
            warn!(user_id = id, "old password mismatch");
            return Err((StatusCode::UNAUTHORIZED, "Old password is incorrect".into()));
        }
        Err(e) => {
            error!(error = %e, user_id = id, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    }

    let hash = hash_password(state.config.password_scheme, &payload.new_pass)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match User::update_password(&state.db, id, &hash).await {
        Ok(true) => {}
        Ok(false) => {
            warn!(user_id = id, "user vanished before password update");
            return Err((StatusCode::NOT_FOUND, "User not found".into()));
        }
        Err(e) => {
            error!(error = %e, user_id = id, "update_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    }

    info!(user_id = id, scheme = ?state.config.password_scheme, "password changed");
    Ok((StatusCode::OK, "password change successfully"))
}
