use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    profiles::{
        dto::{CreateProfileRequest, UpdateProfileRequest},
        repo,
        repo_types::{NewProfile, Profile, ProfileChanges},
    },
    state::AppState,
    validation::check_exp,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/show_all_profile", get(list_profiles))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/add_profile", post(create_profile))
        .route("/add_newprofile", post(create_profile))
        .route(
            "/update_profile/:id",
            put(update_profile).patch(update_profile),
        )
}

#[instrument(skip(state, body))]
pub async fn create_profile(
    State(state): State<AppState>,
    Json(body): Json<CreateProfileRequest>,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    if let Err(e) = check_exp(body.exp.as_deref()) {
        warn!("profile exp too long");
        return Err(e.into());
    }

    let new = NewProfile::from(body);
    let profile = repo::insert(&state.db, &new).await.map_err(internal)?;

    info!(profile_id = profile.id, user_id = ?profile.user_id, "profile created");
    Ok((StatusCode::CREATED, "profile is created"))
}

#[instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Profile>>, (StatusCode, String)> {
    let profiles = repo::list_all(&state.db).await.map_err(internal)?;
    Ok(Json(profiles))
}

#[instrument(skip(state, body))]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    if repo::find_by_id(&state.db, id).await.map_err(internal)?.is_none() {
        warn!(profile_id = id, "profile not found");
        return Err((StatusCode::NOT_FOUND, "Profile not found".into()));
    }

    if let Err(e) = check_exp(Some(body.exp.as_str())) {
        warn!(profile_id = id, "profile exp too long");
        return Err(e.into());
    }

    let changes = ProfileChanges::from(body);
    match repo::update(&state.db, id, &changes).await.map_err(internal)? {
        Some(p) => {
            info!(profile_id = p.id, user_id = ?p.user_id, "profile updated");
            Ok((StatusCode::OK, "Profile updated"))
        }
        None => {
            warn!(profile_id = id, "profile vanished before update");
            Err((StatusCode::NOT_FOUND, "Profile not found".into()))
        }
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    let msg = format!("{e:#}");
    error!(error = %msg, "profile store failure");
    (StatusCode::INTERNAL_SERVER_ERROR, msg)
}
