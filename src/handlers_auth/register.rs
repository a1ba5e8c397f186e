use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::auth::passwords::hash_password;
use crate::auth::random_hex;
use crate::http_error::{FieldError, internal_error, invalid_json, validation_failed};
use crate::store::{now_ts, persist_identities};
use crate::types::{AppState, Profile, User};
use crate::validators::{password_issues, validate_username};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    username: String,
    password: String,

    #[serde(default)]
    first_name: Option<String>,

    #[serde(default)]
    last_name: Option<String>,

    #[serde(default)]
    date_of_birth: Option<String>,

    #[serde(default)]
    address: Option<String>,
}

pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, Response> {
    let Json(payload) = payload.map_err(invalid_json)?;

    let mut fields = Vec::new();
    if let Err(err) = validate_username(&payload.username) {
        fields.push(FieldError {
            field: "username",
            message: err.to_string(),
        });
    }
    for issue in password_issues(&payload.password) {
        fields.push(FieldError {
            field: "password",
            message: issue,
        });
    }
    if !fields.is_empty() {
        return Err(validation_failed(fields));
    }

    let password_hash = hash_password(&payload.password).map_err(internal_error)?;
    let created_at = now_ts();
    let user_id = random_hex().map_err(internal_error)?;

    let user = User {
        id: user_id.clone(),
        username: payload.username.clone(),
        password_hash,
        created_at: created_at.clone(),
    };
    let profile = Profile {
        user_id: user_id.clone(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        date_of_birth: payload.date_of_birth,
        address: payload.address,
        created_at,
    };

    // Identity and profile are created in one scope under the write locks and
    // persisted together; a failed persist rolls both back so no orphaned
    // identity survives.
    let mut users = state.users.write().await;
    let mut profiles = state.profiles.write().await;

    if users.values().any(|u| u.username == payload.username) {
        return Err(validation_failed(vec![FieldError {
            field: "username",
            message: "username already taken".to_string(),
        }]));
    }

    users.insert(user_id.clone(), user);
    profiles.insert(user_id.clone(), profile);

    if let Err(err) = persist_identities(&state.data_dir, &users, &profiles) {
        users.remove(&user_id);
        profiles.remove(&user_id);
        return Err(internal_error(err));
    }

    tracing::info!(username = %payload.username, "user registered");
    Ok(Json(
        serde_json::json!({"message": "user registered successfully"}),
    ))
}
