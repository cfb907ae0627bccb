//! Route table and handlers for the Visage web surface.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use visage_core::validate_upload;
use visage_image::ResizeOptions;

use crate::actions::AvatarUpload;
use crate::auth::{CurrentUser, SessionUser};
use crate::state::AppState;

/// Action result rendered inline by the form: exactly one of the two
/// messages is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProfileFormState {
    fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
        }
    }
}

/// Build the main router for the gateway
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/login", get(login_page))
        .route("/dashboard", get(dashboard_page))
        .route("/profile", get(profile_page).post(update_name))
        .route("/profile/avatar", post(update_avatar))
        // Oversized files must reach the validator so the form gets its
        // size message back, not a transport-level rejection.
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Public login entry point.
async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><title>Sign in</title>\
         <h1>Sign in</h1>\
         <p>Use your account to continue to Visage.</p>",
    )
}

/// Protected dashboard page, served through the render cache.
async fn dashboard_page(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Html<String> {
    if let Some(cached) = state.actions.cache().get(user.id, "/dashboard").await {
        return Html(cached);
    }

    let rendered = format!(
        "<!doctype html><title>Dashboard</title>\
         <h1>Dashboard</h1>\
         <p>Signed in as {}</p>",
        escape(&user.email)
    );
    state
        .actions
        .cache()
        .insert(user.id, "/dashboard", rendered.clone())
        .await;
    Html(rendered)
}

/// Protected profile settings page.
///
/// An authenticated user without a profile row gets a terminal
/// contact-support page rather than a crash.
async fn profile_page(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Html<String> {
    if let Some(cached) = state.actions.cache().get(user.id, "/profile").await {
        return Html(cached);
    }

    let Some(profile) = state.actions.get_profile(user.id).await else {
        return Html(format!(
            "<!doctype html><title>Profile</title><p>{}</p>",
            visage_core::ActionError::ProfileMissing
        ));
    };

    let avatar = profile
        .avatar_url
        .as_deref()
        .map(|url| format!("<img src=\"{}\" alt=\"Avatar\">", escape(url)))
        .unwrap_or_default();
    let rendered = format!(
        "<!doctype html><title>Profile Settings</title>\
         <h1>Profile Settings</h1>\
         {avatar}\
         <form method=\"post\" action=\"/profile\">\
         <label for=\"full_name\">Full Name</label>\
         <input type=\"text\" name=\"full_name\" id=\"full_name\" value=\"{name}\" required>\
         <label for=\"email\">Email</label>\
         <input type=\"email\" name=\"email\" id=\"email\" value=\"{email}\" disabled>\
         <p>Email cannot be changed</p>\
         <button type=\"submit\">Save Changes</button>\
         </form>",
        name = escape(profile.full_name.as_deref().unwrap_or("")),
        email = escape(&profile.email),
    );
    state
        .actions
        .cache()
        .insert(user.id, "/profile", rendered.clone())
        .await;
    Html(rendered)
}

#[derive(Debug, Deserialize)]
struct NameForm {
    #[serde(default)]
    full_name: String,
}

/// Display-name update action.
async fn update_name(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<NameForm>,
) -> Json<ProfileFormState> {
    match state.actions.update_name(&user, &form.full_name).await {
        Ok(_) => Json(ProfileFormState::success("Profile updated successfully!")),
        Err(err) => Json(ProfileFormState::error(err.to_string())),
    }
}

/// Avatar update action.
///
/// The file field is named `avatar`. Validation runs on the file as
/// uploaded; the downscale pipeline then runs best-effort before the
/// object is stored.
async fn update_avatar(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Json<ProfileFormState> {
    let mut upload: Option<AvatarUpload> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("avatar") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some(AvatarUpload {
                            filename,
                            content_type,
                            bytes,
                        });
                    }
                    Err(err) => {
                        tracing::error!("error reading avatar field: {err}");
                        return Json(ProfileFormState::error("An unexpected error occurred"));
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(err) => {
                tracing::error!("error reading upload form: {err}");
                return Json(ProfileFormState::error("An unexpected error occurred"));
            }
        }
    }

    let Some(upload) = upload else {
        return Json(ProfileFormState::error("No file selected"));
    };

    // Validate the file as selected, before any processing; an invalid
    // file must not reach the pipeline or the store.
    if let Err(err) = validate_upload(&upload.content_type, upload.bytes.len()) {
        return Json(ProfileFormState::error(err.to_string()));
    }

    let processed = visage_image::preprocess(&upload.bytes, &upload.content_type, ResizeOptions::AVATAR);
    let upload = AvatarUpload {
        // Extension (and so the canonical path) follows the uploaded
        // filename even when the bytes were re-encoded.
        filename: upload.filename,
        content_type: processed.content_type,
        bytes: Bytes::from(processed.bytes),
    };

    match state.actions.update_avatar(&user, upload).await {
        Ok(_) => Json(ProfileFormState::success("Avatar updated successfully!")),
        Err(err) => Json(ProfileFormState::error(err.to_string())),
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
