//! Profile persistence actions.
//!
//! The gateway between validated user input and the hosted services.
//! Every operation requires an authenticated principal and validates
//! its input before touching the repository or the object store; a
//! request that fails validation makes no external call at all.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use visage_core::{
    avatar_path, file_extension, validate_upload, ActionError, ActionResult, DisplayName, Profile,
    UserId,
};

use crate::auth::CurrentUser;
use crate::cache::RenderCache;
use crate::db::ProfileRepository;
use crate::storage::ObjectStore;

/// One candidate avatar file as extracted from the upload form.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// The profile persistence gateway.
pub struct ProfileActions {
    repository: Arc<dyn ProfileRepository>,
    store: Arc<dyn ObjectStore>,
    cache: RenderCache,
}

impl ProfileActions {
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        store: Arc<dyn ObjectStore>,
        cache: RenderCache,
    ) -> Self {
        Self {
            repository,
            store,
            cache,
        }
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Row-scoped profile read for page rendering. Failures are
    /// logged and rendered as "not found", never propagated.
    pub async fn get_profile(&self, id: UserId) -> Option<Profile> {
        match self.repository.get(id).await {
            Ok(profile) => profile,
            Err(err) => {
                error!("error fetching profile: {err}");
                None
            }
        }
    }

    /// Validate and persist a new display name.
    ///
    /// Empty or overlong names are rejected before any database call.
    pub async fn update_name(&self, user: &CurrentUser, raw: &str) -> ActionResult<DisplayName> {
        let name = DisplayName::parse(raw)?;

        self.repository
            .update_name(user.id, name.as_str())
            .await
            .map_err(|err| {
                error!("error updating profile: {err}");
                ActionError::UpdateFailed
            })?;

        self.cache.invalidate(user.id).await;
        info!(user = %user.id, "profile name updated");
        Ok(name)
    }

    /// Validate, upload, and record a new avatar.
    ///
    /// The object is written to the canonical per-user path with
    /// overwrite semantics, then its public URL is stored on the
    /// profile row. Returns the public URL.
    pub async fn update_avatar(
        &self,
        user: &CurrentUser,
        upload: AvatarUpload,
    ) -> ActionResult<String> {
        validate_upload(&upload.content_type, upload.bytes.len())?;

        let extension = file_extension(&upload.filename);
        let path = avatar_path(user.id, extension);
        debug!(user = %user.id, %path, "uploading avatar");

        self.store
            .upload(&path, upload.bytes, &upload.content_type, true)
            .await
            .map_err(|err| {
                error!("error uploading avatar: {err}");
                ActionError::UploadFailed
            })?;

        let public_url = self.store.public_url(&path);

        if let Err(err) = self.repository.update_avatar_url(user.id, &public_url).await {
            // The object is uploaded but the profile row still points
            // at the previous URL. No compensating delete or retry;
            // reconciliation is a product decision.
            warn!(user = %user.id, %path, "avatar uploaded but URL write failed: {err}");
            return Err(ActionError::UpdateFailed);
        }

        self.cache.invalidate(user.id).await;
        info!(user = %user.id, %path, "avatar updated");
        Ok(public_url)
    }
}
