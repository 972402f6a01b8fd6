use tracing::{info, warn};

use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::store::artifact::Artifact;
use crate::store::object::ObjectStore;

/// Who an artifact belongs to; forms the storage key prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactOwner {
    pub user_id: String,
    pub app_id: String,
}

impl ArtifactOwner {
    pub fn new(user_id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            app_id: app_id.into(),
        }
    }
}

/// Storage key: `users/{user}/app/{app}/{creatives|animations}/{file}`.
pub fn artifact_key(owner: &ArtifactOwner, artifact: &Artifact) -> AdcraftResult<String> {
    for (what, id) in [("user id", &owner.user_id), ("app id", &owner.app_id)] {
        if id.is_empty() || id.contains('/') || id == ".." {
            return Err(AdcraftError::validation(format!("invalid {what} \"{id}\"")));
        }
    }
    let file = artifact
        .file_name()
        .ok_or_else(|| AdcraftError::validation("artifact has no file name"))?;
    Ok(format!(
        "users/{}/app/{}/{}/{file}",
        owner.user_id,
        owner.app_id,
        artifact.kind.folder()
    ))
}

/// Uploads staged artifacts and removes the local copy once the upload is confirmed.
#[derive(Clone, Debug)]
pub struct ArtifactStore<S> {
    store: S,
}

impl<S: ObjectStore> ArtifactStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn object_store(&self) -> &S {
        &self.store
    }

    /// Upload `artifact` and return it with `remote_url` set.
    ///
    /// On failure the staged file is left in place and the error is `Upload` carrying the
    /// artifact; passing it back to `persist` retries.
    #[tracing::instrument(skip_all, fields(file = ?artifact.file_name()))]
    pub async fn persist(&self, artifact: Artifact, owner: &ArtifactOwner) -> AdcraftResult<Artifact> {
        if artifact.is_uploaded() {
            return Ok(artifact);
        }
        let key = artifact_key(owner, &artifact)?;
        let bytes = tokio::fs::read(&artifact.local_path).await.map_err(|e| {
            AdcraftError::upload(format!(
                "read staged artifact '{}': {e}",
                artifact.local_path.display()
            ))
            .with_staged(&artifact)
        })?;
        let size = bytes.len();

        let url = self
            .store
            .put_public(&key, bytes, artifact.format.content_type())
            .await
            .map_err(|e| {
                match e {
                    AdcraftError::Upload { .. } => e,
                    other => AdcraftError::upload(other.to_string()),
                }
                .with_staged(&artifact)
            })?;

        if let Err(e) = tokio::fs::remove_file(&artifact.local_path).await {
            warn!(path = %artifact.local_path.display(), error = %e, "uploaded artifact could not be removed locally");
        }
        info!(%key, %url, bytes = size, "artifact uploaded");
        Ok(Artifact {
            remote_url: Some(url),
            ..artifact
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/persist.rs"]
mod tests;
