//! Container engine boundary.
//!
//! The inventory only needs three engine calls: list every volume, prune
//! unused volumes, and remove one volume by name. [`EngineClient`] captures
//! exactly that; [`DockerCli`] implements it on top of the `docker` binary.

mod docker;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use voltrack_shared::errors::VoltrackResult;

pub use docker::DockerCli;

/// Engine-side descriptor of one volume.
///
/// Deserializes from `docker volume inspect` output; listing builds it from
/// the flatter `volume ls` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeRecord {
    pub name: String,

    pub driver: String,

    /// Host path where the volume's contents live.
    pub mountpoint: String,

    #[serde(default)]
    pub created_at: Option<String>,

    /// `local` or `global`.
    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,

    /// Driver options.
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: HashMap<String, String>,
}

impl VolumeRecord {
    /// Minimal record with no labels, options, or timestamps.
    pub fn new(
        name: impl Into<String>,
        driver: impl Into<String>,
        mountpoint: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            mountpoint: mountpoint.into(),
            created_at: None,
            scope: None,
            labels: HashMap::new(),
            options: HashMap::new(),
        }
    }
}

// docker emits `"Labels": null` for volumes created without labels.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Remote operations on the container engine's volumes.
///
/// Each method is a single opaque call; implementations do not retry.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// List all volumes, unfiltered.
    async fn list_volumes(&self) -> VoltrackResult<Vec<VolumeRecord>>;

    /// Remove all unused volumes, unfiltered.
    async fn prune_volumes(&self) -> VoltrackResult<()>;

    /// Remove the volume called `name`. `force` removes it even if in use.
    async fn remove_volume(&self, name: &str, force: bool) -> VoltrackResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_inspect_output() {
        let json = r#"{
            "CreatedAt": "2026-01-22T15:04:05Z",
            "Driver": "local",
            "Labels": {"com.docker.compose.project": "web"},
            "Mountpoint": "/var/lib/docker/volumes/web_data/_data",
            "Name": "web_data",
            "Options": null,
            "Scope": "local"
        }"#;

        let record: VolumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "web_data");
        assert_eq!(record.driver, "local");
        assert_eq!(record.mountpoint, "/var/lib/docker/volumes/web_data/_data");
        assert_eq!(record.scope.as_deref(), Some("local"));
        assert_eq!(record.labels["com.docker.compose.project"], "web");
        assert!(record.options.is_empty());
    }

    #[test]
    fn test_record_null_labels() {
        let json = r#"{"Driver":"local","Labels":null,"Mountpoint":"/mnt/v","Name":"v"}"#;

        let record: VolumeRecord = serde_json::from_str(json).unwrap();
        assert!(record.labels.is_empty());
        assert!(record.created_at.is_none());
    }
}
