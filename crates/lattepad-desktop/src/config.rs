use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use specta::Type;

use lattepad_render::client::DEFAULT_ENDPOINT;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LattepadConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Generate endpoint of the rendering service.
    pub endpoint: String,
    /// Global timeout for one render request. Added in v1; absent means the
    /// client waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    pub created_at: jiff::Timestamp,
}

impl LattepadConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for LattepadConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

/// Endpoint settings as the frontend sees them.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct EndpointInfo {
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
}

pub fn endpoint_info(config: &LattepadConfig) -> EndpointInfo {
    EndpointInfo {
        endpoint: config.endpoint.clone(),
        timeout_secs: config.timeout_secs,
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.lattepad.desktop"))
}

fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<LattepadConfig> {
    let path = config_path()?;
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: LattepadConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// The active config: what's on disk, or the built-in default when nothing
/// has been saved yet (or the file cannot be read).
pub fn load_or_default() -> LattepadConfig {
    if !has_config() {
        return LattepadConfig::default();
    }
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("ignoring unreadable config: {e}");
            LattepadConfig::default()
        }
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update LattePad."
        ));
    }

    // v0 → v1: add timeout_secs (null = wait indefinitely)
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("timeout_secs").or_insert(serde_json::Value::Null);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added timeout_secs)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(config: &LattepadConfig) -> eyre::Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config() -> eyre::Result<()> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_config_points_at_the_public_endpoint() {
        let config = LattepadConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.config_version, CURRENT_VERSION);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn v0_config_gains_timeout_field() {
        let v0 = json!({
            "endpoint": "http://render.internal/generate",
            "created_at": "2024-01-01T00:00:00Z",
        });

        let migrated = migrate(v0, 0).unwrap();
        assert_eq!(migrated["config_version"], 1);
        assert!(migrated["timeout_secs"].is_null());

        let config: LattepadConfig = serde_json::from_value(migrated).unwrap();
        assert_eq!(config.endpoint, "http://render.internal/generate");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn current_version_passes_through_unchanged() {
        let v1 = json!({
            "config_version": 1,
            "endpoint": "http://render.internal/generate",
            "timeout_secs": 30,
            "created_at": "2024-01-01T00:00:00Z",
        });

        let migrated = migrate(v1.clone(), 1).unwrap();
        assert_eq!(migrated, v1);

        let config: LattepadConfig = serde_json::from_value(migrated).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn newer_config_versions_are_rejected() {
        let future = json!({
            "config_version": 99,
            "endpoint": "http://render.internal/generate",
            "created_at": "2024-01-01T00:00:00Z",
        });

        assert!(migrate(future, 99).is_err());
    }
}
