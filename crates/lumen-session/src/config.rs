use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lumen_core::Pipeline;
use lumen_core::capability::NativeCapability;
use lumen_core::pipeline::modules::DEFAULT_GRAIN_SEED;

use crate::error::{Result, SessionError};

/// What the scheduler does with a trigger that arrives mid-run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Discard it. The final parameter set is not guaranteed to be rendered
    /// if changes keep arriving faster than runs complete.
    #[default]
    DropWhileBusy,
    /// Remember that something changed and run once more with the latest
    /// parameters when the active run finishes.
    QueueLatest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle time after the last control change before a run is triggered.
    pub quiescence_ms: u64,
    pub trigger_policy: TriggerPolicy,
    pub grain_seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quiescence_ms: 50,
            trigger_policy: TriggerPolicy::default(),
            grain_seed: DEFAULT_GRAIN_SEED,
        }
    }
}

impl SessionConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| SessionError::Config {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|err| SessionError::Config {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    pub fn quiescence(&self) -> Duration {
        Duration::from_millis(self.quiescence_ms)
    }

    /// Native CPU pipeline configured from this config.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::native(NativeCapability::with_grain_seed(self.grain_seed))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.quiescence(), Duration::from_millis(50));
        assert_eq!(config.trigger_policy, TriggerPolicy::DropWhileBusy);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"trigger_policy": "queue_latest"}}"#).unwrap();
        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.trigger_policy, TriggerPolicy::QueueLatest);
        assert_eq!(config.quiescence_ms, 50);
        assert_eq!(config.grain_seed, DEFAULT_GRAIN_SEED);
    }

    #[test]
    fn full_file_roundtrip() {
        let config = SessionConfig {
            quiescence_ms: 15,
            trigger_policy: TriggerPolicy::QueueLatest,
            grain_seed: 99,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(SessionConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn bad_policy_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"trigger_policy": "whenever"}}"#).unwrap();
        let err = SessionConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SessionError::Config { .. }));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SessionError::Config { .. }));
    }
}
