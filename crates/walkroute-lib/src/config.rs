use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default spacing between interpolated points when smoothing a route.
pub const DEFAULT_SMOOTHING_STEP_M: f64 = 5.0;

/// Snapping farther than this from the network is logged as a warning.
pub const DEFAULT_MAX_SNAP_DISTANCE_M: f64 = 500.0;

/// Tunables for [`crate::PathFinder`].
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Step in metres used by [`crate::smooth_path`] callers.
    pub smoothing_step_m: f64,
    /// Snap endpoints through a KD-tree instead of a linear scan.
    pub use_spatial_index: bool,
    /// Distance in metres past which a snap is reported with `warn!`.
    pub max_snap_distance_m: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            smoothing_step_m: DEFAULT_SMOOTHING_STEP_M,
            use_spatial_index: false,
            max_snap_distance_m: DEFAULT_MAX_SNAP_DISTANCE_M,
        }
    }
}

impl RouterConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RouterConfig = serde_json::from_str(r#"{ "use_spatial_index": true }"#).unwrap();
        assert!(config.use_spatial_index);
        assert_eq!(config.smoothing_step_m, DEFAULT_SMOOTHING_STEP_M);
        assert_eq!(config.max_snap_distance_m, DEFAULT_MAX_SNAP_DISTANCE_M);
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            RouterConfig::load(&missing),
            Err(Error::ConfigNotFound { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ smoothing_step_m: ").unwrap();
        assert!(matches!(
            RouterConfig::load(&broken),
            Err(Error::ConfigParse { .. })
        ));

        let good = dir.path().join("router.json");
        fs::write(&good, r#"{ "smoothing_step_m": 2.5 }"#).unwrap();
        assert_eq!(RouterConfig::load(&good).unwrap().smoothing_step_m, 2.5);
    }
}
