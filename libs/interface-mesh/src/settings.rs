//! # Interface Configuration
//!
//! JSON configuration of one interface, as handed over by the case setup.
//!
//! ```json
//! {
//!   "interface": {
//!     "general": { "inputProfile": "rotor.txt", "type": "profile" },
//!     "properties": {
//!       "maxEdgeLength": 0.05,
//!       "center": [0.0, 0.0, 0.0],
//!       "axis": [1.0, 0.0, 0.0],
//!       "refinementFactor": 1.0,
//!       "frontFixedDistributionLayers": 1,
//!       "backFixedDistributionLayers": 1
//!     },
//!     "spacing": {
//!       "profileSegments": {
//!         "1": { "cellType": "quad", "stretching": [0.01, 1.2, 0.01, 1.2, 0.05] }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! The `interface` wrapper is optional. Only `general.inputProfile` is
//! required; everything else has a default.

use crate::error::{InterfaceError, Result};
use crate::spacing::SpacingOverride;
use crate::transform::Placement;
use config::constants::{
    RevolveSettings, DEFAULT_AXIS, DEFAULT_CENTER, DEFAULT_FIXED_LAYERS, DEFAULT_MAX_EDGE_LENGTH,
    DEFAULT_REFINEMENT_FACTOR,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Interface shape requested by the case setup. Only surfaces of revolution
/// of a meridional profile are generated; other `type` values fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    #[default]
    Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub input_profile: PathBuf,
    #[serde(rename = "type", default)]
    pub kind: InterfaceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertySettings {
    pub max_edge_length: f64,
    pub center: [f64; 3],
    pub axis: [f64; 3],
    pub refinement_factor: f64,
    pub front_fixed_distribution_layers: usize,
    pub back_fixed_distribution_layers: usize,
}

impl Default for PropertySettings {
    fn default() -> Self {
        Self {
            max_edge_length: DEFAULT_MAX_EDGE_LENGTH,
            center: DEFAULT_CENTER,
            axis: DEFAULT_AXIS,
            refinement_factor: DEFAULT_REFINEMENT_FACTOR,
            front_fixed_distribution_layers: DEFAULT_FIXED_LAYERS,
            back_fixed_distribution_layers: DEFAULT_FIXED_LAYERS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingSettings {
    /// Overrides keyed by segment index.
    pub profile_segments: BTreeMap<String, SpacingOverride>,
}

/// Configuration of one interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceConfig {
    pub general: GeneralSettings,
    #[serde(default)]
    pub properties: PropertySettings,
    #[serde(default)]
    pub spacing: SpacingSettings,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    Wrapped { interface: InterfaceConfig },
    Bare(InterfaceConfig),
}

impl InterfaceConfig {
    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// - `Json` if the document does not match the schema, including an
    ///   unsupported interface `type`
    /// - `InvalidConfig` if a value is out of range
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config = match serde_json::from_str::<ConfigDocument>(text)? {
            ConfigDocument::Wrapped { interface } => interface,
            ConfigDocument::Bare(config) => config,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file. A relative `inputProfile` is resolved
    /// against the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| InterfaceError::io(path, e))?;
        let mut config = Self::from_json_str(&text)?;

        if config.general.input_profile.is_relative() {
            if let Some(dir) = path.parent() {
                config.general.input_profile = dir.join(&config.general.input_profile);
            }
        }
        tracing::debug!(
            config = %path.display(),
            profile = %config.general.input_profile.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Rejects out-of-range properties.
    pub fn validate(&self) -> Result<()> {
        self.revolve_settings()?;
        self.placement()?;
        Ok(())
    }

    /// Revolver settings snapshot.
    pub fn revolve_settings(&self) -> Result<RevolveSettings> {
        let p = &self.properties;
        Ok(RevolveSettings::new(
            p.max_edge_length,
            p.refinement_factor,
            p.front_fixed_distribution_layers,
            p.back_fixed_distribution_layers,
        )?)
    }

    /// Placement of the generated interface.
    pub fn placement(&self) -> Result<Placement> {
        Placement::new(
            DVec3::from_array(self.properties.axis),
            DVec3::from_array(self.properties.center),
        )
    }
}
