use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use odot_vdf_core::model::{preparation::PreparationConfig, CurveParameters};
use serde::{Deserialize, Serialize};

use crate::app::VdfAppError;

/// the configuration used when no file is provided, and the base layer
/// beneath any file that is.
pub const DEFAULT_CONFIG: &str = include_str!("../util/odot-vdf-config.toml");

/// prefix of environment variables overriding configuration keys. nested
/// keys are separated by a double underscore.
pub const ENV_PREFIX: &str = "ODOT_VDF";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct VdfAppConfig {
    pub preparation: PreparationConfig,
    pub curves: CurveConfig,
}

/// the shape coefficients of the two BPR terms.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CurveCoefficients {
    pub a: f64,
    pub b: f64,
    pub a2: f64,
    pub b2: f64,
}

impl Default for CurveCoefficients {
    fn default() -> Self {
        CurveCoefficients {
            a: 0.15,
            b: 4.0,
            a2: 0.15,
            b2: 4.0,
        }
    }
}

impl From<CurveCoefficients> for CurveParameters {
    fn from(value: CurveCoefficients) -> Self {
        CurveParameters::bpr(value.a, value.b, value.a2, value.b2)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FacilityClassCurve {
    pub facility_class: u32,
    pub a: f64,
    pub b: f64,
    pub a2: f64,
    pub b2: f64,
}

/// curve coefficients by facility class, as the host assigns them by link
/// type.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct CurveConfig {
    pub default: CurveCoefficients,
    pub facility_classes: Vec<FacilityClassCurve>,
}

impl CurveConfig {
    /// coefficients for a facility class, falling back to the defaults
    pub fn coefficients(&self, facility_class: u32) -> CurveCoefficients {
        self.facility_classes
            .iter()
            .find(|c| c.facility_class == facility_class)
            .map(|c| CurveCoefficients {
                a: c.a,
                b: c.b,
                a2: c.a2,
                b2: c.b2,
            })
            .unwrap_or(self.default)
    }
}

impl VdfAppConfig {
    /// loads the configuration, layering the default TOML, then the
    /// optional user file, then `ODOT_VDF_*` environment variables.
    pub fn load(configuration_file: Option<&Path>) -> Result<VdfAppConfig, VdfAppError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(path) = configuration_file {
            if !path.is_file() {
                return Err(VdfAppError::ReadError {
                    path: path.to_path_buf(),
                    message: "configuration file does not exist".to_string(),
                });
            }
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                let source = configuration_file
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| String::from("<default>"));
                VdfAppError::ConfigurationError(format!("file '{source}' produced error: {e}"))
            })?;
        let app_config = config.try_deserialize::<VdfAppConfig>().map_err(|e| {
            VdfAppError::ConfigurationError(format!("failure reading configuration: {e}"))
        })?;
        log::debug!(
            "loaded configuration with {} facility classes and {} curve overrides",
            app_config.preparation.facility_classes.len(),
            app_config.curves.facility_classes.len()
        );
        Ok(app_config)
    }

    pub fn to_toml(&self) -> Result<String, VdfAppError> {
        toml::to_string_pretty(self).map_err(|e| {
            VdfAppError::ConfigurationError(format!("failure serializing configuration: {e}"))
        })
    }
}
