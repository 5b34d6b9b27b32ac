mod app_config;
pub mod curve;
pub mod evaluate;
pub mod prepare;
mod vdf_app;
mod vdf_app_error;

pub use app_config::{CurveConfig, CurveCoefficients, FacilityClassCurve, VdfAppConfig};
pub use vdf_app::{VdfApp, VdfOperation};
pub use vdf_app_error::VdfAppError;
