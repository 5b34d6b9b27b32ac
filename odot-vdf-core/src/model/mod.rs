mod host_language;
pub mod metadata;
mod odot_vdf;
pub mod preparation;
mod vdf_input;
mod volume_delay_function;

pub use host_language::HostLanguage;
pub use metadata::VdfMetadata;
pub use odot_vdf::{
    congestion_adjustment, mid_link_time, signal_delay, OdotVdf, IMPASSABLE_TIME,
    SIGNAL_DELAY_SCALE,
};
pub use vdf_input::{CurveParameters, LinkState, TrafficVolume, UserValues, VdfInput};
pub use volume_delay_function::VolumeDelayFunction;
