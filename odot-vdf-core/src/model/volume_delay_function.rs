use crate::model::VdfInput;

/// a volume-delay function as the host assignment sees it.
///
/// `calc` must be pure: the host calls it concurrently and in tight loops,
/// so implementations should not allocate or hold state between calls.
/// the derivative and integral default to zero, which tells the host to
/// fall back to numerical differentiation and integration.
pub trait VolumeDelayFunction {
    fn name(&self) -> &'static str;

    /// current travel time in seconds
    fn calc(&self, input: &VdfInput) -> f64;

    /// derivative of the travel time with respect to volume
    fn calc_derivative(&self, _input: &VdfInput) -> f64 {
        0.0
    }

    /// integral of the travel time from zero to the current PCU volume
    fn calc_integral(&self, _input: &VdfInput) -> f64 {
        0.0
    }
}
