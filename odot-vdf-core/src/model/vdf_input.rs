use serde::{Deserialize, Serialize};

use crate::model::SIGNAL_DELAY_SCALE;

/// static attributes of the link, turn, connector or node being evaluated.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct LinkState {
    /// link type number
    pub link_type: i32,
    pub num_lanes: i32,
    pub length: f64,
    /// capacity in PCU as supplied by the host. unused by the ODOT curve,
    /// which reads its capacities from the user values.
    pub capacity: f64,
    /// free-flow speed (v0)
    pub free_flow_speed: f64,
    /// free-flow travel time (t0) in seconds
    pub free_flow_time: f64,
    pub gradient: f64,
}

/// assigned volume for the current assignment iteration.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct TrafficVolume {
    /// volume in passenger car units, the volume the curve is driven by
    pub pcu_volume: f64,
    /// pre-loaded base volume
    pub base_volume: f64,
}

/// the integer user-defined values attached to the network object.
///
/// the ODOT curve reads them as:
///   - `uval1`: mid-link capacity
///   - `uval2`: uncongested signal delay in seconds, scaled by 100
///   - `uval3`: intersection capacity, or 0 when there is no intersection delay
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserValues {
    pub uval1: i32,
    pub uval2: i32,
    pub uval3: i32,
    pub uval_tsys: i32,
}

impl UserValues {
    pub fn new(uval1: i32, uval2: i32, uval3: i32) -> UserValues {
        UserValues {
            uval1,
            uval2,
            uval3,
            uval_tsys: 0,
        }
    }

    /// encodes capacities and a signal delay in seconds as the integer user
    /// values of the ODOT curve, rounding to the nearest integer.
    pub fn encode(
        mid_link_capacity: f64,
        signal_delay: f64,
        intersection_capacity: f64,
    ) -> UserValues {
        UserValues::new(
            mid_link_capacity.round() as i32,
            (signal_delay * SIGNAL_DELAY_SCALE).round() as i32,
            intersection_capacity.round() as i32,
        )
    }
}

/// the curve-shape coefficients configured for the link type in the host's
/// volume-delay function dialog.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct CurveParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub f: f64,
    pub a2: f64,
    pub b2: f64,
    pub d2: f64,
    pub f2: f64,
    pub sat_crit: f64,
}

impl CurveParameters {
    /// builds parameters for the two BPR terms of the ODOT curve, leaving
    /// the coefficients it does not read at zero.
    pub fn bpr(a: f64, b: f64, a2: f64, b2: f64) -> CurveParameters {
        CurveParameters {
            a,
            b,
            a2,
            b2,
            ..Default::default()
        }
    }
}

/// everything the host passes to a single evaluation of a volume-delay
/// function, except the per-transport-system volume array.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct VdfInput {
    /// zero-based index into the transport systems announced by the host
    pub tsys_index: i32,
    pub tsys_is_open: bool,
    pub link: LinkState,
    pub volume: TrafficVolume,
    pub user: UserValues,
    pub params: CurveParameters,
}
