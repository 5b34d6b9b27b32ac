use std::io::Write;

use odot_vdf_core::model::{
    mid_link_time, signal_delay, LinkState, OdotVdf, TrafficVolume, UserValues, VdfInput,
    VolumeDelayFunction,
};
use serde::{Deserialize, Serialize};

use crate::{
    app::{CurveCoefficients, VdfAppError},
    util::{fs, TimeUnit},
};

/// a single link whose curve is tabulated by `odot-vdf curve`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CurveLink {
    /// free-flow travel time in seconds
    pub free_flow_time: f64,
    pub mid_link_capacity: f64,
    /// uncongested signal delay in seconds
    pub signal_delay: f64,
    /// intersection capacity, 0 for no intersection congestion
    pub intersection_capacity: f64,
    pub coefficients: CurveCoefficients,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CurvePoint {
    pub volume: f64,
    pub volume_capacity_ratio: f64,
    pub mid_link_time: f64,
    pub signal_delay: f64,
    pub travel_time: f64,
}

impl CurveLink {
    /// the link as the host sees it. capacities and delay pass through the
    /// integer user values, so the tabulated curve carries the same
    /// rounding as an assignment.
    pub fn user_values(&self) -> UserValues {
        UserValues::encode(
            self.mid_link_capacity,
            self.signal_delay,
            self.intersection_capacity,
        )
    }

    pub fn point(&self, volume: f64, unit: TimeUnit) -> CurvePoint {
        let user = self.user_values();
        let input = VdfInput {
            link: LinkState {
                free_flow_time: self.free_flow_time,
                ..Default::default()
            },
            volume: TrafficVolume {
                pcu_volume: volume,
                base_volume: 0.0,
            },
            user,
            params: self.coefficients.into(),
            ..Default::default()
        };
        let mid_link_cap = user.uval1 as f64;
        CurvePoint {
            volume,
            volume_capacity_ratio: volume / mid_link_cap,
            mid_link_time: unit.convert_seconds(mid_link_time(
                self.free_flow_time,
                volume,
                mid_link_cap,
                self.coefficients.a,
                self.coefficients.b,
            )),
            signal_delay: unit.convert_seconds(signal_delay(user.uval2)),
            travel_time: unit.convert_seconds(OdotVdf.calc(&input)),
        }
    }

    /// evaluates `steps + 1` evenly spaced volumes from 0 to `max_volume`
    pub fn tabulate(
        &self,
        max_volume: f64,
        steps: usize,
        unit: TimeUnit,
    ) -> Result<Vec<CurvePoint>, VdfAppError> {
        if steps == 0 {
            return Err(VdfAppError::InvalidUserInput(
                "curve needs at least one step".to_string(),
            ));
        }
        if !(max_volume.is_finite() && max_volume > 0.0) {
            return Err(VdfAppError::InvalidUserInput(format!(
                "max volume must be positive, found {max_volume}"
            )));
        }
        if self.user_values().uval1 <= 0 {
            return Err(VdfAppError::InvalidUserInput(format!(
                "mid-link capacity {} makes the link impassable at every volume",
                self.mid_link_capacity
            )));
        }
        let points = (0..=steps)
            .map(|step| self.point(max_volume * step as f64 / steps as f64, unit))
            .collect();
        Ok(points)
    }
}

/// runs `odot-vdf curve`, writing the table to `sink`
pub fn run<W: Write>(
    link: &CurveLink,
    max_volume: f64,
    steps: usize,
    unit: TimeUnit,
    sink: W,
) -> Result<(), VdfAppError> {
    let points = link.tabulate(max_volume, steps, unit)?;
    log::debug!(
        "tabulated {} points with user values {:?}",
        points.len(),
        link.user_values()
    );
    fs::write_csv(points, sink, "<stdout>", "tabulate curve")
}

#[cfg(test)]
mod test {
    use super::*;

    fn link() -> CurveLink {
        CurveLink {
            free_flow_time: 60.0,
            mid_link_capacity: 1000.0,
            signal_delay: 5.0,
            intersection_capacity: 0.0,
            coefficients: CurveCoefficients {
                a: 0.15,
                b: 4.0,
                a2: 0.15,
                b2: 4.0,
            },
        }
    }

    #[test]
    fn test_tabulate() {
        let points = link()
            .tabulate(2000.0, 4, TimeUnit::Seconds)
            .expect("test invariant failed: curve should tabulate");
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].volume, 0.0);
        assert!((points[0].travel_time - 65.0).abs() < 1e-9);
        assert_eq!(points[2].volume, 1000.0);
        assert_eq!(points[2].volume_capacity_ratio, 1.0);
        assert!((points[2].travel_time - 74.0).abs() < 1e-9);
        assert!(points.windows(2).all(|w| w[0].travel_time <= w[1].travel_time));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(link().tabulate(2000.0, 0, TimeUnit::Seconds).is_err());
        assert!(link().tabulate(-1.0, 10, TimeUnit::Seconds).is_err());
        let mut closed = link();
        closed.mid_link_capacity = 0.2;
        assert!(closed.tabulate(2000.0, 10, TimeUnit::Seconds).is_err());
    }

    #[test]
    fn test_run_writes_csv() {
        let mut buffer: Vec<u8> = vec![];
        run(&link(), 1000.0, 2, TimeUnit::Minutes, &mut buffer)
            .expect("test invariant failed: curve should write");
        let text = String::from_utf8(buffer).expect("test invariant failed: utf8 output");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("volume,volume_capacity_ratio,mid_link_time,signal_delay,travel_time")
        );
        assert_eq!(lines.count(), 3);
    }
}
