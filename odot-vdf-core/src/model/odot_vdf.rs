use crate::model::{metadata, VdfInput, VolumeDelayFunction};

/// travel time returned for links without mid-link capacity. large enough
/// that the assignment treats the link as impassable.
pub const IMPASSABLE_TIME: f64 = 1e11;

/// scale applied to the uncongested signal delay so it fits an integer
/// user value.
pub const SIGNAL_DELAY_SCALE: f64 = 100.0;

/// the ODOT volume-delay function: a BPR curve on the mid-link capacity plus
/// an uncongested signal delay that grows with a second BPR term on the
/// intersection capacity.
///
/// ```text
/// t = t0 * (1 + a * (v / c_mid)^b) + delay * (1 + a2 * (v / c_int)^b2)
/// ```
///
/// the intersection term collapses to `delay` when there is no intersection
/// capacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct OdotVdf;

impl VolumeDelayFunction for OdotVdf {
    fn name(&self) -> &'static str {
        metadata::VDF_NAME
    }

    #[inline]
    fn calc(&self, input: &VdfInput) -> f64 {
        let mid_link_cap = input.user.uval1 as f64;
        if mid_link_cap <= 0.0 {
            return IMPASSABLE_TIME;
        }
        let volume = input.volume.pcu_volume;
        let params = &input.params;
        let mid_link = mid_link_time(
            input.link.free_flow_time,
            volume,
            mid_link_cap,
            params.a,
            params.b,
        );
        let adjustment =
            congestion_adjustment(volume, input.user.uval3 as f64, params.a2, params.b2);
        mid_link + signal_delay(input.user.uval2) * adjustment
    }
}

/// BPR travel time over the mid-link section
#[inline]
pub fn mid_link_time(free_flow_time: f64, volume: f64, capacity: f64, a: f64, b: f64) -> f64 {
    free_flow_time * (1.0 + a * (volume / capacity).powf(b))
}

/// decodes the scaled uncongested signal delay user value into seconds
#[inline]
pub fn signal_delay(uval2: i32) -> f64 {
    uval2 as f64 / SIGNAL_DELAY_SCALE
}

/// multiplier on the signal delay. exactly 1 when the intersection
/// capacity is not positive.
#[inline]
pub fn congestion_adjustment(volume: f64, intersection_capacity: f64, a2: f64, b2: f64) -> f64 {
    if intersection_capacity > 0.0 {
        1.0 + a2 * (volume / intersection_capacity).powf(b2)
    } else {
        1.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{CurveParameters, LinkState, TrafficVolume, UserValues};

    fn input(
        t0: f64,
        volume: f64,
        user: UserValues,
        params: CurveParameters,
    ) -> VdfInput {
        VdfInput {
            link: LinkState {
                free_flow_time: t0,
                ..Default::default()
            },
            volume: TrafficVolume {
                pcu_volume: volume,
                base_volume: 0.0,
            },
            user,
            params,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_link() {
        let params = CurveParameters::bpr(0.15, 4.0, 0.0, 0.0);
        let i = input(60.0, 1000.0, UserValues::new(1000, 500, 0), params);
        let result = OdotVdf.calc(&i);
        assert!((result - 74.0).abs() < 1e-9, "expected 74, found {result}");
    }

    #[test]
    fn test_no_mid_link_capacity_is_impassable() {
        let params = CurveParameters::bpr(0.15, 4.0, 0.5, 2.0);
        for cap in [0, -1, -5000] {
            let i = input(60.0, 800.0, UserValues::new(cap, 1200, 900), params);
            assert_eq!(OdotVdf.calc(&i), IMPASSABLE_TIME);
        }
        // the sentinel bypasses the arithmetic, even on NaN inputs
        let i = input(f64::NAN, f64::NAN, UserValues::new(0, 1, 1), params);
        assert_eq!(OdotVdf.calc(&i), IMPASSABLE_TIME);
    }

    #[test]
    fn test_no_intersection_capacity_leaves_signal_delay_unadjusted() {
        assert_eq!(congestion_adjustment(1500.0, 0.0, 0.8, 3.0), 1.0);
        assert_eq!(congestion_adjustment(1500.0, -20.0, 0.8, 3.0), 1.0);

        let params = CurveParameters::bpr(0.0, 4.0, 0.8, 3.0);
        let i = input(30.0, 1500.0, UserValues::new(1000, 750, 0), params);
        assert!((OdotVdf.calc(&i) - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_volume_is_free_flow_plus_signal_delay() {
        let params = CurveParameters::bpr(0.15, 4.0, 0.6, 2.5);
        let i = input(42.0, 0.0, UserValues::new(1800, 1234, 900), params);
        assert!((OdotVdf.calc(&i) - (42.0 + 12.34)).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_congestion() {
        // 60 * (1 + 0.15 * 0.5^4) + 10 * (1 + 0.5 * 2^2)
        let params = CurveParameters::bpr(0.15, 4.0, 0.5, 2.0);
        let i = input(60.0, 1000.0, UserValues::new(2000, 1000, 500), params);
        let expected = 60.0 * (1.0 + 0.15 * 0.0625) + 10.0 * 3.0;
        assert!((OdotVdf.calc(&i) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_monotone_in_volume() {
        let params = CurveParameters::bpr(0.15, 4.0, 0.3, 2.0);
        let user = UserValues::new(1800, 2500, 1200);
        let mut previous = f64::NEG_INFINITY;
        for step in 0..=200 {
            let volume = step as f64 * 25.0;
            let t = OdotVdf.calc(&input(45.0, volume, user, params));
            assert!(t >= previous, "time decreased at volume {volume}");
            previous = t;
        }
    }

    #[test]
    fn test_degenerate_inputs_propagate() {
        // negative free-flow time is not validated
        let params = CurveParameters::bpr(0.15, 4.0, 0.0, 0.0);
        let i = input(-10.0, 0.0, UserValues::new(1000, 0, 0), params);
        assert_eq!(OdotVdf.calc(&i), -10.0);
        // fractional exponent of a negative ratio is NaN
        let params = CurveParameters::bpr(0.15, 0.5, 0.0, 0.0);
        let i = input(10.0, -100.0, UserValues::new(1000, 0, 0), params);
        assert!(OdotVdf.calc(&i).is_nan());
    }

    #[test]
    fn test_derivative_and_integral_are_not_provided() {
        let params = CurveParameters::bpr(0.15, 4.0, 0.3, 2.0);
        let i = input(45.0, 900.0, UserValues::new(1800, 2500, 1200), params);
        assert_eq!(OdotVdf.calc_derivative(&i), 0.0);
        assert_eq!(OdotVdf.calc_integral(&i), 0.0);
        assert_eq!(OdotVdf.calc_derivative(&VdfInput::default()), 0.0);
        assert_eq!(OdotVdf.calc_integral(&VdfInput::default()), 0.0);
    }
}
