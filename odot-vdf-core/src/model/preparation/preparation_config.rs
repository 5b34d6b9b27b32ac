use serde::{Deserialize, Serialize};

use crate::model::preparation::{PreparationError, TimePeriod};

/// per-lane capacities for one facility class (plan number).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FacilityClassCapacity {
    pub facility_class: u32,
    /// hourly through capacity per lane on the mid-link section
    pub thru_capacity_per_lane: f64,
    /// hourly capacity per exclusive turn lane at the downstream intersection
    pub turn_capacity_per_lane: f64,
}

impl FacilityClassCapacity {
    fn new(facility_class: u32, thru: f64, turn: f64) -> FacilityClassCapacity {
        FacilityClassCapacity {
            facility_class,
            thru_capacity_per_lane: thru,
            turn_capacity_per_lane: turn,
        }
    }
}

/// factors converting hourly capacities into time period capacities.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimePeriodFactors {
    pub ea: f64,
    pub am: f64,
    pub md: f64,
    pub pm: f64,
    pub ev: f64,
}

impl TimePeriodFactors {
    pub fn factor(&self, period: TimePeriod) -> f64 {
        match period {
            TimePeriod::Ea => self.ea,
            TimePeriod::Am => self.am,
            TimePeriod::Md => self.md,
            TimePeriod::Pm => self.pm,
            TimePeriod::Ev => self.ev,
        }
    }
}

impl Default for TimePeriodFactors {
    fn default() -> Self {
        TimePeriodFactors {
            ea: 4.0,
            am: 1.5,
            md: 8.0,
            pm: 2.0,
            ev: 8.5,
        }
    }
}

/// constants used when deriving user values from link rows. any field
/// missing from a configuration file takes its default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PreparationConfig {
    pub facility_classes: Vec<FacilityClassCapacity>,
    /// facility class whose mid-link capacity counts auxiliary lanes
    pub freeway_facility_class: u32,
    /// facility class marking links that are not part of the network
    pub closed_facility_class: u32,
    pub freeway_capacity_per_aux_lane: f64,
    /// hourly capacity per thru lane entering an intersection
    pub intersection_approach_capacity_per_lane: f64,
    /// reduction applied to every non-freeway mid-link capacity
    pub arterial_capacity_reduction: f64,
    /// additional reduction for non-freeway links without a median
    pub no_median_capacity_reduction: f64,
    pub time_period_factors: TimePeriodFactors,
}

impl PreparationConfig {
    pub fn facility_class(&self, plan_no: u32) -> Result<&FacilityClassCapacity, PreparationError> {
        self.facility_classes
            .iter()
            .find(|fc| fc.facility_class == plan_no)
            .ok_or(PreparationError::UnknownFacilityClass(plan_no))
    }

    /// capacity multiplier for a time period, or 1 for hourly capacities
    pub fn capacity_factor(&self, period: Option<TimePeriod>) -> f64 {
        period
            .map(|p| self.time_period_factors.factor(p))
            .unwrap_or(1.0)
    }
}

impl Default for PreparationConfig {
    fn default() -> Self {
        let facility_classes = vec![
            FacilityClassCapacity::new(1, 1950.0, 250.0),
            FacilityClassCapacity::new(3, 1800.0, 250.0),
            FacilityClassCapacity::new(4, 1800.0, 150.0),
            FacilityClassCapacity::new(5, 1400.0, 100.0),
            FacilityClassCapacity::new(6, 1400.0, 100.0),
            FacilityClassCapacity::new(7, 1400.0, 100.0),
            FacilityClassCapacity::new(30, 1400.0, 100.0),
        ];
        PreparationConfig {
            facility_classes,
            freeway_facility_class: 1,
            closed_facility_class: 998,
            freeway_capacity_per_aux_lane: 1200.0,
            intersection_approach_capacity_per_lane: 1800.0,
            arterial_capacity_reduction: 300.0,
            no_median_capacity_reduction: 200.0,
            time_period_factors: TimePeriodFactors::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_facility_class_lookup() {
        let conf = PreparationConfig::default();
        let fc = conf
            .facility_class(4)
            .expect("test invariant failed: class 4 is configured");
        assert_eq!(fc.thru_capacity_per_lane, 1800.0);
        assert_eq!(fc.turn_capacity_per_lane, 150.0);
        assert!(matches!(
            conf.facility_class(2),
            Err(PreparationError::UnknownFacilityClass(2))
        ));
    }

    #[test]
    fn test_capacity_factor() {
        let conf = PreparationConfig::default();
        assert_eq!(conf.capacity_factor(None), 1.0);
        assert_eq!(conf.capacity_factor(Some(TimePeriod::Am)), 1.5);
        assert_eq!(conf.capacity_factor(Some(TimePeriod::Ev)), 8.5);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let conf: PreparationConfig =
            serde_json::from_str(r#"{ "freeway_capacity_per_aux_lane": 1000.0 }"#)
                .expect("test invariant failed: partial config should deserialize");
        assert_eq!(conf.freeway_capacity_per_aux_lane, 1000.0);
        assert_eq!(conf.facility_classes.len(), 7);
        assert_eq!(conf.time_period_factors, TimePeriodFactors::default());
    }
}
