use crate::model::preparation::{
    intersecting_facility_class, ApproachLanes, ControlCategory, ControlType,
    IntersectionLookup, LinkRecord, PreparationConfig, PreparationError, PreparedLink,
    TimePeriod,
};

/// derives the volume-delay attributes of one link.
///
/// closed links (to-node orientation 0 or the closed facility class) get
/// all-zero attributes, which the volume-delay function treats as
/// impassable. links ending at a controlled intersection additionally get
/// an uncongested signal delay and an intersection capacity. capacities are
/// hourly unless a time period is given.
///
/// # Returns
///
/// * the prepared link, or an error when the link's facility class is not
///   configured or its list columns are malformed. a missing entry in the
///   intersection lookup table is not an error: the link keeps a zero signal
///   delay and intersection capacity.
pub fn prepare_link(
    link: &LinkRecord,
    config: &PreparationConfig,
    lookup: &IntersectionLookup,
    period: Option<TimePeriod>,
) -> Result<PreparedLink, PreparationError> {
    let mut prepared = PreparedLink {
        from_node: link.from_node,
        to_node: link.to_node,
        plan_no: link.plan_no,
        ..Default::default()
    };
    if link.to_node_orientation == 0 || link.plan_no == config.closed_facility_class {
        return Ok(prepared);
    }

    let capacities = config.facility_class(link.plan_no)?;
    prepared.mid_link_capacity = mid_link_capacity(link, config)?;

    if link.num_legs >= 3 {
        let approaches = link.approaches()?;
        let int_fc = intersecting_facility_class(
            link.plan_no,
            link.to_node_orientation,
            &approaches,
            config.closed_facility_class,
        );
        prepared.intersecting_facility_class = int_fc;

        let category = ControlCategory::for_approach(
            ControlType::from(link.control_type),
            link.num_legs,
            link.to_node_orientation,
            link.major_flow_orientations(),
        );
        if let Some(category) = category {
            let cycle = lookup.cycle_length(link.plan_no, int_fc);
            let gc = lookup.gc_ratio(link.plan_no, category, int_fc);
            match (cycle, gc) {
                (Some(cycle), Some(gc)) => {
                    prepared.uncongested_signal_delay =
                        uncongested_signal_delay(link.progression_factor, cycle, gc);
                    let lanes = ApproachLanes::from_turns(&link.turns()?, &link.lane_turns()?);
                    prepared.right_lanes = lanes.right;
                    prepared.thru_lanes = lanes.thru;
                    prepared.left_lanes = lanes.left;
                    prepared.intersection_capacity = intersection_capacity(
                        gc,
                        &lanes,
                        config.intersection_approach_capacity_per_lane,
                        capacities.turn_capacity_per_lane,
                    );
                }
                _ => {
                    log::warn!(
                        "link {}-{}: no '{}' timing for facility class {} crossing class {}, skipping intersection delay",
                        link.from_node,
                        link.to_node,
                        category.lookup_key(),
                        link.plan_no,
                        int_fc
                    );
                }
            }
        }
    }

    let factor = config.capacity_factor(period);
    prepared.mid_link_capacity *= factor;
    prepared.intersection_capacity *= factor;
    Ok(prepared)
}

/// hourly mid-link capacity. freeways add auxiliary lanes, other
/// facilities lose a fixed amount, more without a median.
pub fn mid_link_capacity(
    link: &LinkRecord,
    config: &PreparationConfig,
) -> Result<f64, PreparationError> {
    let per_lane = config.facility_class(link.plan_no)?.thru_capacity_per_lane;
    let lanes = link.num_lanes as f64;
    if link.plan_no == config.freeway_facility_class {
        let aux = link.aux_lanes.filter(|a| a.is_finite()).unwrap_or_default();
        Ok(lanes * per_lane + aux * config.freeway_capacity_per_aux_lane)
    } else {
        let median_penalty = if link.median == 0 {
            config.no_median_capacity_reduction
        } else {
            0.0
        };
        Ok(lanes * per_lane - config.arterial_capacity_reduction - median_penalty)
    }
}

/// average delay of a uniform arrival at a fixed-time approach, in seconds
pub fn uncongested_signal_delay(progression_factor: f64, cycle_length: f64, gc_ratio: f64) -> f64 {
    progression_factor * (cycle_length / 2.0) * (1.0 - gc_ratio).powi(2)
}

pub fn intersection_capacity(
    gc_ratio: f64,
    lanes: &ApproachLanes,
    approach_capacity_per_lane: f64,
    turn_capacity_per_lane: f64,
) -> f64 {
    gc_ratio
        * (lanes.thru as f64 * approach_capacity_per_lane
            + lanes.turn_lanes() as f64 * turn_capacity_per_lane)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;

    const TABLE: &str = "\
PLANNO,VALUE,1,3,4,5
4,cyclelength,120,110,100,90
4,gc4leg,0.35,0.39,0.5,0.56
4,gc3leg,0.4,0.45,0.55,0.6
4,stop,0.3,0.3,0.4,0.5
";

    fn lookup() -> IntersectionLookup {
        IntersectionLookup::from_reader(TABLE.as_bytes(), Path::new("vdf_lookup_table.csv"))
            .expect("test invariant failed: lookup table should parse")
    }

    fn signalized_link() -> LinkRecord {
        LinkRecord {
            from_node: 10,
            to_node: 11,
            plan_no: 4,
            num_lanes: 2,
            aux_lanes: None,
            median: 1,
            to_node_orientation: 1,
            num_legs: 4,
            control_type: 3,
            major_flow_orientation_1: None,
            major_flow_orientation_2: None,
            progression_factor: 1.0,
            approach_facility_classes: "4,5,4,5".to_string(),
            approach_orientations:
                "ORIENTATIONNORTH,ORIENTATIONEAST,ORIENTATIONSOUTH,ORIENTATIONWEST".to_string(),
            turn_orientations: "ORIENTATIONR,ORIENTATIONT,ORIENTATIONL".to_string(),
            turn_to_link_orientations: "ORIENTATIONEAST,ORIENTATIONNORTH,ORIENTATIONWEST"
                .to_string(),
            lane_turn_orientations:
                "ORIENTATIONEAST,ORIENTATIONNORTH,ORIENTATIONNORTH,ORIENTATIONWEST".to_string(),
            lane_turn_lane_numbers: "1,1,2,3".to_string(),
        }
    }

    #[test]
    fn test_signalized_link() {
        let prepared = prepare_link(
            &signalized_link(),
            &PreparationConfig::default(),
            &lookup(),
            None,
        )
        .expect("test invariant failed: link should prepare");
        // 2 * 1800 - 300, median present
        assert_eq!(prepared.mid_link_capacity, 3300.0);
        assert_eq!(prepared.intersecting_facility_class, 5);
        // 1.0 * 90 / 2 * (1 - 0.56)^2
        assert!((prepared.uncongested_signal_delay - 45.0 * 0.44 * 0.44).abs() < 1e-9);
        assert_eq!(
            (prepared.right_lanes, prepared.thru_lanes, prepared.left_lanes),
            (0, 2, 1)
        );
        // 0.56 * (2 * 1800 + 1 * 150)
        assert!((prepared.intersection_capacity - 0.56 * 3750.0).abs() < 1e-9);
        let user = prepared.user_values();
        assert_eq!(user.uval1, 3300);
        assert_eq!(user.uval2, 871);
        assert_eq!(user.uval3, 2100);
    }

    #[test]
    fn test_time_period_scales_capacities_only() {
        let hourly = prepare_link(
            &signalized_link(),
            &PreparationConfig::default(),
            &lookup(),
            None,
        )
        .expect("test invariant failed: link should prepare");
        let pm = prepare_link(
            &signalized_link(),
            &PreparationConfig::default(),
            &lookup(),
            Some(TimePeriod::Pm),
        )
        .expect("test invariant failed: link should prepare");
        assert_eq!(pm.mid_link_capacity, 2.0 * hourly.mid_link_capacity);
        assert_eq!(pm.intersection_capacity, 2.0 * hourly.intersection_capacity);
        assert_eq!(pm.uncongested_signal_delay, hourly.uncongested_signal_delay);
    }

    #[test]
    fn test_closed_links() {
        let conf = PreparationConfig::default();
        let mut link = signalized_link();
        link.to_node_orientation = 0;
        let prepared = prepare_link(&link, &conf, &lookup(), Some(TimePeriod::Am))
            .expect("test invariant failed: closed link should prepare");
        assert_eq!(prepared.user_values().uval1, 0);

        let mut link = signalized_link();
        link.plan_no = 998;
        let prepared = prepare_link(&link, &conf, &lookup(), None)
            .expect("test invariant failed: closed link should prepare");
        assert_eq!(prepared.mid_link_capacity, 0.0);
        assert_eq!(prepared.intersection_capacity, 0.0);
    }

    #[test]
    fn test_freeway_aux_lanes() {
        let conf = PreparationConfig::default();
        let mut link = signalized_link();
        link.plan_no = 1;
        link.num_legs = 2;
        link.aux_lanes = Some(1.0);
        let prepared = prepare_link(&link, &conf, &lookup(), None)
            .expect("test invariant failed: freeway should prepare");
        assert_eq!(prepared.mid_link_capacity, 2.0 * 1950.0 + 1200.0);
        assert_eq!(prepared.uncongested_signal_delay, 0.0);
        assert_eq!(prepared.intersection_capacity, 0.0);

        link.aux_lanes = Some(f64::NAN);
        let cap = mid_link_capacity(&link, &conf)
            .expect("test invariant failed: freeway capacity");
        assert_eq!(cap, 2.0 * 1950.0);
    }

    #[test]
    fn test_no_median() {
        let mut link = signalized_link();
        link.median = 0;
        let cap = mid_link_capacity(&link, &PreparationConfig::default())
            .expect("test invariant failed: arterial capacity");
        assert_eq!(cap, 3100.0);
    }

    #[test]
    fn test_missing_lookup_entry_leaves_delay_at_zero() {
        let mut link = signalized_link();
        link.approach_facility_classes = "4,7,4,7".to_string();
        let prepared = prepare_link(&link, &PreparationConfig::default(), &lookup(), None)
            .expect("test invariant failed: lookup miss is not an error");
        assert_eq!(prepared.intersecting_facility_class, 7);
        assert_eq!(prepared.uncongested_signal_delay, 0.0);
        assert_eq!(prepared.intersection_capacity, 0.0);
        assert_eq!(prepared.mid_link_capacity, 3300.0);
    }

    #[test]
    fn test_unknown_facility_class() {
        let mut link = signalized_link();
        link.plan_no = 2;
        let result = prepare_link(&link, &PreparationConfig::default(), &lookup(), None);
        assert!(matches!(
            result,
            Err(PreparationError::UnknownFacilityClass(2))
        ));
    }

    #[test]
    fn test_mismatched_lists() {
        let mut link = signalized_link();
        link.approach_orientations = "ORIENTATIONNORTH".to_string();
        let result = prepare_link(&link, &PreparationConfig::default(), &lookup(), None);
        assert!(matches!(result, Err(PreparationError::InvalidLink { .. })));
    }
}
