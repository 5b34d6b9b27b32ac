use serde::{Deserialize, Serialize};

use crate::model::{
    preparation::{
        approach_lanes::{LaneTurn, Turn},
        PreparationError,
    },
    UserValues,
};

/// one link of the assignment network with the attributes of its to-node
/// and outgoing turns flattened into columns. list-valued columns hold
/// comma-separated values, one per approach, turn or lane turn.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LinkRecord {
    pub from_node: i64,
    pub to_node: i64,
    /// facility class (plan number)
    pub plan_no: u32,
    pub num_lanes: u32,
    /// freeway auxiliary lanes, empty when there are none
    pub aux_lanes: Option<f64>,
    /// non-zero when the link has a median
    #[serde(default)]
    pub median: u32,
    /// compass orientation of the link at its to-node, 0 when closed
    pub to_node_orientation: u32,
    pub num_legs: u32,
    pub control_type: u32,
    pub major_flow_orientation_1: Option<u32>,
    pub major_flow_orientation_2: Option<u32>,
    #[serde(default = "default_progression_factor")]
    pub progression_factor: f64,
    /// facility classes of all links entering the to-node
    #[serde(default)]
    pub approach_facility_classes: String,
    /// orientations of all links entering the to-node, matching
    /// `approach_facility_classes`
    #[serde(default)]
    pub approach_orientations: String,
    /// orientation codes of the turns leaving this link, ending in R, T or L
    #[serde(default)]
    pub turn_orientations: String,
    /// from-node orientation of each turn's to-link
    #[serde(default)]
    pub turn_to_link_orientations: String,
    /// to-orientation of each lane turn on this link
    #[serde(default)]
    pub lane_turn_orientations: String,
    /// from-lane number of each lane turn, matching `lane_turn_orientations`
    #[serde(default)]
    pub lane_turn_lane_numbers: String,
}

fn default_progression_factor() -> f64 {
    1.0
}

/// splits a comma-separated column. an empty column is an empty list.
fn split_list(value: &str) -> Vec<&str> {
    if value.trim().is_empty() {
        vec![]
    } else {
        value.split(',').map(str::trim).collect()
    }
}

impl LinkRecord {
    fn invalid(&self, message: String) -> PreparationError {
        PreparationError::InvalidLink {
            from_node: self.from_node,
            to_node: self.to_node,
            message,
        }
    }

    fn paired<'a>(
        &self,
        left: &'a str,
        right: &'a str,
        names: (&str, &str),
    ) -> Result<Vec<(&'a str, &'a str)>, PreparationError> {
        let (l, r) = (split_list(left), split_list(right));
        if l.len() != r.len() {
            return Err(self.invalid(format!(
                "{} has {} values but {} has {}",
                names.0,
                l.len(),
                names.1,
                r.len()
            )));
        }
        Ok(l.into_iter().zip(r).collect())
    }

    /// (facility class, orientation) of each link entering the to-node
    pub fn approaches(&self) -> Result<Vec<(u32, &str)>, PreparationError> {
        self.paired(
            &self.approach_facility_classes,
            &self.approach_orientations,
            ("approach_facility_classes", "approach_orientations"),
        )?
        .into_iter()
        .map(|(fc, orientation)| {
            fc.parse::<u32>()
                .map(|fc| (fc, orientation))
                .map_err(|e| self.invalid(format!("approach facility class '{fc}': {e}")))
        })
        .collect()
    }

    pub fn turns(&self) -> Result<Vec<Turn<'_>>, PreparationError> {
        self.paired(
            &self.turn_orientations,
            &self.turn_to_link_orientations,
            ("turn_orientations", "turn_to_link_orientations"),
        )
    }

    pub fn lane_turns(&self) -> Result<Vec<LaneTurn<'_>>, PreparationError> {
        self.paired(
            &self.lane_turn_orientations,
            &self.lane_turn_lane_numbers,
            ("lane_turn_orientations", "lane_turn_lane_numbers"),
        )
    }

    pub fn major_flow_orientations(&self) -> [Option<u32>; 2] {
        [self.major_flow_orientation_1, self.major_flow_orientation_2]
    }
}

/// the volume-delay attributes derived for one link.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PreparedLink {
    pub from_node: i64,
    pub to_node: i64,
    pub plan_no: u32,
    pub intersecting_facility_class: u32,
    pub right_lanes: u32,
    pub thru_lanes: u32,
    pub left_lanes: u32,
    pub mid_link_capacity: f64,
    /// uncongested signal delay in seconds
    pub uncongested_signal_delay: f64,
    pub intersection_capacity: f64,
}

impl PreparedLink {
    /// encodes the attributes as the integer user values read by the
    /// volume-delay function, rounding to the nearest integer.
    pub fn user_values(&self) -> UserValues {
        UserValues::encode(
            self.mid_link_capacity,
            self.uncongested_signal_delay,
            self.intersection_capacity,
        )
    }
}
