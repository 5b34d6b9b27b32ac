use serde::{Deserialize, Serialize};

/// node control types as numbered by the host.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlType {
    Unknown,
    Uncontrolled,
    TwoWayStop,
    Signal,
    AllWayStop,
    Roundabout,
    TwoWayYield,
}

impl From<u32> for ControlType {
    fn from(value: u32) -> Self {
        match value {
            1 => ControlType::Uncontrolled,
            2 => ControlType::TwoWayStop,
            3 => ControlType::Signal,
            4 => ControlType::AllWayStop,
            5 => ControlType::Roundabout,
            6 => ControlType::TwoWayYield,
            _ => ControlType::Unknown,
        }
    }
}

/// the intersection lookup table row used to find the green/cycle ratio of
/// a controlled approach.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCategory {
    Stop,
    Signal3Leg,
    Signal4Leg,
    Roundabout,
}

impl ControlCategory {
    /// classifies an approach at a node with `num_legs` legs. returns None
    /// where the approach sees no control delay: fewer than 3 legs,
    /// uncontrolled or unknown nodes, yield control, and the major flow
    /// approaches of a two-way stop.
    pub fn for_approach(
        control_type: ControlType,
        num_legs: u32,
        to_node_orientation: u32,
        major_flow_orientations: [Option<u32>; 2],
    ) -> Option<ControlCategory> {
        if num_legs < 3 {
            return None;
        }
        match control_type {
            ControlType::Unknown | ControlType::Uncontrolled | ControlType::TwoWayYield => None,
            ControlType::TwoWayStop => {
                let is_major = major_flow_orientations.contains(&Some(to_node_orientation));
                (!is_major).then_some(ControlCategory::Stop)
            }
            ControlType::Signal if num_legs == 3 => Some(ControlCategory::Signal3Leg),
            ControlType::Signal => Some(ControlCategory::Signal4Leg),
            ControlType::AllWayStop => Some(ControlCategory::Stop),
            ControlType::Roundabout => Some(ControlCategory::Roundabout),
        }
    }

    /// row name in the intersection lookup table
    pub fn lookup_key(&self) -> &'static str {
        match self {
            ControlCategory::Stop => "stop",
            ControlCategory::Signal3Leg => "gc3leg",
            ControlCategory::Signal4Leg => "gc4leg",
            ControlCategory::Roundabout => "roundabout",
        }
    }
}
