use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// turning movement of a lane at the downstream intersection.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    Right,
    Thru,
    Left,
}

impl Movement {
    /// reads the movement from the last character of a turn orientation
    /// code, for example `R` in `ORIENTATIONR`.
    pub fn from_turn_orientation(orientation: &str) -> Option<Movement> {
        match orientation.trim().chars().last()? {
            'R' => Some(Movement::Right),
            'T' => Some(Movement::Thru),
            'L' => Some(Movement::Left),
            _ => None,
        }
    }
}

/// a turn leaving the approach, as (turn orientation, from-node orientation
/// of the turn's to-link).
pub type Turn<'a> = (&'a str, &'a str);

/// a lane turn on the approach, as (to-orientation, from-lane number).
pub type LaneTurn<'a> = (&'a str, &'a str);

/// lane counts of an intersection approach.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApproachLanes {
    /// lanes serving only right turns
    pub right: u32,
    /// lanes serving thru traffic, shared or not
    pub thru: u32,
    /// lanes serving only left turns
    pub left: u32,
}

impl ApproachLanes {
    /// counts lanes by movement. each lane turn takes the movement of the
    /// turn whose to-link leaves in the lane turn's direction (the last such
    /// turn with a right, thru or left movement when several match). lanes
    /// are then grouped by lane number.
    pub fn from_turns(turns: &[Turn], lane_turns: &[LaneTurn]) -> ApproachLanes {
        let mut by_lane: BTreeMap<&str, Vec<Option<Movement>>> = BTreeMap::new();
        for (to_orientation, lane_no) in lane_turns {
            let movement = turns.iter().rev().find_map(|(turn, to_link)| {
                (to_link == to_orientation)
                    .then(|| Movement::from_turn_orientation(turn))
                    .flatten()
            });
            by_lane.entry(*lane_no).or_default().push(movement);
        }

        let mut lanes = ApproachLanes::default();
        for movements in by_lane.values() {
            let has = |m: Movement| movements.contains(&Some(m));
            let (r, t, l) = (has(Movement::Right), has(Movement::Thru), has(Movement::Left));
            if t {
                lanes.thru += 1;
            } else if r && !l {
                lanes.right += 1;
            } else if l && !r {
                lanes.left += 1;
            }
        }
        lanes
    }

    pub fn turn_lanes(&self) -> u32 {
        self.right + self.left
    }
}
