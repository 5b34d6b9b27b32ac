use itertools::Itertools;

/// orientations of the link at its to-node where the cross street runs east-west
const NORTH_SOUTH_APPROACHES: [u32; 6] = [15, 1, 3, 11, 9, 7];
/// orientations of the link at its to-node where the cross street runs north-south
const EAST_WEST_APPROACHES: [u32; 2] = [5, 13];

/// placeholder class for a missing cross street side. larger than any
/// real class so that `min` prefers the other side.
const MISSING_SIDE: u32 = 999;

/// finds the facility class of the street crossing the link at its to-node.
///
/// `approaches` holds the (facility class, orientation) pairs of every link
/// entering the to-node, the link itself included. approaches of class
/// `closed_class` are ignored. when the node mixes more than two classes
/// the cross street is located by compass orientation and the higher order
/// (lower numbered) side wins. with exactly two classes, the first
/// occurrence of the link's own class is dropped and the first remaining
/// approach gives the class, so a node listing the own class twice first
/// resolves to the own class. returns 0 when no class can be determined.
pub fn intersecting_facility_class(
    plan_no: u32,
    to_node_orientation: u32,
    approaches: &[(u32, &str)],
    closed_class: u32,
) -> u32 {
    let open: Vec<(u32, &str)> = approaches
        .iter()
        .filter(|(fc, _)| *fc != closed_class)
        .copied()
        .collect();
    let classes: Vec<u32> = open.iter().map(|(fc, _)| *fc).unique().collect();
    match classes.as_slice() {
        [only] => *only,
        [_, _] => without_first_own_class(plan_no, &open),
        _ => by_orientation(to_node_orientation, &open),
    }
}

fn without_first_own_class(plan_no: u32, approaches: &[(u32, &str)]) -> u32 {
    let own = approaches.iter().position(|(fc, _)| *fc == plan_no);
    approaches
        .iter()
        .enumerate()
        .find(|(idx, _)| Some(*idx) != own)
        .map(|(_, (fc, _))| *fc)
        .unwrap_or_default()
}

fn by_orientation(to_node_orientation: u32, approaches: &[(u32, &str)]) -> u32 {
    // later approaches overwrite earlier ones on the same side
    let side = |names: &[&str]| -> u32 {
        let mut found = MISSING_SIDE;
        for name in names {
            if let Some((fc, _)) = approaches.iter().rev().find(|(_, o)| o == name) {
                found = *fc;
            }
        }
        found
    };
    if NORTH_SOUTH_APPROACHES.contains(&to_node_orientation) {
        let west = side(&["ORIENTATIONWEST"]);
        let east = side(&["ORIENTATIONEAST"]);
        west.min(east)
    } else if EAST_WEST_APPROACHES.contains(&to_node_orientation) {
        let north = side(&[
            "ORIENTATIONNORTH",
            "ORIENTATIONNORTHEAST",
            "ORIENTATIONNORTHWEST",
        ]);
        let south = side(&[
            "ORIENTATIONSOUTH",
            "ORIENTATIONSOUTHEAST",
            "ORIENTATIONSOUTHWEST",
        ]);
        north.min(south)
    } else {
        0
    }
}
