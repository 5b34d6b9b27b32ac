use std::path::Path;

use kdam::tqdm;
use odot_vdf_core::model::preparation::{
    prepare_ops, IntersectionLookup, LinkRecord, PreparationConfig, PreparedLink, TimePeriod,
};
use serde::{Deserialize, Serialize};

use crate::{
    app::{VdfAppConfig, VdfAppError},
    util::fs,
};

/// a prepared link as written by `odot-vdf prepare`, with the attributes
/// and the user values to load into the host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PreparedLinkRow {
    pub from_node: i64,
    pub to_node: i64,
    pub plan_no: u32,
    pub intersecting_facility_class: u32,
    pub right_lanes: u32,
    pub thru_lanes: u32,
    pub left_lanes: u32,
    pub mid_link_capacity: f64,
    pub uncongested_signal_delay: f64,
    pub intersection_capacity: f64,
    pub uval1: i32,
    pub uval2: i32,
    pub uval3: i32,
}

impl From<&PreparedLink> for PreparedLinkRow {
    fn from(link: &PreparedLink) -> Self {
        let user = link.user_values();
        PreparedLinkRow {
            from_node: link.from_node,
            to_node: link.to_node,
            plan_no: link.plan_no,
            intersecting_facility_class: link.intersecting_facility_class,
            right_lanes: link.right_lanes,
            thru_lanes: link.thru_lanes,
            left_lanes: link.left_lanes,
            mid_link_capacity: link.mid_link_capacity,
            uncongested_signal_delay: link.uncongested_signal_delay,
            intersection_capacity: link.intersection_capacity,
            uval1: user.uval1,
            uval2: user.uval2,
            uval3: user.uval3,
        }
    }
}

/// runs `odot-vdf prepare`: reads the link table and intersection lookup
/// table, derives the volume-delay attributes of every link and writes them
/// to `output_file`.
pub fn run(
    links_file: &Path,
    lookup_file: &Path,
    config: &VdfAppConfig,
    period: Option<TimePeriod>,
    output_file: &Path,
) -> Result<(), VdfAppError> {
    let links: Vec<LinkRecord> = fs::read_csv(links_file)?;
    let lookup = IntersectionLookup::from_path(lookup_file)?;
    if lookup.is_empty() {
        log::warn!(
            "intersection lookup table {} is empty, no signal delays will be assigned",
            lookup_file.display()
        );
    } else {
        log::info!(
            "using {} intersection lookup values from {}",
            lookup.len(),
            lookup_file.display()
        );
    }
    let prepared = prepare_links(&links, &config.preparation, &lookup, period)?;
    let rows: Vec<PreparedLinkRow> = prepared.iter().map(PreparedLinkRow::from).collect();
    fs::write_csv_file(rows, output_file, "write prepared links")
}

/// prepares every link, stopping at the first link that cannot be prepared.
pub fn prepare_links(
    links: &[LinkRecord],
    config: &PreparationConfig,
    lookup: &IntersectionLookup,
    period: Option<TimePeriod>,
) -> Result<Vec<PreparedLink>, VdfAppError> {
    match period {
        Some(p) => log::info!(
            "preparing {} links for time period {p} (capacity factor {})",
            links.len(),
            config.capacity_factor(period)
        ),
        None => log::info!("preparing {} links with hourly capacities", links.len()),
    }
    let bar_iter = tqdm!(links.iter(), total = links.len(), desc = "prepare links");
    let prepared = bar_iter
        .map(|link| {
            prepare_ops::prepare_link(link, config, lookup, period).map_err(|e| {
                log::error!("link {}-{} failed: {e}", link.from_node, link.to_node);
                VdfAppError::from(e)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    eprintln!();
    Ok(prepared)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn test_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test")
    }

    fn output_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("odot-vdf-test-{}", std::process::id()))
            .join(name)
    }

    fn find(rows: &[PreparedLinkRow], from_node: i64) -> &PreparedLinkRow {
        rows.iter()
            .find(|r| r.from_node == from_node)
            .expect("test invariant failed: link missing from output")
    }

    #[test]
    fn test_prepare_sample_network() {
        let config = VdfAppConfig::load(None).expect("test invariant failed: default config");
        let output = output_path("prepared_hourly.csv");
        run(
            &test_dir().join("links.csv"),
            &test_dir().join("vdf_lookup_table.csv"),
            &config,
            None,
            &output,
        )
        .expect("prepare failed");
        let rows: Vec<PreparedLinkRow> =
            fs::read_csv(&output).expect("test invariant failed: output should read");
        assert_eq!(rows.len(), 4);

        // signalized arterial
        let signal = find(&rows, 10);
        assert_eq!(signal.intersecting_facility_class, 5);
        assert_eq!((signal.uval1, signal.uval2, signal.uval3), (3300, 871, 2100));

        // freeway with an auxiliary lane, no intersection
        let freeway = find(&rows, 20);
        assert_eq!((freeway.uval1, freeway.uval2, freeway.uval3), (7050, 0, 0));

        // closed link
        let closed = find(&rows, 30);
        assert_eq!((closed.uval1, closed.uval2, closed.uval3), (0, 0, 0));

        // minor approach of a two-way stop
        let stop = find(&rows, 40);
        assert_eq!(stop.intersecting_facility_class, 3);
        assert_eq!((stop.right_lanes, stop.thru_lanes, stop.left_lanes), (1, 0, 1));
        assert_eq!((stop.uval1, stop.uval2, stop.uval3), (900, 675, 100));
    }

    #[test]
    fn test_prepare_time_period() {
        let config = VdfAppConfig::load(None).expect("test invariant failed: default config");
        let output = output_path("prepared_am.csv");
        run(
            &test_dir().join("links.csv"),
            &test_dir().join("vdf_lookup_table.csv"),
            &config,
            Some(TimePeriod::Am),
            &output,
        )
        .expect("prepare failed");
        let rows: Vec<PreparedLinkRow> =
            fs::read_csv(&output).expect("test invariant failed: output should read");
        let signal = find(&rows, 10);
        assert_eq!((signal.uval1, signal.uval2, signal.uval3), (4950, 871, 3150));
    }

    #[test]
    fn test_prepare_missing_links_file() {
        let config = VdfAppConfig::default();
        let result = run(
            &test_dir().join("missing.csv"),
            &test_dir().join("vdf_lookup_table.csv"),
            &config,
            None,
            &output_path("never_written.csv"),
        );
        assert!(matches!(result, Err(VdfAppError::ReadError { .. })));
    }
}
