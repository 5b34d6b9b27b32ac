use std::path::Path;

use odot_vdf_core::model::{
    congestion_adjustment, mid_link_time, signal_delay, CurveParameters, LinkState, OdotVdf,
    TrafficVolume, UserValues, VdfInput, VolumeDelayFunction,
};
use serde::{Deserialize, Serialize};

use crate::{
    app::{CurveConfig, VdfAppConfig, VdfAppError},
    util::{fs, TimeUnit},
};

/// a link to evaluate. the user values are read as the host would store
/// them, so the output of `odot-vdf prepare` can be used with free-flow
/// time and volume columns added.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EvaluationRecord {
    pub from_node: i64,
    pub to_node: i64,
    pub plan_no: u32,
    /// free-flow travel time in seconds
    pub free_flow_time: f64,
    /// volume in passenger car units
    pub volume: f64,
    pub uval1: i32,
    pub uval2: i32,
    pub uval3: i32,
}

/// travel time of a link and its components. the components are empty for
/// impassable links.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EvaluationRow {
    pub from_node: i64,
    pub to_node: i64,
    pub plan_no: u32,
    pub volume: f64,
    pub mid_link_time: Option<f64>,
    pub signal_delay: Option<f64>,
    pub congestion_adjustment: Option<f64>,
    pub travel_time: f64,
}

impl EvaluationRecord {
    pub fn vdf_input(&self, params: CurveParameters) -> VdfInput {
        VdfInput {
            link: LinkState {
                link_type: self.plan_no as i32,
                free_flow_time: self.free_flow_time,
                ..Default::default()
            },
            volume: TrafficVolume {
                pcu_volume: self.volume,
                base_volume: 0.0,
            },
            user: UserValues::new(self.uval1, self.uval2, self.uval3),
            params,
            ..Default::default()
        }
    }
}

/// evaluates one link, converting times from seconds into `unit`.
pub fn evaluate(record: &EvaluationRecord, curves: &CurveConfig, unit: TimeUnit) -> EvaluationRow {
    let params: CurveParameters = curves.coefficients(record.plan_no).into();
    let input = record.vdf_input(params);
    let travel_time = OdotVdf.calc(&input);
    let passable = record.uval1 > 0;
    let component = |seconds: f64| passable.then(|| unit.convert_seconds(seconds));
    EvaluationRow {
        from_node: record.from_node,
        to_node: record.to_node,
        plan_no: record.plan_no,
        volume: record.volume,
        mid_link_time: component(mid_link_time(
            record.free_flow_time,
            record.volume,
            record.uval1 as f64,
            params.a,
            params.b,
        )),
        signal_delay: component(signal_delay(record.uval2)),
        congestion_adjustment: passable.then(|| {
            congestion_adjustment(record.volume, record.uval3 as f64, params.a2, params.b2)
        }),
        travel_time: if passable {
            unit.convert_seconds(travel_time)
        } else {
            travel_time
        },
    }
}

/// runs `odot-vdf evaluate` over a link table, writing one row per link.
pub fn run(
    links_file: &Path,
    config: &VdfAppConfig,
    unit: TimeUnit,
    output_file: &Path,
) -> Result<(), VdfAppError> {
    let links: Vec<EvaluationRecord> = fs::read_csv(links_file)?;
    let rows: Vec<EvaluationRow> = links
        .iter()
        .map(|link| evaluate(link, &config.curves, unit))
        .collect();
    let impassable = rows.iter().filter(|r| r.mid_link_time.is_none()).count();
    if impassable > 0 {
        log::info!("{impassable} of {} links have no mid-link capacity", rows.len());
    }
    fs::write_csv_file(rows, output_file, "write travel times")
}
