use std::path::PathBuf;

use clap::{Parser, Subcommand};
use odot_vdf_core::model::{preparation::TimePeriod, OdotVdf, VdfMetadata};

use crate::{
    app::{
        curve::{self, CurveLink},
        evaluate, prepare, CurveCoefficients, VdfAppConfig, VdfAppError,
    },
    util::TimeUnit,
};

/// Command line tools for the ODOT volume-delay function: prepare link user
/// values, evaluate travel times and inspect curves outside of the host.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct VdfApp {
    #[command(subcommand)]
    pub op: VdfOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum VdfOperation {
    /// derive mid-link capacity, uncongested signal delay and intersection
    /// capacity for every link of a link table
    Prepare {
        /// CSV link table with to-node and turn attributes
        #[arg(short, long)]
        links: PathBuf,

        /// CSV intersection lookup table (PLANNO,VALUE,<facility classes>...)
        #[arg(long)]
        lookup: PathBuf,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        configuration_file: Option<PathBuf>,

        /// scale hourly capacities to this time period (ea, am, md, pm, ev)
        #[arg(short, long, value_parser = parse_time_period)]
        time_period: Option<TimePeriod>,

        /// CSV file to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// compute travel times for a table of links with user values,
    /// free-flow times and volumes
    Evaluate {
        #[arg(short, long)]
        links: PathBuf,

        #[arg(short, long)]
        configuration_file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = TimeUnit::Seconds)]
        time_unit: TimeUnit,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// tabulate the curve of one link over a range of volumes, written as CSV
    /// to stdout
    Curve {
        /// free-flow travel time in seconds
        #[arg(long)]
        free_flow_time: f64,

        #[arg(long)]
        mid_link_capacity: f64,

        /// uncongested signal delay in seconds
        #[arg(long, default_value_t = 0.0)]
        signal_delay: f64,

        #[arg(long, default_value_t = 0.0)]
        intersection_capacity: f64,

        #[arg(short, long, default_value_t = 0.15)]
        a: f64,

        #[arg(short, long, default_value_t = 4.0)]
        b: f64,

        #[arg(long, default_value_t = 0.15)]
        a2: f64,

        #[arg(long, default_value_t = 4.0)]
        b2: f64,

        /// largest volume to evaluate, defaults to twice the mid-link capacity
        #[arg(long)]
        max_volume: Option<f64>,

        #[arg(long, default_value_t = 20)]
        steps: usize,

        #[arg(long, value_enum, default_value_t = TimeUnit::Seconds)]
        time_unit: TimeUnit,
    },
    /// print the name, id, interface version and flags reported to the host
    Info,
    /// print the effective configuration as TOML
    Config {
        #[arg(short, long)]
        configuration_file: Option<PathBuf>,
    },
}

fn parse_time_period(s: &str) -> Result<TimePeriod, String> {
    s.parse::<TimePeriod>().map_err(|e| e.to_string())
}

impl VdfOperation {
    pub fn run(&self) -> Result<(), VdfAppError> {
        match self {
            VdfOperation::Prepare {
                links,
                lookup,
                configuration_file,
                time_period,
                output,
            } => {
                let config = VdfAppConfig::load(configuration_file.as_deref())?;
                prepare::run(links, lookup, &config, *time_period, output)
            }
            VdfOperation::Evaluate {
                links,
                configuration_file,
                time_unit,
                output,
            } => {
                let config = VdfAppConfig::load(configuration_file.as_deref())?;
                evaluate::run(links, &config, *time_unit, output)
            }
            VdfOperation::Curve {
                free_flow_time,
                mid_link_capacity,
                signal_delay,
                intersection_capacity,
                a,
                b,
                a2,
                b2,
                max_volume,
                steps,
                time_unit,
            } => {
                let link = CurveLink {
                    free_flow_time: *free_flow_time,
                    mid_link_capacity: *mid_link_capacity,
                    signal_delay: *signal_delay,
                    intersection_capacity: *intersection_capacity,
                    coefficients: CurveCoefficients {
                        a: *a,
                        b: *b,
                        a2: *a2,
                        b2: *b2,
                    },
                };
                let max_volume = max_volume.unwrap_or(2.0 * mid_link_capacity);
                curve::run(&link, max_volume, *steps, *time_unit, std::io::stdout().lock())
            }
            VdfOperation::Info => {
                let metadata = VdfMetadata::for_function(&OdotVdf);
                let json = serde_json::to_string_pretty(&metadata).map_err(|e| {
                    VdfAppError::InvalidUserInput(format!("failure serializing metadata: {e}"))
                })?;
                println!("{json}");
                Ok(())
            }
            VdfOperation::Config { configuration_file } => {
                let config = VdfAppConfig::load(configuration_file.as_deref())?;
                println!("{}", config.to_toml()?);
                Ok(())
            }
        }
    }
}
