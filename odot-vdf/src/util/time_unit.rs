use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uom::si::{f64::Time, time};

/// unit for reporting travel times. the volume-delay function always
/// works in seconds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub fn convert_seconds(&self, seconds: f64) -> f64 {
        let t = Time::new::<time::second>(seconds);
        match self {
            TimeUnit::Seconds => t.get::<time::second>(),
            TimeUnit::Minutes => t.get::<time::minute>(),
            TimeUnit::Hours => t.get::<time::hour>(),
        }
    }
}
