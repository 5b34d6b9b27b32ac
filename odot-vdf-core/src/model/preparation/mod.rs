//! computes the user values the ODOT curve reads (mid-link capacity,
//! uncongested signal delay and intersection capacity) from flat link rows.

mod approach_lanes;
mod control_category;
mod error;
mod intersecting_facility;
mod intersection_lookup;
mod link_record;
pub mod prepare_ops;
mod preparation_config;
mod time_period;

pub use approach_lanes::{ApproachLanes, Movement};
pub use control_category::{ControlCategory, ControlType};
pub use error::PreparationError;
pub use intersecting_facility::intersecting_facility_class;
pub use intersection_lookup::IntersectionLookup;
pub use link_record::{LinkRecord, PreparedLink};
pub use preparation_config::{FacilityClassCapacity, PreparationConfig, TimePeriodFactors};
pub use time_period::TimePeriod;
