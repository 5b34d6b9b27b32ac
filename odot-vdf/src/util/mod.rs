pub mod fs;
mod time_unit;

pub use time_unit::TimeUnit;
