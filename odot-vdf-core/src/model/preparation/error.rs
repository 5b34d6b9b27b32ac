use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PreparationError {
    #[error("facility class {0} has no capacity configuration")]
    UnknownFacilityClass(u32),
    #[error("failure reading intersection lookup table from {path}: {message}")]
    InvalidLookupTable { path: PathBuf, message: String },
    #[error("link {from_node}-{to_node} is invalid: {message}")]
    InvalidLink {
        from_node: i64,
        to_node: i64,
        message: String,
    },
    #[error("unknown time period '{0}', expected one of ea, am, md, pm, ev")]
    UnknownTimePeriod(String),
}
