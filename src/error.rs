/// Error type
#[derive(Debug)]
pub enum Error {
    /// A calculation name that is not one of the supported seven.
    UnknownCalculation(String),

    /// A timezone string that does not name an IANA time zone.
    InvalidTimeZone(String),

    /// A bucket size of zero minutes.
    InvalidBucketSize(u32),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCalculation(name) => {
                write!(f, "unknown calculation {name:?}")
            }
            Self::InvalidTimeZone(name) => {
                write!(f, "invalid time zone {name:?}")
            }
            Self::InvalidBucketSize(minutes) => {
                write!(f, "invalid bucket size: {minutes} minutes")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
