use std::fmt;

#[derive(Debug, PartialEq)]
pub(crate) enum ExpectedError {
    ReadFile,
    BadToml,
    BadResourceScript,
    NoStrings,
}

impl std::error::Error for ExpectedError {}

impl fmt::Display for ExpectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedError::ReadFile => write!(f, "Could not read expected strings file"),
            ExpectedError::BadToml => write!(f, "Failed to parse TOML data"),
            ExpectedError::BadResourceScript => write!(f, "Failed to parse resource script"),
            ExpectedError::NoStrings => write!(f, "No expected version strings provided"),
        }
    }
}
