use crate::{
    error::CheckError,
    filesystem::files::read_text_file,
    structs::version::VersionStrings,
};
use config::{builtin_expected, parse_expected_toml};
use error::ExpectedError;
use log::{error, info};
use rc::parse_resource_script;

mod config;
pub(crate) mod error;
mod rc;

/// Where the reference version strings come from
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedSource {
    /// Strings of the example `version.rc`
    Builtin,
    /// TOML file with a `[strings]` table
    Toml(String),
    /// Resource script (`.rc`) that was compiled into the binary
    ResourceScript(String),
}

/// Load the expected version strings
pub fn load_expected(source: &ExpectedSource) -> Result<VersionStrings, CheckError> {
    let result = match source {
        ExpectedSource::Builtin => Ok(builtin_expected()),
        ExpectedSource::Toml(path) => read_source(path).and_then(|data| parse_expected_toml(&data)),
        ExpectedSource::ResourceScript(path) => {
            read_source(path).and_then(|data| parse_resource_script(&data))
        }
    };

    match result {
        Ok(strings) => {
            info!(
                "[expected] Loaded {} expected strings from {source:?}",
                strings.len()
            );
            Ok(strings)
        }
        Err(ExpectedError::ReadFile) => Err(CheckError::ReadExpected),
        Err(err) => {
            error!("[expected] Could not load expected strings from {source:?}: {err:?}");
            Err(CheckError::BadExpected)
        }
    }
}

fn read_source(path: &str) -> Result<String, ExpectedError> {
    match read_text_file(path) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[expected] Could not read {path}: {err:?}");
            Err(ExpectedError::ReadFile)
        }
    }
}
