use super::error::ExpectedError;
use crate::structs::version::VersionStrings;
use log::error;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize, Debug)]
pub(crate) struct ExpectedToml {
    pub(crate) strings: BTreeMap<String, String>,
}

/// Version strings embedded by the example `version.rc` resource script
pub(crate) fn builtin_expected() -> VersionStrings {
    [
        ("CompanyName", "nabijaczleweli"),
        ("ProductName", "rust-embed-resource/example/version"),
        ("ProductVersion", "2.3.0"),
    ]
    .into_iter()
    .collect()
}

/// Parse a TOML file with a `[strings]` table of expected version strings
pub(crate) fn parse_expected_toml(toml_data: &str) -> Result<VersionStrings, ExpectedError> {
    let expected: ExpectedToml = match toml::from_str(toml_data) {
        Ok(result) => result,
        Err(err) => {
            error!("[expected] Failed to parse expected strings TOML: {err:?}");
            return Err(ExpectedError::BadToml);
        }
    };

    if expected.strings.is_empty() {
        error!("[expected] TOML [strings] table is empty");
        return Err(ExpectedError::NoStrings);
    }

    Ok(expected.strings.iter().collect())
}
