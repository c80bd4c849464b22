use crate::{
    compare::{compare_strings, Difference},
    error::CheckError,
    pe::parser::read_version_resource as read_pe_version,
    structs::version::{VersionResource, VersionStrings},
};
use log::{error, info};

/// Outcome of checking one executable
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub resource: VersionResource,
    pub differences: Vec<Difference>,
}

impl CheckReport {
    pub fn is_match(&self) -> bool {
        self.differences.is_empty()
    }

    /// Strings read from the first string table
    pub fn strings(&self) -> &VersionStrings {
        &self.resource.string_table.strings
    }
}

/// Read the version resource of the `PE` file at provided path
pub fn read_version_resource(path: &str) -> Result<VersionResource, CheckError> {
    match read_pe_version(path) {
        Ok(result) => {
            if let Some(fixed) = &result.fixed {
                info!(
                    "[checker] {path} file version {} product version {}",
                    fixed.file_version_string(),
                    fixed.product_version_string()
                );
            }
            info!(
                "[checker] {path} string table {} (language {:#06x}, codepage {})",
                result.string_table.key, result.string_table.language, result.string_table.codepage
            );
            Ok(result)
        }
        Err(err) => {
            error!("[checker] Could not read version resource from {path}: {err:?}");
            Err(CheckError::from(err))
        }
    }
}

/// Read the first version string table of the `PE` file at provided path
pub fn read_version_strings(path: &str) -> Result<VersionStrings, CheckError> {
    let resource = read_version_resource(path)?;
    Ok(resource.string_table.strings)
}

/// Read the version strings and compare them against the expected strings
pub fn check_version_strings(
    path: &str,
    expected: &VersionStrings,
) -> Result<CheckReport, CheckError> {
    let resource = read_version_resource(path)?;
    let differences = compare_strings(expected, &resource.string_table.strings);
    if !differences.is_empty() {
        info!(
            "[checker] {path} has {} version string differences",
            differences.len()
        );
    }

    Ok(CheckReport {
        resource,
        differences,
    })
}

#[cfg(test)]
mod tests {
    use super::{check_version_strings, read_version_resource, read_version_strings};
    use crate::{
        compare::Difference, error::CheckError, expected::load_expected,
        expected::ExpectedSource,
    };
    use std::path::PathBuf;

    fn test_file(name: &str) -> String {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/windows/pe");
        test_location.push(name);
        test_location.display().to_string()
    }

    #[test]
    fn test_check_version_strings() {
        let expected = load_expected(&ExpectedSource::Builtin).unwrap();
        let report = check_version_strings(&test_file("version.exe"), &expected).unwrap();

        assert!(report.is_match());
        assert_eq!(report.strings(), &expected);
        assert_eq!(
            report.strings().to_string(),
            "{b\"CompanyName\": b\"nabijaczleweli\", b\"ProductName\": b\"rust-embed-resource/example/version\", b\"ProductVersion\": b\"2.3.0\"}"
        );
    }

    #[test]
    fn test_check_version_strings_altered() {
        let expected = load_expected(&ExpectedSource::Builtin).unwrap();
        let report = check_version_strings(&test_file("version_altered.exe"), &expected).unwrap();

        assert!(!report.is_match());
        assert_eq!(
            report.differences,
            vec![Difference::Changed {
                key: b"ProductVersion".to_vec(),
                expected: b"2.3.0".to_vec(),
                actual: b"2.3.1".to_vec(),
            }]
        );
        assert_eq!(
            report.resource.fixed.unwrap().product_version_string(),
            "2.3.1.0"
        );
    }

    #[test]
    fn test_check_version_strings_extra() {
        let expected = load_expected(&ExpectedSource::Builtin).unwrap();
        let report = check_version_strings(&test_file("version_extra.exe"), &expected).unwrap();

        assert_eq!(report.differences.len(), 1);
        assert!(matches!(
            report.differences[0],
            Difference::Unexpected { .. }
        ));
    }

    #[test]
    fn test_read_version_resource_errors() {
        assert_eq!(
            read_version_resource(&test_file("not_pe.bin")).unwrap_err(),
            CheckError::NotPe
        );
        assert_eq!(
            read_version_resource(&test_file("manifest_only.exe")).unwrap_err(),
            CheckError::NoVersionInfo
        );
        assert_eq!(
            read_version_resource(&test_file("no_string_table.exe")).unwrap_err(),
            CheckError::NoStringTable
        );
        assert!(read_version_resource(&test_file("no_resources.exe"))
            .unwrap_err()
            .is_structural());
    }

    #[test]
    fn test_read_version_strings_idempotent() {
        let first = read_version_strings(&test_file("version.exe")).unwrap();
        let second = read_version_strings(&test_file("version.exe")).unwrap();
        assert_eq!(first, second);
    }
}
