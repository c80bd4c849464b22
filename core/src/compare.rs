use crate::{structs::version::VersionStrings, utils::strings::escape_bytes};
use std::{collections::BTreeSet, fmt};

/// A single way the parsed strings differ from the expected strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// Expected field is not in the binary
    Missing { key: Vec<u8>, expected: Vec<u8> },
    /// Field in the binary that was not expected
    Unexpected { key: Vec<u8>, actual: Vec<u8> },
    Changed {
        key: Vec<u8>,
        expected: Vec<u8>,
        actual: Vec<u8>,
    },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Missing { key, expected } => write!(
                f,
                "missing b\"{}\": expected b\"{}\"",
                escape_bytes(key),
                escape_bytes(expected)
            ),
            Difference::Unexpected { key, actual } => write!(
                f,
                "unexpected b\"{}\": found b\"{}\"",
                escape_bytes(key),
                escape_bytes(actual)
            ),
            Difference::Changed {
                key,
                expected,
                actual,
            } => write!(
                f,
                "changed b\"{}\": expected b\"{}\", found b\"{}\"",
                escape_bytes(key),
                escape_bytes(expected),
                escape_bytes(actual)
            ),
        }
    }
}

/// Compare two string tables. An empty result means they are equal
pub fn compare_strings(expected: &VersionStrings, actual: &VersionStrings) -> Vec<Difference> {
    let keys: BTreeSet<&[u8]> = expected.keys().chain(actual.keys()).collect();
    let mut differences = Vec::new();

    for key in keys {
        match (expected.get(key), actual.get(key)) {
            (Some(expected_value), Some(actual_value)) => {
                if expected_value != actual_value {
                    differences.push(Difference::Changed {
                        key: key.to_vec(),
                        expected: expected_value.to_vec(),
                        actual: actual_value.to_vec(),
                    });
                }
            }
            (Some(expected_value), None) => differences.push(Difference::Missing {
                key: key.to_vec(),
                expected: expected_value.to_vec(),
            }),
            (None, Some(actual_value)) => differences.push(Difference::Unexpected {
                key: key.to_vec(),
                actual: actual_value.to_vec(),
            }),
            (None, None) => {}
        }
    }

    differences
}

#[cfg(test)]
mod tests {
    use super::{compare_strings, Difference};
    use crate::structs::version::VersionStrings;

    fn strings(entries: &[(&str, &str)]) -> VersionStrings {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_compare_strings_equal() {
        let expected = strings(&[("CompanyName", "nabijaczleweli"), ("ProductVersion", "2.3.0")]);
        let actual = strings(&[("ProductVersion", "2.3.0"), ("CompanyName", "nabijaczleweli")]);

        assert!(compare_strings(&expected, &actual).is_empty());
    }

    #[test]
    fn test_compare_strings_differences() {
        let expected = strings(&[
            ("CompanyName", "nabijaczleweli"),
            ("ProductName", "rust-embed-resource/example/version"),
            ("ProductVersion", "2.3.0"),
        ]);
        let actual = strings(&[
            ("CompanyName", "nabijaczleweli"),
            ("FileDescription", "example"),
            ("ProductVersion", "2.3.1"),
        ]);

        let results = compare_strings(&expected, &actual);
        assert_eq!(
            results,
            vec![
                Difference::Unexpected {
                    key: b"FileDescription".to_vec(),
                    actual: b"example".to_vec(),
                },
                Difference::Missing {
                    key: b"ProductName".to_vec(),
                    expected: b"rust-embed-resource/example/version".to_vec(),
                },
                Difference::Changed {
                    key: b"ProductVersion".to_vec(),
                    expected: b"2.3.0".to_vec(),
                    actual: b"2.3.1".to_vec(),
                },
            ]
        );
    }

    #[test]
    fn test_difference_display() {
        let difference = Difference::Changed {
            key: b"ProductVersion".to_vec(),
            expected: b"2.3.0".to_vec(),
            actual: b"2.3.1".to_vec(),
        };
        assert_eq!(
            difference.to_string(),
            "changed b\"ProductVersion\": expected b\"2.3.0\", found b\"2.3.1\""
        );
    }
}
