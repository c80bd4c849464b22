use crate::utils::strings::escape_bytes;
use std::{collections::BTreeMap, fmt};

/// Version resource string table. Field names and values are kept as raw bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionStrings {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl VersionStrings {
    pub fn new() -> VersionStrings {
        VersionStrings {
            entries: BTreeMap::new(),
        }
    }

    /// Add a field. A repeated field name keeps the first value, like the string table lookup on Windows
    pub fn insert(&mut self, key: &[u8], value: &[u8]) {
        if self.entries.contains_key(key) {
            return;
        }
        self.entries.insert(key.to_vec(), value.to_vec());
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in byte order
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_slice(), value.as_slice()))
    }
}

impl<K: AsRef<[u8]>, V: AsRef<[u8]>> FromIterator<(K, V)> for VersionStrings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut strings = VersionStrings::new();
        for (key, value) in iter {
            strings.insert(key.as_ref(), value.as_ref());
        }
        strings
    }
}

/// Entries print sorted by key, not in the order of the string table
impl fmt::Display for VersionStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "b\"{}\": b\"{}\"", escape_bytes(key), escape_bytes(value))?;
        }
        write!(f, "}}")
    }
}

/// Numeric versions from `VS_FIXEDFILEINFO`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFileInfo {
    pub file_version: [u16; 4],
    pub product_version: [u16; 4],
    pub file_flags: u32,
    pub file_os: u32,
    pub file_type: u32,
}

impl FixedFileInfo {
    pub fn file_version_string(&self) -> String {
        dotted(&self.file_version)
    }

    pub fn product_version_string(&self) -> String {
        dotted(&self.product_version)
    }
}

fn dotted(version: &[u16; 4]) -> String {
    format!(
        "{}.{}.{}.{}",
        version[0], version[1], version[2], version[3]
    )
}

/// A single language/codepage string table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    /// Raw block name. Ex: `040904b0`
    pub key: String,
    pub language: u16,
    pub codepage: u16,
    pub strings: VersionStrings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResource {
    pub fixed: Option<FixedFileInfo>,
    pub string_table: StringTable,
}
