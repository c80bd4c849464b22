use super::error::PeError;
use crate::{
    structs::version::{FixedFileInfo, StringTable, VersionResource, VersionStrings},
    utils::strings::utf16_to_bytes,
};
use log::{error, warn};
use pelite::{
    image::{VS_FIXEDFILEINFO, VS_FIXEDFILEINFO_SIGNATURE, VS_VERSION},
    resources::version_info::{Language, VersionInfo, Visit},
};

const VERSION_INFO_KEY: &str = "VS_VERSION_INFO";
const STRING_FILE_INFO_KEY: &str = "StringFileInfo";

/// Keeps the first string table of the first `StringFileInfo` block, in resource order
#[derive(Debug, Default)]
struct FirstStringTable<'a> {
    root_key: Option<&'a [u16]>,
    fixed: Option<&'a VS_FIXEDFILEINFO>,
    has_string_file_info: bool,
    table_key: Option<&'a [u16]>,
    strings: Vec<(&'a [u16], &'a [u16])>,
}

impl<'a> Visit<'a> for FirstStringTable<'a> {
    fn version_info(&mut self, key: &'a [u16], fixed: Option<&'a VS_FIXEDFILEINFO>) -> bool {
        self.root_key = Some(key);
        self.fixed = fixed;
        key_is(key, VERSION_INFO_KEY)
    }

    fn file_info(&mut self, key: &'a [u16]) -> bool {
        // VarFileInfo and any later StringFileInfo are skipped
        if self.has_string_file_info || !key_is(key, STRING_FILE_INFO_KEY) {
            return false;
        }
        self.has_string_file_info = true;
        true
    }

    fn string_table(&mut self, lang: &'a [u16]) -> bool {
        if self.table_key.is_some() {
            return false;
        }
        self.table_key = Some(lang);
        true
    }

    fn string(&mut self, key: &'a [u16], value: &'a [u16]) {
        self.strings.push((key, value));
    }
}

fn key_is(key: &[u16], name: &str) -> bool {
    key.iter().copied().eq(name.encode_utf16())
}

/// Collect the fixed file info and first string table from `VS_VERSIONINFO`
pub(crate) fn parse_version_info(info: VersionInfo<'_>) -> Result<VersionResource, PeError> {
    let mut visitor = FirstStringTable::default();
    info.visit(&mut visitor);

    let root_key = match visitor.root_key {
        Some(result) => result,
        None => {
            error!("[pe] Could not parse VS_VERSIONINFO block");
            return Err(PeError::BadVersionInfo);
        }
    };
    if !key_is(root_key, VERSION_INFO_KEY) {
        error!(
            "[pe] Unexpected version resource key: {}",
            String::from_utf16_lossy(root_key)
        );
        return Err(PeError::BadVersionInfo);
    }

    let fixed = visitor.fixed.and_then(fixed_file_info);
    if fixed.is_none() {
        warn!("[pe] Version resource has no valid VS_FIXEDFILEINFO");
    }

    if !visitor.has_string_file_info {
        error!("[pe] Version resource has no StringFileInfo block");
        return Err(PeError::NoStringFileInfo);
    }
    let table_key = match visitor.table_key {
        Some(result) => result,
        None => {
            error!("[pe] StringFileInfo has no string table");
            return Err(PeError::NoStringTable);
        }
    };

    let string_table = string_table(table_key, &visitor.strings)?;
    Ok(VersionResource {
        fixed,
        string_table,
    })
}

/// Decode the collected `String` entries of a string table
fn string_table(table_key: &[u16], entries: &[(&[u16], &[u16])]) -> Result<StringTable, PeError> {
    let key = String::from_utf16_lossy(table_key);
    // Block key is 8 hex digits: language then codepage. Ex: 040904b0
    let (language, codepage) = match Language::parse(table_key) {
        Ok(result) => (result.lang_id, result.charset_id),
        Err(_) => {
            warn!("[pe] String table key {key} is not a language/codepage pair");
            (0, 0)
        }
    };

    let mut strings = VersionStrings::new();
    for (name, value) in entries {
        let name_bytes = match utf16_to_bytes(name) {
            Ok(result) => result,
            Err(err) => {
                error!("[pe] Could not decode version string name: {err:?}");
                return Err(PeError::BadVersionInfo);
            }
        };

        // Resource compilers disagree on wValueLength for strings, so read up to the NUL
        let value_bytes = match utf16_to_bytes(value) {
            Ok(result) => result,
            Err(err) => {
                error!(
                    "[pe] Could not decode version string value for {}: {err:?}",
                    String::from_utf16_lossy(name)
                );
                return Err(PeError::BadVersionInfo);
            }
        };
        strings.insert(&name_bytes, &value_bytes);
    }

    Ok(StringTable {
        key,
        language,
        codepage,
        strings,
    })
}

fn fixed_file_info(fixed: &VS_FIXEDFILEINFO) -> Option<FixedFileInfo> {
    if fixed.dwSignature != VS_FIXEDFILEINFO_SIGNATURE {
        warn!(
            "[pe] Unexpected VS_FIXEDFILEINFO signature: {:#x}",
            fixed.dwSignature
        );
        return None;
    }

    Some(FixedFileInfo {
        file_version: split_version(&fixed.dwFileVersion),
        product_version: split_version(&fixed.dwProductVersion),
        file_flags: fixed.dwFileFlags & fixed.dwFileFlagsMask,
        file_os: fixed.dwFileOS,
        file_type: fixed.dwFileType,
    })
}

/// Order as written in a resource script: major, minor, patch, build
fn split_version(version: &VS_VERSION) -> [u16; 4] {
    [version.Major, version.Minor, version.Patch, version.Build]
}
