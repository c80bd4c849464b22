use super::{error::PeError, version::parse_version_info};
use crate::{
    filesystem::files::{file_reader, file_too_large},
    structs::version::VersionResource,
};
use log::{debug, error};
use pelite::{resources::FindError, PeFile};
use std::io::{Read, Seek, SeekFrom};

/// Read a `PE` file at provided path and parse the first version resource
pub(crate) fn read_version_resource(path: &str) -> Result<VersionResource, PeError> {
    let mut reader = match file_reader(path) {
        Ok(result) => result,
        Err(err) => {
            error!("[pe] Could not get reader for {path}: {err:?}");
            return Err(PeError::ReadFile);
        }
    };

    let mut buff = [0; 2];
    if let Err(err) = reader.read_exact(&mut buff) {
        error!("[pe] Could not read magic from {path}: {err:?}");
        return Err(PeError::BadMagic);
    }

    let mz = [77, 90];
    if buff != mz {
        error!("[pe] {path} is not a PE file, magic: {buff:?}");
        return Err(PeError::BadMagic);
    }

    if let Err(err) = reader.seek(SeekFrom::Start(0)) {
        error!("[pe] Could not seek to start of {path}: {err:?}");
        return Err(PeError::ReadFile);
    }

    if file_too_large(path) {
        error!("[pe] {path} is larger than 2GB");
        return Err(PeError::ReadFile);
    }

    let mut data = Vec::new();

    // Allow File read_to_end because we partially read the file above to check for Magic Header
    #[allow(clippy::verbose_file_reads)]
    let data_result = reader.read_to_end(&mut data);
    if let Err(err) = data_result {
        error!("[pe] Could not read {path}: {err:?}");
        return Err(PeError::ReadFile);
    }

    debug!("[pe] Read {} bytes from {path}", data.len());
    version_resource(&data)
}

/// Parse the resource directory of `PE` data and decode its version resource
pub(crate) fn version_resource(data: &[u8]) -> Result<VersionResource, PeError> {
    let pe = match PeFile::from_bytes(data) {
        Ok(result) => result,
        Err(err) => {
            error!("[pe] Could not parse PE headers: {err:?}");
            return Err(PeError::BadHeaders);
        }
    };

    let resources = match pe.resources() {
        Ok(result) => result,
        Err(err) => {
            error!("[pe] Could not get resource directory: {err:?}");
            return Err(PeError::NoResources);
        }
    };

    let version_info = match resources.version_info() {
        Ok(result) => result,
        Err(FindError::NotFound) => {
            error!("[pe] No RT_VERSION resource found");
            return Err(PeError::NoVersionInfo);
        }
        Err(err) => {
            error!("[pe] Could not get version resource: {err:?}");
            return Err(PeError::BadVersionInfo);
        }
    };

    parse_version_info(version_info)
}

#[cfg(test)]
mod tests {
    use super::{read_version_resource, version_resource};
    use crate::pe::error::PeError;
    use std::{fs::read, path::PathBuf};

    fn test_file(name: &str) -> String {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/windows/pe");
        test_location.push(name);
        test_location.display().to_string()
    }

    #[test]
    fn test_read_version_resource() {
        let result = read_version_resource(&test_file("version.exe")).unwrap();
        let strings = &result.string_table.strings;

        assert_eq!(strings.len(), 3);
        assert_eq!(strings.get(b"CompanyName").unwrap(), b"nabijaczleweli");
        assert_eq!(
            strings.get(b"ProductName").unwrap(),
            b"rust-embed-resource/example/version"
        );
        assert_eq!(strings.get(b"ProductVersion").unwrap(), b"2.3.0");

        let fixed = result.fixed.unwrap();
        assert_eq!(fixed.file_version, [2, 3, 0, 0]);
        assert_eq!(fixed.product_version, [2, 3, 0, 0]);
        assert_eq!(fixed.file_os, 0x40004);
        assert_eq!(fixed.file_type, 1);

        assert_eq!(result.string_table.key, "040904b0");
        assert_eq!(result.string_table.language, 0x0409);
        assert_eq!(result.string_table.codepage, 1200);
    }

    #[test]
    fn test_version_resource() {
        let data = read(test_file("version_altered.exe")).unwrap();
        let result = version_resource(&data).unwrap();

        assert_eq!(
            result.string_table.strings.get(b"ProductVersion").unwrap(),
            b"2.3.1"
        );
        assert_eq!(result.fixed.unwrap().product_version, [2, 3, 1, 0]);
    }

    #[test]
    fn test_read_version_resource_first_table() {
        let result = read_version_resource(&test_file("version_multi.exe")).unwrap();

        assert_eq!(result.string_table.key, "040904b0");
        assert_eq!(
            result.string_table.strings.get(b"ProductName").unwrap(),
            b"rust-embed-resource/example/version"
        );
    }

    #[test]
    fn test_read_version_resource_non_ascii() {
        let result = read_version_resource(&test_file("version_polish.exe")).unwrap();

        assert_eq!(result.string_table.language, 0x0415);
        assert_eq!(
            result.string_table.strings.get(b"ProductName").unwrap(),
            "przykład".as_bytes()
        );
    }

    #[test]
    fn test_read_version_resource_extra_key() {
        let result = read_version_resource(&test_file("version_extra.exe")).unwrap();

        assert_eq!(result.string_table.strings.len(), 4);
        assert_eq!(
            result.string_table.strings.get(b"FileDescription").unwrap(),
            b"Version resource example"
        );
    }

    #[test]
    #[should_panic(expected = "BadMagic")]
    fn test_read_version_resource_not_pe() {
        let _ = read_version_resource(&test_file("not_pe.bin")).unwrap();
    }

    #[test]
    #[should_panic(expected = "ReadFile")]
    fn test_read_version_resource_missing_file() {
        let _ = read_version_resource(&test_file("does_not_exist.exe")).unwrap();
    }

    #[test]
    #[should_panic(expected = "NoVersionInfo")]
    fn test_read_version_resource_manifest_only() {
        let _ = read_version_resource(&test_file("manifest_only.exe")).unwrap();
    }

    #[test]
    #[should_panic(expected = "NoStringFileInfo")]
    fn test_read_version_resource_no_string_file_info() {
        let _ = read_version_resource(&test_file("no_string_file_info.exe")).unwrap();
    }

    #[test]
    #[should_panic(expected = "NoStringTable")]
    fn test_read_version_resource_no_string_table() {
        let _ = read_version_resource(&test_file("no_string_table.exe")).unwrap();
    }

    #[test]
    #[should_panic(expected = "BadVersionInfo")]
    fn test_read_version_resource_corrupt() {
        let _ = read_version_resource(&test_file("corrupt_version.exe")).unwrap();
    }

    #[test]
    fn test_read_version_resource_no_resources() {
        let result = read_version_resource(&test_file("no_resources.exe"));
        assert!(result.is_err());
    }

    #[test]
    #[should_panic(expected = "BadHeaders")]
    fn test_version_resource_truncated() {
        let data = read(test_file("version.exe")).unwrap();
        let _ = version_resource(&data[0..0x60]).unwrap();
    }

    #[test]
    fn test_read_version_resource_idempotent() {
        let first = read_version_resource(&test_file("version.exe")).unwrap();
        let second = read_version_resource(&test_file("version.exe")).unwrap();
        assert_eq!(first, second);
    }
}
