use super::error::FileSystemError;
use log::error;
use std::{
    fs::{metadata, read_to_string, File},
    path::Path,
};

/// Check if path is a file
pub(crate) fn is_file(path: &str) -> bool {
    let file = Path::new(path);
    if file.is_file() {
        return true;
    }
    false
}

/// Read a text file that is less that 2GB in size
pub(crate) fn read_text_file(path: &str) -> Result<String, FileSystemError> {
    if file_too_large(path) {
        return Err(FileSystemError::LargeFile);
    }
    if !is_file(path) {
        return Err(FileSystemError::NotFile);
    }

    let read_result = read_to_string(path);
    match read_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[filesystem] Failed to read text file {path}: {err:?}");
            Err(FileSystemError::ReadFile)
        }
    }
}

/// Create a `File` object that can be used to read a file
pub(crate) fn file_reader(path: &str) -> Result<File, FileSystemError> {
    // Verify provided path is a file
    if !is_file(path) {
        return Err(FileSystemError::NotFile);
    }

    let read_result = File::open(path);
    let reader = match read_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to open file {path}: {err:?}");
            return Err(FileSystemError::OpenFile);
        }
    };

    Ok(reader)
}

/// Check if a provided file is larger than 2GB. Missing files report a size of zero
pub(crate) fn file_too_large(path: &str) -> bool {
    let size = match metadata(path) {
        Ok(result) => result.len(),
        Err(_err) => 0,
    };
    let max_size = 2147483648; // 2GB
    if size < max_size {
        return false;
    }
    true
}
