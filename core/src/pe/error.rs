use std::fmt;

#[derive(Debug, PartialEq)]
pub(crate) enum PeError {
    ReadFile,
    BadMagic,
    BadHeaders,
    NoResources,
    NoVersionInfo,
    BadVersionInfo,
    NoStringFileInfo,
    NoStringTable,
}

impl std::error::Error for PeError {}

impl fmt::Display for PeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeError::ReadFile => write!(f, "Could not read PE file"),
            PeError::BadMagic => write!(f, "Not a PE file (missing MZ magic)"),
            PeError::BadHeaders => write!(f, "Invalid PE headers"),
            PeError::NoResources => write!(f, "PE file has no resource directory"),
            PeError::NoVersionInfo => write!(f, "PE file has no version resource"),
            PeError::BadVersionInfo => write!(f, "Malformed version resource"),
            PeError::NoStringFileInfo => write!(f, "Version resource has no StringFileInfo"),
            PeError::NoStringTable => write!(f, "StringFileInfo has no string table"),
        }
    }
}
