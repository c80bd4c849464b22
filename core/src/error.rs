use crate::pe::error::PeError;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CheckError {
    ReadFile,
    NotPe,
    NoResources,
    NoVersionInfo,
    BadVersionInfo,
    NoStringFileInfo,
    NoStringTable,
    ReadExpected,
    BadExpected,
    LogFile,
}

impl CheckError {
    /// True when the checked file could not be parsed far enough to reach the string table
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CheckError::ReadFile
                | CheckError::NotPe
                | CheckError::NoResources
                | CheckError::NoVersionInfo
                | CheckError::BadVersionInfo
                | CheckError::NoStringFileInfo
                | CheckError::NoStringTable
        )
    }
}

impl std::error::Error for CheckError {}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::ReadFile => write!(f, "Could not read file"),
            CheckError::NotPe => write!(f, "Not a valid PE file"),
            CheckError::NoResources => write!(f, "No resource directory"),
            CheckError::NoVersionInfo => write!(f, "No version resource"),
            CheckError::BadVersionInfo => write!(f, "Malformed version resource"),
            CheckError::NoStringFileInfo => write!(f, "No StringFileInfo in version resource"),
            CheckError::NoStringTable => write!(f, "No string table in StringFileInfo"),
            CheckError::ReadExpected => write!(f, "Could not read expected strings"),
            CheckError::BadExpected => write!(f, "Could not parse expected strings"),
            CheckError::LogFile => write!(f, "Could not create log file"),
        }
    }
}

impl From<PeError> for CheckError {
    fn from(err: PeError) -> Self {
        match err {
            PeError::ReadFile => CheckError::ReadFile,
            PeError::BadMagic | PeError::BadHeaders => CheckError::NotPe,
            PeError::NoResources => CheckError::NoResources,
            PeError::NoVersionInfo => CheckError::NoVersionInfo,
            PeError::BadVersionInfo => CheckError::BadVersionInfo,
            PeError::NoStringFileInfo => CheckError::NoStringFileInfo,
            PeError::NoStringTable => CheckError::NoStringTable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CheckError;
    use crate::pe::error::PeError;

    #[test]
    fn test_is_structural() {
        assert!(CheckError::NotPe.is_structural());
        assert!(CheckError::NoStringTable.is_structural());
        assert!(!CheckError::BadExpected.is_structural());
        assert!(!CheckError::LogFile.is_structural());
    }

    #[test]
    fn test_from_pe_error() {
        assert_eq!(CheckError::from(PeError::BadMagic), CheckError::NotPe);
        assert_eq!(CheckError::from(PeError::BadHeaders), CheckError::NotPe);
        assert_eq!(
            CheckError::from(PeError::NoVersionInfo),
            CheckError::NoVersionInfo
        );
    }
}
