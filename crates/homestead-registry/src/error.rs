//! Error types for region naming and persistence.

use std::error::Error;
use std::fmt;
use std::io;

use homestead_core::RegionCoords;

/// A proposed region name was rejected.
///
/// Returned by [`RegionRegistry::name_region`](crate::RegionRegistry::name_region)
/// and [`RegionRegistry::rename_region`](crate::RegionRegistry::rename_region);
/// the registry is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionNameError {
    /// The name is empty.
    Empty,
    /// The name contains a whitespace character.
    ContainsWhitespace,
    /// The name contains something other than a letter or digit.
    InvalidCharacter {
        /// The first offending character.
        ch: char,
    },
    /// The name is longer than the configured maximum.
    TooLong {
        /// Length of the proposed name in characters.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
    /// Another region already uses this name (case-insensitive). Only
    /// `rename_region` reports this.
    NameTaken {
        /// The requested name.
        name: String,
        /// The region currently holding it.
        holder: RegionCoords,
    },
}

impl fmt::Display for RegionNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "region name is empty"),
            Self::ContainsWhitespace => write!(f, "region name contains whitespace"),
            Self::InvalidCharacter { ch } => {
                write!(f, "region name contains '{ch}'; only letters and digits are allowed")
            }
            Self::TooLong { len, max } => {
                write!(f, "region name is {len} characters, maximum is {max}")
            }
            Self::NameTaken { name, holder } => {
                write!(f, "region name '{name}' is already used by region {holder}")
            }
        }
    }
}

impl Error for RegionNameError {}

/// A region record could not be read, written or removed.
///
/// Never fatal: the registry logs it and carries on with the rest of
/// its records.
#[derive(Debug)]
pub enum StorageError {
    /// An I/O error from the backing store.
    Io(io::Error),
    /// A record key that cannot name a record (e.g. contains a path separator).
    InvalidKey {
        /// The offending key.
        key: String,
    },
    /// A record's payload is unusable.
    InvalidPayload {
        /// Key of the record.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidKey { key } => write!(f, "invalid record key '{key}'"),
            Self::InvalidPayload { key, reason } => {
                write!(f, "invalid payload in record '{key}': {reason}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
