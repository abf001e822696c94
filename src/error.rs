//! Error types.

use crate::prelude::*;
use crate::config::Platform;
use crate::kind::Kind;

/// Represents the various possible parse error-kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that is not a digit of the requested radix.
    InvalidDigit(char),
}

/// An error reported while parsing a numeric word literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: usize) -> ParseError {
        Self { kind, position }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &ParseErrorKind {
        &self.kind
    }
    /// Byte offset of the offending character within the input.
    pub fn position(self: &Self) -> usize {
        self.position
    }
}

impl Display for ParseError {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::InvalidDigit(c) => write!(f, "Invalid digit '{}' at position {}", c, self.position),
        }
    }
}

impl std::error::Error for ParseError { }

pub type ParseResult<T = ()> = Result<T, ParseError>;

/// Represents the various possible memory access error-kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryErrorKind {
    /// Bulk element copies are not defined for this kind.
    InvalidKind(Kind),
}

/// An error reported by a checked memory operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryError {
    kind: MemoryErrorKind,
}

impl MemoryError {
    pub(crate) fn new(kind: MemoryErrorKind) -> MemoryError {
        Self { kind }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &MemoryErrorKind {
        &self.kind
    }
}

impl Display for MemoryError {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MemoryErrorKind::InvalidKind(kind) => write!(f, "Invalid element kind {} for bulk copy", kind),
        }
    }
}

impl std::error::Error for MemoryError { }

pub type MemoryResult<T = ()> = Result<T, MemoryError>;

/// Represents the various possible configuration error-kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// The platform was already installed or queried.
    AlreadyInitialized,
    /// The requested platform does not match the model the crate was built for.
    ModelMismatch { requested: Platform, native: Platform },
}

/// An error reported while installing the platform configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    kind: ConfigErrorKind,
}

impl ConfigError {
    pub(crate) fn new(kind: ConfigErrorKind) -> ConfigError {
        Self { kind }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &ConfigErrorKind {
        &self.kind
    }
}

impl Display for ConfigError {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConfigErrorKind::AlreadyInitialized => write!(f, "Platform already initialized"),
            ConfigErrorKind::ModelMismatch { requested, native } => write!(
                f, "Requested {:?} {} words but the crate was built for {:?} {} words",
                requested.mode, requested.word_width, native.mode, native.word_width
            ),
        }
    }
}

impl std::error::Error for ConfigError { }

pub type ConfigResult<T = ()> = Result<T, ConfigError>;
