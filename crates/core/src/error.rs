use std::error::Error as StdError;
use std::fmt::{self, Display};

use fitcoach_model::{ErrorKind as ModelErrorKind, ModelProviderError};

/// The stage of a turn that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The topic classification call failed.
    Classification,
    /// The coaching answer could not be generated, including after a
    /// fallback attempt.
    Generation,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Classification => write!(f, "Classification failed"),
            ErrorKind::Generation => write!(f, "Generation failed"),
        }
    }
}

/// Describes why a turn was aborted.
///
/// An aborted turn leaves the conversation history untouched.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Box<dyn ModelProviderError>,
}

impl Error {
    #[inline]
    pub(crate) fn classification(source: Box<dyn ModelProviderError>) -> Self {
        Self {
            kind: ErrorKind::Classification,
            source,
        }
    }

    #[inline]
    pub(crate) fn generation(source: Box<dyn ModelProviderError>) -> Self {
        Self {
            kind: ErrorKind::Generation,
            source,
        }
    }

    /// Returns the stage that failed.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the kind of the underlying model error.
    #[inline]
    pub fn model_error_kind(&self) -> ModelErrorKind {
        self.source.kind()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.source)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}
