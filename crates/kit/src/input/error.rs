use core::ops::Range;

use bstr::BString;
use thiserror::Error;

/// The kind of error raised while processing input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("not an integer or integer overflow `{0}`")]
    NotInteger(Box<str>),
    #[error("not utf-8")]
    NotUtf8,
    #[error("expected tuple of length `{0}`")]
    ExpectedTuple(usize),
    #[error("unexpected end of line")]
    UnexpectedEol,
    #[error("trailing input `{0}`")]
    TrailingInput(BString),
    #[error("{0}")]
    Custom(anyhow::Error),
}

/// Error raised through input processing.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct InputError {
    span: Range<usize>,
    kind: ErrorKind,
}

impl InputError {
    /// Construct a new input error.
    #[inline]
    pub fn new(span: Range<usize>, kind: ErrorKind) -> Self {
        Self { span, kind }
    }

    /// Construct an error out of a custom rejection.
    #[inline]
    pub fn custom(span: Range<usize>, error: anyhow::Error) -> Self {
        Self::new(span, ErrorKind::Custom(error))
    }

    /// The byte span in the original input the error refers to.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}
