//! Input parser.

mod error;
mod iter;

use core::fmt;
use core::ops::Range;
use std::str::from_utf8;

use bstr::BStr;

pub use self::error::{ErrorKind, InputError};
pub use self::iter::Lines;

pub(crate) type Result<T, E = InputError> = std::result::Result<T, E>;

pub(crate) const NL: u8 = b'\n';

/// Helper to parse input.
///
/// This is a cursor over borrowed data which remembers where in the original
/// input it is, so that errors can be reported with a position.
#[derive(Clone, Copy)]
pub struct Input<'a> {
    /// The remaining data to parse.
    data: &'a [u8],
    /// Offset of `data` in the original input.
    index: usize,
}

impl<'a> Input<'a> {
    /// Construct a new input processor.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, index: 0 }
    }

    /// Access index of input string.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Test if input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Test if the remaining input only consists of whitespace.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(u8::is_ascii_whitespace)
    }

    /// Get input being processed.
    #[inline]
    pub fn as_data(&self) -> &'a [u8] {
        self.data
    }

    /// Get remaining binary string of the input.
    #[inline]
    pub fn as_bstr(&self) -> &'a BStr {
        BStr::new(self.data)
    }

    /// The span of the remaining input.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.index..self.index.saturating_add(self.data.len())
    }

    /// Get the remaining input as a string.
    pub fn as_str(&self) -> Result<&'a str> {
        match from_utf8(self.data) {
            Ok(string) => Ok(string),
            Err(..) => Err(InputError::new(self.span(), ErrorKind::NotUtf8)),
        }
    }

    /// Iterate over lines, excluding the line terminator.
    ///
    /// A terminator at the very end of the input does not produce an extra
    /// empty line.
    #[inline]
    pub fn lines(self) -> Lines<'a> {
        Lines::new(self)
    }

    /// Parse the next value as T.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next<T>(&mut self) -> Result<T>
    where
        T: FromInput<'a>,
    {
        T::from_input(self)
    }

    /// Try parse the next value as `T`, returns `None` if there is no more
    /// non-whitespace data to process.
    #[inline]
    pub fn try_next<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput<'a>,
    {
        T::try_from_input(self)
    }

    /// Assert that only whitespace remains of the input.
    pub fn finish(&self) -> Result<()> {
        let s = self.find(0, |b| !b.is_ascii_whitespace());

        if s == self.data.len() {
            return Ok(());
        }

        let rest = self.data.get(s..).unwrap_or_default();
        let span = self.index.saturating_add(s)..self.span().end;
        Err(InputError::new(span, ErrorKind::TrailingInput(rest.into())))
    }

    /// Skip over leading whitespace.
    #[inline]
    pub fn skip_whitespace(&mut self) {
        let n = self.find(0, |b| !b.is_ascii_whitespace());
        self.advance(n);
    }

    /// Try to take the next whitespace-delimited word.
    pub fn try_word(&mut self) -> Option<Input<'a>> {
        let s = self.find(0, |b| !b.is_ascii_whitespace());
        let n = self.find(s, u8::is_ascii_whitespace);

        if s == n {
            return None;
        }

        let word = self.slice(s..n)?;
        self.advance(n);
        Some(word)
    }

    /// Split off the next line, stripping a trailing carriage return.
    pub(crate) fn split_line(&mut self) -> Option<Input<'a>> {
        if self.data.is_empty() {
            return None;
        }

        let at = memchr::memchr(NL, self.data).unwrap_or(self.data.len());
        let mut line = self.slice(0..at)?;

        let data = line.data;

        if let [rest @ .., b'\r'] = data {
            line.data = rest;
        }

        self.advance(at.saturating_add(1));
        Some(line)
    }

    /// Find by predicate.
    fn find(&self, mut n: usize, p: fn(&u8) -> bool) -> usize {
        while let Some(c) = self.data.get(n) {
            if p(c) {
                break;
            }

            n += 1;
        }

        n
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        let n = n.min(self.data.len());
        self.data = self.data.get(n..).unwrap_or_default();
        self.index = self.index.saturating_add(n);
    }

    /// Construct a sub-range.
    #[inline]
    fn slice(&self, range: Range<usize>) -> Option<Input<'a>> {
        let index = self.index.checked_add(range.start)?;

        Some(Self {
            data: self.data.get(range)?,
            index,
        })
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("data", &self.as_bstr())
            .field("index", &self.index)
            .finish()
    }
}

/// A value that can be parsed from input.
pub trait FromInput<'a>: Sized {
    /// Error kind to use when the value is missing.
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::UnexpectedEol
    }

    /// Try to parse a value, returning `None` if there is no more
    /// non-whitespace data to process.
    fn try_from_input(p: &mut Input<'a>) -> Result<Option<Self>>;

    /// Parse a value from a given input.
    #[inline]
    fn from_input(p: &mut Input<'a>) -> Result<Self> {
        let index = p.index;

        let Some(value) = Self::try_from_input(p)? else {
            return Err(InputError::new(index..p.index, Self::error_kind()));
        };

        Ok(value)
    }
}

macro_rules! tuple {
    ($num:literal => $first:ident $first_id:ident $(, $rest:ident $rest_id:ident)* $(,)?) => {
        impl<'a, $first, $($rest,)*> FromInput<'a> for ($first, $($rest, )*)
        where
            $first: FromInput<'a>,
            $($rest: FromInput<'a>,)*
        {
            #[inline]
            fn error_kind() -> ErrorKind {
                ErrorKind::ExpectedTuple($num)
            }

            #[inline]
            fn try_from_input(p: &mut Input<'a>) -> Result<Option<Self>> {
                let Some($first_id) = p.try_next()? else {
                    return Ok(None);
                };

                $(
                    let Some($rest_id) = p.try_next()? else {
                        return Ok(None);
                    };
                )*

                Ok(Some(($first_id, $($rest_id,)*)))
            }
        }
    }
}

#[rustfmt::skip]
macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> FromInput<'a> for $ty {
                #[inline]
                fn try_from_input(p: &mut Input<'a>) -> Result<Option<Self>> {
                    let Some(word) = p.try_word() else {
                        return Ok(None);
                    };

                    let string = word.as_str()?;

                    let Ok(n) = string.parse::<$ty>() else {
                        return Err(InputError::new(word.span(), ErrorKind::NotInteger(string.into())));
                    };

                    Ok(Some(n))
                }
            }
        )*
    };
}

tuple!(2 => A a, B b);

integer!(u64);

impl<'a> FromInput<'a> for &'a str {
    #[inline]
    fn try_from_input(p: &mut Input<'a>) -> Result<Option<Self>> {
        let string = p.as_str()?;
        p.advance(string.len());
        Ok(Some(string))
    }
}

/// Parse a word of input, which parses until we reach a whitespace character.
///
/// The wrapped value is parsed from the word alone.
#[derive(Debug)]
pub struct W<T>(pub T);

impl<'a, T> FromInput<'a> for W<T>
where
    T: FromInput<'a>,
{
    #[inline]
    fn try_from_input(p: &mut Input<'a>) -> Result<Option<Self>> {
        let Some(mut word) = p.try_word() else {
            return Ok(None);
        };

        Ok(T::try_from_input(&mut word)?.map(Self))
    }
}
