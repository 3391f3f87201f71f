use core::fmt;
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::pos::{pos_from, LineCol};

/// Associate the input path, and the position of any [InputError] in the
/// chain, with an error.
pub fn error_context(path: &Path, data: &[u8], error: anyhow::Error) -> anyhow::Error {
    let pos = error
        .chain()
        .find_map(|e| e.downcast_ref::<InputError>())
        .map(|e| pos_from(data, e.span().start));

    let cli_error = ErrorContext {
        path: path.to_owned(),
        pos,
    };

    error.context(cli_error)
}

/// Where in the input an error happened.
#[derive(Debug)]
struct ErrorContext {
    path: PathBuf,
    pos: Option<LineCol>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();

        match &self.pos {
            Some(pos) => write!(f, "{path}:{pos}"),
            None => write!(f, "{path}"),
        }
    }
}
