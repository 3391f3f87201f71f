pub mod cli;
pub mod input;
mod macros;
mod pos;

pub use self::pos::{pos_from, LineCol};

#[doc(hidden)]
pub mod macro_support {
    pub use anyhow::Error;
}

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::cli::Entry;
    pub use crate::input::{Input, InputError, W};
    pub use anyhow::{anyhow, bail, Context, Result};
}
