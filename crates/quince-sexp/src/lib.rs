//! S-expression encoding for archive protocol responses.
//!
//! Package clients speak a textual literal format: parenthesized lists,
//! association lists, symbols, keywords. Every response the archive sends
//! (package listings, metadata, acknowledgements) is built out of this
//! crate's [`Sexp`] values and rendered with [`Sexp::render`].
//!
//! The value type is a closed enum, so encoding is total: there is no
//! "unsupported value" failure mode, and the encoder performs no I/O.
//! Domain objects that need full control over their textual form can
//! implement [`CustomSexp`] and wrap themselves in [`Sexp::Custom`].
//!
//! # Example
//!
//! ```
//! use quince_sexp::Sexp;
//!
//! let entry = Sexp::alist([
//!     ("name", Sexp::symbol("quince")),
//!     ("stable", Sexp::Bool(true)),
//! ]);
//! assert_eq!(entry.render(), "(name . quince)(stable . t)");
//! ```

mod escape;
mod value;

pub use value::{CustomSexp, Sexp};
