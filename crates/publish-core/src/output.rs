//! The output trait implemented by every publishing target.

use std::path::Path;

use crate::book::Book;
use crate::error::Result;
use crate::substitution::Substitution;

/// A publishing target: consumes a book and substitutions, produces one
/// file at [`Output::path`].
///
/// Outputs are stateless across invocations; `make` runs the whole
/// pipeline each time it is called. Book, chapters and substitutions are
/// read-only for the duration of the call.
pub trait Output {
    /// Destination path of the produced file.
    fn path(&self) -> &Path;

    /// Run the pipeline and produce the output file.
    fn make(&self, book: &Book, substitutions: &[Substitution]) -> Result<()>;
}
