//! ebook-convert output — produces an ebook by shelling out to Calibre's
//! `ebook-convert`.
//!
//! The book is first rendered to a temporary HTML document, then the
//! converter turns that document into the target format. The temp HTML
//! lives in its own directory, freshly created per invocation, and is
//! closed before the converter starts: the converter needs to open the
//! file itself, a temp file handle held by this process would make it
//! fail with a permission error. The directory is removed on every exit
//! path, including errors.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use publish_core::book::Book;
use publish_core::error::{PublishError, Result};
use publish_core::output::Output;
use publish_core::substitution::Substitution;
use publish_output_html::render_document;

/// Name of the Calibre converter executable looked up on PATH.
pub const DEFAULT_CONVERTER: &str = "ebook-convert";

/// Book metadata supported by the converter command line, in the fixed
/// order the flags are emitted.
const METADATA_WHITELIST: &[&str] = &[
    "author_sort",
    "authors",
    "book_producer",
    "comments",
    "cover",
    "isbn",
    "language",
    "pubdate",
    "publisher",
    "rating",
    "series",
    "series_index",
    "tags",
    "title",
];

/// Output target producing an ebook via the external converter.
#[derive(Debug, Clone)]
pub struct EbookConvertOutput {
    /// Destination file. The format is inferred by the converter from the
    /// extension, e.g. `book.epub`.
    pub path: PathBuf,
    /// Optional stylesheet inlined into the intermediate HTML.
    pub stylesheet: Option<PathBuf>,
    /// Include all chapters regardless of their publish flag.
    pub force_publish: bool,
    /// Extra arguments appended verbatim to the converter invocation.
    pub extra_params: Vec<String>,
    /// Converter executable. Defaults to [`DEFAULT_CONVERTER`].
    pub converter: String,
}

impl EbookConvertOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stylesheet: None,
            force_publish: false,
            extra_params: Vec::new(),
            converter: DEFAULT_CONVERTER.to_string(),
        }
    }

    pub fn with_stylesheet(mut self, stylesheet: impl Into<PathBuf>) -> Self {
        self.stylesheet = Some(stylesheet.into());
        self
    }

    pub fn with_force_publish(mut self, force_publish: bool) -> Self {
        self.force_publish = force_publish;
        self
    }

    pub fn with_extra_params(mut self, params: Vec<String>) -> Self {
        self.extra_params = params;
        self
    }

    pub fn with_converter(mut self, converter: impl Into<String>) -> Self {
        self.converter = converter.into();
        self
    }
}

impl Output for EbookConvertOutput {
    fn path(&self) -> &Path {
        &self.path
    }

    fn make(&self, book: &Book, substitutions: &[Substitution]) -> Result<()> {
        // Dropped at the end of this scope, which removes the directory
        // and the intermediate HTML on success and error paths alike.
        let temp_dir = tempfile::TempDir::new()?;
        let temp_html = temp_dir
            .path()
            .join(format!("{}.html", uuid::Uuid::new_v4()));

        let document = render_document(
            book,
            substitutions,
            self.stylesheet.as_deref(),
            self.force_publish,
        )?;
        std::fs::write(&temp_html, document).map_err(|source| PublishError::WriteOutput {
            path: temp_html.clone(),
            source,
        })?;

        log::info!(
            "Converting {} → {}",
            temp_html.display(),
            self.path.display()
        );

        let mut command = Command::new(&self.converter);
        command.arg(&temp_html).arg(&self.path);
        // One argv element per flag; values with spaces stay intact.
        command.args(metadata_params(book));
        command.args(&self.extra_params);

        match command.status() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                log::warn!("{} exited with {}", self.converter, status);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::error!(
                    "'{}' was not found on your PATH. Install Calibre \
                     (https://calibre-ebook.com) to produce {}.",
                    self.converter,
                    self.path.display()
                );
            }
            Err(e) => return Err(PublishError::Io(e)),
        }

        Ok(())
    }
}

/// Derive the `--<name>=<value>` metadata flags for a book.
///
/// Flags are emitted in [`METADATA_WHITELIST`] order; attributes with an
/// empty or whitespace-only stringified value are skipped.
pub fn metadata_params(book: &Book) -> Vec<String> {
    METADATA_WHITELIST
        .iter()
        .filter_map(|&name| {
            let value = metadata_value(book, name)?;
            if value.trim().is_empty() {
                None
            } else {
                Some(format!("--{name}={value}"))
            }
        })
        .collect()
}

/// Stringified value of one whitelisted metadata attribute.
fn metadata_value(book: &Book, name: &str) -> Option<String> {
    match name {
        "author_sort" => book.author_sort.clone(),
        "authors" => book.authors.clone(),
        "book_producer" => book.book_producer.clone(),
        "comments" => book.comments.clone(),
        "cover" => book.cover.clone(),
        "isbn" => book.isbn.clone(),
        "language" => Some(book.language.clone()),
        "pubdate" => Some(book.pubdate.clone()),
        "publisher" => book.publisher.clone(),
        "rating" => book.rating.map(|r| r.to_string()),
        "series" => book.series.clone(),
        "series_index" => book.series_index.map(|i| i.to_string()),
        "tags" => book.tags.clone(),
        "title" => Some(book.title.clone()),
        _ => None,
    }
}
