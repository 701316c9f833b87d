//! Book and chapter model.
//!
//! A [`Book`] carries the bibliographic metadata understood by
//! `ebook-convert` plus an ordered list of [`Chapter`]s. Chapter order is
//! significant: it is the order in which chapter sources are concatenated
//! into the published document.

use std::path::{Path, PathBuf};

use crate::error::{PublishError, Result};

/// A book: metadata plus ordered chapters.
///
/// All metadata fields map one-to-one onto `ebook-convert` command line
/// metadata options, see
/// <https://manual.calibre-ebook.com/generated/en/ebook-convert.html#metadata>.
#[derive(Debug, Clone)]
pub struct Book {
    /// The book title. Never empty.
    pub title: String,
    /// ISO 639 language code. Defaults to `"und"` (undetermined).
    pub language: String,
    /// Publication date as an ISO 8601 date string. Defaults to today.
    pub pubdate: String,
    /// String used when sorting by author.
    pub author_sort: Option<String>,
    /// Authors, separated by ampersands.
    pub authors: Option<String>,
    pub book_producer: Option<String>,
    /// The ebook description.
    pub comments: Option<String>,
    /// Path or URL of the cover image.
    pub cover: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    /// Rating between 1 and 5.
    pub rating: Option<u8>,
    pub series: Option<String>,
    pub series_index: Option<f32>,
    /// Comma separated list of tags.
    pub tags: Option<String>,
    /// Version of the title used for sorting.
    pub title_sort: Option<String>,
    chapters: Vec<Chapter>,
}

impl Book {
    /// Create a book with the given title and default metadata.
    ///
    /// Fails if the title is empty or whitespace-only.
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PublishError::InvalidBook(
                "Book title must not be empty.".to_string(),
            ));
        }

        Ok(Self {
            title,
            language: "und".to_string(),
            pubdate: chrono::Local::now().date_naive().to_string(),
            author_sort: None,
            authors: None,
            book_producer: None,
            comments: None,
            cover: None,
            isbn: None,
            publisher: None,
            rating: None,
            series: None,
            series_index: None,
            tags: None,
            title_sort: None,
            chapters: Vec::new(),
        })
    }

    /// Append a chapter. Insertion order is preserved through all
    /// pipeline stages.
    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// The chapters in insertion order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }
}

/// One markdown source file belonging to a book.
#[derive(Debug, Clone)]
pub struct Chapter {
    source: PathBuf,
    /// Whether this chapter is included in outputs. Outputs may override
    /// this with their force-publish setting.
    pub publish: bool,
    /// Optional display title.
    pub title: Option<String>,
    /// Optional URL-safe identifier, unique within the book.
    slug: Option<String>,
}

impl Chapter {
    /// Create a chapter from a source path.
    ///
    /// Fails if the path is empty.
    pub fn new(source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        if source.as_os_str().is_empty() {
            return Err(PublishError::InvalidChapter(
                "Chapter source must not be empty.".to_string(),
            ));
        }

        Ok(Self {
            source,
            publish: true,
            title: None,
            slug: None,
        })
    }

    /// Set the publish flag, consuming and returning the chapter.
    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the slug. Only `a-z`, `A-Z`, `0-9`, `-` and `_` are allowed.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        if slug.is_empty()
            || !slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PublishError::MalformedSlug(slug));
        }
        self.slug = Some(slug);
        Ok(self)
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}
