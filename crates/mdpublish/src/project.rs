//! Project file loading.
//!
//! A project file declares the book metadata, its chapters, the
//! substitutions and the outputs in one document, YAML by default:
//!
//! ```yaml
//! title: Example
//! authors: Jane Doe
//! chapters:
//!   - source: first_chapter.md
//!   - source: second_chapter.md
//!     publish: false
//! substitutions:
//!   - type: simple
//!     old: Cow
//!     new: World
//!   - type: regex
//!     pattern: (\d+)km
//!     replace_with: $1 kilometres
//! outputs:
//!   - type: html
//!     path: example.html
//!   - type: ebookconvert
//!     path: example.epub
//!     stylesheet: style.css
//! ```
//!
//! Substitutions and outputs carry an explicit `type` discriminant;
//! anything ambiguous fails here, before it can reach the core.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use publish_core::book::{Book, Chapter};
use publish_core::output::Output;
use publish_core::substitution::{RegexSubstitution, SimpleSubstitution, Substitution};
use publish_output_ebookconvert::EbookConvertOutput;
use publish_output_html::HtmlOutput;

/// A fully loaded and validated project.
#[derive(Debug)]
pub struct Project {
    pub book: Book,
    pub substitutions: Vec<Substitution>,
    pub outputs: Vec<OutputTarget>,
}

/// One configured output target.
#[derive(Debug)]
pub enum OutputTarget {
    Html(HtmlOutput),
    EbookConvert(EbookConvertOutput),
}

impl Output for OutputTarget {
    fn path(&self) -> &Path {
        match self {
            OutputTarget::Html(o) => o.path(),
            OutputTarget::EbookConvert(o) => o.path(),
        }
    }

    fn make(
        &self,
        book: &Book,
        substitutions: &[Substitution],
    ) -> publish_core::Result<()> {
        match self {
            OutputTarget::Html(o) => o.make(book, substitutions),
            OutputTarget::EbookConvert(o) => o.make(book, substitutions),
        }
    }
}

/// Load a project from a file, picking the format from the extension
/// (`.json` is JSON, everything else YAML).
pub fn load_project_file(path: &Path) -> Result<Project> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => ProjectFormat::Json,
        _ => ProjectFormat::Yaml,
    };

    load_project(&text, format)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

/// Decode a project document and build the in-memory model.
pub fn load_project(text: &str, format: ProjectFormat) -> Result<Project> {
    let file: ProjectFile = match format {
        ProjectFormat::Yaml => {
            serde_yaml::from_str(text).context("Invalid project YAML")?
        }
        ProjectFormat::Json => {
            serde_json::from_str(text).context("Invalid project JSON")?
        }
    };

    file.into_project()
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    title: String,
    language: Option<String>,
    pubdate: Option<String>,
    author_sort: Option<String>,
    authors: Option<String>,
    book_producer: Option<String>,
    comments: Option<String>,
    cover: Option<String>,
    isbn: Option<String>,
    publisher: Option<String>,
    rating: Option<u8>,
    series: Option<String>,
    series_index: Option<f32>,
    tags: Option<String>,
    title_sort: Option<String>,
    #[serde(default)]
    chapters: Vec<ChapterEntry>,
    #[serde(default)]
    substitutions: Vec<SubstitutionEntry>,
    #[serde(default)]
    outputs: Vec<OutputEntry>,
}

#[derive(Debug, Deserialize)]
struct ChapterEntry {
    source: PathBuf,
    #[serde(default = "default_publish")]
    publish: bool,
    title: Option<String>,
    slug: Option<String>,
}

fn default_publish() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SubstitutionEntry {
    Simple { old: String, new: String },
    Regex { pattern: String, replace_with: String },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OutputEntry {
    Html {
        path: PathBuf,
        stylesheet: Option<PathBuf>,
        #[serde(default)]
        force_publish: bool,
    },
    EbookConvert {
        path: PathBuf,
        stylesheet: Option<PathBuf>,
        #[serde(default)]
        force_publish: bool,
        #[serde(default)]
        extra_params: Vec<String>,
    },
}

impl ProjectFile {
    fn into_project(self) -> Result<Project> {
        if self.outputs.is_empty() {
            bail!("Project defines no outputs");
        }

        let mut book = Book::new(self.title)?;
        if let Some(language) = self.language {
            book.language = language;
        }
        if let Some(pubdate) = self.pubdate {
            book.pubdate = pubdate;
        }
        book.author_sort = self.author_sort;
        book.authors = self.authors;
        book.book_producer = self.book_producer;
        book.comments = self.comments;
        book.cover = self.cover;
        book.isbn = self.isbn;
        book.publisher = self.publisher;
        book.rating = self.rating;
        book.series = self.series;
        book.series_index = self.series_index;
        book.tags = self.tags;
        book.title_sort = self.title_sort;

        for entry in self.chapters {
            let mut chapter = Chapter::new(entry.source)?.with_publish(entry.publish);
            if let Some(title) = entry.title {
                chapter = chapter.with_title(title);
            }
            if let Some(slug) = entry.slug {
                chapter = chapter.with_slug(slug)?;
            }
            book.add_chapter(chapter);
        }

        let mut substitutions = Vec::new();
        for entry in self.substitutions {
            let substitution = match entry {
                SubstitutionEntry::Simple { old, new } => {
                    SimpleSubstitution::new(old, new).into()
                }
                SubstitutionEntry::Regex {
                    pattern,
                    replace_with,
                } => RegexSubstitution::new(&pattern, replace_with)?.into(),
            };
            substitutions.push(substitution);
        }

        let outputs = self
            .outputs
            .into_iter()
            .map(|entry| match entry {
                OutputEntry::Html {
                    path,
                    stylesheet,
                    force_publish,
                } => {
                    let mut output = HtmlOutput::new(path).with_force_publish(force_publish);
                    if let Some(stylesheet) = stylesheet {
                        output = output.with_stylesheet(stylesheet);
                    }
                    OutputTarget::Html(output)
                }
                OutputEntry::EbookConvert {
                    path,
                    stylesheet,
                    force_publish,
                    extra_params,
                } => {
                    let mut output = EbookConvertOutput::new(path)
                        .with_force_publish(force_publish)
                        .with_extra_params(extra_params);
                    if let Some(stylesheet) = stylesheet {
                        output = output.with_stylesheet(stylesheet);
                    }
                    OutputTarget::EbookConvert(output)
                }
            })
            .collect();

        Ok(Project {
            book,
            substitutions,
            outputs,
        })
    }
}
