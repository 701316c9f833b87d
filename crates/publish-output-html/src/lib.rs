//! HTML output — renders a book to a single standalone HTML document.
//!
//! Rendering and writing are separate: [`render_document`] produces the
//! full document as a string so that other outputs (notably the
//! ebook-convert output) can reuse it without duplicating the pipeline.

use std::path::{Path, PathBuf};

use publish_core::book::Book;
use publish_core::collect::collect_markdown;
use publish_core::error::{PublishError, Result};
use publish_core::output::Output;
use publish_core::substitution::{apply_substitutions, Substitution};

/// The document template. Four named slots plus a generator banner:
/// `{content}`, `{title}`, `{css}`, `{language}`, `{generator}`.
const TEMPLATE: &str = include_str!("template.html");

/// Render the full HTML document for a book.
///
/// Pipeline: collect the publishable chapters, apply the substitutions to
/// the whole concatenated markdown, render it to an HTML fragment and
/// wrap that in the document template. The stylesheet, when given, is
/// inlined verbatim into the `<style>` block.
pub fn render_document(
    book: &Book,
    substitutions: &[Substitution],
    stylesheet: Option<&Path>,
    force_publish: bool,
) -> Result<String> {
    let markdown = collect_markdown(book.chapters(), force_publish)?;
    let markdown = apply_substitutions(&markdown, substitutions);
    let content = render_markdown(&markdown);
    let css = load_stylesheet(stylesheet)?;

    Ok(TEMPLATE
        .replace("{generator}", &generator())
        .replace("{language}", &book.language)
        .replace("{title}", &book.title)
        .replace("{css}", &css)
        .replace("{content}", &content))
}

/// Render markdown to an HTML fragment using pulldown-cmark.
fn render_markdown(markdown: &str) -> String {
    use pulldown_cmark::{html, Parser};

    let parser = Parser::new(markdown);
    let mut fragment = String::new();
    html::push_html(&mut fragment, parser);
    fragment
}

/// Read the raw stylesheet text, or return an empty string when no
/// stylesheet is configured. The path resolves relative to the current
/// working directory.
fn load_stylesheet(stylesheet: Option<&Path>) -> Result<String> {
    match stylesheet {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|source| PublishError::ReadSource {
                path: path.to_path_buf(),
                source,
            })
        }
        None => Ok(String::new()),
    }
}

fn generator() -> String {
    format!("mdpublish {}", env!("CARGO_PKG_VERSION"))
}

/// Output target writing the rendered HTML document to a file.
#[derive(Debug, Clone)]
pub struct HtmlOutput {
    /// Destination file, overwritten if it exists.
    pub path: PathBuf,
    /// Optional stylesheet whose text is inlined into the document.
    pub stylesheet: Option<PathBuf>,
    /// Include all chapters regardless of their publish flag.
    pub force_publish: bool,
}

impl HtmlOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stylesheet: None,
            force_publish: false,
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
}

impl Output for HtmlOutput {
    fn path(&self) -> &Path {
        &self.path
    }

    fn make(&self, book: &Book, substitutions: &[Substitution]) -> Result<()> {
        log::info!("Writing HTML: {}", self.path.display());

        let document = render_document(
            book,
            substitutions,
            self.stylesheet.as_deref(),
            self.force_publish,
        )?;

        std::fs::write(&self.path, document).map_err(|source| PublishError::WriteOutput {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use publish_core::book::Chapter;
    use publish_core::substitution::SimpleSubstitution;
    use std::path::Path;

    fn chapter_file(dir: &Path, name: &str, content: &str) -> Chapter {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        Chapter::new(path).unwrap()
    }

    fn example_book(dir: &Path) -> Book {
        let mut book = Book::new("Example").unwrap();
        book.add_chapter(chapter_file(dir, "a.md", "# H1"));
        book.add_chapter(chapter_file(dir, "b.md", "body"));
        book
    }

    #[test]
    fn test_round_trip_with_substitution() {
        let dir = tempfile::tempdir().unwrap();
        let book = example_book(dir.path());
        let subs: Vec<Substitution> =
            vec![SimpleSubstitution::new("H1", "Heading").into()];

        let document = render_document(&book, &subs, None, false).unwrap();

        assert!(document.contains("<title>Example</title>"));
        let h1 = document.find("<h1>Heading</h1>").expect("heading missing");
        let p = document.find("<p>body</p>").expect("paragraph missing");
        assert!(h1 < p, "chapter order lost");
    }

    #[test]
    fn test_template_slots_filled() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = example_book(dir.path());
        book.language = "en".to_string();

        let document = render_document(&book, &[], None, false).unwrap();

        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains(r#"<html lang="en">"#));
        assert!(document.contains("mdpublish"));
        assert!(!document.contains('{'), "unfilled template slot left");
    }

    #[test]
    fn test_stylesheet_is_inlined() {
        let dir = tempfile::tempdir().unwrap();
        let book = example_book(dir.path());
        let css_path = dir.path().join("style.css");
        std::fs::write(&css_path, "body { margin: 1em; }").unwrap();

        let document = render_document(&book, &[], Some(&css_path), false).unwrap();
        assert!(document.contains("body { margin: 1em; }"));
    }

    #[test]
    fn test_missing_stylesheet_fails() {
        let dir = tempfile::tempdir().unwrap();
        let book = example_book(dir.path());
        let missing = dir.path().join("nope.css");

        let err = render_document(&book, &[], Some(&missing), false).unwrap_err();
        assert!(matches!(err, PublishError::ReadSource { .. }));
    }

    #[test]
    fn test_substitution_spans_chapter_separator() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = Book::new("Example").unwrap();
        book.add_chapter(chapter_file(dir.path(), "a.md", "ends here"));
        book.add_chapter(chapter_file(dir.path(), "b.md", "starts here"));

        // Substitutions see the whole concatenated text including the
        // separator between chapters.
        let subs: Vec<Substitution> =
            vec![SimpleSubstitution::new("here\n\nstarts", "here and starts").into()];
        let document = render_document(&book, &subs, None, false).unwrap();
        assert!(document.contains("ends here and starts here"));
    }

    #[test]
    fn test_make_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let book = example_book(dir.path());
        let out_path = dir.path().join("book.html");

        let output = HtmlOutput::new(&out_path);
        output.make(&book, &[]).unwrap();

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert!(written.contains("<title>Example</title>"));
        assert!(written.contains("<h1>H1</h1>"));
    }

    #[test]
    fn test_make_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let book = example_book(dir.path());
        let out_path = dir.path().join("book.html");
        std::fs::write(&out_path, "stale").unwrap();

        HtmlOutput::new(&out_path).make(&book, &[]).unwrap();

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert!(!written.contains("stale"));
    }

    #[test]
    fn test_no_chapters_propagates() {
        let book = Book::new("Empty").unwrap();
        let err = render_document(&book, &[], None, false).unwrap_err();
        assert!(matches!(err, PublishError::NoChaptersFound(_)));
    }
}
