//! Chapter selection and concatenation.
//!
//! Selects the publishable chapters of a book, reads their markdown
//! sources and joins them into one text blob. This is the first stage of
//! every output's pipeline.

use crate::book::Chapter;
use crate::error::{PublishError, Result};

/// Separator inserted between two chapters, one blank markdown line.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Select the chapters to publish and concatenate their source files.
///
/// With `force_publish` every chapter is selected; otherwise only those
/// whose `publish` flag is set. Selection preserves chapter order.
/// Sources are read as UTF-8; a missing source file is a configuration
/// error and propagates.
pub fn collect_markdown(chapters: &[Chapter], force_publish: bool) -> Result<String> {
    if chapters.is_empty() {
        return Err(PublishError::NoChaptersFound(
            "Your book contains no chapters.".to_string(),
        ));
    }

    let selected: Vec<&Chapter> = chapters
        .iter()
        .filter(|chapter| force_publish || chapter.publish)
        .collect();

    if selected.is_empty() {
        return Err(PublishError::NoChaptersFound(
            "None of your chapters are set to be published.".to_string(),
        ));
    }

    log::debug!(
        "Collecting {} of {} chapters",
        selected.len(),
        chapters.len()
    );

    let mut parts = Vec::with_capacity(selected.len());
    for chapter in selected {
        let text =
            std::fs::read_to_string(chapter.source()).map_err(|source| {
                PublishError::ReadSource {
                    path: chapter.source().to_path_buf(),
                    source,
                }
            })?;
        parts.push(text);
    }

    Ok(parts.join(PARAGRAPH_SEPARATOR))
}
