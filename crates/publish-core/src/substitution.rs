//! Text substitutions applied to the concatenated markdown before
//! rendering.
//!
//! Substitutions are pure string transformations. They are applied to the
//! whole concatenated book text, not per chapter and not per line, so a
//! single substitution may match across line breaks.

use regex::Regex;

use crate::error::{PublishError, Result};

/// A text-to-text transformation.
///
/// Exactly two kinds exist: literal find/replace and regex replacement.
/// Which kind a configured substitution is gets decided at load time by
/// an explicit discriminant; the core only ever sees well-formed values.
#[derive(Debug, Clone)]
pub enum Substitution {
    Simple(SimpleSubstitution),
    Regex(RegexSubstitution),
}

impl Substitution {
    /// Apply this substitution, returning the changed text.
    pub fn apply_to(&self, text: &str) -> String {
        match self {
            Substitution::Simple(s) => s.apply_to(text),
            Substitution::Regex(r) => r.apply_to(text),
        }
    }
}

/// Literal whole-text replacement of every occurrence of `old` with `new`.
#[derive(Debug, Clone)]
pub struct SimpleSubstitution {
    pub old: String,
    pub new: String,
}

impl SimpleSubstitution {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn apply_to(&self, text: &str) -> String {
        text.replace(&self.old, &self.new)
    }
}

impl From<SimpleSubstitution> for Substitution {
    fn from(s: SimpleSubstitution) -> Self {
        Substitution::Simple(s)
    }
}

/// Regex replacement. The pattern is compiled once at construction; the
/// replacement string may reference capture groups as `$1` or `$name`.
#[derive(Debug, Clone)]
pub struct RegexSubstitution {
    pattern: Regex,
    replace_with: String,
}

impl RegexSubstitution {
    /// Compile `pattern` and build the substitution.
    ///
    /// Fails with [`PublishError::InvalidPattern`] on a malformed pattern.
    pub fn new(pattern: &str, replace_with: impl Into<String>) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|source| PublishError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: compiled,
            replace_with: replace_with.into(),
        })
    }

    pub fn apply_to(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replace_with.as_str())
            .into_owned()
    }
}

impl From<RegexSubstitution> for Substitution {
    fn from(r: RegexSubstitution) -> Self {
        Substitution::Regex(r)
    }
}

/// Apply `substitutions` to `text` in list order, feeding each
/// substitution's output into the next.
pub fn apply_substitutions(text: &str, substitutions: &[Substitution]) -> String {
    substitutions
        .iter()
        .fold(text.to_string(), |text, substitution| {
            substitution.apply_to(&text)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_replaces_every_occurrence() {
        let s = SimpleSubstitution::new("Cow", "World");
        assert_eq!(s.apply_to("Hello Cow! Bye Cow!"), "Hello World! Bye World!");
    }

    #[test]
    fn test_simple_spans_lines() {
        // Whole-text replacement, so a substitution may match across a
        // line break.
        let s = SimpleSubstitution::new("foo\nbar", "baz");
        assert_eq!(s.apply_to("x foo\nbar y"), "x baz y");
    }

    #[test]
    fn test_simple_idempotent_when_old_not_in_new() {
        let s = SimpleSubstitution::new("draft", "final");
        let once = s.apply_to("a draft text");
        let twice = s.apply_to(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_regex_with_backreference() {
        let r = RegexSubstitution::new(r"(\w+)@example\.com", "$1@example.org").unwrap();
        assert_eq!(r.apply_to("mail me: jo@example.com"), "mail me: jo@example.org");
    }

    #[test]
    fn test_regex_invalid_pattern_fails_at_construction() {
        let err = RegexSubstitution::new(r"(unclosed", "x").unwrap_err();
        assert!(matches!(err, PublishError::InvalidPattern { .. }));
    }

    #[test]
    fn test_apply_substitutions_in_list_order() {
        let subs: Vec<Substitution> = vec![
            SimpleSubstitution::new("a", "b").into(),
            SimpleSubstitution::new("b", "c").into(),
        ];
        // First substitution's output feeds the second.
        assert_eq!(apply_substitutions("a", &subs), "c");

        let reversed: Vec<Substitution> = vec![
            SimpleSubstitution::new("b", "c").into(),
            SimpleSubstitution::new("a", "b").into(),
        ];
        assert_eq!(apply_substitutions("a", &reversed), "b");
    }

    #[test]
    fn test_apply_substitutions_equals_left_fold() {
        let subs: Vec<Substitution> = vec![
            SimpleSubstitution::new("one", "two").into(),
            RegexSubstitution::new(r"t(wo)", "T$1").unwrap().into(),
            SimpleSubstitution::new("Two", "2").into(),
        ];
        let text = "one and one";

        let folded = subs
            .iter()
            .fold(text.to_string(), |t, s| s.apply_to(&t));
        assert_eq!(apply_substitutions(text, &subs), folded);
        assert_eq!(folded, "2 and 2");
    }

    #[test]
    fn test_empty_substitution_list_is_identity() {
        assert_eq!(apply_substitutions("unchanged", &[]), "unchanged");
    }
}
