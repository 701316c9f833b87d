//! Core data model and text pipeline for the publishing workspace.
//!
//! A [`book::Book`] owns an ordered list of [`book::Chapter`]s, each
//! pointing at a markdown source file. Output crates drive the pipeline:
//! chapter collection ([`collect`]) → substitution ([`substitution`]) →
//! rendering, through the [`output::Output`] trait.

pub mod book;
pub mod collect;
pub mod error;
pub mod output;
pub mod substitution;

pub use error::{PublishError, Result};
