//! HTML scanning and article extraction for blog search-result pages.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** ([`tokenizer`])
//!   - Single-pass, chunk-restartable, start tag / end tag / text only
//!   - Comments, declarations and processing instructions skipped
//!   - Bounded buffers that truncate instead of failing
//!
//! - **Attribute reader** ([`attributes`])
//!   - Case-insensitive lookup over raw attribute text
//!   - Substring class matching used for all extraction triggers
//!
//! - **Entity decoder** ([`entities`])
//!   - `&amp;` `&lt;` `&gt;` `&nbsp;` and numeric references
//!
//! - **Extractor** ([`extractor`])
//!   - One [`Article`] per article card, handed to a [`Sink`]
//!
//! # Not Implemented
//!
//! - Tree construction
//! - Script and style content handling
//! - The full named character reference table

/// Attribute lookup over raw attribute text.
pub mod attributes;
/// Fixed-capacity byte buffer.
pub mod bounded;
/// Character reference decoding.
pub mod entities;
/// Article extraction state machine.
pub mod extractor;
/// Article destinations.
pub mod sink;
/// Whitespace and newline normalization.
pub mod text;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use extractor::{Article, Extractor, ExtractorConfig};
pub use sink::{CsvSink, JsonLinesSink, Sink};
pub use tokenizer::{Token, Tokenizer, TokenizerState};
