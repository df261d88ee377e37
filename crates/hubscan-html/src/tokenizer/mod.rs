//! HTML tokenizer module.
//!
//! A forgiving, streaming tokenizer that only distinguishes start tags, end
//! tags and text. It is not a conforming HTML tokenizer: there is no tree
//! construction, no character reference handling (text is passed through
//! raw), and no special treatment of script or style content.

/// Helper methods for tokenizer state transitions and emission.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;
/// Tokenizer state machine implementation.
pub mod core;

pub use self::core::{
    ATTRIBUTES_CAPACITY, TAG_NAME_CAPACITY, TEXT_CAPACITY, Tokenizer, TokenizerState, Tokens,
};
pub use token::Token;
