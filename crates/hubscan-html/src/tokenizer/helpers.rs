//! Helper functions for the tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission (text runs, start and end tags)
//! - End-of-input handling

use super::core::{Tokenizer, TokenizerState};
use super::token::Token;
use crate::text::is_space;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer {
    /// "Switch to the X state"
    ///
    /// The next byte is consumed in the new state.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The current byte is processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// Returns and clears the reconsume flag.
    pub(super) const fn take_reconsume(&mut self) -> bool {
        let reconsume = self.reconsume;
        self.reconsume = false;
        reconsume
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Tokenizer {
    /// Emit the accumulated text run, if any.
    pub(super) fn emit_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let content = self.text.take_string();
        self.pending.push_back(Token::Text { content });
    }

    /// Forget the previous tag before reading a new one.
    pub(super) fn reset_tag_buffers(&mut self) {
        self.tag_name.clear();
        self.attributes.clear();
        self.closing_tag = false;
        self.self_closing = false;
        self.quote = None;
    }

    /// Called on the `>` that ends a tag.
    ///
    /// Trailing whitespace and a trailing unquoted `/` are trimmed off the raw
    /// attributes; the `/` marks the tag self-closing. A self-closing start tag
    /// is followed by a synthesized end tag so consumers never special-case it.
    pub(super) fn finish_tag(&mut self) {
        while let Some(last) = self.attributes.last() {
            if is_space(last) {
                let _ = self.attributes.pop();
            } else if last == b'/' {
                let _ = self.attributes.pop();
                self.self_closing = true;
            } else {
                break;
            }
        }

        let name = self.tag_name.take_string();
        if self.closing_tag {
            self.pending.push_back(Token::EndTag { name });
        } else {
            let attributes = self.attributes.take_string();
            let self_closing = self.self_closing;
            if self_closing {
                self.pending.push_back(Token::StartTag {
                    name: name.clone(),
                    attributes,
                    self_closing,
                });
                self.pending.push_back(Token::EndTag { name });
            } else {
                self.pending.push_back(Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                });
            }
        }

        self.reset_tag_buffers();
        self.switch_to(TokenizerState::Text);
    }

    /// End of input: flush pending text and abandon any unterminated markup.
    pub(super) fn finish(&mut self) {
        if self.state != TokenizerState::Text {
            tracing::trace!(state = %self.state, "input ended inside markup; abandoned");
        }
        self.emit_text();
        self.reset_tag_buffers();
        self.comment_dashes = 0;
        self.reconsume = false;
        self.switch_to(TokenizerState::Text);
    }
}
