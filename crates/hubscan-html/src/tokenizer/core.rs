use std::collections::VecDeque;
use std::iter::FusedIterator;

use strum_macros::Display;

use super::token::Token;
use crate::bounded::BoundedBuffer;
use crate::text::is_space;

/// Bytes kept of a tag name.
pub const TAG_NAME_CAPACITY: usize = 64;
/// Bytes kept of a start tag's raw attribute text.
pub const ATTRIBUTES_CAPACITY: usize = 1024;
/// Bytes kept of one run of text between tags.
pub const TEXT_CAPACITY: usize = 2048;

/// The tokenizer state machine. One state per lexical context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Character data. `<` starts markup.
    Text,
    /// Just saw `<`.
    TagOpen,
    /// Reading a tag name.
    TagName,
    /// Inside a start tag after its name; quote-aware.
    TagRest,
    /// Inside an end tag after its name; everything up to `>` is dropped.
    EndTagRest,
    /// Saw `<!`, counting the dashes of a possible `<!--`.
    CommentStart,
    /// Inside `<!-- … -->`.
    Comment,
    /// Inside `<!…>` or `<?…>`; skipped up to the next `>`.
    SkipDeclaration,
}

/// Single-pass, restartable HTML tokenizer.
///
/// Input is fed as byte chunks with [`feed`](Self::feed). State persists
/// between chunks, so splitting a document anywhere yields the same tokens as
/// feeding it whole. The tokenizer never fails: comments and declarations are
/// dropped, oversized names, attributes and text runs are truncated, and a tag
/// still open at the end of input is abandoned.
#[derive(Debug)]
pub struct Tokenizer {
    pub(super) state: TokenizerState,
    pub(super) tag_name: BoundedBuffer,
    pub(super) attributes: BoundedBuffer,
    pub(super) text: BoundedBuffer,
    pub(super) closing_tag: bool,
    pub(super) self_closing: bool,
    pub(super) quote: Option<u8>,
    pub(super) comment_dashes: u8,
    // When true, the current byte is processed again in the new state instead
    // of advancing. "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    // Emitted but not yet pulled. Holds at most a start tag and its
    // synthesized end tag.
    pub(super) pending: VecDeque<Token>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer in the text state with empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TokenizerState::Text,
            tag_name: BoundedBuffer::new(TAG_NAME_CAPACITY),
            attributes: BoundedBuffer::new(ATTRIBUTES_CAPACITY),
            text: BoundedBuffer::new(TEXT_CAPACITY),
            closing_tag: false,
            self_closing: false,
            quote: None,
            comment_dashes: 0,
            reconsume: false,
            pending: VecDeque::with_capacity(2),
        }
    }

    /// Current state, for diagnostics.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Feed the next chunk of input and pull the tokens it completes.
    ///
    /// Tokens are produced lazily as the returned iterator is advanced; drain
    /// it before feeding the next chunk. With `is_final` set, pending text is
    /// flushed as a last token once the chunk is exhausted, any unterminated
    /// tag is abandoned, and the tokenizer is ready for a new document.
    pub fn feed<'a>(&'a mut self, chunk: &'a [u8], is_final: bool) -> Tokens<'a> {
        Tokens {
            tokenizer: self,
            chunk,
            pos: 0,
            is_final,
            finished: false,
        }
    }

    /// Process one input byte in the current state.
    fn step(&mut self, byte: u8) {
        match self.state {
            TokenizerState::Text => self.handle_text_state(byte),
            TokenizerState::TagOpen => self.handle_tag_open_state(byte),
            TokenizerState::TagName => self.handle_tag_name_state(byte),
            TokenizerState::TagRest => self.handle_tag_rest_state(byte),
            TokenizerState::EndTagRest => self.handle_end_tag_rest_state(byte),
            TokenizerState::CommentStart => self.handle_comment_start_state(byte),
            TokenizerState::Comment => self.handle_comment_state(byte),
            TokenizerState::SkipDeclaration => self.handle_skip_declaration_state(byte),
        }
    }

    fn handle_text_state(&mut self, byte: u8) {
        if byte == b'<' {
            self.emit_text();
            self.reset_tag_buffers();
            self.switch_to(TokenizerState::TagOpen);
        } else {
            self.text.push(byte);
        }
    }

    fn handle_tag_open_state(&mut self, byte: u8) {
        match byte {
            b'!' => {
                self.comment_dashes = 0;
                self.switch_to(TokenizerState::CommentStart);
            }
            b'/' => {
                self.closing_tag = true;
                self.switch_to(TokenizerState::TagName);
            }
            b'?' => self.switch_to(TokenizerState::SkipDeclaration),
            b if is_space(b) => {}
            _ => {
                self.closing_tag = false;
                self.reconsume_in(TokenizerState::TagName);
            }
        }
    }

    fn handle_tag_name_state(&mut self, byte: u8) {
        if is_tag_name_byte(byte) {
            self.tag_name.push(byte.to_ascii_lowercase());
        } else if self.closing_tag {
            self.reconsume_in(TokenizerState::EndTagRest);
        } else {
            self.reconsume_in(TokenizerState::TagRest);
        }
    }

    fn handle_tag_rest_state(&mut self, byte: u8) {
        if let Some(quote) = self.quote {
            self.attributes.push(byte);
            if byte == quote {
                self.quote = None;
            }
            return;
        }
        match byte {
            b'"' | b'\'' => {
                self.attributes.push(byte);
                self.quote = Some(byte);
            }
            b'>' => self.finish_tag(),
            b if is_space(b) && self.attributes.is_empty() => {}
            _ => self.attributes.push(byte),
        }
    }

    fn handle_end_tag_rest_state(&mut self, byte: u8) {
        if byte == b'>' {
            self.finish_tag();
        }
    }

    fn handle_comment_start_state(&mut self, byte: u8) {
        if byte == b'-' {
            self.comment_dashes += 1;
            if self.comment_dashes == 2 {
                self.switch_to(TokenizerState::Comment);
            }
        } else {
            // Not `<!--`: a declaration such as `<!DOCTYPE html>`
            self.reconsume_in(TokenizerState::SkipDeclaration);
        }
    }

    fn handle_comment_state(&mut self, byte: u8) {
        match byte {
            b'-' => {
                if self.comment_dashes < 2 {
                    self.comment_dashes += 1;
                }
            }
            b'>' if self.comment_dashes >= 2 => {
                self.comment_dashes = 0;
                self.switch_to(TokenizerState::Text);
            }
            _ => self.comment_dashes = 0,
        }
    }

    fn handle_skip_declaration_state(&mut self, byte: u8) {
        if byte == b'>' {
            self.switch_to(TokenizerState::Text);
        }
    }
}

/// Tag names accept ASCII alphanumerics, `-`, `_` and `:`.
const fn is_tag_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':')
}

/// Lazy token sequence over one fed chunk. See [`Tokenizer::feed`].
#[derive(Debug)]
pub struct Tokens<'a> {
    tokenizer: &'a mut Tokenizer,
    chunk: &'a [u8],
    pos: usize,
    is_final: bool,
    finished: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.tokenizer.pending.pop_front() {
                return Some(token);
            }
            if let Some(&byte) = self.chunk.get(self.pos) {
                self.tokenizer.step(byte);
                if !self.tokenizer.take_reconsume() {
                    self.pos += 1;
                }
                continue;
            }
            if self.is_final && !self.finished {
                self.finished = true;
                self.tokenizer.finish();
                continue;
            }
            return None;
        }
    }
}

impl FusedIterator for Tokens<'_> {}
