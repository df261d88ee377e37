use core::fmt;

/// One lexical unit of the input.
///
/// Tokens own their data; nothing borrows from the bytes that were fed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attributes>` or `<name attributes/>`.
    StartTag {
        /// Tag name, ASCII lower-cased.
        name: String,
        /// Attribute text as written, minus surrounding whitespace and a
        /// trailing unquoted `/`. Parse it with [`crate::attributes`].
        attributes: String,
        /// Set when the tag ended in `/>`. A matching [`Token::EndTag`] is
        /// always emitted right after a self-closing start tag.
        self_closing: bool,
    },

    /// `</name>`. Anything after the name is discarded.
    EndTag {
        /// Tag name, ASCII lower-cased.
        name: String,
    },

    /// A run of character data between tags, with references left undecoded.
    Text {
        /// The text as written.
        content: String,
    },
}

impl Token {
    /// Name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            Self::Text { .. } => None,
        }
    }

    /// Returns true if this is a start tag named `name`.
    #[must_use]
    pub fn is_start_tag(&self, name: &str) -> bool {
        matches!(self, Self::StartTag { name: n, .. } if n == name)
    }

    /// Returns true if this is an end tag named `name`.
    #[must_use]
    pub fn is_end_tag(&self, name: &str) -> bool {
        matches!(self, Self::EndTag { name: n } if n == name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                if !attributes.is_empty() {
                    write!(f, " {attributes}")?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { content } => write!(f, "Text({content:?})"),
        }
    }
}
