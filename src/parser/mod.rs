use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;
use thiserror::Error;


/// Position inside a source text. `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            index: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Location {
    #[inline]
    pub fn advance(&mut self, c: char) {
        self.index += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: Location,
    pub length: usize,
}

impl ParseError {
    #[inline]
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self::new_spanned(message, location, 1)
    }

    #[inline]
    pub fn new_spanned(message: impl Into<String>, location: Location, length: usize) -> Self {
        Self {
            message: message.into(),
            location,
            length,
        }
    }
}

/// Something the parser can match at its current position.
pub trait ParsePrimitive {
    /// Byte length of the match at the start of `input`, if it matches.
    fn match_len(&self, input: &str) -> Option<usize>;
}

impl ParsePrimitive for char {
    #[inline]
    fn match_len(&self, input: &str) -> Option<usize> {
        input.starts_with(*self).then(|| self.len_utf8())
    }
}

impl ParsePrimitive for &str {
    #[inline]
    fn match_len(&self, input: &str) -> Option<usize> {
        input.starts_with(*self).then(|| self.len())
    }
}

impl<F: Fn(char) -> bool> ParsePrimitive for F {
    #[inline]
    fn match_len(&self, input: &str) -> Option<usize> {
        let c = input.chars().next()?;
        self(c).then(|| c.len_utf8())
    }
}

pub type Whitespace = Rc<dyn Fn(&mut Parser)>;

/// Character level cursor shared by the hand written parsers.
///
/// Every `peek`/`take` first runs the configured whitespace handler, unless
/// the parser is inside an [`Parser::atomic`] section.
#[derive(Clone)]
pub struct Parser<'a> {
    pub source: &'a str,
    pub location: Location,
    pub whitespace: Option<Whitespace>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            location: Location::default(),
            whitespace: None,
        }
    }

    pub fn with_whitespace(mut self, whitespace: impl Fn(&mut Parser) + 'static) -> Self {
        self.whitespace = Some(Rc::new(whitespace));
        self
    }

    pub fn whitespace(&mut self) {
        // the handler runs with whitespace disabled so it can use `take` itself
        if let Some(whitespace) = self.whitespace.take() {
            whitespace(self);
            self.whitespace = Some(whitespace);
        }
    }

    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.source[self.location.index..]
    }

    pub fn at_end(&mut self) -> bool {
        self.whitespace();
        self.remaining().is_empty()
    }

    pub fn peek(&mut self, primitive: impl ParsePrimitive) -> bool {
        self.whitespace();
        primitive.match_len(self.remaining()).is_some()
    }

    pub fn take(&mut self, primitive: impl ParsePrimitive) -> bool {
        self.whitespace();
        match primitive.match_len(self.remaining()) {
            Some(length) => {
                self.advance_by(length);
                true
            }
            None => false,
        }
    }

    pub fn expect(&mut self, primitive: impl ParsePrimitive + Debug) -> Result<(), ParseError> {
        let message = format!("expected {:?}", primitive);
        if self.take(primitive) {
            Ok(())
        } else {
            Err(ParseError::new(message, self.location))
        }
    }

    /// Takes the next raw character, ignoring the whitespace handler.
    pub fn take_char(&mut self) -> Option<char> {
        let c = self.remaining().chars().next()?;
        self.location.advance(c);
        Some(c)
    }

    /// Skips leading whitespace, then runs `f` with whitespace handling disabled.
    pub fn atomic<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.whitespace();
        self.adjacent(f)
    }

    /// Runs `f` from the current position with whitespace handling disabled.
    pub fn adjacent<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let whitespace = self.whitespace.take();
        let value = f(self);
        self.whitespace = whitespace;
        value
    }

    fn advance_by(&mut self, length: usize) {
        let end = self.location.index + length;
        while self.location.index < end {
            match self.remaining().chars().next() {
                Some(c) => self.location.advance(c),
                None => break,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub value: String,
    pub location: Location,
    pub length: usize,
}

impl Ident {
    #[inline]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

impl Deref for Ident {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.value.as_str()
    }
}

impl Borrow<str> for Ident {
    fn borrow(&self) -> &str {
        self.value.as_str()
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Ident {}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value, f)
    }
}
