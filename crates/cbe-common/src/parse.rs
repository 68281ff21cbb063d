//! Parser for the simplified XML fragment used by init configurations.
//!
//! Supported: elements, self-closing elements, single or double quoted
//! attributes, the five predefined entities inside attribute values,
//! comments, and a leading `<?xml ...?>` declaration. Text content is
//! skipped. There is no DTD, CDATA, or namespace handling.

use tracing::trace;

use crate::error::{ParseError, ParseErrorKind, Result};
use crate::node::XmlNode;

/// Deepest element nesting accepted. Init configurations use two levels.
pub const MAX_DEPTH: usize = 64;

impl XmlNode {
    /// Parse a document and return its root element.
    pub fn parse(text: &str) -> Result<XmlNode> {
        let mut parser = Parser::new(text);

        parser.skip_prolog()?;
        if parser.at_end() {
            return Err(parser.error(ParseErrorKind::NoRootElement));
        }
        let root = parser.element()?;

        parser.skip_whitespace_and_comments()?;
        if !parser.at_end() {
            return Err(parser.error(ParseErrorKind::TrailingContent));
        }

        trace!(
            root = %root.name(),
            children = root.children().len(),
            "parsed configuration document"
        );
        Ok(root)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    /// Elements currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.pos, kind)
    }

    fn unexpected_here(&self) -> ParseError {
        match self.peek() {
            Some(c) => self.error(ParseErrorKind::UnexpectedChar(c)),
            None => self.error(ParseErrorKind::UnexpectedEof),
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            Ok(())
        } else {
            Err(self.unexpected_here())
        }
    }

    /// Advance past `terminator`, returning the skipped text.
    fn take_until(&mut self, terminator: &str) -> Result<&'a str> {
        match self.rest().find(terminator) {
            Some(idx) => {
                let taken = &self.rest()[..idx];
                self.pos += idx + terminator.len();
                Ok(taken)
            }
            None => {
                self.pos = self.input.len();
                Err(self.error(ParseErrorKind::UnexpectedEof))
            }
        }
    }

    /// Returns true if any whitespace was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let trimmed = self.rest().trim_start_matches(|c: char| c.is_ascii_whitespace());
        let skipped = self.rest().len() - trimmed.len();
        self.pos += skipped;
        skipped > 0
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<!--") {
                self.pos += 4;
                self.take_until("-->")?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_prolog(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace_and_comments()?;
            if self.rest().starts_with("<?") {
                self.pos += 2;
                self.take_until("?>")?;
            } else {
                return Ok(());
            }
        }
    }

    fn name(&mut self) -> Result<&'a str> {
        let start = self.pos;
        let rest = self.rest();

        let starts_ok = rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':');
        if !starts_ok {
            return Err(match rest.chars().next() {
                Some(_) => self.error(ParseErrorKind::InvalidName),
                None => self.error(ParseErrorKind::UnexpectedEof),
            });
        }

        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
            .unwrap_or(rest.len());
        self.pos += len;
        Ok(&self.input[start..start + len])
    }

    fn element(&mut self) -> Result<XmlNode> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(ParseErrorKind::TooDeep { limit: MAX_DEPTH }));
        }
        self.expect('<')?;
        let mut node = XmlNode::new(self.name()?);

        loop {
            let separated = self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
                Some('/') => {
                    self.pos += 1;
                    self.expect('>')?;
                    return Ok(node);
                }
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some(_) if !separated => return Err(self.unexpected_here()),
                Some(_) => self.attribute(&mut node)?,
            }
        }

        self.depth += 1;
        let closed = self.content(&mut node);
        self.depth -= 1;
        closed.map(|()| node)
    }

    fn attribute(&mut self, node: &mut XmlNode) -> Result<()> {
        let name_offset = self.pos;
        let name = self.name()?;
        if node.has_attribute(name) {
            return Err(ParseError::new(
                name_offset,
                ParseErrorKind::DuplicateAttribute(name.to_string()),
            ));
        }

        self.skip_whitespace();
        self.expect('=')?;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => return Err(self.error(ParseErrorKind::UnquotedAttribute)),
            None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
        };
        self.pos += 1;

        let value_offset = self.pos;
        let raw = match self.rest().find(quote) {
            Some(idx) => &self.rest()[..idx],
            None => {
                self.pos = self.input.len();
                return Err(self.error(ParseErrorKind::UnexpectedEof));
            }
        };
        if let Some(idx) = raw.find('<') {
            return Err(ParseError::new(
                value_offset + idx,
                ParseErrorKind::UnexpectedChar('<'),
            ));
        }
        let value = decode_entities(raw, value_offset)?;
        self.pos += raw.len() + 1;

        node.push_attribute(name.to_string(), value);
        Ok(())
    }

    fn content(&mut self, node: &mut XmlNode) -> Result<()> {
        loop {
            match self.rest().find('<') {
                Some(idx) => self.pos += idx,
                None => {
                    self.pos = self.input.len();
                    return Err(self.error(ParseErrorKind::UnexpectedEof));
                }
            }

            let rest = self.rest();
            if rest.starts_with("</") {
                self.pos += 2;
                let name_offset = self.pos;
                let name = self.name()?;
                self.skip_whitespace();
                self.expect('>')?;
                if name != node.name() {
                    return Err(ParseError::new(
                        name_offset,
                        ParseErrorKind::MismatchedClosingTag {
                            expected: node.name().to_string(),
                            found: name.to_string(),
                        },
                    ));
                }
                return Ok(());
            } else if rest.starts_with("<!--") {
                self.pos += 4;
                self.take_until("-->")?;
            } else if rest.starts_with("<?") {
                self.pos += 2;
                self.take_until("?>")?;
            } else {
                let child = self.element()?;
                node.push_child(child);
            }
        }
    }
}

/// Replace predefined entity references. `base` is the byte offset of `raw`
/// within the document, used for error positions.
fn decode_entities(raw: &str, base: usize) -> Result<String> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut offset = base;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let Some(semi) = after.find(';') else {
            return Err(ParseError::new(
                offset + amp,
                ParseErrorKind::UnexpectedChar('&'),
            ));
        };
        let entity = &after[..semi];
        let decoded = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            other => {
                return Err(ParseError::new(
                    offset + amp,
                    ParseErrorKind::UnknownEntity(other.to_string()),
                ))
            }
        };
        out.push(decoded);

        let consumed = amp + 1 + semi + 1;
        rest = &rest[consumed..];
        offset += consumed;
    }
    out.push_str(rest);
    Ok(out)
}
