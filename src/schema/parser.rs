use crate::db::types::DataType;
use crate::parser::{Ident, Location, ParseError, Parser};
use crate::schema::{Attribute, Enum, Field, Model, Schema};

/// Recursive descent parser for `model`/`enum` schema files.
pub struct SchemaParser<'a> {
    inner: Parser<'a>,
}

/// Skips whitespace, `//` line comments and `/* */` block comments.
pub fn skip_whitespace(parser: &mut Parser) {
    loop {
        while parser.take(|c: char| c.is_whitespace()) {}

        if parser.take("//") {
            while parser.take(|c: char| c != '\n') {}
        } else if parser.take("/*") {
            while !parser.take("*/") {
                if parser.take_char().is_none() {
                    break;
                }
            }
        } else {
            break;
        }
    }
}

impl<'a> SchemaParser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            inner: Parser::new(s)
                .with_whitespace(skip_whitespace),
        }
    }

    pub fn parse_schema(&mut self) -> Result<Schema, ParseError> {
        let mut out = Schema::default();

        while !self.inner.at_end() {
            let keyword = self.expect_ident("expected block declaration such as 'model' or 'enum'")?;
            match keyword.as_str() {
                "enum" => out.enums.push(self.parse_enum()?),
                "model" => out.models.push(self.parse_model()?),
                // datasource, generator, type, view
                _ => self.skip_block(&keyword)?,
            }
        }

        Ok(out)
    }

    pub fn parse_ident(&mut self) -> Option<Ident> {
        self.inner.atomic(|parser| {
            let start = parser.location;
            if !parser.take(|c: char| c.is_ascii_alphabetic() || c == '_') {
                return None;
            }

            while parser.take(|c: char| c.is_ascii_alphanumeric() || c == '_') {}

            let value = parser.source[start.index..parser.location.index].to_owned();
            Some(Ident {
                value,
                location: start,
                length: parser.location.index - start.index,
            })
        })
    }

    fn expect_ident(&mut self, message: &str) -> Result<Ident, ParseError> {
        self.parse_ident()
            .ok_or_else(|| ParseError::new(message, self.inner.location))
    }

    fn parse_enum(&mut self) -> Result<Enum, ParseError> {
        let name = self.expect_ident("expected enum name")?;
        self.inner.expect('{')?;

        let mut values = Vec::new();
        while !self.inner.at_end() && !self.inner.peek('}') {
            if self.inner.take("@@") {
                self.parse_attribute()?;
                continue;
            }

            let value = self.expect_ident("expected enum value")?;
            while self.peek_field_attribute() {
                self.inner.expect('@')?;
                self.parse_attribute()?;
            }
            values.push(value.value);
        }
        self.inner.expect('}')?;

        Ok(Enum {
            name,
            values,
        })
    }

    fn parse_model(&mut self) -> Result<Model, ParseError> {
        let name = self.expect_ident("expected model name")?;
        self.inner.expect('{')?;

        let mut table_name = None;
        let mut fields = Vec::new();
        while !self.inner.at_end() && !self.inner.peek('}') {
            if self.inner.take("@@") {
                let attribute = self.parse_attribute()?;
                if attribute.name == "map" {
                    let mapped = attribute.string_argument()
                        .ok_or_else(|| ParseError::new(
                            format!("@@map on model {} expects a table name", name),
                            self.inner.location,
                        ))?;
                    table_name = Some(mapped.to_owned());
                }
                continue;
            }

            if let Some(field) = self.parse_field()? {
                fields.push(field);
            }
        }
        self.inner.expect('}')?;

        Ok(Model {
            table_name: table_name.unwrap_or_else(|| name.to_lowercase()),
            name,
            fields,
        })
    }

    /// Parses one field declaration. List fields of a non-scalar type
    /// (the many side of a relation) are consumed and dropped.
    fn parse_field(&mut self) -> Result<Option<Field>, ParseError> {
        let name = self.expect_ident("expected field name")?;
        let (declared_type, optional) = self.parse_field_type()?;
        let mut end = self.inner.location.index;

        let mut attributes = Vec::new();
        while self.peek_field_attribute() {
            self.inner.expect('@')?;
            attributes.push(self.parse_attribute()?);
            end = self.inner.location.index;
        }

        let raw_declaration = self.inner.source[name.location.index..end].to_owned();
        let is_relation = attributes.iter().any(|attribute| attribute.name == "relation");

        if let Some(base) = declared_type.strip_suffix("[]") {
            if DataType::from_name(base).is_none() {
                return Ok(None);
            }
        }

        Ok(Some(Field {
            name,
            declared_type,
            optional,
            is_relation,
            raw_declaration,
            attributes,
        }))
    }

    fn parse_field_type(&mut self) -> Result<(String, bool), ParseError> {
        let start = self.location_after_whitespace();
        let name = self.parse_ident()
            .ok_or_else(|| ParseError::new("expected field type", start))?;

        self.inner.adjacent(|parser| {
            // Unsupported("...")
            if parser.take('(') {
                skip_delimited(parser, '(', ')')?;
            }
            parser.take("[]");
            let end = parser.location.index;
            let optional = parser.take('?');
            let declared_type = parser.source[name.location.index..end].to_owned();
            Ok((declared_type, optional))
        })
    }

    fn peek_field_attribute(&mut self) -> bool {
        self.inner.peek('@') && !self.inner.peek("@@")
    }

    /// Parses an attribute body after its `@` or `@@` marker.
    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        let name = self.inner.atomic(|parser| {
            let mut name = String::new();
            loop {
                let segment_start = parser.location.index;
                if !parser.take(|c: char| c.is_ascii_alphabetic() || c == '_') {
                    return Err(ParseError::new("expected attribute name", parser.location));
                }
                while parser.take(|c: char| c.is_ascii_alphanumeric() || c == '_') {}
                name.push_str(&parser.source[segment_start..parser.location.index]);

                if !parser.take('.') {
                    break Ok(name);
                }
                name.push('.');
            }
        })?;

        // arguments must follow the name directly
        let args = self.inner.adjacent(|parser| {
            if !parser.take('(') {
                return Ok(None);
            }
            let args_start = parser.location.index;
            skip_delimited(parser, '(', ')')?;
            let args_end = parser.location.index - 1;
            Ok(Some(parser.source[args_start..args_end].to_owned()))
        })?;

        Ok(Attribute {
            name,
            args,
        })
    }

    fn skip_block(&mut self, keyword: &Ident) -> Result<(), ParseError> {
        if self.parse_ident().is_none() {
            return Err(ParseError::new(
                format!("expected name after {:?}", keyword.as_str()),
                self.inner.location,
            ));
        }
        self.inner.expect('{')?;
        self.inner.adjacent(|parser| skip_delimited(parser, '{', '}'))
    }

    fn location_after_whitespace(&mut self) -> Location {
        self.inner.whitespace();
        self.inner.location
    }
}

/// Skips to the `close` matching an already consumed `open`, stepping over
/// string literals and line comments.
fn skip_delimited(parser: &mut Parser, open: char, close: char) -> Result<(), ParseError> {
    let start = parser.location;
    let mut depth = 1usize;
    while depth > 0 {
        let Some(c) = parser.take_char() else {
            return Err(ParseError::new(format!("unterminated {:?}, expected {:?}", open, close), start));
        };

        match c {
            '"' => loop {
                match parser.take_char() {
                    Some('\\') => {
                        parser.take_char();
                    }
                    Some('"') => break,
                    Some(_) => {}
                    None => return Err(ParseError::new("unterminated string", start)),
                }
            },
            '/' if parser.peek('/') => {
                while parser.take(|c: char| c != '\n') {}
            }
            c if c == open => depth += 1,
            c if c == close => depth -= 1,
            _ => {}
        }
    }
    Ok(())
}
