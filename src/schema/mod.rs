use std::path::Path;
use std::str::FromStr;
use anyhow::Context as _;
use crate::parser::{Ident, ParseError};

pub mod parser;

#[cfg(test)]
mod tests;

pub use parser::SchemaParser;

/// Enums and models of a schema file, in declaration order.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Schema {
    pub enums: Vec<Enum>,
    pub models: Vec<Model>,
}

impl FromStr for Schema {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaParser::new(s).parse_schema()
    }
}

impl Schema {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read schema file {}", path.display()))?;
        let schema = content.parse::<Schema>()
            .with_context(|| format!("unable to parse schema file {}", path.display()))?;
        Ok(schema)
    }

    pub fn get_enum(&self, name: impl AsRef<str>) -> Option<&Enum> {
        let name = name.as_ref();
        self.enums.iter().find(|item| item.name == name)
    }

    pub fn get_model(&self, name: impl AsRef<str>) -> Option<&Model> {
        let name = name.as_ref();
        self.models.iter().find(|model| model.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: Ident,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: Ident,
    /// `@@map("...")` target, or the lowercased model name.
    pub table_name: String,
    pub fields: Vec<Field>,
}

impl Model {
    #[inline]
    pub fn has_field(&self, field: impl AsRef<str>) -> bool {
        let field = field.as_ref();
        self.fields.iter()
            .any(|f| f.name == field)
    }

    pub fn get_field(&self, field: impl AsRef<str>) -> Option<&Field> {
        let field = field.as_ref();
        self.fields.iter().find(|f| f.name == field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Ident,
    /// Type token without the optional marker, `String` or `String[]`.
    pub declared_type: String,
    pub optional: bool,
    pub is_relation: bool,
    pub raw_declaration: String,
    pub attributes: Vec<Attribute>,
}

impl Field {
    pub fn base_type(&self) -> &str {
        self.declared_type
            .strip_suffix("[]")
            .unwrap_or(&self.declared_type)
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        self.declared_type.ends_with("[]")
    }

    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }

    #[inline]
    pub fn is_unique(&self) -> bool {
        self.has_attribute("unique")
    }
}

/// A `@name(args)` or `@@name(args)` annotation. Arguments are kept as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub args: Option<String>,
}

impl Attribute {
    /// First string literal in the argument list, `@@map("users")` gives `users`.
    pub fn string_argument(&self) -> Option<&str> {
        let args = self.args.as_deref()?;
        let start = args.find('"')? + 1;
        let length = args[start..].find('"')?;
        Some(&args[start..start + length])
    }
}
