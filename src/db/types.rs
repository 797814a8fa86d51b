use std::fmt::{Display, Formatter};
use hashbrown::HashSet;
use crate::db::ddl::quote_ident;
use crate::schema::Schema;

/// Scalar schema types and their PostgreSQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Text,
    Integer,
    Real,
    Boolean,
    Timestamp,
    Json,
    BigInt,
    Decimal,
    Uuid,
    Bytes,
}

impl DataType {
    pub const ALL: [DataType; 10] = [
        DataType::Text,
        DataType::Integer,
        DataType::Real,
        DataType::Boolean,
        DataType::Timestamp,
        DataType::Json,
        DataType::BigInt,
        DataType::Decimal,
        DataType::Uuid,
        DataType::Bytes,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|data_type| data_type.schema_name() == name)
    }

    pub fn schema_name(self) -> &'static str {
        match self {
            DataType::Text => "String",
            DataType::Integer => "Int",
            DataType::Real => "Float",
            DataType::Boolean => "Boolean",
            DataType::Timestamp => "DateTime",
            DataType::Json => "Json",
            DataType::BigInt => "BigInt",
            DataType::Decimal => "Decimal",
            DataType::Uuid => "UUID",
            DataType::Bytes => "Bytes",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            DataType::Text => "TEXT",
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Boolean => "BOOLEAN",
            DataType::Timestamp => "TIMESTAMP WITH TIME ZONE",
            DataType::Json => "JSONB",
            DataType::BigInt => "BIGINT",
            DataType::Decimal => "DECIMAL",
            DataType::Uuid => "UUID",
            DataType::Bytes => "BYTEA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Scalar(DataType),
    Array(DataType),
    /// A schema enum, rendered as its quoted type name.
    Enum(String),
}

impl ColumnType {
    #[inline]
    pub fn is_text_or_uuid(&self) -> bool {
        matches!(self, ColumnType::Scalar(DataType::Text | DataType::Uuid))
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Scalar(data_type) => f.write_str(data_type.sql()),
            ColumnType::Array(data_type) => write!(f, "{}[]", data_type.sql()),
            ColumnType::Enum(name) => f.write_str(&quote_ident(name)),
        }
    }
}

/// Resolves declared field types against the scalars and the schema's enums.
#[derive(Default, Debug, Clone)]
pub struct TypeStore {
    enums: HashSet<String>,
}

impl TypeStore {
    pub fn for_schema(schema: &Schema) -> Self {
        let mut out = Self::default();
        for item in &schema.enums {
            out.enums.insert(item.name.value.clone());
        }
        out
    }

    #[inline]
    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    /// Unknown types fall back to `TEXT`, unknown list types to `TEXT[]`.
    pub fn resolve(&self, declared_type: &str) -> ColumnType {
        if self.is_enum(declared_type) {
            return ColumnType::Enum(declared_type.to_owned());
        }

        if let Some(base) = declared_type.strip_suffix("[]") {
            let data_type = DataType::from_name(base).unwrap_or(DataType::Text);
            return ColumnType::Array(data_type);
        }

        ColumnType::Scalar(DataType::from_name(declared_type).unwrap_or(DataType::Text))
    }
}
