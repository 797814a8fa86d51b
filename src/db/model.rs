use crate::db::types::{ColumnType, TypeStore};
use crate::schema;

/// Column names that get a plain index even without `@unique`.
pub const INDEXED_COLUMNS: [&str; 3] = ["email", "username", "slug"];

/// A model resolved against the [`TypeStore`], relation fields removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub model: String,
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn resolve(model: &schema::Model, type_store: &TypeStore) -> Self {
        let columns = model.fields.iter()
            .filter(|field| !field.is_relation)
            .map(|field| Column {
                name: field.name.value.clone(),
                column_type: type_store.resolve(&field.declared_type),
                optional: field.optional,
                unique: field.is_unique(),
            })
            .collect();

        Self {
            model: model.name.value.clone(),
            name: model.table_name.clone(),
            columns,
        }
    }

    #[inline]
    pub fn has_column(&self, column: impl AsRef<str>) -> bool {
        let column = column.as_ref();
        self.columns.iter()
            .any(|c| c.name == column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub optional: bool,
    pub unique: bool,
}

impl Column {
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.unique || INDEXED_COLUMNS.contains(&self.name.as_str())
    }
}
