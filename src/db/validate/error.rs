use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("model {model} has a duplicated field {field:?}")]
    DuplicateField {
        model: String,
        field: String,
    },
    #[error("model {model:?} is declared more than once")]
    DuplicateModel {
        model: String,
    },
    #[error("models {first} and {second} both map to table {table:?}")]
    DuplicateTable {
        table: String,
        first: String,
        second: String,
    },
    #[error("enum {name:?} is declared more than once")]
    DuplicateEnum {
        name: String,
    },
    #[error("enum {name} has a duplicated value {value:?}")]
    DuplicateEnumValue {
        name: String,
        value: String,
    },
    #[error("enum {name} has no values")]
    EmptyEnum {
        name: String,
    },
}
