use hashbrown::{HashMap, HashSet};
use crate::db::validate::ValidationError;
use crate::schema::{Model, Schema};

pub fn validate(schema: &Schema, issues: &mut Vec<ValidationError>) {
    let mut model_names = HashSet::<&str>::new();
    let mut tables = HashMap::<&str, &str>::new();

    for model in schema.models.iter() {
        if !model_names.insert(model.name.as_str()) {
            issues.push(ValidationError::DuplicateModel {
                model: model.name.value.clone(),
            });
            continue;
        }

        if let Some(first) = tables.insert(model.table_name.as_str(), model.name.as_str()) {
            issues.push(ValidationError::DuplicateTable {
                table: model.table_name.clone(),
                first: first.to_owned(),
                second: model.name.value.clone(),
            });
        }

        validate_fields(model, issues);
    }
}

fn validate_fields(model: &Model, issues: &mut Vec<ValidationError>) {
    let mut field_names = HashSet::<&str>::new();
    for field in model.fields.iter() {
        if !field_names.insert(field.name.as_str()) {
            issues.push(ValidationError::DuplicateField {
                model: model.name.value.clone(),
                field: field.name.value.clone(),
            });
        }
    }
}
