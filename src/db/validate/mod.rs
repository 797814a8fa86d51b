mod error;
mod model;

pub use error::ValidationError;
use hashbrown::HashSet;
use crate::schema::Schema;

/// Collects every issue in the schema instead of stopping at the first one.
pub fn validate_schema(schema: &Schema) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    validate_enums(schema, &mut issues);
    model::validate(schema, &mut issues);
    issues
}

fn validate_enums(schema: &Schema, issues: &mut Vec<ValidationError>) {
    let mut names = HashSet::<&str>::new();
    for item in schema.enums.iter() {
        if !names.insert(item.name.as_str()) {
            issues.push(ValidationError::DuplicateEnum {
                name: item.name.value.clone(),
            });
        }

        if item.values.is_empty() {
            issues.push(ValidationError::EmptyEnum {
                name: item.name.value.clone(),
            });
        }

        let mut values = HashSet::<&str>::new();
        for value in item.values.iter() {
            if !values.insert(value.as_str()) {
                issues.push(ValidationError::DuplicateEnumValue {
                    name: item.name.value.clone(),
                    value: value.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn issues(source: &str) -> Vec<ValidationError> {
        let schema: Schema = source.parse().unwrap();
        validate_schema(&schema)
    }

    #[test]
    fn clean_schema_has_no_issues() {
        let found = issues(r#"
            enum Role { ADMIN STUDENT }
            model User {
              id    String @id
              role  Role
              @@map("users")
            }
        "#);
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn reports_enum_issues() {
        let found = issues("enum Role { ADMIN ADMIN } enum Role { } ");
        assert_eq!(found, vec![
            ValidationError::DuplicateEnumValue {
                name: "Role".to_owned(),
                value: "ADMIN".to_owned(),
            },
            ValidationError::DuplicateEnum {
                name: "Role".to_owned(),
            },
            ValidationError::EmptyEnum {
                name: "Role".to_owned(),
            },
        ]);
    }

    #[test]
    fn reports_model_issues() {
        let found = issues(r#"
            model User { id String id Int }
            model Account { id String @@map("user") }
            model User { id String }
        "#);
        assert_eq!(found, vec![
            ValidationError::DuplicateField {
                model: "User".to_owned(),
                field: "id".to_owned(),
            },
            ValidationError::DuplicateTable {
                table: "user".to_owned(),
                first: "User".to_owned(),
                second: "Account".to_owned(),
            },
            ValidationError::DuplicateModel {
                model: "User".to_owned(),
            },
        ]);
        assert_eq!(
            found[1].to_string(),
            r#"models User and Account both map to table "user""#,
        );
    }
}
