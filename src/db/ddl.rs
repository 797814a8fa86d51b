use crate::db::model::{Column, Table};
use crate::schema::Enum;

/// Database used to check for and create the target database.
pub const MAINTENANCE_DATABASE: &str = "postgres";

pub const UUID_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

#[inline]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[inline]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn create_database(database: &str, owner: &str) -> String {
    format!(
        "CREATE DATABASE {} WITH OWNER = {} ENCODING = 'UTF8'",
        quote_ident(database),
        quote_ident(owner),
    )
}

pub fn drop_enum(item: &Enum) -> String {
    format!("DROP TYPE IF EXISTS {} CASCADE", quote_ident(&item.name))
}

pub fn create_enum(item: &Enum) -> String {
    let values = item.values.iter()
        .map(|value| quote_literal(value))
        .collect::<Vec<_>>();
    format!("CREATE TYPE {} AS ENUM ({})", quote_ident(&item.name), values.join(","))
}

pub fn drop_table(table: &Table) -> String {
    format!("DROP TABLE IF EXISTS {} CASCADE", quote_ident(&table.name))
}

/// `None` when the table has no columns left after removing relations.
pub fn create_table(table: &Table) -> Option<String> {
    if table.columns.is_empty() {
        return None;
    }

    let columns = table.columns.iter()
        .map(column_definition)
        .collect::<Vec<_>>();
    Some(format!(
        "CREATE TABLE {} (\n  {}\n)",
        quote_ident(&table.name),
        columns.join(",\n  "),
    ))
}

pub fn column_definition(column: &Column) -> String {
    let name = quote_ident(&column.name);
    let column_type = &column.column_type;

    match column.name.as_str() {
        "id" if column_type.is_text_or_uuid() => {
            format!("{name} {column_type} PRIMARY KEY DEFAULT gen_random_uuid()")
        }
        "createdAt" | "updatedAt" => format!("{name} {column_type} DEFAULT NOW()"),
        _ if column.optional => format!("{name} {column_type}"),
        _ => format!("{name} {column_type} NOT NULL"),
    }
}

pub fn unique_constraint_name(table: &Table, column: &Column) -> String {
    format!("{}_{}_unique", table.name, column.name)
}

pub fn index_name(table: &Table, column: &Column) -> String {
    format!("{}_{}_idx", table.name, column.name)
}

pub fn add_unique(table: &Table, column: &Column) -> String {
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} UNIQUE ({})",
        quote_ident(&table.name),
        quote_ident(&unique_constraint_name(table, column)),
        quote_ident(&column.name),
    )
}

pub fn create_index(table: &Table, column: &Column) -> String {
    format!(
        "CREATE INDEX {} ON {} ({})",
        quote_ident(&index_name(table, column)),
        quote_ident(&table.name),
        quote_ident(&column.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::model::Table;
    use crate::db::types::TypeStore;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    fn tables(source: &str) -> (Schema, Vec<Table>) {
        let schema: Schema = source.parse().unwrap();
        let type_store = TypeStore::for_schema(&schema);
        let tables = schema.models.iter()
            .map(|model| Table::resolve(model, &type_store))
            .collect();
        (schema, tables)
    }

    #[test]
    fn enum_statements() {
        let (schema, _) = tables("enum Role { ADMIN STUDENT }");
        let role = &schema.enums[0];
        assert_eq!(drop_enum(role), r#"DROP TYPE IF EXISTS "Role" CASCADE"#);
        assert_eq!(create_enum(role), r#"CREATE TYPE "Role" AS ENUM ('ADMIN','STUDENT')"#);
    }

    #[test]
    fn user_table() {
        let (_, tables) = tables(r#"model User { id String @id createdAt DateTime email String @unique @@map("users") }"#);
        let users = &tables[0];
        assert_eq!(drop_table(users), r#"DROP TABLE IF EXISTS "users" CASCADE"#);
        assert_eq!(
            create_table(users).unwrap(),
            concat!(
                "CREATE TABLE \"users\" (\n",
                "  \"id\" TEXT PRIMARY KEY DEFAULT gen_random_uuid(),\n",
                "  \"createdAt\" TIMESTAMP WITH TIME ZONE DEFAULT NOW(),\n",
                "  \"email\" TEXT NOT NULL\n",
                ")",
            ),
        );

        let email = &users.columns[2];
        assert_eq!(
            add_unique(users, email),
            r#"ALTER TABLE "users" ADD CONSTRAINT "users_email_unique" UNIQUE ("email")"#,
        );
        assert_eq!(
            create_index(users, email),
            r#"CREATE INDEX "users_email_idx" ON "users" ("email")"#,
        );
    }

    #[test]
    fn column_rules() {
        let (_, tables) = tables(r#"
            enum Level {
              BEGINNER
              ADVANCED
            }

            model Course {
              id        Int       @id @default(autoincrement())
              title     String
              summary   String?
              level     Level     @default(BEGINNER)
              tags      String[]
              updatedAt DateTime  @updatedAt
              authorId  String
              author    User      @relation(fields: [authorId], references: [id])
            }
        "#);
        let course = &tables[0];
        let definitions = course.columns.iter()
            .map(column_definition)
            .collect::<Vec<_>>();
        assert_eq!(definitions, vec![
            r#""id" INTEGER NOT NULL"#,
            r#""title" TEXT NOT NULL"#,
            r#""summary" TEXT"#,
            r#""level" "Level" NOT NULL"#,
            r#""tags" TEXT[] NOT NULL"#,
            r#""updatedAt" TIMESTAMP WITH TIME ZONE DEFAULT NOW()"#,
            r#""authorId" TEXT NOT NULL"#,
        ]);
    }

    #[test]
    fn uuid_ids_get_generated_defaults() {
        let (_, tables) = tables("model Token { id UUID @id value String }");
        assert_eq!(
            column_definition(&tables[0].columns[0]),
            r#""id" UUID PRIMARY KEY DEFAULT gen_random_uuid()"#,
        );
    }

    #[test]
    fn tables_without_columns_are_not_created() {
        let (_, tables) = tables("model Link { owner User @relation(fields: [ownerId], references: [id]) }");
        assert!(tables[0].columns.is_empty());
        assert_eq!(create_table(&tables[0]), None);
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(
            create_database("gis gate", "postgres"),
            r#"CREATE DATABASE "gis gate" WITH OWNER = "postgres" ENCODING = 'UTF8'"#,
        );
    }
}
