use pretty_assertions::assert_eq;
use crate::schema::{Attribute, Schema};

fn parse(source: &str) -> Schema {
    source.parse().unwrap()
}

#[test]
fn single_line_enum() {
    let schema = parse("enum Role { ADMIN STUDENT }");
    assert_eq!(schema.enums.len(), 1);
    assert_eq!(schema.enums[0].name, "Role");
    assert_eq!(schema.enums[0].values, vec!["ADMIN", "STUDENT"]);
}

#[test]
fn enum_comments_and_blank_lines() {
    let schema = parse(r#"
        // account roles
        enum Role {
          ADMIN   // full access

          STUDENT /* default */
          GUEST   @map("guest")
          @@map("roles")
        }
    "#);
    assert_eq!(schema.enums[0].values, vec!["ADMIN", "STUDENT", "GUEST"]);
}

#[test]
fn single_line_model() {
    let schema = parse(r#"model User { id String @id createdAt DateTime email String @unique @@map("users") }"#);
    let user = &schema.models[0];
    assert_eq!(user.name, "User");
    assert_eq!(user.table_name, "users");

    let names = user.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["id", "createdAt", "email"]);

    let email = user.get_field("email").unwrap();
    assert_eq!(email.declared_type, "String");
    assert_eq!(email.raw_declaration, "email String @unique");
    assert!(email.is_unique());
    assert!(!email.optional);
    assert!(!email.is_relation);
}

#[test]
fn table_name_defaults_to_lowercase_model_name() {
    let schema = parse("model BlogPost { id String @id }");
    assert_eq!(schema.models[0].table_name, "blogpost");
}

#[test]
fn field_details() {
    let schema = parse(r#"
        model Course {
          id          String    @id @default(uuid())
          title       String    @db.VarChar(255)
          description String?   // shown on the landing page
          price       Decimal   @default(0.00) @db.Decimal(10, 2)
          tags        String[]
          lessons     Lesson[]
          instructor  User      @relation("Teaching", fields: [instructorId], references: [id], onDelete: Cascade)
          instructorId String
          note        String    @default("a \"(quoted)\" note")

          @@unique([title, instructorId])
          @@index([instructorId])
          @@map("courses")
        }
    "#);
    let course = &schema.models[0];
    assert_eq!(course.table_name, "courses");

    let names = course.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["id", "title", "description", "price", "tags", "instructor", "instructorId", "note"]);

    let description = course.get_field("description").unwrap();
    assert!(description.optional);
    assert_eq!(description.declared_type, "String");
    assert_eq!(description.raw_declaration, "description String?");

    let title = course.get_field("title").unwrap();
    assert_eq!(title.attributes, vec![Attribute {
        name: "db.VarChar".to_owned(),
        args: Some("255".to_owned()),
    }]);

    let tags = course.get_field("tags").unwrap();
    assert!(tags.is_list());
    assert_eq!(tags.base_type(), "String");

    let instructor = course.get_field("instructor").unwrap();
    assert!(instructor.is_relation);

    let note = course.get_field("note").unwrap();
    assert_eq!(note.attributes[0].args.as_deref(), Some(r#""a \"(quoted)\" note""#));
}

#[test]
fn other_blocks_are_skipped() {
    let schema = parse(r#"
        generator client {
          provider = "prisma-client-js"
        }

        datasource db {
          provider = "postgresql"
          url      = env("DATABASE_URL") // "}" in a comment
        }

        model Tag {
          slug String @unique
        }
    "#);
    assert_eq!(schema.models.len(), 1);
    assert!(schema.models[0].has_field("slug"));
    assert!(schema.enums.is_empty());
}

#[test]
fn unsupported_types_are_kept_verbatim() {
    let schema = parse(r#"model Place { location Unsupported("geometry")? }"#);
    let location = &schema.models[0].fields[0];
    assert_eq!(location.declared_type, r#"Unsupported("geometry")"#);
    assert!(location.optional);
}

#[test]
fn errors_carry_locations() {
    let error = "model User {\n  id String\n".parse::<Schema>().unwrap_err();
    assert_eq!(error.message, "expected '}'");
    assert_eq!(error.location.line, 3);

    let error = "model User {\n  id @id\n}".parse::<Schema>().unwrap_err();
    assert_eq!(error.to_string(), "2:6: expected field type");

    let error = "model User { id String @default(now() }".parse::<Schema>().unwrap_err();
    assert!(error.message.starts_with("unterminated '('"), "{error}");
}

#[test]
fn declaration_order_is_preserved() {
    let schema = parse("model B { id String } enum Z { A } model A { id String } enum Y { B }");
    let models = schema.models.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
    let enums = schema.enums.iter().map(|e| e.name.as_str()).collect::<Vec<_>>();
    assert_eq!(models, vec!["B", "A"]);
    assert_eq!(enums, vec!["Z", "Y"]);
    assert!(schema.get_model("A").is_some());
    assert!(schema.get_enum("Y").is_some());
}
