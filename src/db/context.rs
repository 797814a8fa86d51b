use crate::db::model::Table;
use crate::db::types::TypeStore;
use crate::schema::Schema;

/// A parsed schema together with its resolved tables.
#[derive(Debug)]
pub struct Context {
    pub schema: Schema,
    pub type_store: TypeStore,
    pub tables: Vec<Table>,
}

impl Context {
    pub fn new(schema: Schema) -> Self {
        let type_store = TypeStore::for_schema(&schema);
        let tables = schema.models.iter()
            .map(|model| Table::resolve(model, &type_store))
            .collect();

        Self {
            schema,
            type_store,
            tables,
        }
    }
}
