//! Schema migration registration.
//!
//! Extensions declare their durable tables to the host's migration runner;
//! the runner decides when (and whether) to apply the creation scripts.

/// The host's schema migration runner.
pub trait SchemaRegistrar {
    /// Register a table and the SQL script that creates it.
    fn add_table(&mut self, table: &str, create_sql: &str);
}

/// Recording [`SchemaRegistrar`] for tests.
#[derive(Debug, Default)]
pub struct MemorySchema {
    /// Registered (table, creation script) pairs, in registration order.
    pub tables: Vec<(String, String)>,
}

impl MemorySchema {
    /// Create an empty registrar.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaRegistrar for MemorySchema {
    fn add_table(&mut self, table: &str, create_sql: &str) {
        self.tables.push((table.to_string(), create_sql.to_string()));
    }
}
