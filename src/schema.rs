//! Durable schema registration.

use wiki_host::SchemaRegistrar;

/// Name of the durable per-feature count table.
pub const USER_COUNTS_TABLE: &str = "betafeatures_user_counts";

/// Creation script for [`USER_COUNTS_TABLE`].
pub const CREATE_USER_COUNTS_SQL: &str = include_str!("../sql/create_counts.sql");

/// Register this extension's tables with the host's migration runner.
pub fn register_schema(registrar: &mut dyn SchemaRegistrar) {
    registrar.add_table(USER_COUNTS_TABLE, CREATE_USER_COUNTS_SQL);
}
