mod in_memory;
mod json_store;
mod pg;

pub use in_memory::{InMemoryDocumentRepository, InMemoryJobRepository, InMemoryTransactionLog};
pub use json_store::JsonFileStore;
pub use pg::{create_pool, PgDocumentRepository, PgJobRepository, PgTransactionLog};
