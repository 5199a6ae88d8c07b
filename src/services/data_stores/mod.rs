mod hashmap_logbook_store;
mod postgres_logbook_store;

pub use hashmap_logbook_store::*;
pub use postgres_logbook_store::*;
