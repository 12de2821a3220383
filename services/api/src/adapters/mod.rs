pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::PgDocumentStore;
