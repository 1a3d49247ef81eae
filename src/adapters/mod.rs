// Adapters layer: concrete implementations of the domain ports.

pub mod csv_store;
pub mod memory;
pub mod storage;

pub use csv_store::CsvRepository;
pub use memory::InMemoryRepository;
pub use storage::LocalStorage;
