//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryContentRepository;
pub use postgres::PgContentRepository;
