//! # stockroom-database
//!
//! PostgreSQL connection management, migrations, and the [`IdentityStore`]
//! abstraction with its Postgres and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryIdentityStore;
pub use repositories::UserRepository;
pub use store::IdentityStore;
