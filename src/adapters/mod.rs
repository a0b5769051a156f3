// Adapters layer: concrete implementations of the domain ports.

pub mod memory_cache;

pub use memory_cache::InMemoryCache;
