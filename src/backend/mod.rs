pub mod config;
pub mod memory;
pub mod rest;
pub mod traits;

pub use config::BackendConfig;
pub use memory::MemoryBackend;
pub use rest::RestBackend;
pub use traits::PropertyBackend;
