// src/lib.rs

// module declarations
pub mod config;
pub mod errors;
pub mod http;
pub mod object;
pub mod static_server;

// re-exports
pub use config::*;
pub use errors::*;
pub use http::*;
pub use object::*;
pub use static_server::*;
