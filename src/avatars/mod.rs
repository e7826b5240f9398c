pub mod allocator;
pub mod conductor;
pub mod config;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod wasm;

pub use allocator::*;
pub use conductor::*;
pub use config::*;
pub use error::*;
pub use parser::*;
pub use resolver::*;
pub use types::*;
pub use wasm::*;

#[cfg(test)]
mod tests;
