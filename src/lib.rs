pub mod error;
pub mod hook;
pub mod options;

mod strategy;
pub use strategy::*;

#[cfg(test)]
mod test_support;
