pub mod config;
pub mod error;
pub mod grid;
pub mod harness;
pub mod implementations;
pub mod init;
pub mod preset;
pub mod report;
pub mod timer;

pub use error::HimenoError;
pub use grid::{Field, Shape};
pub use implementations::{jacobi, Stencil, Strategy};
