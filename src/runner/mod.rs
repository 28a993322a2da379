pub mod backoff;
pub mod executor;
pub mod registry;
pub mod runner;

pub use executor::*;
pub use registry::*;
pub use runner::*;
