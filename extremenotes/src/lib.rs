pub mod config;
pub mod storage;
pub mod util;
mod lib_constants;
pub mod rng;
pub mod bin_constants;
pub mod logging;
#[cfg(test)] pub mod test;

#[doc(hidden)]
pub use log as __log;
