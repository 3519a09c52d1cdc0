//! Lifecycle coordination (startup ordering lives in `main`; shutdown here).

pub mod shutdown;

pub use shutdown::{Shutdown, ShutdownHandle};
