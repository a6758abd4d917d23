//! In-memory host runtime.
//!
//! A headless stand-in for the platform element primitive: listener
//! registration and dispatch, plus a component registry. Components use
//! [`NativeTarget`] as their host by default.

pub mod registry;
pub mod target;

pub use registry::MemoryRegistry;
pub use target::NativeTarget;
