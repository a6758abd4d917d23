//! # elemental-std
//!
//! Standard implementations for Elemental.
//!
//! This crate provides:
//! - **Components**: [`Component`], [`ComponentDescriptor`]
//! - **Wildcard registry**: [`WildcardSet`]
//! - **In-memory host runtime**: [`NativeTarget`], [`MemoryRegistry`], [`Document`]
//! - **Rendering helpers**: [`attributes`], [`html`]
//! - **Standard listeners**: [`LoggingListener`]
//! - **Testing utilities**: [`testing`]
//!
//! [`Component`]: component::Component
//! [`ComponentDescriptor`]: component::ComponentDescriptor
//! [`WildcardSet`]: wildcard::WildcardSet
//! [`NativeTarget`]: native::NativeTarget
//! [`MemoryRegistry`]: native::MemoryRegistry
//! [`Document`]: document::Document
//! [`LoggingListener`]: logging::LoggingListener

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use elemental_core;

// Modules
pub mod attributes;
pub mod component;
pub mod document;
pub mod html;
pub mod logging;
pub mod native;
pub mod testing;
pub mod wildcard;
