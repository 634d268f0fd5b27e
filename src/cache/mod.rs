//! In-process content cache for resource writes
//!
//! Keeps the last content written for each resource name so that writes of
//! unchanged content can skip the disk and reads can be served from memory.
//!
//! # Write Rules
//!
//! | Cached | Incoming | Result |
//! |--------|----------|--------|
//! | none | empty | unchanged, nothing written |
//! | none | non-empty | written, cached |
//! | same bytes | same bytes | unchanged |
//! | old bytes | new bytes | written, cache replaced |
//!
//! The cache is only updated after the disk write succeeds.

pub mod content;
pub mod fingerprint;

pub use content::{CacheEntry, ContentCache, WriteOutcome};
pub use fingerprint::Fingerprint;
