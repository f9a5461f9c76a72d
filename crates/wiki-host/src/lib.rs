//! # wiki-host
//!
//! Host platform interface types for wiki extensions.
//!
//! A wiki extension never talks to the database, the object cache, or the
//! job queue directly; it goes through a small set of host capabilities.
//! This crate defines those capabilities as traits, plus the shared value
//! types (navigation links, message keys, HTML helpers) extensions use to
//! talk back to the host.
//!
//! Every capability trait ships with an in-memory reference implementation
//! (`MemoryCache`, `MemoryJobQueue`, ...). These are faithful to the host
//! semantics the traits promise (TTL expiry, increment-on-present-only,
//! queue deduplication hooks) and are what extension test suites run
//! against.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod cache;
pub mod html;
pub mod jobs;
pub mod message;
pub mod nav;
pub mod output;
pub mod request;
pub mod schema;
pub mod store;
pub mod user;

pub use cache::{CacheStore, MemoryCache};
pub use jobs::{JobQueue, MemoryJobQueue, QueuedJob};
pub use message::{MapMessages, MessageKey, Messages};
pub use nav::NavLink;
pub use output::{MemoryOutput, OutputPage};
pub use request::{FormRequest, WebRequest};
pub use schema::{MemorySchema, SchemaRegistrar};
pub use store::{CountRow, CountStore, MemoryCountStore};
pub use user::{MemoryUserStore, UserId, UserStore};
