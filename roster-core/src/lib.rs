//! # Roster Core
//!
//! Core library for the Roster user directory, providing the domain types,
//! credential management, authorization policy, and persistence layer behind
//! the HTTP server.
//!
//! ## Overview
//!
//! `roster-core` is the security-critical slice of the Roster service:
//!
//! - **Credential Management**: Argon2id password hashing and verification
//!   with a configurable work factor
//! - **User Directory**: registration, authentication, lookup, selective
//!   update, and deletion of user records
//! - **Change-Set Validation**: whitelist-checked, parameterized partial
//!   updates that make column injection impossible by construction
//! - **Authorization Policy**: the single canonical allow/deny table for
//!   every action class
//! - **Persistence Port**: a trait-based `UserStore` with PostgreSQL and
//!   in-memory implementations
//!
//! ## Architecture
//!
//! - [`user`]: user records, identities, and request payloads
//! - [`credentials`]: password hashing and verification
//! - [`changeset`]: partial-update validation and query construction
//! - [`policy`]: the authorization policy engine
//! - [`store`]: the persistence port and its implementations
//! - [`directory`]: the service composing the above
//! - [`api`]: route constants and the response envelope shared with clients

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Common API routes and response envelope shared across Roster services
pub mod api;

/// Change-set validation and partial-update query construction
pub mod changeset;

/// Password hashing and verification
pub mod credentials;

/// The user directory service
pub mod directory;

/// Error types and error handling utilities
pub mod error;

/// Authorization policy engine
pub mod policy;

/// Persistence port and implementations
pub mod store;

/// User records, identities, and request payloads
pub mod user;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use directory::UserDirectory;
pub use error::{DirectoryError, Result};
pub use user::{Identity, NewUser, UserRecord, UserSummary};
