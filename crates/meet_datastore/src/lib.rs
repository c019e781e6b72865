//! # DataStore Module
//!
//! This module provides functionality for interacting with a Postgres database
//! to store room ownership records and meeting transcripts with their briefings.
//!
//! The module uses sqlx for database operations and provides an abstraction layer
//! for the queries the relay service needs: recording which user created a room,
//! and upserting/reading transcript records keyed by their platform-assigned id.

mod datastore;
mod domain;

pub use datastore::postgres::PgDataStore;
pub use datastore::DataStore;
pub use domain::{Room, Transcript};
