//! Shared infrastructure for the weather backend
//!
//! This crate provides the pieces the service crate builds on: PostgreSQL
//! connection pooling, database health checks, and typed database errors.

pub mod database;
pub mod error;
