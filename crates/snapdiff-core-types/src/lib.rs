//! Core types shared across snapdiff facilities
//!
//! This crate provides the canonical field keys, event names and record
//! kind labels used by the logging facility and by log assertions in tests.

pub mod schema;
