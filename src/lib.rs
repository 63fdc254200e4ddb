//! repo-rank crate
//!
//! This crate is an implementation detail of the `repo-rank` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod facts;

#[doc(hidden)]
pub mod metrics;

#[doc(hidden)]
pub mod ranking;

#[doc(hidden)]
pub mod reports;
