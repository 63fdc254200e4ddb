//! Thin client for the GitHub REST API.

mod client;
pub mod types;

pub use client::{GithubClient, NotFound};
