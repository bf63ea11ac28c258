//! # PlanPoker Shared Library
//!
//! Types, persistence and integrations shared by the PlanPoker API server.
//!
//! ## Module Organization
//!
//! - `auth`: JWT tokens and caller identity
//! - `db`: Connection pool and migrations
//! - `models`: Database models and their SQL
//! - `services`: Data-service trait used by HTTP handlers
//! - `jira`: Jira REST client

pub mod auth;
pub mod db;
pub mod jira;
pub mod models;
pub mod services;

/// Current version of the PlanPoker shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
