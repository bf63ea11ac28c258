//! # PlanPoker API Server Library
//!
//! HTTP layer for PlanPoker's Jira integration: stored Jira instances per
//! user and a JQL story search forwarded to Jira.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Extractors that reject with the standard envelope
//! - `middleware`: Authentication layers
//! - `response`: Standard JSON response envelope
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;
