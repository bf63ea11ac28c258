/// API route handlers
///
/// - `fallback`: Enveloped 404 and 405 replies
/// - `health`: Health check endpoint
/// - `jira`: Jira instance CRUD and JQL story search

pub mod fallback;
pub mod health;
pub mod jira;
