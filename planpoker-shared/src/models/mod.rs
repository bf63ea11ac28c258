/// Database models for PlanPoker
///
/// Each model owns its SQL and exposes async CRUD functions taking a
/// `PgPool`.
///
/// # Models
///
/// - `jira_instance`: Jira credentials stored per user

pub mod jira_instance;
