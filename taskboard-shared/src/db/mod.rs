/// Database plumbing for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pools, one per store
/// - `migrations`: sqlx migration runners for the users and tasks stores
///
/// The users and tasks tables are deliberately independent: each gets its
/// own pool and its own migration directory, so they can live in separate
/// databases if the deployment wants that. Pointing both URLs at the same
/// database is the common case and works fine.

pub mod migrations;
pub mod pool;
