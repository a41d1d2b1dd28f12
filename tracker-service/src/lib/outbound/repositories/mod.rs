mod bug;
mod comment;
mod project;
mod user;

pub use bug::PostgresBugRepository;
pub use comment::PostgresCommentRepository;
pub use project::PostgresProjectRepository;
pub use user::PostgresUserRepository;

/// Database failures the repositories translate into domain errors.
fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_foreign_key_violation())
        .unwrap_or(false)
}

/// Name of the violated constraint, if the database reported one.
fn violated_constraint(e: &sqlx::Error) -> Option<&str> {
    e.as_database_error().and_then(|db_err| db_err.constraint())
}
