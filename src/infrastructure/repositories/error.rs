use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

const CATEGORY_SLUG_COLUMN: &str = "categories.slug";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation if db_err.message().contains(CATEGORY_SLUG_COLUMN) => {
                DomainError::Conflict("category slug already exists".into())
            }
            ErrorKind::UniqueViolation => {
                DomainError::Conflict("unique constraint violated".into())
            }
            ErrorKind::ForeignKeyViolation => {
                DomainError::NotFound("referenced record not found".into())
            }
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                DomainError::Validation(db_err.message().to_string())
            }
            _ => DomainError::Persistence(db_err.message().to_string()),
        },
        _ => DomainError::Persistence(err.to_string()),
    }
}
