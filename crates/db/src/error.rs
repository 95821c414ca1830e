//! Error type for the data-access layer.

/// Errors surfaced by repository operations.
///
/// Not-found is deliberately absent: lookups and updates return `Ok(None)`
/// and deletes return `Ok(false)` when no active row matches.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A row could not be converted into the domain shape (schema drift).
    #[error("Failed to map row: {0}")]
    Mapping(#[source] sqlx::Error),

    /// The store rejected a statement or the connection failed.
    #[error("Database error: {0}")]
    Persistence(#[source] sqlx::Error),

    /// A statement with a `RETURNING` clause unexpectedly produced no row.
    #[error("{0} returned no row")]
    NoRowReturned(&'static str),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if is_mapping_error(&err) {
            DbError::Mapping(err)
        } else {
            DbError::Persistence(err)
        }
    }
}

/// Decode-class errors mean the row shape did not match the entity.
fn is_mapping_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_column_is_a_mapping_error() {
        let err = DbError::from(sqlx::Error::ColumnNotFound("cover_image".into()));
        assert_matches!(err, DbError::Mapping(_));
    }

    #[test]
    fn unknown_type_is_a_mapping_error() {
        let err = DbError::from(sqlx::Error::TypeNotFound {
            type_name: "manhwa_genre".into(),
        });
        assert_matches!(err, DbError::Mapping(_));
    }

    #[test]
    fn pool_failures_are_persistence_errors() {
        assert_matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::Persistence(_)
        );
        assert_matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Persistence(_)
        );
    }

    #[test]
    fn no_row_message_names_the_statement() {
        assert_eq!(
            DbError::NoRowReturned("insert").to_string(),
            "insert returned no row"
        );
    }
}
