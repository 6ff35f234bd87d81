use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[cfg(feature = "mongodb")]
    #[error("Database error: {0}")]
    Database(mongodb::error::Error),

    /// A uniqueness constraint rejected the write
    #[error("{field} must be unique")]
    Conflict { field: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    pub fn conflict(field: impl Into<String>) -> Self {
        PersistError::Conflict { field: field.into() }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PersistError::Conflict { .. })
    }
}

#[cfg(feature = "mongodb")]
const DUPLICATE_KEY_CODE: i32 = 11000;

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for PersistError {
    fn from(error: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        let duplicate = match error.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
            ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
            _ => false,
        };

        if duplicate {
            // only `content` carries a unique index
            PersistError::conflict("content")
        } else {
            PersistError::Database(error)
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_names_the_field() {
        let error = PersistError::conflict("content");
        assert!(error.is_conflict());
        assert_eq!(error.to_string(), "content must be unique");
        assert!(!PersistError::Internal("boom".to_string()).is_conflict());
    }

    #[cfg(feature = "mongodb")]
    mod mongodb_errors {
        use super::*;
        use mongodb::error::{CommandError, ErrorKind, WriteError, WriteFailure};

        fn write_error(code: i32) -> mongodb::error::Error {
            let error: WriteError = bson::from_document(bson::doc! {
                "code": code,
                "errmsg": "E11000 duplicate key error collection: happyThoughts.thoughts index: content_1",
            })
            .unwrap();
            ErrorKind::Write(WriteFailure::WriteError(error)).into()
        }

        fn command_error(code: i32) -> mongodb::error::Error {
            let error: CommandError = bson::from_document(bson::doc! {
                "code": code,
                "codeName": "DuplicateKey",
                "errmsg": "E11000 duplicate key error",
            })
            .unwrap();
            ErrorKind::Command(error).into()
        }

        #[test]
        fn test_duplicate_key_write_is_a_conflict() {
            let error = PersistError::from(write_error(11000));
            assert!(matches!(error, PersistError::Conflict { ref field } if field == "content"));
        }

        #[test]
        fn test_duplicate_key_command_is_a_conflict() {
            assert!(PersistError::from(command_error(11000)).is_conflict());
        }

        #[test]
        fn test_other_write_errors_stay_database_errors() {
            assert!(matches!(
                PersistError::from(write_error(121)),
                PersistError::Database(_)
            ));
            assert!(matches!(
                PersistError::from(command_error(13)),
                PersistError::Database(_)
            ));
        }
    }
}
