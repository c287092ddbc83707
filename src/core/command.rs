use async_trait::async_trait;
use crate::core::errors::CatalogError;

#[derive(Debug)]
pub enum CommandError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<CatalogError> for CommandError {
    fn from(other: CatalogError) -> Self {
        match other {
            CatalogError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            CatalogError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            CatalogError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            CatalogError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            CatalogError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            CatalogError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            CatalogError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::errors::CatalogError;

    #[tokio::test]
    async fn test_should_map_catalog_errors() {
        assert!(matches!(CommandError::from(CatalogError::not_found("x")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(CatalogError::duplicate_key("x")), CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(CatalogError::unavailable("x", None, true)),
            CommandError::Runtime { retryable: true, .. }));
        assert!(matches!(CommandError::from(CatalogError::validation("x", Some("Title".to_string()))),
            CommandError::Validation { reason_code: Some(_), .. }));
    }
}
