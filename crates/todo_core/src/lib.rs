pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod port;
pub mod service;
pub mod storage;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use uuid::Uuid;

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing title");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.to_string(), "invalid_input - missing title");
    }

    #[test]
    fn not_found_message_names_the_id() {
        let id = Uuid::nil();
        let err = AppError::not_found(id);

        assert_eq!(err.code(), "not_found");
        assert_eq!(
            err.message(),
            "Todo not found with id: 00000000-0000-0000-0000-000000000000"
        );
    }
}
