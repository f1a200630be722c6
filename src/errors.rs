use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use mongodb::error::Error as MongoError;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Internal server error")]
    InternalError,

    #[display(fmt = "Bad request: {}", _0)]
    BadRequest(String),

    #[display(fmt = "Database error: {}", _0)]
    DatabaseError(String),

    #[display(fmt = "Unauthorized: {}", _0)]
    Unauthorized(String),
}

impl From<MongoError> for ApiError {
    fn from(error: MongoError) -> Self {
        log::error!("MongoDB error: {}", error);
        ApiError::DatabaseError(error.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<MongoError>() {
            Ok(mongo_error) => ApiError::from(mongo_error),
            Err(error) => {
                log::error!("Anyhow error: {}", error);
                ApiError::InternalError
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalError | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::InternalError => "Internal server error".to_string(),
            ApiError::DatabaseError(ref message) => format!("Database error: {}", message),
            ApiError::BadRequest(ref message) | ApiError::Unauthorized(ref message) => {
                message.clone()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body() {
        let response = ApiError::BadRequest("Invalid pool id".into()).error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Invalid pool id" }));
    }

    #[actix_web::test]
    async fn test_anyhow_error_without_mongo_source_is_internal() {
        let error = ApiError::from(anyhow::anyhow!("connection refused"));
        assert!(matches!(error, ApiError::InternalError));

        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Internal server error" }));
    }

    #[actix_web::test]
    async fn test_anyhow_wrapping_mongo_error_is_database_error() {
        let mongo_error = MongoError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        let error = ApiError::from(anyhow::Error::from(mongo_error));

        assert!(matches!(error, ApiError::DatabaseError(_)));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
