use actix_multipart::MultipartError;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use diesel::r2d2::PoolError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Phone already registered")]
    DuplicatePhone,
    #[error("Field `{0}` is not valid UTF-8")]
    InvalidField(&'static str),
    #[error("Missing form field `{0}`")]
    MissingField(&'static str),
    #[error("Field `{field}` exceeds {limit} bytes")]
    FieldTooLarge { field: &'static str, limit: usize },
    #[error("Profile picture exceeds {limit} bytes")]
    PictureTooLarge { limit: usize },
    #[error("User not found")]
    UserNotFound,
    #[error("Profile picture not found")]
    PictureNotFound,

    // not a #[source]: MultipartError is not std::error::Error in actix-multipart 0.4
    #[error("failed to read multipart payload: {0}")]
    Multipart(MultipartError),
    #[error("failed to check out a database connection")]
    Pool(#[from] PoolError),
    #[error("database query failed")]
    Database(#[from] diesel::result::Error),
    #[error("failed to render template")]
    Template(#[from] tera::Error),
    #[error("blocking task was cancelled")]
    Blocking(#[from] BlockingError),
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Multipart(err)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail | AppError::DuplicatePhone | AppError::InvalidField(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FieldTooLarge { .. } | AppError::PictureTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AppError::UserNotFound | AppError::PictureNotFound => StatusCode::NOT_FOUND,
            AppError::Multipart(_)
            | AppError::Pool(_)
            | AppError::Database(_)
            | AppError::Template(_)
            | AppError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let detail = if status.is_server_error() {
            tracing::error!(error = ?self, "{}", self);
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            tracing::debug!(status = status.as_u16(), "{}", self);
            self.to_string()
        };

        HttpResponse::build(status).json(json!({ "detail": detail }))
    }
}
