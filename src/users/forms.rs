use actix_multipart::{Field, Multipart};
use futures::StreamExt;

use crate::errors::{AppError, AppResult};

/// Upper bound for each text part.
pub const TEXT_FIELD_LIMIT: usize = 4 * 1024;

/// An uploaded profile picture. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub picture: Option<Picture>,
}

impl RegistrationForm {
    /// Reads the `name`, `email`, `phone` and `password` text parts and the
    /// optional `profile` file part. A missing file part and an empty one both
    /// mean no picture.
    pub async fn from_multipart(
        mut payload: Multipart,
        max_picture_bytes: usize,
    ) -> AppResult<Self> {
        let mut name = None;
        let mut email = None;
        let mut phone = None;
        let mut password = None;
        let mut picture = None;

        while let Some(field) = payload.next().await {
            let mut field = field?;
            let field_name = field.content_disposition().get_name().map(str::to_owned);

            match field_name.as_deref() {
                Some("name") => name = Some(read_text(&mut field, "name").await?),
                Some("email") => email = Some(read_text(&mut field, "email").await?),
                Some("phone") => phone = Some(read_text(&mut field, "phone").await?),
                Some("password") => password = Some(read_text(&mut field, "password").await?),
                Some("profile") => {
                    // actix-multipart reports application/octet-stream for a
                    // part sent without a Content-Type header
                    let content_type = field.content_type().to_string();
                    let too_large = AppError::PictureTooLarge {
                        limit: max_picture_bytes,
                    };
                    let bytes = read_bytes(&mut field, max_picture_bytes, too_large).await?;
                    picture = if bytes.is_empty() {
                        None
                    } else {
                        Some(Picture { bytes, content_type })
                    };
                }
                _ => {
                    tracing::debug!(field = ?field_name, "ignoring unexpected form field");
                    while let Some(chunk) = field.next().await {
                        chunk?;
                    }
                }
            }
        }

        Ok(RegistrationForm {
            name: name.ok_or(AppError::MissingField("name"))?,
            email: email.ok_or(AppError::MissingField("email"))?,
            phone: phone.ok_or(AppError::MissingField("phone"))?,
            password: password.ok_or(AppError::MissingField("password"))?,
            picture,
        })
    }
}

async fn read_bytes(field: &mut Field, limit: usize, too_large: AppError) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if data.len() + chunk.len() > limit {
            return Err(too_large);
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_text(field: &mut Field, name: &'static str) -> AppResult<String> {
    let too_large = AppError::FieldTooLarge {
        field: name,
        limit: TEXT_FIELD_LIMIT,
    };
    let data = read_bytes(field, TEXT_FIELD_LIMIT, too_large).await?;
    String::from_utf8(data).map_err(|_| AppError::InvalidField(name))
}
