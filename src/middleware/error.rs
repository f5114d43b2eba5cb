use std::fmt;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    AuthenticationFail,
    RegisterFail { description: String },
    AuthorizationFail { required: String },
    AuthFailNoBearerToken,
    AuthFailJwtInvalid { source: String },
    EntityFailIdNotFound { ident: String },
    CommentNotFound { ident: String },
    AlreadyLiked { post: String },
    NotLiked { post: String },
    Serde { source: String },
    SurrealDb { source: String },
}

pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// For errors raised before a request id is attached.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

// less verbose error mappings in entity/service code
impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value.into(),
        }
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::AuthenticationFail => write!(f, "Authentication failed"),
            Self::RegisterFail { description } => write!(f, "{description}"),
            Self::AuthorizationFail { .. } => write!(f, "Not authorized"),
            Self::AuthFailNoBearerToken => write!(f, "You are not logged in"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "The provided token is not valid"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id={ident} not found"),
            Self::CommentNotFound { ident } => write!(f, "Comment id={ident} not found"),
            Self::AlreadyLiked { .. } => write!(f, "Post already liked"),
            Self::NotLiked { .. } => write!(f, "Post was not liked"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
            Self::SurrealDb { .. } => write!(f, "{INTERNAL}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    error: String,
    req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

// REST error response
impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!(req_id = %self.req_id, error = ?self.error, "into_response");
        let status_code = match self.error {
            AppError::EntityFailIdNotFound { .. } | AppError::CommentNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            AppError::AlreadyLiked { .. } => StatusCode::CONFLICT,
            AppError::NotLiked { .. }
            | AppError::Generic { .. }
            | AppError::RegisterFail { .. }
            | AppError::Serde { .. }
            | AppError::SurrealDb { .. } => StatusCode::BAD_REQUEST,
            AppError::AuthenticationFail
            | AppError::AuthFailNoBearerToken
            | AppError::AuthFailJwtInvalid { .. } => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationFail { .. } => StatusCode::FORBIDDEN,
        };
        let err = self.error.clone();
        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, Json(body)).into_response();
        // keep the real error on the response for the trace layer
        response.extensions_mut().insert(err);
        response
    }
}

// External errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::SurrealDb {
            source: value.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}
