use axum::body::Body;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{
    async_trait,
    response::{IntoResponse, Response},
    Json, RequestExt,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Serialize)]
pub struct ValidationResponseBody {
    error: String,
    fields: ValidationErrors,
    req_id: String,
}

/// JSON body extractor that runs `validator` checks and rejects with a 400
/// carrying the per-field error map.
#[derive(Debug)]
pub struct JsonValidated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonValidated<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<()>,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        match content_type {
            Some(content_type) if content_type.starts_with("application/json") => {
                let Json(payload) = req.extract().await.map_err(IntoResponse::into_response)?;
                payload.validate().map_err(|fields| {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(ValidationResponseBody {
                            error: "Validation failed".to_string(),
                            fields,
                            req_id: Uuid::new_v4().to_string(),
                        }),
                    )
                        .into_response()
                })?;
                Ok(Self(payload))
            }
            _ => Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response()),
        }
    }
}
