use api_ingress::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    Form,
};
use serde::de::DeserializeOwned;

/// Request body accepted either as JSON or as an urlencoded form.
///
/// Anything not declared as a form is parsed as JSON; an empty body parses
/// as an empty object. Failures become 400s carrying the parser message.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        let value: serde_json::Value = serde_json::from_slice(raw)
            .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))?;
        // Bodies must be objects, never positional arrays.
        if !value.is_object() {
            return Err(AppError::bad_request("Invalid JSON body: expected an object"));
        }
        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
}
