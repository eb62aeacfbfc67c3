//! Authenticated request client.
//!
//! Every call is a single round trip. A 401 or 403 logs the session out
//! before the error reaches the caller, so the next guard decision already
//! sees an anonymous session.

use std::fmt;

use reqwest::{
    Method, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::models::ApiEnvelope;
use tracing::{debug, warn};

use crate::{
    error::ClientError,
    resources::{Articles, Banners, Categories, Submissions, Uploads, Users},
    session::SessionManager,
};

const UPLOAD_IMAGE_PATH: &str = "/upload/image";
const REQUEST_FAILED: &str = "Request failed";

/// HTTP methods the backend exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Per-request overrides: method, JSON body, and extra headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Defaults to `GET`.
    pub method: HttpMethod,
    /// JSON body, sent as-is.
    pub body: Option<Value>,
    /// Applied after the defaults, replacing any header with the same name.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// A plain `GET`.
    pub fn get() -> Self {
        Self::default()
    }

    /// A `DELETE` without a body.
    pub fn delete() -> Self {
        Self::method(HttpMethod::Delete)
    }

    /// Bodyless options for `method`.
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Options for `method` carrying `payload` serialized as JSON.
    pub fn json<T: Serialize + ?Sized>(method: HttpMethod, payload: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| ClientError::InvalidRequest(err.to_string()))?;
        Ok(Self {
            method,
            body: Some(body),
            headers: Vec::new(),
        })
    }

    /// Adds a header that overrides the defaults on a name clash.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Sends requests on behalf of a [`SessionManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    session: SessionManager,
}

impl ApiClient {
    /// Client attaching the credentials of `session`.
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    /// The session whose token is sent and which a 401/403 logs out.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Article endpoints.
    pub fn articles(&self) -> Articles {
        Articles::new(self.clone())
    }

    /// Category endpoints.
    pub fn categories(&self) -> Categories {
        Categories::new(self.clone())
    }

    /// Banner endpoints.
    pub fn banners(&self) -> Banners {
        Banners::new(self.clone())
    }

    /// Staff account endpoints (admin only on the backend).
    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    /// Reader submission endpoints.
    pub fn submissions(&self) -> Submissions {
        Submissions::new(self.clone())
    }

    /// Image upload endpoint.
    pub fn uploads(&self) -> Uploads {
        Uploads::new(self.clone())
    }

    /// Sends one request and returns the parsed JSON body of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ClientError::SessionExpired`] on 401/403, after logging out.
    /// - [`ClientError::MalformedResponse`] when the body is not JSON.
    /// - [`ClientError::Request`] for any other non-2xx status.
    /// - [`ClientError::Transport`] when no response arrived.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        let RequestOptions {
            method,
            body,
            headers,
        } = options;
        let headers = self.headers(&headers)?;

        debug!(%method, path, "sending request");
        let mut builder = self
            .session
            .http()
            .request(method.into(), self.session.config().endpoint(path))
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|err| {
            warn!(%method, path, error = %err, "request failed to send");
            ClientError::transport(&err)
        })?;
        self.handle_response(path, response).await
    }

    /// Sends a request and returns the envelope's `data`.
    pub async fn request_data<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let body = self.request(path, options).await?;
        envelope_data(path, body)
    }

    /// Sends a request to an endpoint that answers `{success, message}` only.
    pub async fn request_ack(&self, path: &str, options: RequestOptions) -> Result<(), ClientError> {
        let body = self.request(path, options).await?;
        accepted(body).map(|_| ())
    }

    /// Sends a request to an endpoint that may answer without the envelope.
    /// Any 2xx counts as success unless the body says `success: false`.
    pub async fn request_bare_ack(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<(), ClientError> {
        let body = self.request(path, options).await?;
        explicit_rejection(&body).map_or(Ok(()), Err)
    }

    /// Posts an image as the multipart field `image` to `/upload/image`.
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<Value, ClientError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|err| ClientError::InvalidRequest(err.to_string()))?;
        let form = Form::new().part("image", part);

        debug!(file_name, mime, "uploading image");
        let mut builder = self
            .session
            .http()
            .post(self.session.config().endpoint(UPLOAD_IMAGE_PATH))
            .multipart(form);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(file_name, error = %err, "upload failed to send");
            ClientError::transport(&err)
        })?;
        self.handle_response(UPLOAD_IMAGE_PATH, response).await
    }

    fn headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| ClientError::InvalidRequest(err.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| ClientError::InvalidRequest(format!("header '{name}': {err}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| ClientError::InvalidRequest(format!("header '{name}': {err}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn handle_response(&self, path: &str, response: Response) -> Result<Value, ClientError> {
        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(path, status = status.as_u16(), "backend rejected the session; logging out");
            self.session.logout();
            return Err(ClientError::SessionExpired);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ClientError::transport(&err))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|err| {
            debug!(path, status = status.as_u16(), error = %err, "response was not JSON");
            ClientError::malformed(err)
        })?;

        if !status.is_success() {
            let message = server_message(&body).unwrap_or_else(|| REQUEST_FAILED.to_string());
            debug!(path, status = status.as_u16(), %message, "request failed");
            return Err(ClientError::Request {
                status: status.as_u16(),
                message,
            });
        }

        debug!(path, status = status.as_u16(), "request succeeded");
        Ok(body)
    }
}

/// The body's non-empty `message` string, if any.
pub(crate) fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Checks the envelope's `success` flag, returning the envelope.
fn accepted(body: Value) -> Result<ApiEnvelope<Value>, ClientError> {
    let envelope: ApiEnvelope<Value> =
        serde_json::from_value(body).map_err(ClientError::malformed)?;
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ClientError::Rejected(envelope.message_or(REQUEST_FAILED)))
    }
}

/// Decodes `data` from a successful envelope.
pub(crate) fn envelope_data<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, ClientError> {
    let data = accepted(body)?
        .data
        .ok_or_else(|| ClientError::MalformedResponse(format!("{path}: response carried no data")))?;
    serde_json::from_value(data)
        .map_err(|err| ClientError::MalformedResponse(format!("{path}: {err}")))
}

/// `Rejected` when the body carries `success: false`; a missing flag is not a failure.
fn explicit_rejection(body: &Value) -> Option<ClientError> {
    (body.get("success").and_then(Value::as_bool) == Some(false)).then(|| {
        ClientError::Rejected(server_message(body).unwrap_or_else(|| REQUEST_FAILED.to_string()))
    })
}

/// Decodes a body that is not wrapped in `data`, honouring `success: false`.
pub(crate) fn bare_body<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, ClientError> {
    if let Some(err) = explicit_rejection(&body) {
        return Err(err);
    }
    serde_json::from_value(body)
        .map_err(|err| ClientError::MalformedResponse(format!("{path}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(Method::from(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn options_builders() {
        let options = RequestOptions::json(HttpMethod::Post, &json!({"name": "x"}))
            .unwrap()
            .header("X-Trace", "1");
        assert_eq!(options.method, HttpMethod::Post);
        assert_eq!(options.body, Some(json!({"name": "x"})));
        assert_eq!(options.headers, vec![("X-Trace".to_string(), "1".to_string())]);
        assert_eq!(RequestOptions::delete().method, HttpMethod::Delete);
    }

    #[test]
    fn server_message_ignores_empty_and_non_strings() {
        assert_eq!(server_message(&json!({"message": "nope"})).as_deref(), Some("nope"));
        assert_eq!(server_message(&json!({"message": ""})), None);
        assert_eq!(server_message(&json!({"message": 4})), None);
        assert_eq!(server_message(&json!([])), None);
    }

    #[test]
    fn envelope_data_paths() {
        let ok: u32 = envelope_data("/x", json!({"success": true, "data": 7})).unwrap();
        assert_eq!(ok, 7);

        assert_eq!(
            envelope_data::<u32>("/x", json!({"success": false, "message": "denied"})),
            Err(ClientError::Rejected("denied".into()))
        );
        assert!(matches!(
            envelope_data::<u32>("/x", json!({"success": true})),
            Err(ClientError::MalformedResponse(_))
        ));
        assert!(matches!(
            envelope_data::<u32>("/x", json!({"success": true, "data": "seven"})),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn bare_body_honours_failure_flag() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Listing {
            items: Vec<u8>,
        }
        assert_eq!(
            bare_body::<Listing>("/x", json!({"items": [1, 2]})).unwrap(),
            Listing { items: vec![1, 2] }
        );
        assert_eq!(
            bare_body::<Listing>("/x", json!({"success": false})),
            Err(ClientError::Rejected("Request failed".into()))
        );
    }

    #[test]
    fn only_explicit_false_is_a_rejection() {
        assert_eq!(explicit_rejection(&json!({"message": "Deleted"})), None);
        assert_eq!(explicit_rejection(&json!({"success": true})), None);
        assert_eq!(
            explicit_rejection(&json!({"success": false, "message": "locked"})),
            Some(ClientError::Rejected("locked".into()))
        );
    }
}
