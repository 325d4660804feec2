//! Transport-neutral request and response descriptors.
//!
//! Operations describe *what* to send; a [`Transport`](super::Transport) decides
//! how. Keeping these types free of `reqwest` is what lets tests swap in
//! [`MockTransport`](super::mock::MockTransport).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A resource path relative to the API base URL, kept as raw segments.
///
/// Segments are percent-encoded by the transport, so identifiers, contact
/// numbers and passwords can be passed through unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiPath(Vec<String>);

impl ApiPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// One file attached to a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A multipart form: scalar text fields plus attached files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    /// Adds the field only when a value is present.
    pub fn optional_text(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(FormData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: ApiPath,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: ApiPath) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            body: RequestBody::Empty,
        }
    }

    pub fn post(path: ApiPath, body: RequestBody) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            body,
        }
    }

    pub fn put(path: ApiPath) -> Self {
        Self {
            method: HttpMethod::Put,
            path,
            body: RequestBody::Empty,
        }
    }

    pub fn delete(path: ApiPath) -> Self {
        Self {
            method: HttpMethod::Delete,
            path,
            body: RequestBody::Empty,
        }
    }
}

/// Raw response as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
