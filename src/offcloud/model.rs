use serde_json::Value;
use std::fmt;

/// A response body as Offcloud sent it. The API answers some endpoints
/// with JSON and others with plain text or an HTML error page, so the
/// decoded form keeps both shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Decodes a raw body, keeping the verbatim text when it is not
    /// valid JSON. Decoding never fails.
    pub fn decode(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: reqwest::StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// The request id assigned by the server, if the body carries one.
    pub fn request_id(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Json(value) => value.get("requestId").and_then(Value::as_str),
            ResponseBody::Text(_) => None,
        }
    }
}

/// The three candidate request shapes for deleting a cloud download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletionMethod {
    Get,
    PostForm,
    PostDirect,
}

impl DeletionMethod {
    /// Probe order. Fixed so the console output of one attempt never
    /// interleaves with the next.
    pub const ALL: [DeletionMethod; 3] = [
        DeletionMethod::Get,
        DeletionMethod::PostForm,
        DeletionMethod::PostDirect,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DeletionMethod::Get => "GET",
            DeletionMethod::PostForm => "POST_FORM",
            DeletionMethod::PostDirect => "POST_DIRECT",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            DeletionMethod::Get => "GET /cloud/remove/{requestId}",
            DeletionMethod::PostForm => "POST /cloud/delete",
            DeletionMethod::PostDirect => "POST /cloud/remove/{requestId}",
        }
    }
}

/// What one deletion attempt came back with.
#[derive(Clone, Debug)]
pub struct AttemptOutcome {
    pub method: DeletionMethod,
    pub success: bool,
    pub body: Option<ResponseBody>,
    pub error: Option<String>,
}

impl AttemptOutcome {
    /// Success means HTTP 200, nothing else. The body is kept for the
    /// report but not inspected; a 200 carrying an application-level
    /// error still counts as a working endpoint.
    pub fn from_response(method: DeletionMethod, response: ApiResponse) -> Self {
        Self {
            method,
            success: response.status == reqwest::StatusCode::OK,
            body: Some(response.body),
            error: None,
        }
    }

    pub fn from_error(method: DeletionMethod, error: String) -> Self {
        Self {
            method,
            success: false,
            body: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn decode_keeps_json_structured() {
        let body = ResponseBody::decode("{\"ok\":true}".to_string());
        assert_eq!(body, ResponseBody::Json(json!({"ok": true})));
    }

    #[test]
    fn decode_falls_back_to_raw_text() {
        let body = ResponseBody::decode("not json".to_string());
        assert_eq!(body, ResponseBody::Text("not json".to_string()));
    }

    #[test]
    fn status_200_is_success_even_with_error_payload() {
        let response = ApiResponse {
            status: StatusCode::OK,
            body: ResponseBody::decode("{\"error\":\"not found\"}".to_string()),
        };
        let outcome = AttemptOutcome::from_response(DeletionMethod::Get, response);
        assert!(outcome.success);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn non_200_statuses_are_failures_regardless_of_body() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let response = ApiResponse {
                status,
                body: ResponseBody::decode("{\"success\":true}".to_string()),
            };
            let outcome = AttemptOutcome::from_response(DeletionMethod::PostForm, response);
            assert!(!outcome.success, "status {} must not count as success", status);
        }
    }

    #[test]
    fn transport_error_is_recorded_on_the_outcome() {
        let outcome =
            AttemptOutcome::from_error(DeletionMethod::PostDirect, "connection refused".to_string());
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("connection refused"));
        assert!(outcome.body.is_none());
    }

    #[test]
    fn request_id_comes_from_json_bodies_only() {
        let created = ApiResponse {
            status: StatusCode::OK,
            body: ResponseBody::decode("{\"requestId\":\"687c464c\"}".to_string()),
        };
        assert_eq!(created.request_id(), Some("687c464c"));

        let text = ApiResponse {
            status: StatusCode::OK,
            body: ResponseBody::decode("687c464c".to_string()),
        };
        assert_eq!(text.request_id(), None);

        let wrong_shape = ApiResponse {
            status: StatusCode::OK,
            body: ResponseBody::decode("{\"requestId\":42}".to_string()),
        };
        assert_eq!(wrong_shape.request_id(), None);
    }
}
