use serde::Serialize;

pub const JSON: &str = "application/json";
pub const CSV: &str = "text/csv; charset=utf-8";

/// Transport-independent response produced by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: JSON,
                headers: Vec::new(),
                body,
            },
            Err(error) => {
                tracing::error!(%error, "failed to serialize response body");
                Self::error(500, "failed to serialize response")
            }
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: JSON,
            headers: Vec::new(),
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    pub fn attachment(body: Vec<u8>, file_name: &str) -> Self {
        Self {
            status: 200,
            content_type: CSV,
            headers: vec![(
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            )],
            body,
        }
    }

    pub const fn no_content() -> Self {
        Self {
            status: 204,
            content_type: JSON,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Parse the body back as JSON. Test helper.
    #[cfg(test)]
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body should be JSON")
    }

    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
