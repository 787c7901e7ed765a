use serde::Serialize;

/// The `{status, message, data}` envelope every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = ()> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse {
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            status: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            status: false,
            message: message.into(),
            data: None,
        }
    }
}
