use serde::Serialize;

use crate::operation::OperationOutput;

/// Response body shared by every route.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<OperationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn healthy(official_email: impl Into<String>) -> Self {
        Self {
            is_success: true,
            official_email: Some(official_email.into()),
            data: None,
            error: None,
        }
    }

    pub fn success(official_email: impl Into<String>, data: OperationOutput) -> Self {
        Self {
            data: Some(data),
            ..Self::healthy(official_email)
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: None,
            data: None,
            error: Some(error.into()),
        }
    }
}
