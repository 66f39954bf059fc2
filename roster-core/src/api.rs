//! Versioned API route definitions and the response envelope shared
//! between the Roster server and its clients.

use serde::{Deserialize, Serialize};

macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

pub mod routes {
    /// Versioned API route definitions
    pub mod v1 {
        pub const ROOT: &str = "/api/v1";

        pub const HEALTH: &str = v1_path!("/health");

        pub mod auth {
            pub const REGISTER: &str = v1_path!("/auth/register");
            pub const LOGIN: &str = v1_path!("/auth/login");
        }

        pub mod users {
            pub const COLLECTION: &str = v1_path!("/users");
            pub const ITEM: &str = v1_path!("/users/{username}");
        }
    }

    pub mod utils {
        /// Replace a single path parameter (e.g. `"{username}"`) with the
        /// provided value.
        pub fn replace_param(route: &str, param: &str, value: impl AsRef<str>) -> String {
            route.replace(param, value.as_ref())
        }
    }
}

/// Uniform JSON envelope for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(error),
            message: None,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}
