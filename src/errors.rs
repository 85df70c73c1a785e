use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode habits: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum HabitError {
    #[error("habit name must not be empty")]
    Validation,
    /// The in-memory change was applied but could not be written out.
    #[error("change applied but not saved, it may not survive a restart: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<HabitError> for AppError {
    fn from(err: HabitError) -> Self {
        match err {
            HabitError::Validation => Self::bad_request(err.to_string()),
            HabitError::Persistence(_) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_errors_map_to_status_codes() {
        let validation: AppError = HabitError::Validation.into();
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let persistence: AppError = HabitError::from(PersistenceError::from(io)).into();
        assert_eq!(persistence.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(persistence.message.contains("may not survive a restart"));
        assert!(persistence.message.contains("read-only"));
    }
}
