#[derive(Debug)]
pub enum StoreError {
    IoError(std::io::Error),
    InvalidKey(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "IO error: {}", e),
            StoreError::InvalidKey(key) => write!(f, "Invalid store key: '{}'", key),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::IoError(e) => Some(e),
            StoreError::InvalidKey(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::IoError(e)
    }
}

#[derive(Debug)]
pub enum LeaderboardError {
    InvalidInitials(String),
    StoreError(StoreError),
    EncodeError(serde_json::Error),
}

impl std::fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardError::InvalidInitials(raw) => {
                write!(f, "Initials must contain 1 to 3 characters, got '{}'", raw)
            }
            LeaderboardError::StoreError(e) => write!(f, "Store error: {}", e),
            LeaderboardError::EncodeError(e) => write!(f, "Encode error: {}", e),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardError::InvalidInitials(_) => None,
            LeaderboardError::StoreError(e) => Some(e),
            LeaderboardError::EncodeError(e) => Some(e),
        }
    }
}

impl From<StoreError> for LeaderboardError {
    fn from(e: StoreError) -> Self {
        LeaderboardError::StoreError(e)
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(e: serde_json::Error) -> Self {
        LeaderboardError::EncodeError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_initials_display() {
        let err = LeaderboardError::InvalidInitials("  ".to_string());
        assert_eq!(err.to_string(), "Initials must contain 1 to 3 characters, got '  '");
    }

    #[test]
    fn test_store_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LeaderboardError = StoreError::from(io).into();
        assert!(err.to_string().starts_with("Store error: IO error"));
    }
}
