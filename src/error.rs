use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    /// The settings cannot hold a playable session.
    InvalidSettings(String),
    /// No free spot for food was found.
    FieldSaturated { attempts: u32 },
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidSettings(reason) => write!(f, "invalid settings: {}", reason),
            SnakeError::FieldSaturated { attempts } => write!(
                f,
                "play field saturated: no free food spot after {} attempts",
                attempts
            ),
        }
    }
}

impl std::error::Error for SnakeError {}
