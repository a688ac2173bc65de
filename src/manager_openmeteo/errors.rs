use std::fmt;

#[derive(Debug)]
pub enum OpenMeteoError {
    /// Upstream unreachable or answered with a non-success status
    Transport(String),
    /// Body could not be parsed as a forecast document
    Document(String),
    /// Body parsed but held no document
    Empty,
    Cancelled,
}

impl fmt::Display for OpenMeteoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpenMeteoError::Transport(e) => write!(f, "OpenMeteoError::Transport: {}", e),
            OpenMeteoError::Document(e) => write!(f, "OpenMeteoError::Document: {}", e),
            OpenMeteoError::Empty => write!(f, "OpenMeteoError::Empty: no forecast document in response"),
            OpenMeteoError::Cancelled => write!(f, "OpenMeteoError::Cancelled: request abandoned"),
        }
    }
}
impl From<reqwest::Error> for OpenMeteoError {
    fn from(e: reqwest::Error) -> Self {
        OpenMeteoError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for OpenMeteoError {
    fn from(e: serde_json::Error) -> Self {
        OpenMeteoError::Document(e.to_string())
    }
}
