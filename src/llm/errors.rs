use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("no API key configured for the completion provider")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("provider returned no completion text")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
