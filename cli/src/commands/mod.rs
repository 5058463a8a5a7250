//! Command implementations and shared output helpers.

pub mod keygen;
pub mod register;
pub mod sign;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Types that can print themselves for humans.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print `value` as pretty JSON or in human-readable form.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Error body returned by the registry server.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    code: String,
    message: String,
}

/// Send a request and decode the JSON response, turning server errors into
/// readable messages.
pub async fn make_request<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => Err(anyhow!(
            "{} ({}): {}",
            status,
            body.error.code,
            body.error.message
        )),
        Err(_) => Err(anyhow!("{}: {}", status, text)),
    }
}

/// Shorten long hex strings for display.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 10), "abcdef");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_error_response_deserialize() {
        let json = r#"{"error": {"code": "PROOF_FAILED", "message": "nope"}}"#;
        let body: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.code, "PROOF_FAILED");
        assert_eq!(body.error.message, "nope");
    }
}
