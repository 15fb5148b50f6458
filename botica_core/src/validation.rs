//! Checks on conversation payloads handed to the sales-advisory intents.

use thiserror::Error;

pub const MIN_PAYLOAD_CHARS: usize = 50;
pub const MAX_PAYLOAD_CHARS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("conversation is blank")]
    Blank,

    #[error("conversation has {0} characters, fewer than {MIN_PAYLOAD_CHARS}")]
    TooShort(usize),

    #[error("conversation has {0} characters, more than {MAX_PAYLOAD_CHARS}")]
    TooLong(usize),
}

/// Accept a payload that is non-blank and 50..=10 000 characters long.
pub fn validate_payload(payload: &str) -> Result<&str, PayloadError> {
    if payload.trim().is_empty() {
        return Err(PayloadError::Blank);
    }

    let chars = payload.chars().count();
    if chars < MIN_PAYLOAD_CHARS {
        return Err(PayloadError::TooShort(chars));
    }
    if chars > MAX_PAYLOAD_CHARS {
        return Err(PayloadError::TooLong(chars));
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_boundaries() {
        assert_eq!(
            validate_payload(&"a".repeat(49)),
            Err(PayloadError::TooShort(49))
        );
        assert!(validate_payload(&"a".repeat(50)).is_ok());
        assert!(validate_payload(&"a".repeat(10_000)).is_ok());
        assert_eq!(
            validate_payload(&"a".repeat(10_001)),
            Err(PayloadError::TooLong(10_001))
        );
    }

    #[test]
    fn blank_payload_is_rejected_regardless_of_length() {
        assert_eq!(validate_payload(&" ".repeat(80)), Err(PayloadError::Blank));
        assert_eq!(validate_payload(""), Err(PayloadError::Blank));
    }
}
