//! Client-side YouTube URL validation.
//!
//! The check is deliberately permissive and mirrors what the backend accepts:
//! optional scheme, optional `www.`, a youtube.com / youtu.be host, and any
//! non-empty path. There is no video-id shape check.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// User-facing message shown for any rejected input.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid YouTube URL";

lazy_static! {
    static ref YOUTUBE_URL: Regex =
        Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/.+$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{INVALID_URL_MESSAGE}")]
    NotAYouTubeUrl,
}

/// Check that the input looks like a YouTube URL.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    if YOUTUBE_URL.is_match(raw.trim()) {
        Ok(())
    } else {
        Err(ValidationError::NotAYouTubeUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_standard_watch_urls() {
        assert!(validate("https://www.youtube.com/watch?v=abc123").is_ok());
        assert!(validate("http://youtube.com/watch?v=abc123").is_ok());
        assert!(validate("www.youtube.com/watch?v=abc123").is_ok());
        assert!(validate("youtube.com/watch?v=abc123").is_ok());
    }

    #[test]
    fn accepts_short_link_hosts() {
        assert!(validate("https://youtu.be/abc123").is_ok());
        assert!(validate("youtu.be/abc123").is_ok());
        // The dot in youtu.be is optional in the accepted shape.
        assert!(validate("youtube/watch?v=abc123").is_ok());
    }

    #[test]
    fn rejects_non_urls_and_other_hosts() {
        assert!(validate("not a url").is_err());
        assert!(validate("").is_err());
        assert!(validate("https://vimeo.com/12345").is_err());
        assert!(validate("https://example.com/youtube.com/watch").is_err());
    }

    #[test]
    fn rejects_bare_host_without_path() {
        assert!(validate("https://www.youtube.com").is_err());
        assert!(validate("youtu.be/").is_err());
    }

    #[test]
    fn error_carries_the_user_facing_message() {
        let err = validate("nope").unwrap_err();
        assert_eq!(err.to_string(), INVALID_URL_MESSAGE);
    }
}
