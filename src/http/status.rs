//! Protocol status code classification.
//!
//! # Responsibilities
//! - Map numeric status codes returned by upstream nodes to a symbolic entry
//! - Report codes outside the known set explicitly instead of guessing
//!
//! # Design Decisions
//! - The table is a `'static` slice sorted by code; lookups binary-search it
//! - Nothing mutates the table, so it is shared freely across tasks
//! - 419, 420, 425, 427, 430 and 509 are deliberately absent

use axum::http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Range-level classification of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusCategory {
    /// Classify any code in 100..=599 by its hundreds digit.
    pub const fn of(code: u16) -> Option<Self> {
        match code {
            100..=199 => Some(Self::Informational),
            200..=299 => Some(Self::Success),
            300..=399 => Some(Self::Redirection),
            400..=499 => Some(Self::ClientError),
            500..=599 => Some(Self::ServerError),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "information",
            Self::Success => "success",
            Self::Redirection => "redirection",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCodeEntry {
    pub code: u16,
    pub category: StatusCategory,
    pub reason: &'static str,
}

impl StatusCodeEntry {
    const fn new(code: u16, category: StatusCategory, reason: &'static str) -> Self {
        Self {
            code,
            category,
            reason,
        }
    }

    /// Convert for use by the HTTP listener.
    pub fn to_http(&self) -> StatusCode {
        // Every enumerated code lies in 100..=999, which `from_u16` accepts.
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for StatusCodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.code, self.reason, self.category)
    }
}

/// Lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The code is not one of the enumerated entries.
    #[error("unmapped status code {0}")]
    Unmapped(u16),
}

use StatusCategory::{ClientError, Informational, Redirection, ServerError, Success};

static STATUS_TABLE: &[StatusCodeEntry] = &[
    StatusCodeEntry::new(100, Informational, "Continue"),
    StatusCodeEntry::new(101, Informational, "Switching Protocols"),
    StatusCodeEntry::new(102, Informational, "Processing"),
    StatusCodeEntry::new(200, Success, "OK"),
    StatusCodeEntry::new(201, Success, "Created"),
    StatusCodeEntry::new(202, Success, "Accepted"),
    StatusCodeEntry::new(203, Success, "Non-Authoritative Information"),
    StatusCodeEntry::new(204, Success, "No Content"),
    StatusCodeEntry::new(205, Success, "Reset Content"),
    StatusCodeEntry::new(206, Success, "Partial Content"),
    StatusCodeEntry::new(207, Success, "Multi-Status"),
    StatusCodeEntry::new(208, Success, "Already Reported"),
    StatusCodeEntry::new(226, Success, "IM Used"),
    StatusCodeEntry::new(300, Redirection, "Multiple Choices"),
    StatusCodeEntry::new(301, Redirection, "Moved Permanently"),
    StatusCodeEntry::new(302, Redirection, "Found"),
    StatusCodeEntry::new(303, Redirection, "See Other"),
    StatusCodeEntry::new(304, Redirection, "Not Modified"),
    StatusCodeEntry::new(305, Redirection, "Use Proxy"),
    StatusCodeEntry::new(307, Redirection, "Temporary Redirect"),
    StatusCodeEntry::new(308, Redirection, "Permanent Redirect"),
    StatusCodeEntry::new(400, ClientError, "Bad Request"),
    StatusCodeEntry::new(401, ClientError, "Unauthorized"),
    StatusCodeEntry::new(402, ClientError, "Payment Required"),
    StatusCodeEntry::new(403, ClientError, "Forbidden"),
    StatusCodeEntry::new(404, ClientError, "Not Found"),
    StatusCodeEntry::new(405, ClientError, "Method Not Allowed"),
    StatusCodeEntry::new(406, ClientError, "Not Acceptable"),
    StatusCodeEntry::new(407, ClientError, "Proxy Authentication Required"),
    StatusCodeEntry::new(408, ClientError, "Request Timeout"),
    StatusCodeEntry::new(409, ClientError, "Conflict"),
    StatusCodeEntry::new(410, ClientError, "Gone"),
    StatusCodeEntry::new(411, ClientError, "Length Required"),
    StatusCodeEntry::new(412, ClientError, "Precondition Failed"),
    StatusCodeEntry::new(413, ClientError, "Payload Too Large"),
    StatusCodeEntry::new(414, ClientError, "URI Too Long"),
    StatusCodeEntry::new(415, ClientError, "Unsupported Media Type"),
    StatusCodeEntry::new(416, ClientError, "Range Not Satisfiable"),
    StatusCodeEntry::new(417, ClientError, "Expectation Failed"),
    StatusCodeEntry::new(418, ClientError, "I'm a teapot"),
    StatusCodeEntry::new(421, ClientError, "Misdirected Request"),
    StatusCodeEntry::new(422, ClientError, "Unprocessable Entity"),
    StatusCodeEntry::new(423, ClientError, "Locked"),
    StatusCodeEntry::new(424, ClientError, "Failed Dependency"),
    StatusCodeEntry::new(426, ClientError, "Upgrade Required"),
    StatusCodeEntry::new(428, ClientError, "Precondition Required"),
    StatusCodeEntry::new(429, ClientError, "Too Many Requests"),
    StatusCodeEntry::new(431, ClientError, "Request Header Fields Too Large"),
    StatusCodeEntry::new(451, ClientError, "Unavailable For Legal Reasons"),
    StatusCodeEntry::new(500, ServerError, "Internal Server Error"),
    StatusCodeEntry::new(501, ServerError, "Not Implemented"),
    StatusCodeEntry::new(502, ServerError, "Bad Gateway"),
    StatusCodeEntry::new(503, ServerError, "Service Unavailable"),
    StatusCodeEntry::new(504, ServerError, "Gateway Timeout"),
    StatusCodeEntry::new(505, ServerError, "HTTP Version Not Supported"),
    StatusCodeEntry::new(506, ServerError, "Variant Also Negotiates"),
    StatusCodeEntry::new(507, ServerError, "Insufficient Storage"),
    StatusCodeEntry::new(508, ServerError, "Loop Detected"),
    StatusCodeEntry::new(510, ServerError, "Not Extended"),
    StatusCodeEntry::new(511, ServerError, "Network Authentication Required"),
];

/// Look up a numeric code.
pub fn lookup(code: u16) -> Result<&'static StatusCodeEntry, StatusError> {
    STATUS_TABLE
        .binary_search_by_key(&code, |entry| entry.code)
        .map(|idx| &STATUS_TABLE[idx])
        .map_err(|_| StatusError::Unmapped(code))
}

/// The whole table, ascending by code.
pub fn entries() -> &'static [StatusCodeEntry] {
    STATUS_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_codes() {
        let not_found = lookup(404).unwrap();
        assert_eq!(not_found.category, StatusCategory::ClientError);
        assert_eq!(not_found.reason, "Not Found");

        let ok = lookup(200).unwrap();
        assert_eq!(ok.category, StatusCategory::Success);
        assert_eq!(ok.reason, "OK");
        assert_eq!(ok.to_http(), StatusCode::OK);
    }

    #[test]
    fn test_gaps_are_unmapped() {
        for code in [0, 99, 103, 209, 306, 419, 420, 425, 427, 430, 509, 512, 600] {
            assert_eq!(lookup(code), Err(StatusError::Unmapped(code)), "code {code}");
        }
        assert_eq!(
            StatusError::Unmapped(419).to_string(),
            "unmapped status code 419"
        );
    }

    #[test]
    fn test_table_is_sorted_and_sized() {
        let table = entries();
        assert_eq!(table.len(), 60);
        assert!(table.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn test_entries_agree_with_range_category() {
        for entry in entries() {
            assert_eq!(StatusCategory::of(entry.code), Some(entry.category));
            assert_eq!(entry.to_http().as_u16(), entry.code);
        }
    }

    #[test]
    fn test_expected_ranges_present() {
        let expected: Vec<u16> = (100..=102)
            .chain(200..=208)
            .chain([226])
            .chain(300..=305)
            .chain(307..=308)
            .chain(400..=418)
            .chain(421..=424)
            .chain([426, 428, 429, 431, 451])
            .chain(500..=508)
            .chain(510..=511)
            .collect();
        let actual: Vec<u16> = entries().iter().map(|e| e.code).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            lookup(503).unwrap().to_string(),
            "503 Service Unavailable (server_error)"
        );
    }
}
