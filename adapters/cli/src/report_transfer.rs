#![allow(clippy::missing_errors_doc)]

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use word_defence_core::SessionReport;

const REPORT_DOMAIN: &str = "words";
const REPORT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded report payload.
pub(crate) const REPORT_HEADER: &str = "words:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a session report into a single-line string suitable for
/// clipboard or scoreboard transfer.
pub(crate) fn encode(report: &SessionReport) -> String {
    let json = serde_json::to_vec(report).expect("session report serialization never fails");
    let encoded = STANDARD_NO_PAD.encode(json);
    format!("{REPORT_HEADER}:{encoded}")
}

/// Decodes a session report from the provided string representation.
pub(crate) fn decode(value: &str) -> Result<SessionReport, ReportTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReportTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(ReportTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(ReportTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(ReportTransferError::MissingPayload)?;

    if domain != REPORT_DOMAIN {
        return Err(ReportTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != REPORT_VERSION {
        return Err(ReportTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
    let report = serde_json::from_slice(&bytes)?;
    Ok(report)
}

/// Errors that can occur while decoding report transfer strings.
#[derive(Debug, Error)]
pub(crate) enum ReportTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("report payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded report.
    #[error("report string is missing the prefix")]
    MissingPrefix,
    /// The encoded report did not contain a version segment.
    #[error("report string is missing the version")]
    MissingVersion,
    /// The encoded report did not include the payload segment.
    #[error("report string is missing the payload")]
    MissingPayload,
    /// The encoded report used an unexpected prefix segment.
    #[error("report prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded report used an unsupported version identifier.
    #[error("report version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode report payload")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse report payload")]
    InvalidPayload(#[from] serde_json::Error),
}
