//! Host and port checks.

use thiserror::Error;

/// Why a host was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("host contains a null byte")]
    NullByte,

    /// IDNA-encoded names are ASCII; raw Unicode is not accepted here.
    #[error("host is not ASCII")]
    NonAscii,

    #[error("label {label:?} is not valid IDNA: {reason}")]
    Idna { label: String, reason: String },
}

/// Returns true if `port` fits in a TCP port number.
pub fn is_valid_port(port: i64) -> bool {
    (0..=65535).contains(&port)
}

/// Check that `host` is an IDNA-encoded hostname free of null bytes.
///
/// Only the encoding is checked. Every `xn--` label must decode as punycode;
/// other labels pass through as plain ASCII, so empty hosts, IP literals and
/// names no resolver would accept are all let through.
pub fn check_host(host: &str) -> Result<(), HostError> {
    if !host.is_ascii() {
        return Err(HostError::NonAscii);
    }
    for label in host.split('.') {
        let is_ace = label
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xn--"));
        if !is_ace {
            continue;
        }
        let (_, outcome) = idna::domain_to_unicode(label);
        outcome.map_err(|e| HostError::Idna {
            label: label.to_string(),
            reason: e.to_string(),
        })?;
    }
    if host.contains('\0') {
        return Err(HostError::NullByte);
    }
    Ok(())
}

/// Returns true if `host` passes [`check_host`].
pub fn is_valid_host(host: &str) -> bool {
    check_host(host).is_ok()
}
