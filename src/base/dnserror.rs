use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DnsError {
    // Input validation errors
    #[error("input is empty")]
    EmptyInput,
    #[error("unsupported URL scheme: '{0}'")]
    UnsupportedScheme(String),
    #[error("malformed URL")]
    MalformedUrl,
    #[error("URL does not contain a host")]
    MissingHost,
    #[error("host is empty after normalization")]
    EmptyHost,
    #[error("invalid internationalized domain name")]
    InvalidIdn,
    #[error("hostname exceeds 253 characters")]
    HostnameTooLong,
    #[error("hostname contains empty labels")]
    EmptyLabel,
    #[error("invalid hostname label: '{0}'")]
    InvalidLabel(String),

    // Resolution errors
    #[error("DNS resolution timed out for '{0}'")]
    Timeout(String),
    #[error("domain does not exist: '{0}'")]
    NxDomain(String),
    #[error("no nameservers available for '{0}'")]
    NoNameservers(String),
    #[error("DNS resolution failed for '{0}'")]
    ResolutionFailed(String),
}

impl DnsError {
    /// True for errors produced while turning raw input into a canonical host.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DnsError::EmptyInput
                | DnsError::UnsupportedScheme(_)
                | DnsError::MalformedUrl
                | DnsError::MissingHost
                | DnsError::EmptyHost
                | DnsError::InvalidIdn
                | DnsError::HostnameTooLong
                | DnsError::EmptyLabel
                | DnsError::InvalidLabel(_)
        )
    }

    /// True for DNS/lookup-layer failures, including timeouts.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            DnsError::Timeout(_)
                | DnsError::NxDomain(_)
                | DnsError::NoNameservers(_)
                | DnsError::ResolutionFailed(_)
        )
    }

    /// True only for the timeout specialization, so callers can apply
    /// different handling (e.g. suggest a retry).
    pub fn is_timeout(&self) -> bool {
        matches!(self, DnsError::Timeout(_))
    }
}
