use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

mod mapping;
mod nginx;

pub use mapping::{DomainMapping, MappingStore};
pub use nginx::{render_all, render_mapping};

/// Reasons a (source, proxy) submission is rejected. All of these are
/// recoverable: the store is left untouched and the message is meant for
/// whoever typed the domains.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("both a source domain and a proxy domain are required")]
    MissingInput,
    #[error("source domain is not a valid host name: {0}")]
    MalformedSource(String),
    #[error("proxy domain is not a valid host name: {0}")]
    MalformedProxy(String),
    #[error("a mapping for source domain {0} already exists")]
    DuplicateSource(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("no mapping at position {position}, the list has {len} entries")]
    OutOfRange { position: usize, len: usize },
}

// One or more dot-separated labels, each 1-63 alphanumeric/hyphen
// characters with no leading or trailing hyphen.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("domain pattern compiles")
});

/// Syntactic check only: no resolution, reachability or registry-suffix
/// validation.
pub fn is_valid_domain(name: &str) -> bool {
    DOMAIN_PATTERN.is_match(name)
}

/// Escapes the literal dots of a domain for use inside an nginx regex
/// directive. One-way transform: applying it twice escapes the escapes,
/// so never re-apply it to its own output.
pub fn escape_for_regex(domain: &str) -> String {
    domain.replace('.', "\\.")
}
