//! Session-scoped per-host overrides.
//!
//! Two independent flags per host: skip validation entirely, or accept the
//! host's certificate even when the trust service is uncertain. Entries are
//! created on first set and live as long as the store. There is no removal.

use dashmap::DashMap;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideEntry {
    pub skip_validation: bool,
    pub trust_if_uncertain: bool,
}

#[derive(Debug, Default)]
pub struct OverrideStore {
    entries: DashMap<String, OverrideEntry>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff validation was switched off for the host.
    pub fn is_exempt(&self, host_or_url: &str) -> bool {
        self.lookup(host_or_url).is_some_and(|e| e.skip_validation)
    }

    pub fn wants_trust_if_uncertain(&self, host_or_url: &str) -> bool {
        self.lookup(host_or_url).is_some_and(|e| e.trust_if_uncertain)
    }

    pub fn exempt(&self, host_or_url: &str) {
        if let Some(host) = normalize_host(host_or_url) {
            self.entries.entry(host.clone()).or_default().skip_validation = true;
            info!(host = %host, "Validation skipped for the rest of the session");
        }
    }

    pub fn mark_trust_if_uncertain(&self, host_or_url: &str) {
        if let Some(host) = normalize_host(host_or_url) {
            self.entries.entry(host.clone()).or_default().trust_if_uncertain = true;
            info!(host = %host, "Uncertain certificate trusted for the rest of the session");
        }
    }

    pub fn get(&self, host_or_url: &str) -> Option<OverrideEntry> {
        self.lookup(host_or_url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, host_or_url: &str) -> Option<OverrideEntry> {
        let host = normalize_host(host_or_url)?;
        self.entries.get(&host).map(|e| *e)
    }
}

/// Reduce a URL or bare `host[:port]` to its lower-cased host name.
///
/// Returns `None` for input without a host.
pub fn normalize_host(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = if input.contains("://") {
        reqwest::Url::parse(input).ok()
    } else {
        reqwest::Url::parse(&format!("https://{}", input)).ok()
    };

    let host = parsed?.host_str()?.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
