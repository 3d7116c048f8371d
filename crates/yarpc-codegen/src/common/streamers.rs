//! Streamer helper types collected during one generation pass.
//!
//! Every distinct streamed response type gets exactly one sink helper. The
//! set is keyed by the resolved response type, so two foreign types sharing
//! a short name never fold into one helper.

use std::collections::BTreeMap;

/// Streamer helpers of one generation pass.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::common::streamers::StreamerSet;
///
/// let mut streamers = StreamerSet::new();
/// let name = |t: &str| format!("{}Streamer", t.replace('.', ""));
///
/// assert_eq!(streamers.register("billing.Invoice", name), "billingInvoiceStreamer");
/// assert_eq!(streamers.register("billing.Invoice", name), "billingInvoiceStreamer");
/// assert_eq!(streamers.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreamerSet {
    /// Resolved response type to helper name.
    by_type: BTreeMap<String, String>,
}

impl StreamerSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_type: BTreeMap::new(),
        }
    }

    /// Returns the helper name for `resolved`, registering it on first use.
    ///
    /// `name` derives the preferred helper name. When that name already
    /// belongs to a different resolved type, a numeric suffix is added
    /// before `Streamer` until the name is free.
    pub fn register(&mut self, resolved: &str, name: impl Fn(&str) -> String) -> String {
        if let Some(existing) = self.by_type.get(resolved) {
            return existing.clone();
        }

        let preferred = name(resolved);
        let mut candidate = preferred.clone();
        let stem = preferred.strip_suffix("Streamer").unwrap_or(&preferred);
        let mut n = 2;
        while self.by_type.values().any(|taken| *taken == candidate) {
            candidate = format!("{stem}{n}Streamer");
            n += 1;
        }

        tracing::debug!("Streamer {} carries {}", candidate, resolved);
        self.by_type.insert(resolved.to_string(), candidate.clone());
        candidate
    }

    /// Number of helpers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Returns `true` if no streamed method was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// `(helper name, resolved type)` pairs ordered by helper name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .by_type
            .iter()
            .map(|(resolved, name)| (name.as_str(), resolved.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short(resolved: &str) -> String {
        let short = resolved.rsplit('.').next().unwrap_or(resolved);
        format!("{short}Streamer")
    }

    #[test]
    fn test_same_type_registers_once() {
        let mut set = StreamerSet::new();
        assert_eq!(set.register("Item", short), "ItemStreamer");
        assert_eq!(set.register("Item", short), "ItemStreamer");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_clashing_names_get_distinct_helpers() {
        let mut set = StreamerSet::new();
        assert_eq!(set.register("a.Invoice", short), "InvoiceStreamer");
        assert_eq!(set.register("b.Invoice", short), "Invoice2Streamer");
        assert_eq!(set.register("c.Invoice", short), "Invoice3Streamer");
        assert_eq!(set.register("b.Invoice", short), "Invoice2Streamer");
        assert_eq!(
            set.sorted(),
            vec![
                ("Invoice2Streamer", "b.Invoice"),
                ("Invoice3Streamer", "c.Invoice"),
                ("InvoiceStreamer", "a.Invoice"),
            ]
        );
    }
}
