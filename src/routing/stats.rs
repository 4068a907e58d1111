use serde::Serialize;

use crate::core::origin::OriginId;

/// Per-origin counters collected during one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OriginStats {
    /// Records claimed by this origin
    pub claimed: u64,
    /// Adjacent duplicate names seen in the read-name list (only counted with the audit on)
    pub duplicate_names: u64,
    /// First name still expected when the merged stream ran out, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_expected: Option<String>,
}

impl OriginStats {
    /// Whether the origin still had unconsumed names at the end of the pass
    #[must_use]
    pub fn has_leftovers(&self) -> bool {
        self.next_expected.is_some()
    }
}

/// Diagnostic counters for one reconciliation pass. None of these are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutingStats {
    /// Records read from the merged input
    pub records_read: u64,
    /// Records no origin claimed
    pub unaccounted: u64,
    /// Reference or mate reference fields rewritten (remap only)
    pub references_rewritten: u64,
    /// Reference fields left as-is because their translation slot was unset (remap only)
    pub references_untranslated: u64,
    /// Indexed by origin position
    pub origins: Vec<OriginStats>,
}

impl RoutingStats {
    #[must_use]
    pub fn new(origin_count: usize) -> Self {
        Self {
            origins: vec![OriginStats::default(); origin_count],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn claimed(&self, origin: OriginId) -> u64 {
        self.origins.get(origin.index()).map_or(0, |o| o.claimed)
    }

    #[must_use]
    pub fn claimed_total(&self) -> u64 {
        self.origins.iter().map(|o| o.claimed).sum()
    }

    /// Origins whose read-name lists were not fully consumed
    #[must_use]
    pub fn origins_with_leftovers(&self) -> Vec<OriginId> {
        self.origins
            .iter()
            .enumerate()
            .filter(|(_, o)| o.has_leftovers())
            .map(|(i, _)| OriginId(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut stats = RoutingStats::new(3);
        stats.origins[0].claimed = 4;
        stats.origins[2].claimed = 1;
        assert_eq!(stats.claimed_total(), 5);
        assert_eq!(stats.claimed(OriginId(0)), 4);
        assert_eq!(stats.claimed(OriginId(1)), 0);
        assert_eq!(stats.claimed(OriginId(9)), 0);
    }

    #[test]
    fn test_leftovers() {
        let mut stats = RoutingStats::new(2);
        stats.origins[1].next_expected = Some("r9".to_string());
        assert_eq!(stats.origins_with_leftovers(), vec![OriginId(1)]);
    }

    #[test]
    fn test_serializes_without_empty_next_expected() {
        let stats = RoutingStats::new(1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["origins"][0]["claimed"], 0);
        assert!(json["origins"][0].get("next_expected").is_none());
    }
}
