// Record grouping. Every grouping is a pure fold over the records.
pub mod by_ad_set;
pub mod by_campaign;
pub mod by_creative;
pub mod by_date;
pub mod demographics;

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use shared::models::{CampaignRecord, CampaignTotals, RecordAttributes};

/// A way of keying records. Implementations live in the sibling modules.
pub trait Grouping: Send + Sync {
    type Key: Eq + Hash + Clone;

    fn name(&self) -> &str;
    fn key(&self, record: &CampaignRecord) -> Self::Key;
}

/// Summed totals for one key, plus the attributes of the first record seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedTotals<K> {
    pub key: K,
    pub totals: CampaignTotals,
    pub first_seen: RecordAttributes,
}

/// Result of a grouping: entries in first-seen key order, with lookup by key.
#[derive(Debug, Clone)]
pub struct Grouped<K> {
    entries: Vec<AggregatedTotals<K>>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Grouped<K> {
    fn empty() -> Self {
        Grouped {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn absorb(self, key: K, record: &CampaignRecord) -> Self {
        let mut totals = CampaignTotals::default();
        totals.accumulate(record);
        self.combine(key, totals, || record.attributes())
    }

    // First-seen attributes are kept; later ones are never written.
    fn combine(mut self, key: K, totals: CampaignTotals, attributes: impl FnOnce() -> RecordAttributes) -> Self {
        match self.index.get(&key) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                entry.totals = entry.totals.merged(&totals);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(AggregatedTotals {
                    key,
                    totals,
                    first_seen: attributes(),
                });
            }
        }
        self
    }

    pub fn get(&self, key: &K) -> Option<&AggregatedTotals<K>> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedTotals<K>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<AggregatedTotals<K>> {
        self.entries
    }

    /// Sums two groupings key by key. Keys of `self` keep their position and
    /// first-seen attributes; keys only in `other` follow in their own order.
    pub fn merge(&self, other: &Grouped<K>) -> Grouped<K> {
        other.entries.iter().fold(self.clone(), |acc, entry| {
            acc.combine(entry.key.clone(), entry.totals, || entry.first_seen.clone())
        })
    }
}

/// Groups `records` by `key_fn` and sums every numeric field per key.
pub fn group_and_sum<K, F>(records: &[CampaignRecord], key_fn: F) -> Grouped<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&CampaignRecord) -> K,
{
    records
        .iter()
        .fold(Grouped::empty(), |acc, record| acc.absorb(key_fn(record), record))
}

pub fn aggregate<G: Grouping>(records: &[CampaignRecord], grouping: &G) -> Grouped<G::Key> {
    let grouped = group_and_sum(records, |r| grouping.key(r));
    tracing::debug!(grouping = grouping.name(), records = records.len(), groups = grouped.len(), "Aggregated records");
    grouped
}
