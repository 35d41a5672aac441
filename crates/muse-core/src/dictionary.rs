//! Feature dictionary: symbolic feature keys to compact integer ids.
//!
//! Two id spaces are kept in separate maps. Raw ids are handed out while
//! bags are built. Compacted ids are assigned only to features that survive
//! the chi-squared filter; after the first compaction
//! [`FeatureDictionary::size`] reports the compacted cardinality. Id 0 is
//! never assigned in either space.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::bag::BagOfBigrams;
use crate::words::SymbolicWord;

/// Integer identifier of a feature.
pub type FeatureId = usize;

/// Id space a bag's keys belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdSpace {
    /// Ids assigned by [`FeatureDictionary::lookup_or_insert`]
    #[default]
    Raw,
    /// Ids assigned by [`FeatureDictionary::compact`]
    Compacted,
}

/// A unigram or bigram of masked symbolic words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKey {
    Unigram {
        window_length: usize,
        variate: usize,
        word: SymbolicWord,
    },
    Bigram {
        window_length: usize,
        variate: usize,
        prev: SymbolicWord,
        word: SymbolicWord,
    },
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FeatureKey::Unigram {
                window_length,
                variate,
                word,
            } => write!(f, "{}_{}_{}", window_length, variate, word),
            FeatureKey::Bigram {
                window_length,
                variate,
                prev,
                word,
            } => write!(
                f,
                "{w}_{d}_{}_{w}_{d}_{}",
                prev,
                word,
                w = window_length,
                d = variate
            ),
        }
    }
}

/// Bijective mapping from feature keys to ids.
#[derive(Debug, Clone, Default)]
pub struct FeatureDictionary {
    raw: HashMap<FeatureKey, FeatureId>,
    compacted: Option<HashMap<FeatureId, FeatureId>>,
}

impl FeatureDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both id spaces.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.compacted = None;
    }

    /// Raw id of `key`, assigning the next id (starting at 1) if unseen.
    pub fn lookup_or_insert(&mut self, key: FeatureKey) -> FeatureId {
        let next = self.raw.len() + 1;
        *self.raw.entry(key).or_insert(next)
    }

    /// Raw id of `key` without inserting.
    pub fn get(&self, key: &FeatureKey) -> Option<FeatureId> {
        self.raw.get(key).copied()
    }

    /// Compacted id of a raw id, if the feature survived filtering.
    pub fn compacted_id(&self, raw_id: FeatureId) -> Option<FeatureId> {
        self.compacted
            .as_ref()
            .and_then(|c| c.get(&raw_id))
            .copied()
    }

    /// Number of raw ids assigned.
    pub fn raw_size(&self) -> usize {
        self.raw.len()
    }

    /// Number of compacted ids assigned.
    pub fn compacted_size(&self) -> usize {
        self.compacted.as_ref().map_or(0, |c| c.len())
    }

    /// Active id space: compacted once [`FeatureDictionary::compact`] ran.
    pub fn space(&self) -> IdSpace {
        match self.compacted {
            None => IdSpace::Raw,
            Some(_) => IdSpace::Compacted,
        }
    }

    /// Cardinality of the active id space.
    pub fn size(&self) -> usize {
        match self.space() {
            IdSpace::Raw => self.raw_size(),
            IdSpace::Compacted => self.compacted_size(),
        }
    }

    /// Move every bag into the compacted id space.
    ///
    /// Surviving (non-zero) entries get compacted ids in encounter order,
    /// bag by bag and ascending raw id within a bag. Zero entries are dropped.
    pub fn compact(&mut self, bags: &mut [BagOfBigrams]) {
        let compacted = self.compacted.get_or_insert_with(HashMap::new);
        for bag in bags.iter_mut() {
            let old = std::mem::take(&mut bag.counts);
            for (raw_id, count) in old {
                if count > 0 {
                    let next = compacted.len() + 1;
                    let id = *compacted.entry(raw_id).or_insert(next);
                    bag.counts.insert(id, count);
                }
            }
            bag.space = IdSpace::Compacted;
        }
        debug!(
            raw = self.raw_size(),
            compacted = self.compacted_size(),
            "compacted feature dictionary"
        );
    }

    /// Map raw-space bags onto the existing compacted space without growing it.
    ///
    /// Features that have no compacted id are dropped. Does nothing if no
    /// compaction has happened yet.
    pub fn project(&self, bags: &mut [BagOfBigrams]) {
        let Some(compacted) = &self.compacted else {
            return;
        };
        for bag in bags.iter_mut().filter(|b| b.space == IdSpace::Raw) {
            let old = std::mem::take(&mut bag.counts);
            bag.counts = old
                .into_iter()
                .filter(|&(_, count)| count > 0)
                .filter_map(|(raw_id, count)| compacted.get(&raw_id).map(|&id| (id, count)))
                .collect();
            bag.space = IdSpace::Compacted;
        }
    }
}
