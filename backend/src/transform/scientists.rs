//! Collapse expanded records into unique scientists.
//!
//! A single forward scan: the first record seen for a name fixes that
//! scientist's gender, nationality and region, later ones only add to the
//! mention count.

use std::collections::BTreeMap;

use crate::models::{ExpandedRecord, GenderBucket, ScientistIndex, UniqueTotals};

/// Unique scientists and their gender/region distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScientistSummary {
    pub names: ScientistIndex,
    pub unique: UniqueTotals,
}

pub fn reduce_scientists(records: &[ExpandedRecord]) -> ScientistSummary {
    let mut names = ScientistIndex::new();
    for record in records {
        names.observe(record);
    }

    let mut unique = UniqueTotals {
        male: 0,
        female: 0,
        region: BTreeMap::new(),
    };

    for (_, scientist) in names.iter() {
        match GenderBucket::classify(&scientist.gender) {
            GenderBucket::Male => unique.male += 1,
            GenderBucket::Female => unique.female += 1,
        }
        *unique.region.entry(scientist.region.clone()).or_insert(0) += 1;
    }

    ScientistSummary { names, unique }
}
