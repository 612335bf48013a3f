use std::collections::HashMap;

use super::super::domain::{GroupKey, ValidationReportItem};
use super::predicates::RuleHits;

/// Insertion-ordered accumulator of rule hits per reporting unit.
#[derive(Debug, Default)]
pub(crate) struct GroupIndex {
    positions: HashMap<GroupKey, usize>,
    groups: Vec<(GroupKey, RuleHits)>,
}

impl GroupIndex {
    pub(crate) fn record(&mut self, key: GroupKey, hits: RuleHits) {
        match self.positions.get(&key) {
            Some(&position) => self.groups[position].1.extend(hits),
            None => {
                self.positions.insert(key.clone(), self.groups.len());
                self.groups.push((key, hits));
            }
        }
    }

    pub(crate) fn into_items(self) -> Vec<ValidationReportItem> {
        self.groups
            .into_iter()
            .filter(|(_, hits)| !hits.is_empty())
            .map(|(key, hits)| ValidationReportItem::from_key(key, hits.into_iter().collect()))
            .collect()
    }
}
