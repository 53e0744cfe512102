//! Labeled, year-bucketed edges
//!
//! An edge is identified by its endpoints and relation; the payload is how
//! many qualifying defenses produced it in each year.

use super::types::{PersonId, Relation, Year};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Composite edge key: (source, target, relation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: PersonId,
    pub target: PersonId,
    pub relation: Relation,
}

impl EdgeKey {
    /// advisor -> student
    pub fn supervizes(advisor: &PersonId, student: &PersonId) -> Self {
        EdgeKey {
            source: advisor.clone(),
            target: student.clone(),
            relation: Relation::Supervizes,
        }
    }

    /// jury member -> student
    pub fn examines(jury_member: &PersonId, student: &PersonId) -> Self {
        EdgeKey {
            source: jury_member.clone(),
            target: student.clone(),
            relation: Relation::Examines,
        }
    }

    /// Undirected; endpoints are sorted so both orders give the same key
    pub fn same_jury(a: &PersonId, b: &PersonId) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        EdgeKey {
            source: source.clone(),
            target: target.clone(),
            relation: Relation::SameJury,
        }
    }

    pub fn touches(&self, id: &PersonId) -> bool {
        &self.source == id || &self.target == id
    }

    /// Endpoints in sorted order, regardless of direction
    pub fn undirected_pair(&self) -> (&PersonId, &PersonId) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }
}

/// Occurrence count per year, only ever incremented
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts(BTreeMap<Year, u64>);

impl EdgeCounts {
    pub fn new() -> Self {
        EdgeCounts(BTreeMap::new())
    }

    pub fn increment(&mut self, year: Year) {
        *self.0.entry(year).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &EdgeCounts) {
        for (year, count) in &other.0 {
            *self.0.entry(*year).or_insert(0) += count;
        }
    }

    pub fn get(&self, year: Year) -> u64 {
        self.0.get(&year).copied().unwrap_or(0)
    }

    /// Sum across all years
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Year, u64)> + '_ {
        self.0.iter().map(|(y, c)| (*y, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One output row: a (pair, relation, year) combination with its count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub source: PersonId,
    pub target: PersonId,
    pub relation: Relation,
    pub year: Year,
    pub weight: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_jury_is_canonical() {
        let a = PersonId::new("A");
        let b = PersonId::new("B");
        let k1 = EdgeKey::same_jury(&b, &a);
        let k2 = EdgeKey::same_jury(&a, &b);

        assert_eq!(k1, k2);
        assert_eq!(k1.source, a);
        assert_eq!(k1.target, b);
    }

    #[test]
    fn test_directed_keys_keep_direction() {
        let adv = PersonId::new("Z");
        let student = PersonId::new("A");
        let key = EdgeKey::supervizes(&adv, &student);

        assert_eq!(key.source, adv);
        assert_eq!(key.target, student);
        assert_eq!(key.undirected_pair(), (&student, &adv));
        assert!(key.touches(&adv));
        assert_ne!(key, EdgeKey::examines(&adv, &student));
    }

    #[test]
    fn test_counts_accumulate_per_year() {
        let mut counts = EdgeCounts::new();
        counts.increment(2019);
        counts.increment(2020);
        counts.increment(2020);

        assert_eq!(counts.get(2019), 1);
        assert_eq!(counts.get(2020), 2);
        assert_eq!(counts.get(2021), 0);
        assert_eq!(counts.total(), 3);

        let mut other = EdgeCounts::new();
        other.increment(2021);
        counts.merge(&other);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![(2019, 1), (2020, 2), (2021, 1)]);
    }
}
