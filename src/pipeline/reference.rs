//! Reference-set filtering and name correction
//!
//! The reference table lists the in-scope defenses. A defense record is
//! kept when its student is a reference author, or when one of its
//! advisors is a reference author or director. The same table provides
//! canonical names for students and advisors.

use super::extract::DefenseParticipants;
use crate::graph::PersonId;
use crate::ingest::ReferenceRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Identities and names derived from the reference table
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    authors: HashSet<PersonId>,
    directors: HashSet<PersonId>,
    canonical_names: HashMap<PersonId, String>,
}

impl ReferenceSet {
    pub fn from_records(records: &[ReferenceRecord]) -> Self {
        let mut set = ReferenceSet::default();

        for record in records {
            if let Some(id) = record.author.identity() {
                set.note_name(&id, record.author.full_name());
                set.authors.insert(id);
            }
            for director in &record.directors {
                if let Some(id) = director.identity() {
                    set.note_name(&id, director.full_name());
                    set.directors.insert(id);
                }
            }
        }

        debug!(
            "Reference set: {} authors, {} directors, {} canonical names",
            set.authors.len(),
            set.directors.len(),
            set.canonical_names.len()
        );
        set
    }

    /// First non-empty name per identity wins
    fn note_name(&mut self, id: &PersonId, name: String) {
        if !name.is_empty() && !self.canonical_names.contains_key(id) {
            self.canonical_names.insert(id.clone(), name);
        }
    }

    /// Whether `id` authored a reference defense
    pub fn is_author(&self, id: &PersonId) -> bool {
        self.authors.contains(id)
    }

    /// Whether `id` is a reference author or director
    pub fn is_member(&self, id: &PersonId) -> bool {
        self.authors.contains(id) || self.directors.contains(id)
    }

    pub fn canonical_name(&self, id: &PersonId) -> Option<&str> {
        self.canonical_names.get(id).map(String::as_str)
    }

    /// Whether a defense is connected to the reference list
    pub fn is_in_scope(&self, defense: &DefenseParticipants) -> bool {
        defense.student_id().is_some_and(|id| self.is_author(id))
            || defense.advisors.iter().any(|a| self.is_member(&a.id))
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }
}

/// Keep only defenses connected to the reference list
pub fn filter_in_scope(defenses: Vec<DefenseParticipants>, reference: &ReferenceSet) -> Vec<DefenseParticipants> {
    defenses
        .into_iter()
        .filter(|d| reference.is_in_scope(d))
        .collect()
}

/// Replace student and advisor names with their canonical form.
///
/// Identities never change; jury names are left as extracted. Returns the
/// number of names replaced.
pub fn correct_names(defenses: &mut [DefenseParticipants], reference: &ReferenceSet) -> usize {
    let mut corrected = 0;
    for defense in defenses.iter_mut() {
        for person in defense.student.iter_mut().chain(defense.advisors.iter_mut()) {
            if let Some(name) = reference.canonical_name(&person.id) {
                if person.name != name {
                    person.name = name.to_string();
                    corrected += 1;
                }
            }
        }
    }
    corrected
}
