//! Jury frequency filter
//!
//! Jury participation is noisy, so jury members seen fewer than
//! `min_occurrences` times across the dataset are removed. Anyone who is a
//! student or advisor anywhere in the dataset is always kept.

use super::extract::DefenseParticipants;
use crate::graph::PersonId;
use std::collections::{HashMap, HashSet};

/// What the frequency filter removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrequencyStats {
    /// Jury slots removed across all records
    pub jury_slots_removed: usize,
    /// Records dropped for lacking a student or any advisor
    pub records_dropped: usize,
}

/// Number of juries each identity sits on
pub fn jury_counts(defenses: &[DefenseParticipants]) -> HashMap<&PersonId, usize> {
    let mut counts = HashMap::new();
    for member in defenses.iter().flat_map(|d| d.jury.iter()) {
        *counts.entry(&member.id).or_insert(0) += 1;
    }
    counts
}

/// Identities that appear as student or advisor in any record
pub fn supervision_team(defenses: &[DefenseParticipants]) -> HashSet<PersonId> {
    defenses
        .iter()
        .flat_map(|d| d.supervision_team())
        .map(|p| p.id.clone())
        .collect()
}

/// Trim rare jury members, then drop records without a student or advisor.
///
/// Records whose jury becomes empty are kept.
pub fn filter_infrequent_members(
    defenses: Vec<DefenseParticipants>,
    min_occurrences: usize,
) -> (Vec<DefenseParticipants>, FrequencyStats) {
    let exempt = supervision_team(&defenses);
    let keep: HashSet<PersonId> = jury_counts(&defenses)
        .into_iter()
        .filter(|(id, count)| *count >= min_occurrences || exempt.contains(*id))
        .map(|(id, _)| id.clone())
        .collect();

    let mut stats = FrequencyStats::default();
    let mut kept = Vec::with_capacity(defenses.len());
    for mut defense in defenses {
        let before = defense.jury.len();
        defense.jury.retain(|m| keep.contains(&m.id));
        stats.jury_slots_removed += before - defense.jury.len();

        if defense.student.is_none() || defense.advisors.is_empty() {
            stats.records_dropped += 1;
            continue;
        }
        kept.push(defense);
    }

    (kept, stats)
}
