//! Participant extraction
//!
//! Turns one raw defense row into a student, advisors and jury members,
//! each with a unique identity inside the record.

use crate::graph::{Participant, PersonId, Year};
use crate::ingest::{NameSlot, RawDefense};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Participants of one defense
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefenseParticipants {
    /// `None` when the date is missing or unparseable
    pub year: Option<Year>,
    pub student: Option<Participant>,
    pub advisors: Vec<Participant>,
    /// Jury members, reviewers and the jury president
    pub jury: Vec<Participant>,
}

impl DefenseParticipants {
    pub fn student_id(&self) -> Option<&PersonId> {
        self.student.as_ref().map(|s| &s.id)
    }

    /// Student and advisors
    pub fn supervision_team(&self) -> impl Iterator<Item = &Participant> {
        self.student.iter().chain(self.advisors.iter())
    }
}

/// Identities already placed in the record; first mention wins
struct SeenIds(HashSet<PersonId>);

impl SeenIds {
    fn claim(&mut self, slot: &NameSlot) -> Option<Participant> {
        let participant = slot.participant()?;
        if self.0.insert(participant.id.clone()) {
            Some(participant)
        } else {
            None
        }
    }
}

/// Extract the participants of one defense. Pure and per-record.
pub fn extract_participants(defense: &RawDefense) -> DefenseParticipants {
    let mut seen = SeenIds(HashSet::new());

    let student = seen.claim(&defense.author);
    let advisors = defense
        .directors
        .iter()
        .filter_map(|slot| seen.claim(slot))
        .collect();
    let jury = defense
        .jury_members
        .iter()
        .chain(defense.reviewers.iter())
        .chain(defense.president.iter())
        .filter_map(|slot| seen.claim(slot))
        .collect();

    DefenseParticipants {
        year: defense.year(),
        student,
        advisors,
        jury,
    }
}

pub fn extract_all(defenses: &[RawDefense]) -> Vec<DefenseParticipants> {
    defenses.iter().map(extract_participants).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(s: &str) -> Option<&str> {
        (!s.is_empty()).then_some(s)
    }

    fn slot(idref: &str, first: &str, last: &str) -> NameSlot {
        NameSlot::new(opt(idref), opt(first), opt(last))
    }

    fn ids(people: &[Participant]) -> Vec<&str> {
        people.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_roles_are_split() {
        let defense = RawDefense {
            date: Some("2020-06-15".to_string()),
            author: slot("S", "Ada", "Lovelace"),
            directors: vec![slot("X", "Charles", "Babbage")],
            jury_members: vec![slot("Y", "", "")],
            reviewers: vec![slot("", "Alan", "Turing")],
            president: Some(slot("Z", "", "")),
        };

        let parts = extract_participants(&defense);
        assert_eq!(parts.year, Some(2020));
        assert_eq!(parts.student, Some(Participant::new("S", "Ada Lovelace")));
        assert_eq!(ids(&parts.advisors), vec!["X"]);
        assert_eq!(ids(&parts.jury), vec!["Y", "Alan Turing", "Z"]);
    }

    #[test]
    fn test_first_mention_wins() {
        let defense = RawDefense {
            author: slot("S", "", ""),
            directors: vec![slot("X", "", ""), slot("S", "", ""), slot("X", "", "")],
            jury_members: vec![slot("X", "", ""), slot("Y", "", "")],
            reviewers: vec![slot("Y", "", "")],
            president: Some(slot("S", "", "")),
            ..Default::default()
        };

        let parts = extract_participants(&defense);
        assert_eq!(parts.student_id().unwrap().as_str(), "S");
        assert_eq!(ids(&parts.advisors), vec!["X"]);
        assert_eq!(ids(&parts.jury), vec!["Y"]);
    }

    #[test]
    fn test_blank_slots_are_dropped() {
        let defense = RawDefense {
            date: Some("not a date".to_string()),
            author: NameSlot::default(),
            directors: vec![NameSlot::default(), slot("X", "", "")],
            ..Default::default()
        };

        let parts = extract_participants(&defense);
        assert_eq!(parts.year, None);
        assert!(parts.student.is_none());
        assert_eq!(ids(&parts.advisors), vec!["X"]);
        assert_eq!(parts.supervision_team().count(), 1);
    }
}
