//! Core type definitions for the co-participation graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar year of a defense
pub type Year = i32;

/// Identity of a person: an authority identifier when one exists, otherwise
/// the reconstructed "first last" full name.
///
/// Equality is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        PersonId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        PersonId(s)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        PersonId(s.to_string())
    }
}

/// A person as mentioned in one record: identity plus the name written there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PersonId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Display role of a person, declared from highest to lowest priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PhdStudent,
    Advisor,
    JuryMember,
    ExternalPhdStudent,
    ExternalAdvisor,
}

impl Role {
    /// Lower value means higher priority
    pub fn priority(self) -> u8 {
        match self {
            Role::PhdStudent => 0,
            Role::Advisor => 1,
            Role::JuryMember => 2,
            Role::ExternalPhdStudent => 3,
            Role::ExternalAdvisor => 4,
        }
    }

    /// Keep whichever role ranks higher. Associative, commutative and idempotent.
    pub fn merge(self, other: Role) -> Role {
        if other.priority() < self.priority() {
            other
        } else {
            self
        }
    }

    /// Attached only to a defense outside the reference set
    pub fn is_external(self) -> bool {
        matches!(self, Role::ExternalPhdStudent | Role::ExternalAdvisor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::PhdStudent => "phd_student",
            Role::Advisor => "advisor",
            Role::JuryMember => "jury_member",
            Role::ExternalPhdStudent => "external_phd_student",
            Role::ExternalAdvisor => "external_advisor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// advisor -> student
    Supervizes,
    /// jury member -> student
    Examines,
    /// undirected, endpoints stored sorted
    SameJury,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Supervizes => "supervizes",
            Relation::Examines => "examines",
            Relation::SameJury => "same_jury",
        }
    }

    pub fn is_directed(self) -> bool {
        !matches!(self, Relation::SameJury)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 5] = [
        Role::PhdStudent,
        Role::Advisor,
        Role::JuryMember,
        Role::ExternalPhdStudent,
        Role::ExternalAdvisor,
    ];

    #[test]
    fn test_person_id() {
        let id = PersonId::new("123456789");
        assert_eq!(id.as_str(), "123456789");
        assert_eq!(format!("{}", id), "123456789");

        let id2: PersonId = "Marie Curie".into();
        assert!(id < id2);
    }

    #[test]
    fn test_role_merge_keeps_higher_priority() {
        assert_eq!(Role::JuryMember.merge(Role::Advisor), Role::Advisor);
        assert_eq!(Role::Advisor.merge(Role::JuryMember), Role::Advisor);
        assert_eq!(Role::ExternalAdvisor.merge(Role::JuryMember), Role::JuryMember);
        assert_eq!(Role::ExternalPhdStudent.merge(Role::PhdStudent), Role::PhdStudent);
    }

    #[test]
    fn test_role_merge_laws() {
        for a in ALL_ROLES {
            assert_eq!(a.merge(a), a);
            for b in ALL_ROLES {
                assert_eq!(a.merge(b), b.merge(a));
                for c in ALL_ROLES {
                    assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
                }
            }
        }
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::ExternalPhdStudent).unwrap(), "\"external_phd_student\"");
        assert_eq!(Role::JuryMember.to_string(), "jury_member");
        assert!(Role::ExternalAdvisor.is_external());
        assert!(!Role::JuryMember.is_external());
    }

    #[test]
    fn test_relation() {
        assert_eq!(serde_json::to_string(&Relation::SameJury).unwrap(), "\"same_jury\"");
        assert_eq!(Relation::Supervizes.as_str(), "supervizes");
        assert!(Relation::Examines.is_directed());
        assert!(!Relation::SameJury.is_directed());
    }
}
