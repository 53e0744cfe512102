//! Edge aggregation
//!
//! Scans the filtered defenses once and builds the co-participation graph:
//! - `supervizes` edges advisor -> student
//! - `examines` edges jury member -> student
//! - `same_jury` edges between every pair of advisors and jury members
//!
//! each counted per year, plus a per-person, per-year participation tally.
//! Records without a year contribute nothing.

use super::extract::DefenseParticipants;
use super::reference::ReferenceSet;
use crate::graph::{CoGraph, EdgeKey, Participant, Role, Year};
use rayon::prelude::*;
use tracing::debug;

/// Records per partial graph in parallel aggregation
const CHUNK_SIZE: usize = 256;

/// Aggregate every record into a fresh graph
pub fn aggregate(defenses: &[DefenseParticipants], reference: &ReferenceSet) -> CoGraph {
    let mut graph = CoGraph::new();
    for defense in defenses {
        add_defense(&mut graph, defense, reference);
    }
    graph
}

/// Same result as [`aggregate`], built from per-chunk partial graphs on the
/// rayon pool and reduced in record order.
pub fn aggregate_parallel(defenses: &[DefenseParticipants], reference: &ReferenceSet) -> CoGraph {
    defenses
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| aggregate(chunk, reference))
        .reduce(CoGraph::new, |mut left, right| {
            left.merge(right);
            left
        })
}

/// Fold one defense into the graph
pub fn add_defense(graph: &mut CoGraph, defense: &DefenseParticipants, reference: &ReferenceSet) {
    let (year, student) = match (defense.year, defense.student.as_ref()) {
        (Some(year), Some(student)) => (year, student),
        (None, _) => {
            debug!("Skipping defense without a usable date: {:?}", defense.student_id());
            return;
        }
        (_, None) => {
            debug!("Skipping defense without a student");
            return;
        }
    };

    let (student_role, advisor_role) = if reference.is_author(&student.id) {
        (Role::PhdStudent, Role::Advisor)
    } else {
        (Role::ExternalPhdStudent, Role::ExternalAdvisor)
    };

    graph.register(student, student_role);
    for advisor in &defense.advisors {
        graph.register(advisor, advisor_role);
    }
    for member in &defense.jury {
        graph.register(member, Role::JuryMember);
    }

    for advisor in &defense.advisors {
        graph.add_edge(EdgeKey::supervizes(&advisor.id, &student.id), year);
        graph.tally(&advisor.id, year);
    }
    for member in &defense.jury {
        graph.add_edge(EdgeKey::examines(&member.id, &student.id), year);
        graph.tally(&member.id, year);
    }

    add_same_jury_edges(graph, &defense.advisors, &defense.jury, year);
    graph.tally(&student.id, year);
}

/// Every unordered pair drawn from advisors and jury together
fn add_same_jury_edges(graph: &mut CoGraph, advisors: &[Participant], jury: &[Participant], year: Year) {
    let members: Vec<&Participant> = advisors.iter().chain(jury.iter()).collect();
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            if a.id == b.id {
                continue;
            }
            graph.add_edge(EdgeKey::same_jury(&a.id, &b.id), year);
        }
    }
}
