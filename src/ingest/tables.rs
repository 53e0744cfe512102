//! CSV loading for the defense and reference tables

use super::record::{NameSlot, RawDefense, ReferenceRecord};
use crate::error::{JuryGraphError, JuryGraphResult};
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Directors listed per reference row
pub const REFERENCE_DIRECTORS: usize = 3;

/// Column lookup by header name
struct Header {
    file: String,
    index: HashMap<String, usize>,
}

impl Header {
    fn new(file: &str, record: &StringRecord) -> Self {
        let index = record
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Header {
            file: file.to_string(),
            index,
        }
    }

    fn require(&self, column: &str) -> JuryGraphResult<()> {
        if self.index.contains_key(column) {
            Ok(())
        } else {
            Err(JuryGraphError::MissingColumn {
                file: self.file.clone(),
                column: column.to_string(),
            })
        }
    }

    /// Trimmed cell value; absent column or empty cell gives `None`
    fn cell<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        let idx = *self.index.get(column)?;
        record.get(idx).map(str::trim).filter(|s| !s.is_empty())
    }

    fn slot(&self, record: &StringRecord, idref: &str, first_name: &str, last_name: &str) -> NameSlot {
        NameSlot::new(
            self.cell(record, idref),
            self.cell(record, first_name),
            self.cell(record, last_name),
        )
    }

    fn count(&self, record: &StringRecord, column: &str, row: usize) -> JuryGraphResult<usize> {
        match self.cell(record, column) {
            None => Ok(0),
            Some(value) => value.parse().map_err(|_| JuryGraphError::InvalidCount {
                file: self.file.clone(),
                row,
                column: column.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Numbered slots `{prefix}.{i}.idref|prenom|nom` for `i < count`
fn numbered_slots(header: &Header, record: &StringRecord, prefix: &str, count: usize) -> Vec<NameSlot> {
    (0..count)
        .map(|i| {
            header.slot(
                record,
                &format!("{prefix}.{i}.idref"),
                &format!("{prefix}.{i}.prenom"),
                &format!("{prefix}.{i}.nom"),
            )
        })
        .collect()
}

/// Parse the defense table
pub fn read_defenses<R: Read>(reader: R, file: &str) -> JuryGraphResult<Vec<RawDefense>> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let header = Header::new(file, rdr.headers()?);
    for column in ["num_directeurs", "num_membres_jury", "num_rapporteurs"] {
        header.require(column)?;
    }

    let mut defenses = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // 1-based, counting the header line
        let row = i + 2;

        let directors = header.count(&record, "num_directeurs", row)?;
        let jury = header.count(&record, "num_membres_jury", row)?;
        let reviewers = header.count(&record, "num_rapporteurs", row)?;

        let president = header.slot(
            &record,
            "president_jury.idref",
            "president_jury.prenom",
            "president_jury.nom",
        );

        defenses.push(RawDefense {
            date: header.cell(&record, "date_soutenance").map(str::to_string),
            author: header.slot(&record, "auteur.idref", "auteur.prenom", "auteur.nom"),
            directors: numbered_slots(&header, &record, "directeur", directors),
            jury_members: numbered_slots(&header, &record, "membre_jury", jury),
            reviewers: numbered_slots(&header, &record, "rapporteur", reviewers),
            president: (!president.is_blank()).then_some(president),
        });
    }

    debug!("Read {} defense rows from {}", defenses.len(), file);
    Ok(defenses)
}

/// Parse the reference table
pub fn read_references<R: Read>(reader: R, file: &str) -> JuryGraphResult<Vec<ReferenceRecord>> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let header = Header::new(file, rdr.headers()?);

    let mut references = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let directors = (0..REFERENCE_DIRECTORS)
            .map(|i| {
                header.slot(
                    &record,
                    &format!("director_{i}_idref"),
                    &format!("director_{i}_firstname"),
                    &format!("director_{i}_surname"),
                )
            })
            .collect();

        references.push(ReferenceRecord {
            author: header.slot(&record, "author_idref", "author_firstname", "author_surname"),
            directors,
        });
    }

    debug!("Read {} reference rows from {}", references.len(), file);
    Ok(references)
}

pub fn load_defenses(path: impl AsRef<Path>) -> JuryGraphResult<Vec<RawDefense>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_defenses(file, &path.display().to_string())
}

pub fn load_references(path: impl AsRef<Path>) -> JuryGraphResult<Vec<ReferenceRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_references(file, &path.display().to_string())
}
