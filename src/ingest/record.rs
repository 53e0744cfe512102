//! Raw input records
//!
//! One `RawDefense` per row of the defense table and one `ReferenceRecord`
//! per row of the reference table. Cells are already trimmed; an empty
//! cell is `None`.

use crate::graph::{Participant, PersonId, Year};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier and name columns of one participant slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSlot {
    pub idref: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NameSlot {
    pub fn new(idref: Option<&str>, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        let keep = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        NameSlot {
            idref: keep(idref),
            first_name: keep(first_name),
            last_name: keep(last_name),
        }
    }

    /// "first last", trimmed; empty when both parts are missing
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Authority identifier if present, else the full name, else nothing
    pub fn identity(&self) -> Option<PersonId> {
        match self.idref.as_deref() {
            Some(idref) if !idref.is_empty() => Some(PersonId::new(idref)),
            _ => {
                let name = self.full_name();
                if name.is_empty() {
                    None
                } else {
                    Some(PersonId::new(name))
                }
            }
        }
    }

    pub fn participant(&self) -> Option<Participant> {
        self.identity().map(|id| Participant {
            id,
            name: self.full_name(),
        })
    }

    pub fn is_blank(&self) -> bool {
        self.idref.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

/// One row of the defense table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDefense {
    pub date: Option<String>,
    pub author: NameSlot,
    pub directors: Vec<NameSlot>,
    pub jury_members: Vec<NameSlot>,
    pub reviewers: Vec<NameSlot>,
    pub president: Option<NameSlot>,
}

impl RawDefense {
    /// Calendar year of the defense, if the date parses
    pub fn year(&self) -> Option<Year> {
        self.date.as_deref().and_then(parse_year)
    }
}

/// One row of the reference table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub author: NameSlot,
    /// Up to three directors
    pub directors: Vec<NameSlot>,
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Extract the year from a defense date. Unparseable input gives `None`.
pub fn parse_year(raw: &str) -> Option<Year> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.year());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.year());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.year());
        }
    }

    // bare year
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        let year: Year = raw.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.year());
    }
    None
}
