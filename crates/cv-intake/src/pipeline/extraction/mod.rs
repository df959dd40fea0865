mod keywords;
mod rules;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Placeholder written wherever a field could not be extracted.
pub const NOT_SPECIFIED: &str = "Not specified";

/// The six structured fields pulled from a resume, in sink column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateField {
    FullName,
    Email,
    Phone,
    Education,
    Skills,
    Experience,
}

impl CandidateField {
    pub const ALL: [CandidateField; 6] = [
        CandidateField::FullName,
        CandidateField::Email,
        CandidateField::Phone,
        CandidateField::Education,
        CandidateField::Skills,
        CandidateField::Experience,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CandidateField::FullName => "full_name",
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
            CandidateField::Education => "education",
            CandidateField::Skills => "skills",
            CandidateField::Experience => "experience",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            CandidateField::FullName => "Full Name",
            CandidateField::Email => "Email",
            CandidateField::Phone => "Phone Number",
            CandidateField::Education => "Education",
            CandidateField::Skills => "Skills",
            CandidateField::Experience => "Experience",
        }
    }
}

/// Structured extraction result.
///
/// Absent fields are `None` internally; the sentinel only appears through [`Self::value`],
/// serialization, and sink rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(with = "sentinel", default)]
    full_name: Option<String>,
    #[serde(with = "sentinel", default)]
    email: Option<String>,
    #[serde(with = "sentinel", default)]
    phone: Option<String>,
    #[serde(with = "sentinel", default)]
    education: Option<String>,
    #[serde(with = "sentinel", default)]
    skills: Option<String>,
    #[serde(with = "sentinel", default)]
    experience: Option<String>,
}

impl CandidateRecord {
    /// Record with every field absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy with `field` set; blank values and the sentinel count as absent.
    pub fn with(mut self, field: CandidateField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = normalize(value.into());
        self
    }

    pub fn get(&self, field: CandidateField) -> Option<&str> {
        match field {
            CandidateField::FullName => self.full_name.as_deref(),
            CandidateField::Email => self.email.as_deref(),
            CandidateField::Phone => self.phone.as_deref(),
            CandidateField::Education => self.education.as_deref(),
            CandidateField::Skills => self.skills.as_deref(),
            CandidateField::Experience => self.experience.as_deref(),
        }
    }

    /// Field value with the sentinel substituted for absence.
    pub fn value(&self, field: CandidateField) -> &str {
        self.get(field).unwrap_or(NOT_SPECIFIED)
    }

    pub fn is_empty(&self) -> bool {
        CandidateField::ALL
            .iter()
            .all(|field| self.get(*field).is_none())
    }

    fn slot_mut(&mut self, field: CandidateField) -> &mut Option<String> {
        match field {
            CandidateField::FullName => &mut self.full_name,
            CandidateField::Email => &mut self.email,
            CandidateField::Phone => &mut self.phone,
            CandidateField::Education => &mut self.education,
            CandidateField::Skills => &mut self.skills,
            CandidateField::Experience => &mut self.experience,
        }
    }
}

fn normalize(value: String) -> Option<String> {
    if value.trim().is_empty() || value == NOT_SPECIFIED {
        None
    } else {
        Some(value)
    }
}

mod sentinel {
    use super::{normalize, NOT_SPECIFIED};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(NOT_SPECIFIED))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(normalize))
    }
}

/// Stateless rule-based extractor. Every rule runs independently over the same trimmed text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractionEngine;

impl FieldExtractionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> CandidateRecord {
        let text = text.trim();
        if text.is_empty() {
            return CandidateRecord::empty();
        }

        let record = CandidateRecord {
            full_name: rules::extract_name(text),
            email: rules::extract_email(text),
            phone: rules::extract_phone(text),
            education: rules::extract_education(text),
            skills: rules::extract_skills(text),
            experience: rules::extract_experience(text),
        };

        debug!(
            matched = CandidateField::ALL
                .iter()
                .filter(|field| record.get(**field).is_some())
                .count(),
            "extracted candidate fields"
        );

        record
    }
}

/// Parse with the standard rule set.
pub fn parse(text: &str) -> CandidateRecord {
    FieldExtractionEngine::new().parse(text)
}

/// Fixed eight-column row: timestamp, the six fields, and the source label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SinkRow([String; 8]);

impl SinkRow {
    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn timestamp(&self) -> &str {
        &self.0[0]
    }

    pub fn source(&self) -> &str {
        &self.0[7]
    }

    pub fn into_values(self) -> Vec<String> {
        self.0.into()
    }
}

pub const SINK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Row for the sink, stamped with the current local time.
pub fn format_for_sink(record: &CandidateRecord, source_label: &str) -> SinkRow {
    format_for_sink_at(record, source_label, Local::now().naive_local())
}

pub fn format_for_sink_at(
    record: &CandidateRecord,
    source_label: &str,
    timestamp: NaiveDateTime,
) -> SinkRow {
    SinkRow([
        timestamp.format(SINK_TIMESTAMP_FORMAT).to_string(),
        record.value(CandidateField::FullName).to_string(),
        record.value(CandidateField::Email).to_string(),
        record.value(CandidateField::Phone).to_string(),
        record.value(CandidateField::Education).to_string(),
        record.value(CandidateField::Skills).to_string(),
        record.value(CandidateField::Experience).to_string(),
        source_label.to_string(),
    ])
}
