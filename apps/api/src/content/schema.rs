//! Shape of the `ResumeContent` JSON document persisted per resume.
//!
//! The document is read-modify-written wholesale on every section save;
//! there is no per-section storage row. All fields carry `#[serde(default)]`
//! so a partial or legacy blob degenerates to defaults instead of failing.

use serde::{Deserialize, Serialize};

/// The fixed set of resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Basic,
    Education,
    Skill,
    Job,
    Project,
    Custom,
}

/// Default render order when `meta.labelSort` is absent or incomplete.
pub const DEFAULT_SECTION_ORDER: [SectionKey; 6] = [
    SectionKey::Basic,
    SectionKey::Education,
    SectionKey::Skill,
    SectionKey::Job,
    SectionKey::Project,
    SectionKey::Custom,
];

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Basic => "basic",
            SectionKey::Education => "education",
            SectionKey::Skill => "skill",
            SectionKey::Job => "job",
            SectionKey::Project => "project",
            SectionKey::Custom => "custom",
        }
    }

    /// Parses a section-key string. Unknown keys return `None` so that a
    /// `labelSort` entry from an older or corrupted document is ignored at
    /// render time instead of raising an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(SectionKey::Basic),
            "education" => Some(SectionKey::Education),
            "skill" => Some(SectionKey::Skill),
            "job" => Some(SectionKey::Job),
            "project" => Some(SectionKey::Project),
            "custom" => Some(SectionKey::Custom),
            _ => None,
        }
    }
}

/// Document metadata. `label_sort` holds raw strings rather than
/// `SectionKey` so unknown keys survive deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMeta {
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub label_sort: Vec<String>,
}

/// One field of the basic-info section. `key` is either one of the
/// registered field keys (see `content::form`) or an arbitrary string for a
/// user-added custom field. Uniqueness of `key` within the list is
/// maintained by the form mapper, not by a schema constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicField {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Rich text.
    #[serde(default)]
    pub experience: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Rich text.
    #[serde(default)]
    pub experience: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub name: String,
    /// Rich text.
    #[serde(default)]
    pub description: String,
}

/// The single free-form section: one label plus a rich-text value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSection {
    #[serde(default)]
    pub label: String,
    /// Rich text.
    #[serde(default)]
    pub value: String,
}

/// The full per-resume content document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    #[serde(default)]
    pub meta: ContentMeta,
    #[serde(default)]
    pub basic: Vec<BasicField>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub job: Vec<JobEntry>,
    #[serde(default)]
    pub project: Vec<ProjectEntry>,
    /// Rich text.
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub custom: CustomSection,
}

impl ResumeContent {
    /// Content seeded into a freshly created resume: the name/age/gender
    /// basic fields and empty everything else.
    pub fn seed() -> Self {
        let basic = [("name", "Name"), ("age", "Age"), ("gender", "Gender")]
            .iter()
            .enumerate()
            .map(|(i, (key, label))| BasicField {
                key: (*key).to_string(),
                label: (*label).to_string(),
                sort: i as i32,
                value: String::new(),
            })
            .collect();
        ResumeContent {
            basic,
            ..Default::default()
        }
    }

    /// Parses a stored JSON blob. Malformed or partial blobs degenerate to
    /// defaults rather than failing the request.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_content_has_name_age_gender() {
        let content = ResumeContent::seed();
        let keys: Vec<&str> = content.basic.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "age", "gender"]);
        assert_eq!(content.basic[0].sort, 0);
        assert_eq!(content.basic[2].sort, 2);
        assert!(content.education.is_empty());
        assert!(content.skill.is_empty());
    }

    #[test]
    fn test_malformed_blob_degenerates_to_defaults() {
        let content = ResumeContent::from_value(&serde_json::json!("not an object"));
        assert_eq!(content, ResumeContent::default());
    }

    #[test]
    fn test_partial_blob_fills_missing_sections() {
        let content = ResumeContent::from_value(&serde_json::json!({
            "skill": "<p>Rust</p>"
        }));
        assert_eq!(content.skill, "<p>Rust</p>");
        assert!(content.basic.is_empty());
        assert!(content.meta.label_sort.is_empty());
    }

    #[test]
    fn test_label_sort_preserves_unknown_keys() {
        let content = ResumeContent::from_value(&serde_json::json!({
            "meta": { "labelSort": ["job", "hobbies", "basic"] }
        }));
        assert_eq!(content.meta.label_sort, vec!["job", "hobbies", "basic"]);
        assert_eq!(SectionKey::parse("hobbies"), None);
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let mut content = ResumeContent::seed();
        content.meta.label_sort = vec!["skill".into(), "basic".into()];
        content.job.push(JobEntry {
            sort: 0,
            company: "Acme".into(),
            role: "Engineer".into(),
            start_date: "2020.01".into(),
            end_date: "2022.06".into(),
            experience: "<p>Built things</p>".into(),
        });
        let value = serde_json::to_value(&content).unwrap();
        // Wire names are camelCase
        assert!(value["meta"]["labelSort"].is_array());
        assert_eq!(value["job"][0]["startDate"], "2020.01");
        assert_eq!(ResumeContent::from_value(&value), content);
    }
}
