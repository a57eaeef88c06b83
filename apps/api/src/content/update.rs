//! Section-save merge: replace exactly one section in a full content
//! document. The storage granularity is the whole document, so the caller
//! reads the current blob, applies the patch, and writes the result back
//! guarded by the row's version counter (see `resumes::store::put_content`).

use serde_json::Value;

use crate::content::reorder;
use crate::content::schema::{
    BasicField, ContentMeta, CustomSection, EducationEntry, JobEntry, ProjectEntry, ResumeContent,
};
use crate::errors::AppError;

/// A replacement payload for one named section of the document.
#[derive(Debug, Clone)]
pub enum SectionPatch {
    Meta(ContentMeta),
    Basic(Vec<BasicField>),
    Education(Vec<EducationEntry>),
    Job(Vec<JobEntry>),
    Project(Vec<ProjectEntry>),
    Skill(String),
    Custom(CustomSection),
}

impl SectionPatch {
    /// Decodes a patch from a URL section key plus an untyped JSON payload.
    /// Unknown keys and payloads of the wrong shape are validation errors.
    pub fn from_key_value(key: &str, data: Value) -> Result<Self, AppError> {
        let malformed =
            |e: serde_json::Error| AppError::Validation(format!("invalid '{key}' payload: {e}"));
        match key {
            "meta" => Ok(SectionPatch::Meta(
                serde_json::from_value(data).map_err(malformed)?,
            )),
            "basic" => Ok(SectionPatch::Basic(
                serde_json::from_value(data).map_err(malformed)?,
            )),
            "education" => Ok(SectionPatch::Education(
                serde_json::from_value(data).map_err(malformed)?,
            )),
            "job" => Ok(SectionPatch::Job(
                serde_json::from_value(data).map_err(malformed)?,
            )),
            "project" => Ok(SectionPatch::Project(
                serde_json::from_value(data).map_err(malformed)?,
            )),
            "skill" => Ok(SectionPatch::Skill(
                serde_json::from_value(data).map_err(malformed)?,
            )),
            "custom" => Ok(SectionPatch::Custom(
                serde_json::from_value(data).map_err(malformed)?,
            )),
            _ => Err(AppError::Validation(format!("unknown section '{key}'"))),
        }
    }
}

/// Returns a new document equal to `content` with exactly one section
/// replaced. List sections are normalized to dense unique sorts on the way
/// in, so the reorder invariant holds after every save.
pub fn apply_section(content: &ResumeContent, patch: SectionPatch) -> ResumeContent {
    let mut next = content.clone();
    match patch {
        SectionPatch::Meta(meta) => next.meta = meta,
        SectionPatch::Basic(mut items) => {
            reorder::normalize(&mut items);
            next.basic = items;
        }
        SectionPatch::Education(mut items) => {
            reorder::normalize(&mut items);
            next.education = items;
        }
        SectionPatch::Job(mut items) => {
            reorder::normalize(&mut items);
            next.job = items;
        }
        SectionPatch::Project(mut items) => {
            reorder::normalize(&mut items);
            next.project = items;
        }
        SectionPatch::Skill(skill) => next.skill = skill,
        SectionPatch::Custom(custom) => next.custom = custom,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResumeContent {
        let mut content = ResumeContent::seed();
        content.skill = "<p>Rust, SQL</p>".into();
        content.education.push(EducationEntry {
            sort: 0,
            school: "MIT".into(),
            major: "CS".into(),
            degree: "BSc".into(),
            start_date: "2016.09".into(),
            end_date: "2020.06".into(),
            experience: String::new(),
        });
        content
    }

    #[test]
    fn test_untouched_sections_are_identical_after_save() {
        let before = sample();
        let patch = SectionPatch::from_key_value("skill", json!("<p>Rust only</p>")).unwrap();
        let after = apply_section(&before, patch);
        assert_eq!(after.skill, "<p>Rust only</p>");
        // Every other section is byte-for-byte the pre-save one
        assert_eq!(after.basic, before.basic);
        assert_eq!(after.education, before.education);
        assert_eq!(after.job, before.job);
        assert_eq!(after.project, before.project);
        assert_eq!(after.custom, before.custom);
        assert_eq!(after.meta, before.meta);
    }

    #[test]
    fn test_list_sections_are_normalized_on_save() {
        let patch = SectionPatch::from_key_value(
            "project",
            json!([
                { "name": "b", "sort": 9, "description": "" },
                { "name": "a", "sort": 2, "description": "" }
            ]),
        )
        .unwrap();
        let after = apply_section(&ResumeContent::default(), patch);
        assert_eq!(after.project[0].name, "a");
        assert_eq!(after.project[0].sort, 0);
        assert_eq!(after.project[1].name, "b");
        assert_eq!(after.project[1].sort, 1);
    }

    #[test]
    fn test_unknown_section_key_is_rejected() {
        let err = SectionPatch::from_key_value("hobbies", json!([])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_wrong_shape_payload_is_rejected() {
        let err = SectionPatch::from_key_value("basic", json!("not a list")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    /// The lost-update shape this design guards against: two editors read
    /// the same snapshot, each patches a different section, and the second
    /// full-document write silently discards the first one's change. The
    /// version counter in `resumes::store::put_content` turns the second
    /// write into a CONFLICT instead; this test pins down why that guard
    /// exists.
    #[test]
    fn test_interleaved_saves_on_stale_snapshots_lose_data() {
        let snapshot = sample();

        // Tab 1 edits skill, tab 2 edits education — both from `snapshot`.
        let save1 = apply_section(
            &snapshot,
            SectionPatch::from_key_value("skill", json!("<p>edited in tab 1</p>")).unwrap(),
        );
        let save2 = apply_section(
            &snapshot,
            SectionPatch::from_key_value("education", json!([])).unwrap(),
        );

        // Unguarded last-writer-wins: save2 replaces save1 wholesale.
        assert_eq!(save2.skill, snapshot.skill);
        assert_ne!(save2.skill, save1.skill, "tab 1's edit is gone");
    }
}
