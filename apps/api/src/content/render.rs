//! Template renderer: pure function of `(content, template_id)` to a
//! rendered section tree plus the HTML page served by the public preview.

use serde::Serialize;

use crate::content::schema::{ResumeContent, SectionKey, DEFAULT_SECTION_ORDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateLayout {
    SingleColumn,
    TwoColumn,
    Compact,
}

/// One entry of the fixed template registry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub id: i32,
    pub name: &'static str,
    pub layout: TemplateLayout,
    /// Accent color applied to section headings.
    pub accent: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: 0,
        name: "Onyx",
        layout: TemplateLayout::SingleColumn,
        accent: "#1f2937",
    },
    Template {
        id: 1,
        name: "Harbor",
        layout: TemplateLayout::TwoColumn,
        accent: "#1d4ed8",
    },
    Template {
        id: 2,
        name: "Ledger",
        layout: TemplateLayout::Compact,
        accent: "#047857",
    },
];

/// Looks up a template by numeric id, defaulting to the first template when
/// the id is out of range.
pub fn template_by_id(id: i32) -> &'static Template {
    TEMPLATES.iter().find(|t| t.id == id).unwrap_or(&TEMPLATES[0])
}

/// Resolves the render order for a document: `labelSort` entries first
/// (unknown keys ignored, duplicates collapsed to their first occurrence),
/// then any section keys the list omitted, in default order.
pub fn section_order(label_sort: &[String]) -> Vec<SectionKey> {
    let mut order: Vec<SectionKey> = Vec::with_capacity(DEFAULT_SECTION_ORDER.len());
    for raw in label_sort {
        if let Some(key) = SectionKey::parse(raw) {
            if !order.contains(&key) {
                order.push(key);
            }
        }
    }
    for key in DEFAULT_SECTION_ORDER {
        if !order.contains(&key) {
            order.push(key);
        }
    }
    order
}

/// One rendered section: a heading plus an HTML fragment.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSection {
    pub key: SectionKey,
    pub title: String,
    pub html: String,
}

/// The rendered tree handed to the preview page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedResume {
    pub template_id: i32,
    pub template_name: &'static str,
    pub layout: TemplateLayout,
    pub sections: Vec<RenderedSection>,
}

/// Renders a content document against a template. Pure: no persistence, no
/// side effects; an out-of-range template id falls back to the first
/// registry entry. Empty sections produce no output.
pub fn render(content: &ResumeContent, template_id: i32) -> RenderedResume {
    let template = template_by_id(template_id);
    let mut sections = Vec::new();

    for key in section_order(&content.meta.label_sort) {
        if let Some(section) = render_section(content, key) {
            sections.push(section);
        }
    }

    RenderedResume {
        template_id: template.id,
        template_name: template.name,
        layout: template.layout,
        sections,
    }
}

fn render_section(content: &ResumeContent, key: SectionKey) -> Option<RenderedSection> {
    let (title, html) = match key {
        SectionKey::Basic => {
            if content.basic.is_empty() {
                return None;
            }
            let mut fields: Vec<_> = content.basic.iter().collect();
            fields.sort_by_key(|f| f.sort);
            let mut html = String::from("<dl class=\"basic\">");
            for field in fields {
                html.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>",
                    escape(&field.label),
                    escape(&field.value)
                ));
            }
            html.push_str("</dl>");
            ("Basic Info".to_string(), html)
        }
        SectionKey::Education => {
            if content.education.is_empty() {
                return None;
            }
            let mut entries: Vec<_> = content.education.iter().collect();
            entries.sort_by_key(|e| e.sort);
            let mut html = String::new();
            for entry in entries {
                html.push_str(&format!(
                    "<article class=\"entry\"><h3>{}</h3><p class=\"sub\">{} · {}</p><p class=\"dates\">{} – {}</p>",
                    escape(&entry.school),
                    escape(&entry.major),
                    escape(&entry.degree),
                    escape(&entry.start_date),
                    escape(&entry.end_date)
                ));
                html.push_str(&format!(
                    "<div class=\"rich\">{}</div></article>",
                    rich(&entry.experience)
                ));
            }
            ("Education".to_string(), html)
        }
        SectionKey::Skill => {
            if content.skill.is_empty() {
                return None;
            }
            ("Skills".to_string(), format!("<div class=\"rich\">{}</div>", rich(&content.skill)))
        }
        SectionKey::Job => {
            if content.job.is_empty() {
                return None;
            }
            let mut entries: Vec<_> = content.job.iter().collect();
            entries.sort_by_key(|e| e.sort);
            let mut html = String::new();
            for entry in entries {
                html.push_str(&format!(
                    "<article class=\"entry\"><h3>{}</h3><p class=\"sub\">{}</p><p class=\"dates\">{} – {}</p>",
                    escape(&entry.company),
                    escape(&entry.role),
                    escape(&entry.start_date),
                    escape(&entry.end_date)
                ));
                html.push_str(&format!(
                    "<div class=\"rich\">{}</div></article>",
                    rich(&entry.experience)
                ));
            }
            ("Work Experience".to_string(), html)
        }
        SectionKey::Project => {
            if content.project.is_empty() {
                return None;
            }
            let mut entries: Vec<_> = content.project.iter().collect();
            entries.sort_by_key(|e| e.sort);
            let mut html = String::new();
            for entry in entries {
                html.push_str(&format!(
                    "<article class=\"entry\"><h3>{}</h3><div class=\"rich\">{}</div></article>",
                    escape(&entry.name),
                    rich(&entry.description)
                ));
            }
            ("Projects".to_string(), html)
        }
        SectionKey::Custom => {
            if content.custom.label.is_empty() && content.custom.value.is_empty() {
                return None;
            }
            (
                escape(&content.custom.label),
                format!("<div class=\"rich\">{}</div>", rich(&content.custom.value)),
            )
        }
    };

    Some(RenderedSection { key, title, html })
}

/// Assembles the full preview page for a rendered tree.
pub fn to_html(title: &str, avatar: Option<&str>, rendered: &RenderedResume) -> String {
    let template = template_by_id(rendered.template_id);
    let layout_class = match rendered.layout {
        TemplateLayout::SingleColumn => "single-column",
        TemplateLayout::TwoColumn => "two-column",
        TemplateLayout::Compact => "compact",
    };

    let mut page = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>.resume h2{{color:{};}}</style></head>\
         <body><div class=\"resume tpl-{} {}\">",
        escape(title),
        template.accent,
        template.name.to_lowercase(),
        layout_class
    );
    if let Some(url) = avatar {
        page.push_str(&format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"avatar\">",
            escape(url)
        ));
    }
    for section in &rendered.sections {
        page.push_str(&format!(
            "<section class=\"{}\"><h2>{}</h2>{}</section>",
            section.key.as_str(),
            section.title,
            section.html
        ));
    }
    page.push_str("</div></body></html>");
    page
}

/// Rich-text fields come from the in-app editor, but the preview page is
/// served unauthenticated, so they pass through an HTML sanitizer instead
/// of being trusted verbatim. Benign formatting markup survives; scripts,
/// event handlers, and javascript: URLs do not.
fn rich(html: &str) -> String {
    ammonia::clean(html)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::schema::{JobEntry, ResumeContent};

    fn content_with_job_and_skill() -> ResumeContent {
        let mut content = ResumeContent::default();
        content.skill = "<p>Rust</p>".into();
        content.job.push(JobEntry {
            sort: 0,
            company: "Acme".into(),
            role: "Engineer".into(),
            start_date: "2020.01".into(),
            end_date: "2022.06".into(),
            experience: "<p>Shipped</p>".into(),
        });
        content
    }

    #[test]
    fn test_out_of_range_template_falls_back_to_first() {
        assert_eq!(template_by_id(99).id, TEMPLATES[0].id);
        assert_eq!(template_by_id(-1).id, TEMPLATES[0].id);
        assert_eq!(template_by_id(1).name, "Harbor");
    }

    #[test]
    fn test_label_sort_drives_section_order() {
        let order = section_order(&["job".into(), "skill".into()]);
        assert_eq!(order[0], SectionKey::Job);
        assert_eq!(order[1], SectionKey::Skill);
        // Omitted keys are appended in default order
        assert_eq!(order[2], SectionKey::Basic);
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn test_unknown_label_sort_keys_are_ignored() {
        let order = section_order(&["hobbies".into(), "skill".into(), "hobbies".into()]);
        assert_eq!(order[0], SectionKey::Skill);
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn test_duplicate_label_sort_keys_collapse_to_first() {
        let order = section_order(&["job".into(), "job".into(), "basic".into()]);
        assert_eq!(&order[..2], &[SectionKey::Job, SectionKey::Basic]);
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let rendered = render(&ResumeContent::default(), 0);
        assert!(rendered.sections.is_empty());
    }

    #[test]
    fn test_render_respects_label_sort() {
        let mut content = content_with_job_and_skill();
        content.meta.label_sort = vec!["skill".into(), "job".into()];
        let rendered = render(&content, 0);
        let keys: Vec<SectionKey> = rendered.sections.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec![SectionKey::Skill, SectionKey::Job]);
    }

    #[test]
    fn test_plain_fields_are_escaped_rich_text_is_not() {
        let mut content = content_with_job_and_skill();
        content.job[0].company = "A<B".into();
        let rendered = render(&content, 0);
        let job = rendered.sections.iter().find(|s| s.key == SectionKey::Job).unwrap();
        assert!(job.html.contains("A&lt;B"));
        assert!(job.html.contains("<p>Shipped</p>"));
    }

    #[test]
    fn test_rich_text_is_sanitized_for_public_preview() {
        let mut content = ResumeContent::default();
        content.skill = "<p>Rust</p><script>alert('x')</script>".into();
        content.custom.label = "Links".into();
        content.custom.value =
            "<a href=\"javascript:alert(1)\" onclick=\"steal()\">me</a>".into();
        let rendered = render(&content, 0);

        let skill = rendered.sections.iter().find(|s| s.key == SectionKey::Skill).unwrap();
        assert!(skill.html.contains("<p>Rust</p>"));
        assert!(!skill.html.contains("<script"));

        let custom = rendered.sections.iter().find(|s| s.key == SectionKey::Custom).unwrap();
        assert!(!custom.html.contains("javascript:"));
        assert!(!custom.html.contains("onclick"));
        assert!(custom.html.contains("me"));
    }

    #[test]
    fn test_job_entries_render_in_sort_order() {
        let mut content = ResumeContent::default();
        content.job.push(JobEntry {
            sort: 1,
            company: "Second".into(),
            ..Default::default()
        });
        content.job.push(JobEntry {
            sort: 0,
            company: "First".into(),
            ..Default::default()
        });
        let rendered = render(&content, 0);
        let html = &rendered.sections[0].html;
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
    }

    #[test]
    fn test_page_html_carries_template_class_and_title() {
        let content = content_with_job_and_skill();
        let rendered = render(&content, 2);
        let page = to_html("My & Resume", Some("https://cdn/a.png"), &rendered);
        assert!(page.contains("tpl-ledger"));
        assert!(page.contains("compact"));
        assert!(page.contains("My &amp; Resume"));
        assert!(page.contains("class=\"avatar\""));
    }
}
