//! Note structure templates.
//!
//! A template is an example note skeleton injected into the generation
//! prompt to bias the model's output format. Built-ins cover the common
//! consultation shapes; user templates are plain `.md` files in the config
//! directory and shadow built-ins of the same name.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// A named note template.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTemplate {
    pub name: String,
    pub body: String,
}

const SOAP_TEMPLATE: &str = "\
## Subjective
- Presenting complaint and history in the patient's words

## Objective
- Examination findings, vitals, measurements

## Assessment
- Working diagnosis and differentials

## Plan
- Investigations, treatment, safety-netting, follow-up
";

const REFERRAL_TEMPLATE: &str = "\
## Referral

**Reason for referral:**

**History:**

**Examination findings:**

**Current medication:**

**Question to the specialist:**
";

const FOLLOW_UP_TEMPLATE: &str = "\
## Follow-up

**Interval history:**

**Response to treatment:**

**Plan:**
- Next review
";

fn builtin_templates() -> &'static [(&'static str, &'static str)] {
    &[
        ("soap", SOAP_TEMPLATE),
        ("referral", REFERRAL_TEMPLATE),
        ("follow-up", FOLLOW_UP_TEMPLATE),
    ]
}

/// Directory holding user templates (`<config>/dicta/templates`).
pub fn templates_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dicta").join("templates"))
}

/// Load a template by name. User templates shadow built-ins.
pub fn load_template(name: &str) -> Result<NoteTemplate> {
    if let Some(dir) = templates_dir() {
        let path = dir.join(format!("{name}.md"));
        if path.exists() {
            let body = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template {path:?}"))?;
            return Ok(NoteTemplate {
                name: name.to_string(),
                body,
            });
        }
    }

    builtin_templates()
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(n, body)| NoteTemplate {
            name: (*n).to_string(),
            body: (*body).to_string(),
        })
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown template: {name}. Available: {}",
                available_names().join(", ")
            )
        })
}

/// All templates: built-ins plus user files, deduplicated by name.
pub fn list_templates() -> Result<Vec<NoteTemplate>> {
    let mut templates: Vec<NoteTemplate> = Vec::new();

    if let Some(dir) = templates_dir() {
        if dir.is_dir() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let body = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read template {path:?}"))?;
                templates.push(NoteTemplate {
                    name: name.to_string(),
                    body,
                });
            }
        }
    }

    for (name, body) in builtin_templates() {
        if !templates.iter().any(|t| t.name == *name) {
            templates.push(NoteTemplate {
                name: (*name).to_string(),
                body: (*body).to_string(),
            });
        }
    }

    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}

fn available_names() -> Vec<String> {
    list_templates()
        .map(|ts| ts.into_iter().map(|t| t.name).collect())
        .unwrap_or_else(|_| {
            builtin_templates()
                .iter()
                .map(|(n, _)| (*n).to_string())
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_soap_template_loads() {
        let template = load_template("soap").unwrap();
        assert_eq!(template.name, "soap");
        assert!(template.body.contains("## Assessment"));
    }

    #[test]
    fn unknown_template_names_the_alternatives() {
        let err = load_template("discharge").unwrap_err();
        assert!(err.to_string().contains("soap"));
    }

    #[test]
    fn listing_contains_all_builtins() {
        let names: Vec<String> = list_templates()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        for (name, _) in builtin_templates() {
            assert!(names.contains(&(*name).to_string()));
        }
    }
}
