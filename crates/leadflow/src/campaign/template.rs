//! Campaign message templates with `{{ placeholder }}` substitution.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;

/// Values available to placeholders while rendering one recipient's message.
pub type TemplateVars = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub subject: String,
    pub body: String,
    pub unsubscribe_base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateFile {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    unsubscribe_base_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("unable to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Template JSON must include \"subject\" and \"body\"")]
    Incomplete,
}

impl MessageTemplate {
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let raw = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TemplateError> {
        let file: TemplateFile = serde_json::from_str(raw)?;
        match (file.subject, file.body) {
            (Some(subject), Some(body)) if !subject.is_empty() && !body.is_empty() => Ok(Self {
                subject,
                body,
                unsubscribe_base_url: file
                    .unsubscribe_base_url
                    .filter(|url| !url.trim().is_empty()),
            }),
            _ => Err(TemplateError::Incomplete),
        }
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("placeholder pattern compiles")
    })
}

/// Substitute every `{{ key }}` in `template`. Unknown keys render as an empty string.
pub fn render(template: &str, vars: &TemplateVars) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| {
            vars.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> TemplateVars {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_known_placeholders() {
        assert_eq!(render("{{name}}", &vars(&[("name", "Ann")])), "Ann");
        assert_eq!(
            render("Hi {{ name }}, about {{company.name}}", &vars(&[("name", "Ann"), ("company.name", "Acme")])),
            "Hi Ann, about Acme"
        );
    }

    #[test]
    fn unknown_placeholders_render_empty() {
        assert_eq!(render("Hi {{nickname}}!", &vars(&[("name", "Ann")])), "Hi !");
    }

    #[test]
    fn non_placeholder_braces_are_left_alone() {
        assert_eq!(render("{{ two words }} {x}", &TemplateVars::new()), "{{ two words }} {x}");
    }

    #[test]
    fn substituted_values_are_not_rendered_again() {
        let rendered = render("{{a}}", &vars(&[("a", "{{b}}"), ("b", "nested")]));
        assert_eq!(rendered, "{{b}}");
    }

    #[test]
    fn template_requires_subject_and_body() {
        let template = MessageTemplate::from_json_str(
            r#"{"subject": "Hi {{name}}", "body": "Hello", "unsubscribeBaseUrl": "https://x.test/u"}"#,
        )
        .expect("template loads");
        assert_eq!(template.unsubscribe_base_url.as_deref(), Some("https://x.test/u"));

        for raw in [r#"{"subject": "Hi"}"#, r#"{"subject": "", "body": "x"}"#, r#"{"body": null}"#] {
            let err = MessageTemplate::from_json_str(raw).expect_err("incomplete template");
            assert!(matches!(err, TemplateError::Incomplete));
        }
    }

    #[test]
    fn malformed_template_is_a_json_error() {
        let err = MessageTemplate::from_json_str("subject: hi").expect_err("not json");
        assert!(matches!(err, TemplateError::Json(_)));
    }
}
