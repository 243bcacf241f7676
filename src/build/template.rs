// ABOUTME: Minimal `{{ name }}` placeholder substitution for build templates.
// ABOUTME: Unknown names and unclosed placeholders are errors, not passthrough.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown template variable '{0}'")]
    UnknownVariable(String),

    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),

    #[error("unsupported template tag or comment at byte {0}; only {{{{ name }}}} placeholders are allowed")]
    UnsupportedSyntax(usize),

    #[error("filters are not supported in placeholder '{0}'")]
    Filter(String),
}

/// Replace every `{{ key }}` in `template` with its value. Whitespace inside
/// the braces is ignored. Block tags (`{% %}`) and comments (`{# #}`) are
/// rejected rather than copied through.
pub fn render(template: &str, vars: &HashMap<&str, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let offset = template.len() - rest.len() + start;
        let after = &rest[start + 1..];

        if after.starts_with('%') || after.starts_with('#') {
            return Err(TemplateError::UnsupportedSyntax(offset));
        }
        if !after.starts_with('{') {
            out.push_str(&rest[..=start]);
            rest = after;
            continue;
        }

        out.push_str(&rest[..start]);
        let inner = &after[1..];
        let end = inner
            .find("}}")
            .ok_or(TemplateError::Unterminated(offset))?;

        let key = inner[..end].trim();
        if key.contains('|') {
            return Err(TemplateError::Filter(key.to_string()));
        }
        let value = vars
            .get(key)
            .ok_or_else(|| TemplateError::UnknownVariable(key.to_string()))?;
        out.push_str(value);

        rest = &inner[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> HashMap<&'static str, String> {
        HashMap::from([
            ("project", "f5-openstack-agent".to_string()),
            ("branch", "liberty".to_string()),
        ])
    }

    #[test]
    fn substitutes_with_and_without_spaces() {
        let out = render("FROM base\nRUN git checkout {{ branch }} # {{project}}\n", &vars()).unwrap();
        assert_eq!(out, "FROM base\nRUN git checkout liberty # f5-openstack-agent\n");
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        assert_eq!(render("FROM python:2.7\n", &vars()).unwrap(), "FROM python:2.7\n");
    }

    #[test]
    fn unknown_variable_is_an_error() {
        assert_eq!(
            render("{{ nope }}", &vars()),
            Err(TemplateError::UnknownVariable("nope".to_string()))
        );
    }

    #[test]
    fn block_tags_and_comments_are_rejected() {
        assert_eq!(
            render("{% if branch %}RUN x{% endif %}", &vars()),
            Err(TemplateError::UnsupportedSyntax(0))
        );
        assert_eq!(
            render("FROM base\n{# pinned #}\n", &vars()),
            Err(TemplateError::UnsupportedSyntax(10))
        );
    }

    #[test]
    fn filters_are_rejected_by_name() {
        assert_eq!(
            render("RUN echo {{ branch|upper }}", &vars()),
            Err(TemplateError::Filter("branch|upper".to_string()))
        );
    }

    #[test]
    fn lone_braces_pass_through() {
        let out = render("RUN echo ${HOME} {x} {{ branch }}", &vars()).unwrap();
        assert_eq!(out, "RUN echo ${HOME} {x} liberty");
    }

    #[test]
    fn unterminated_placeholder_reports_offset() {
        assert_eq!(
            render("ok {{ branch }} then {{ project", &vars()),
            Err(TemplateError::Unterminated(21))
        );
    }
}
