//! Destination title templating.

use regex::Regex;

/// Placeholder replaced with the source page title.
pub(crate) const TITLE_FIELD: &str = "{title}";
/// Placeholder replaced with the next free copy number.
pub(crate) const COUNTER_FIELD: &str = "{counter}";
/// Template used when none is supplied.
pub(crate) const DEFAULT_TEMPLATE: &str = "{title} ({counter})";

/// Normalize a user-supplied template.
///
/// `None` falls back to [`DEFAULT_TEMPLATE`]; a template without `{title}`
/// is treated as a suffix.
pub(crate) fn normalize_template(template: Option<&str>) -> String {
    match template {
        None => DEFAULT_TEMPLATE.to_owned(),
        Some(template) if template.contains(TITLE_FIELD) => template.to_owned(),
        Some(suffix) => format!("{TITLE_FIELD}{suffix}"),
    }
}

/// Render a template for a concrete source title.
pub(crate) fn render(template: &str, title: &str) -> String {
    template.replace(TITLE_FIELD, title)
}

/// Regex matching every title the template could have produced for `title`,
/// with `{counter}` standing for any number.
pub(crate) fn counter_pattern(template: &str, title: &str) -> Result<Regex, regex::Error> {
    let rendered = template.replace(TITLE_FIELD, title);
    let escaped = regex::escape(&rendered);
    let pattern = escaped.replace(&regex::escape(COUNTER_FIELD), r"\d+");
    Regex::new(&format!("^{pattern}$"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_defaults() {
        assert_eq!(normalize_template(None), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_normalize_keeps_template_with_title() {
        assert_eq!(normalize_template(Some("{title} copy")), "{title} copy");
    }

    #[test]
    fn test_normalize_treats_bare_value_as_suffix() {
        assert_eq!(normalize_template(Some(" (archived)")), "{title} (archived)");
    }

    #[test]
    fn test_render() {
        assert_eq!(render("{title} (3)", "Home"), "Home (3)");
    }

    #[test]
    fn test_counter_pattern_matches_generated_titles() {
        let pattern = counter_pattern(DEFAULT_TEMPLATE, "Home").unwrap();
        assert!(pattern.is_match("Home (1)"));
        assert!(pattern.is_match("Home (12)"));
        assert!(!pattern.is_match("Home"));
        assert!(!pattern.is_match("Home (1) extra"));
    }

    #[test]
    fn test_counter_pattern_escapes_title_metacharacters() {
        let pattern = counter_pattern(DEFAULT_TEMPLATE, "Q+A (v2)").unwrap();
        assert!(pattern.is_match("Q+A (v2) (3)"));
        assert!(!pattern.is_match("QqA (v2) (3)"));
    }
}
