use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// SVG element names whose camel case the document emulation loses.
pub const CASE_SENSITIVE_TAGS: [&str; 4] =
    ["linearGradient", "radialGradient", "clipPath", "textPath"];

fn lowercased_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(</?)(lineargradient|radialgradient|clippath|textpath)\b")
            .expect("valid regex")
    })
}

/// Restores the camel-case spelling of [`CASE_SENSITIVE_TAGS`] in serialized markup.
///
/// Only `<name` and `</name` spelled entirely in lower case and followed by a word boundary are
/// rewritten, so `<lineargradient2>` stays as it is. Applying the fix twice is the same as
/// applying it once.
pub fn fix_xml_case(text: &str) -> Cow<'_, str> {
    lowercased_tag_regex().replace_all(text, |caps: &regex::Captures<'_>| {
        let lower = &caps[2];
        let canonical = CASE_SENSITIVE_TAGS
            .iter()
            .find(|tag| tag.eq_ignore_ascii_case(lower))
            .copied()
            .unwrap_or(lower);
        format!("{}{canonical}", &caps[1])
    })
}
