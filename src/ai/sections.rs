//! Split AI suggestion text into labelled sections.
//!
//! The AI service answers with one free-text string. In business mode it
//! usually looks like
//!
//! ```text
//! Business Impact: Users cannot log in ...
//! Possible Causes: ...
//! Resolutions: ...
//! ```
//!
//! and in developer mode the first header is omitted. Each recognized header
//! starts a section that runs to the next recognized header or the end of the
//! text. Text with no recognized header is kept verbatim.
//!
//! Parsing prose is brittle; a structured response with `businessImpact`,
//! `causes` and `resolutions` fields would make this module unnecessary.

use std::sync::LazyLock;

use regex::Regex;

/// Matches any recognized section header, case-insensitively.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(business\s+impact|possible\s+causes|resolutions)\s*:")
        .expect("section header regex must compile")
});

/// The recognized section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    BusinessImpact,
    PossibleCauses,
    Resolutions,
}

impl SectionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::BusinessImpact => "Business Impact",
            Self::PossibleCauses => "Possible Causes",
            Self::Resolutions => "Resolutions",
        }
    }

    fn from_header(header: &str) -> Option<Self> {
        let normalized: String = header
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        match normalized.as_str() {
            "business impact" => Some(Self::BusinessImpact),
            "possible causes" => Some(Self::PossibleCauses),
            "resolutions" => Some(Self::Resolutions),
            _ => None,
        }
    }
}

/// One labelled part of a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

/// A suggestion ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionBody {
    /// Recognized sections, in the order they appear in the text.
    Sectioned(Vec<Section>),
    /// No recognized header: the full text, unchanged.
    Plain(String),
}

impl SuggestionBody {
    /// Body of the section of the given kind, if present.
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        match self {
            Self::Sectioned(sections) => sections
                .iter()
                .find(|s| s.kind == kind)
                .map(|s| s.body.as_str()),
            Self::Plain(_) => None,
        }
    }
}

/// Split `text` at recognized headers.
///
/// Text before the first header is dropped. A header that appears twice
/// yields one section whose body joins both occurrences with a blank line.
/// Sections with an empty body are kept, since the header itself was present.
pub fn parse(text: &str) -> SuggestionBody {
    let headers: Vec<(SectionKind, usize, usize)> = HEADER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = SectionKind::from_header(caps.get(1)?.as_str())?;
            Some((kind, whole.start(), whole.end()))
        })
        .collect();

    if headers.is_empty() {
        return SuggestionBody::Plain(text.to_string());
    }

    let mut sections: Vec<Section> = Vec::new();
    for (i, &(kind, _, body_start)) in headers.iter().enumerate() {
        let body_end = headers.get(i + 1).map_or(text.len(), |next| next.1);
        let body = text[body_start..body_end].trim();

        match sections.iter_mut().find(|s| s.kind == kind) {
            Some(existing) if !body.is_empty() => {
                if !existing.body.is_empty() {
                    existing.body.push_str("\n\n");
                }
                existing.body.push_str(body);
            }
            Some(_) => {}
            None => sections.push(Section {
                kind,
                body: body.to_string(),
            }),
        }
    }

    SuggestionBody::Sectioned(sections)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn developer_format_without_business_impact() {
        let body = parse("Possible Causes:\nMemory leak\nResolutions:\nRestart service");
        assert_eq!(body.section(SectionKind::PossibleCauses), Some("Memory leak"));
        assert_eq!(body.section(SectionKind::Resolutions), Some("Restart service"));
        assert_eq!(body.section(SectionKind::BusinessImpact), None);
    }

    #[test]
    fn business_format_keeps_text_order() {
        let body = parse(
            "Business Impact: Checkout is blocked.\n\nPossible Causes:\n1. Null cart\n\nResolutions:\n- Guard the cart",
        );
        let SuggestionBody::Sectioned(sections) = body else {
            panic!("expected sections");
        };
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::BusinessImpact,
                SectionKind::PossibleCauses,
                SectionKind::Resolutions
            ]
        );
        assert_eq!(sections[0].body, "Checkout is blocked.");
        assert_eq!(sections[1].body, "1. Null cart");
    }

    #[test]
    fn headers_match_case_insensitively() {
        let body = parse("POSSIBLE CAUSES: a\nresolutions: b");
        assert_eq!(body.section(SectionKind::PossibleCauses), Some("a"));
        assert_eq!(body.section(SectionKind::Resolutions), Some("b"));
    }

    #[test]
    fn text_without_headers_is_verbatim() {
        let text = "  Check the onClick handler.\nIt may be unbound.  ";
        assert_eq!(parse(text), SuggestionBody::Plain(text.to_string()));
    }

    #[test]
    fn only_resolutions_header() {
        let body = parse("Some preamble.\nResolutions: restart");
        let SuggestionBody::Sectioned(sections) = body else {
            panic!("expected sections");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "restart");
    }

    #[test]
    fn repeated_header_bodies_are_joined() {
        let body = parse("Resolutions: a\nPossible Causes: c\nResolutions: b");
        assert_eq!(body.section(SectionKind::Resolutions), Some("a\n\nb"));
    }
}
