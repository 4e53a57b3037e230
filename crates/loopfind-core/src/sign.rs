/// Edge sign classification from connector captions.
///
/// Causal links are positive unless their caption reads exactly `-` once the
/// markup is stripped and the text trimmed. `+`, empty captions, missing
/// captions and free text such as `"- maybe"` are all positive.
use serde::{Deserialize, Serialize};

use crate::label::extract_plain_text;

/// The polarity of a single causal link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSign {
    /// Same-direction influence (the default for unlabelled links).
    Positive,
    /// Opposite-direction influence; flips the polarity of any loop it is on.
    Negative,
}

impl EdgeSign {
    /// Classifies a connector caption.
    pub fn of_caption(caption: Option<&str>) -> Self {
        match caption {
            Some(raw) if extract_plain_text(raw, true).trim() == "-" => Self::Negative,
            Some(_) | None => Self::Positive,
        }
    }

    /// Returns `true` for [`EdgeSign::Negative`].
    pub fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }

    /// The conventional diagram symbol: `+` or `-`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
        }
    }
}

/// Returns `true` if `caption` marks its edge as negative.
pub fn is_negative_caption(caption: Option<&str>) -> bool {
    EdgeSign::of_caption(caption).is_negative()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_minus_is_negative() {
        assert!(is_negative_caption(Some("-")));
        assert!(is_negative_caption(Some(" - ")));
    }

    #[test]
    fn minus_inside_markup_is_negative() {
        assert!(is_negative_caption(Some("<span>-</span>")));
        assert!(is_negative_caption(Some("<p><strong>-</strong></p>")));
        assert!(is_negative_caption(Some("&#45;")));
    }

    #[test]
    fn minus_followed_by_text_is_positive() {
        assert!(!is_negative_caption(Some("<span>-</span>extra")));
        assert!(!is_negative_caption(Some("--")));
        assert!(!is_negative_caption(Some("- maybe")));
    }

    #[test]
    fn plus_empty_and_missing_are_positive() {
        assert_eq!(EdgeSign::of_caption(Some("+")), EdgeSign::Positive);
        assert_eq!(EdgeSign::of_caption(Some("")), EdgeSign::Positive);
        assert_eq!(EdgeSign::of_caption(Some("<p></p>")), EdgeSign::Positive);
        assert_eq!(EdgeSign::of_caption(None), EdgeSign::Positive);
    }

    #[test]
    fn symbol_matches_diagram_convention() {
        assert_eq!(EdgeSign::Positive.symbol(), "+");
        assert_eq!(EdgeSign::Negative.symbol(), "-");
    }
}
