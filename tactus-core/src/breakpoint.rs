//! Breakpoint classes and hyphenation alignment
//!
//! A hyphenator marks optional line breaks by inserting soft hyphens or zero
//! width spaces into a text. Translation engines want the same information
//! as one class per gap between two input characters instead, so the
//! hyphenated text is aligned against the original here.

use crate::error::{CoreError, Result};
use std::borrow::Cow;
use tracing::trace;

/// Soft hyphen: optional break shown as a hyphen
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// Zero width space: optional break without a visible hyphen
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Class of the gap between two adjacent input characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[repr(u8)]
pub enum Breakpoint {
    /// No break allowed
    #[default]
    None = 0,
    /// Break allowed, shown with a hyphen
    SoftHyphen = 1,
    /// Break allowed, nothing shown
    ZeroWidthSpace = 2,
}

impl Breakpoint {
    /// Numeric class as used by table-driven engines
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Class for a numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Breakpoint::None),
            1 => Some(Breakpoint::SoftHyphen),
            2 => Some(Breakpoint::ZeroWidthSpace),
            _ => None,
        }
    }

    /// Class signalled by a marker character
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            SOFT_HYPHEN => Some(Breakpoint::SoftHyphen),
            ZERO_WIDTH_SPACE => Some(Breakpoint::ZeroWidthSpace),
            _ => None,
        }
    }

    /// Marker character for this class
    pub fn marker(self) -> Option<char> {
        match self {
            Breakpoint::None => None,
            Breakpoint::SoftHyphen => Some(SOFT_HYPHEN),
            Breakpoint::ZeroWidthSpace => Some(ZERO_WIDTH_SPACE),
        }
    }

    /// Combine two markers found in the same gap; a soft hyphen wins
    pub fn merge(self, other: Breakpoint) -> Breakpoint {
        match (self, other) {
            (Breakpoint::SoftHyphen, _) | (_, Breakpoint::SoftHyphen) => Breakpoint::SoftHyphen,
            (Breakpoint::ZeroWidthSpace, _) | (_, Breakpoint::ZeroWidthSpace) => {
                Breakpoint::ZeroWidthSpace
            }
            _ => Breakpoint::None,
        }
    }

    /// Whether a line may break here
    pub fn is_break(self) -> bool {
        self != Breakpoint::None
    }
}

/// Whether `ch` is one of the two break markers
pub fn is_marker(ch: char) -> bool {
    ch == SOFT_HYPHEN || ch == ZERO_WIDTH_SPACE
}

/// Remove all break markers from `text`
pub fn strip_markers(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_marker) {
        Cow::Owned(text.chars().filter(|c| !is_marker(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Derive the breakpoint class of every gap of `original` from its
/// hyphenated form.
///
/// Returns `code points - 1` classes (none for empty or one-character
/// texts). The hyphenated text may only differ from the original by
/// inserted markers; anything else is an
/// [`AlignmentInconsistency`](CoreError::AlignmentInconsistency).
pub fn align(original: &str, hyphenated: &str) -> Result<Vec<Breakpoint>> {
    let input: Vec<char> = original.chars().collect();
    let hyph: Vec<char> = hyphenated.chars().collect();

    let fail = |position: usize| CoreError::AlignmentInconsistency {
        original: original.to_string(),
        hyphenated: hyphenated.to_string(),
        position,
    };

    if hyph.len() < input.len() {
        return Err(fail(0));
    }
    if input.len() < 2 {
        return Ok(Vec::new());
    }

    // Markers ahead of the first character have no gap to belong to
    let mut j = hyph
        .iter()
        .position(|c| *c == input[0] || !is_marker(*c))
        .ok_or_else(|| fail(0))?;
    if hyph[j] != input[0] {
        return Err(fail(0));
    }
    j += 1;

    let mut breakpoints = Vec::with_capacity(input.len() - 1);
    for (i, &expected) in input.iter().enumerate().skip(1) {
        let mut class = Breakpoint::None;
        loop {
            let found = *hyph.get(j).ok_or_else(|| fail(i))?;
            if found == expected {
                break;
            }
            match Breakpoint::from_marker(found) {
                Some(marker) => class = class.merge(marker),
                None => return Err(fail(i)),
            }
            j += 1;
        }
        j += 1;
        breakpoints.push(class);
    }

    if hyph[j..].iter().any(|c| !is_marker(*c)) {
        return Err(fail(input.len()));
    }

    trace!(
        breaks = breakpoints.iter().filter(|b| b.is_break()).count(),
        "aligned hyphenated text"
    );
    Ok(breakpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_hyphen_in_word() {
        let breakpoints = align("hello", "hel\u{00AD}lo").unwrap();
        assert_eq!(
            breakpoints,
            vec![
                Breakpoint::None,
                Breakpoint::None,
                Breakpoint::SoftHyphen,
                Breakpoint::None
            ]
        );
    }

    #[test]
    fn test_zero_width_space() {
        let breakpoints = align("a/b", "a/\u{200B}b").unwrap();
        assert_eq!(breakpoints, vec![Breakpoint::None, Breakpoint::ZeroWidthSpace]);
    }

    #[test]
    fn test_soft_hyphen_wins_either_order() {
        let first = align("ab", "a\u{00AD}\u{200B}b").unwrap();
        let second = align("ab", "a\u{200B}\u{00AD}b").unwrap();
        assert_eq!(first, vec![Breakpoint::SoftHyphen]);
        assert_eq!(second, vec![Breakpoint::SoftHyphen]);
    }

    #[test]
    fn test_unhyphenated_text() {
        assert_eq!(align("word", "word").unwrap(), vec![Breakpoint::None; 3]);
    }

    #[test]
    fn test_short_inputs() {
        assert!(align("", "").unwrap().is_empty());
        assert!(align("a", "a").unwrap().is_empty());
    }

    #[test]
    fn test_shorter_hyphenation_fails() {
        let err = align("hello", "helo").unwrap_err();
        assert!(matches!(err, CoreError::AlignmentInconsistency { .. }));
    }

    #[test]
    fn test_substitution_fails() {
        let err = align("hello", "hel\u{00AD}Xo").unwrap_err();
        assert!(matches!(
            err,
            CoreError::AlignmentInconsistency { position: 3, .. }
        ));
    }

    #[test]
    fn test_trailing_garbage_fails() {
        assert!(align("ab", "abc").is_err());
        assert_eq!(align("ab", "ab\u{00AD}").unwrap(), vec![Breakpoint::None]);
    }

    #[test]
    fn test_multibyte_characters() {
        let breakpoints = align("åäö", "å\u{00AD}äö").unwrap();
        assert_eq!(breakpoints, vec![Breakpoint::SoftHyphen, Breakpoint::None]);
    }

    #[test]
    fn test_codes_round_trip() {
        for bp in [
            Breakpoint::None,
            Breakpoint::SoftHyphen,
            Breakpoint::ZeroWidthSpace,
        ] {
            assert_eq!(Breakpoint::from_code(bp.code()), Some(bp));
        }
        assert_eq!(Breakpoint::from_code(3), None);
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("hy\u{00AD}phen\u{200B}ation"), "hyphenation");
        assert!(matches!(strip_markers("plain"), Cow::Borrowed(_)));
    }
}
