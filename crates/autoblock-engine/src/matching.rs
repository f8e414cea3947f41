use regex::{Captures, Regex};

/// An owned regex match: the full matched text plus its capture groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    full: String,
    groups: Vec<Option<String>>,
}

impl Capture {
    /// `groups` holds capture groups 1.. in order; `None` for groups that
    /// did not participate.
    pub fn new(full: impl Into<String>, groups: Vec<Option<String>>) -> Self {
        Self {
            full: full.into(),
            groups,
        }
    }

    fn from_captures(captures: &Captures<'_>) -> Self {
        let full = captures.get(0).map_or("", |m| m.as_str());
        let groups = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect();
        Self::new(full, groups)
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Group `0` is the whole match, like [`Captures::get`].
    pub fn group(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.full),
            n => self.groups.get(n - 1)?.as_deref(),
        }
    }

    /// Length in chars of group 1, the span a rule deletes.
    fn deleted_len(&self) -> usize {
        self.group(1).map_or(0, |text| text.chars().count())
    }
}

/// Matches found around the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub before: Option<Capture>,
    pub after: Option<Capture>,
}

/// A char range within the block's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    pub start: usize,
    pub end: usize,
}

/// Match `before` against the text up to the cursor and `after` against the
/// text from the cursor on. `offset` counts chars and is clamped to the text.
///
/// When both patterns are configured both must match; a one-sided hit is
/// discarded, never returned as a partial result.
pub fn get_matches(
    before: Option<&Regex>,
    after: Option<&Regex>,
    text: &str,
    offset: usize,
) -> Option<MatchResult> {
    let split = byte_index(text, offset);
    let (head, tail) = text.split_at(split);

    let mut after_match = after
        .and_then(|re| re.captures(tail))
        .map(|captures| Capture::from_captures(&captures));
    let mut before_match = before
        .and_then(|re| re.captures(head))
        .map(|captures| Capture::from_captures(&captures));

    if before.is_some() && after.is_some() && (before_match.is_none() || after_match.is_none()) {
        before_match = None;
        after_match = None;
    }

    if before_match.is_none() && after_match.is_none() {
        return None;
    }

    Some(MatchResult {
        before: before_match,
        after: after_match,
    })
}

/// Span to delete around `cursor`: back by the length of the `before` match's
/// first group, forward by the length of the `after` match's first group.
pub fn get_offsets(matches: &MatchResult, cursor: usize) -> Offsets {
    let start = matches
        .before
        .as_ref()
        .map_or(cursor, |before| cursor.saturating_sub(before.deleted_len()));
    let end = matches
        .after
        .as_ref()
        .map_or(cursor, |after| cursor + after.deleted_len());

    Offsets { start, end }
}

/// Byte index of the `offset`-th char, or the text length past the end.
pub(crate) fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn quote_prefix_matches_before_cursor() {
        let before = re("^(>)$");
        let matches = get_matches(Some(&before), None, ">", 1).unwrap();

        let captured = matches.before.as_ref().unwrap();
        assert_eq!(captured.as_str(), ">");
        assert_eq!(captured.group(1), Some(">"));
        assert_eq!(matches.after, None);
        assert_eq!(get_offsets(&matches, 1), Offsets { start: 0, end: 1 });
    }

    #[test]
    fn before_only_sees_text_up_to_cursor() {
        let before = re("^(>)$");
        assert!(get_matches(Some(&before), None, ">quoted", 1).is_some());
        assert!(get_matches(Some(&before), None, ">quoted", 2).is_none());
    }

    #[test]
    fn after_only_sees_text_from_cursor() {
        let after = re("^(\\*\\*)");
        let matches = get_matches(None, Some(&after), "bold**", 4).unwrap();

        assert_eq!(matches.before, None);
        assert_eq!(get_offsets(&matches, 4), Offsets { start: 4, end: 6 });
        assert!(get_matches(None, Some(&after), "bold**", 3).is_none());
    }

    #[rstest]
    #[case("[]", 1, true)]
    #[case("[x", 1, false)]
    #[case("x]", 1, false)]
    fn both_sides_must_match(#[case] text: &str, #[case] cursor: usize, #[case] expected: bool) {
        let before = re("(\\[)$");
        let after = re("^(\\])");

        let matches = get_matches(Some(&before), Some(&after), text, cursor);

        assert_eq!(matches.is_some(), expected);
    }

    #[test]
    fn both_sides_offsets_span_cursor() {
        let before = re("(\\[)$");
        let after = re("^(\\])");
        let matches = get_matches(Some(&before), Some(&after), "see []", 5).unwrap();

        assert_eq!(get_offsets(&matches, 5), Offsets { start: 4, end: 6 });
    }

    #[test]
    fn group_excludes_surviving_context() {
        let before = re("(--)>$");
        let matches = get_matches(Some(&before), None, "a-->", 4).unwrap();

        assert_eq!(matches.before.as_ref().unwrap().as_str(), "-->");
        assert_eq!(get_offsets(&matches, 4), Offsets { start: 2, end: 4 });
    }

    #[test]
    fn no_patterns_means_no_match() {
        assert_eq!(get_matches(None, None, "anything", 3), None);
    }

    #[test]
    fn match_without_group_keeps_cursor() {
        let before = re("^---$");
        let matches = get_matches(Some(&before), None, "---", 3).unwrap();
        assert_eq!(get_offsets(&matches, 3), Offsets { start: 3, end: 3 });
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let before = re("(→→)$");
        let matches = get_matches(Some(&before), None, "a→→b", 3).unwrap();

        assert_eq!(matches.before.as_ref().unwrap().as_str(), "→→");
        assert_eq!(get_offsets(&matches, 3), Offsets { start: 1, end: 3 });
    }

    #[test]
    fn cursor_past_end_is_clamped() {
        let before = re("^(#{1,6})$");
        let matches = get_matches(Some(&before), None, "##", 10).unwrap();
        assert_eq!(matches.before.unwrap().group(1), Some("##"));
    }

    #[test]
    fn unmatched_optional_group_is_none() {
        let before = re("^(#)?(>)$");
        let matches = get_matches(Some(&before), None, ">", 1).unwrap();
        let captured = matches.before.unwrap();

        assert_eq!(captured.group(1), None);
        assert_eq!(captured.group(2), Some(">"));
        assert_eq!(captured.group(3), None);
    }

    #[rstest]
    #[case("abc", 0, 0)]
    #[case("abc", 2, 2)]
    #[case("é>", 1, 2)]
    #[case("é>", 5, 3)]
    fn byte_index_maps_chars(#[case] text: &str, #[case] offset: usize, #[case] expected: usize) {
        assert_eq!(byte_index(text, offset), expected);
    }
}
