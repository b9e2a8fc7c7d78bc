// Xyna Engine — Marker-based substring extraction
//
// Most extractors follow the same idiom: walk an ordered marker list, stop at
// the first marker that occurs anywhere in the text (plain substring match,
// not word match), and take a piece of the text split around it.

/// The text split around every occurrence of the first present marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSplit<'a> {
    pub marker: &'static str,
    parts: Vec<&'a str>,
}

impl<'a> MarkerSplit<'a> {
    /// Text preceding the first occurrence.
    pub fn before(&self) -> &'a str {
        self.parts.first().copied().unwrap_or("")
    }

    /// Text between the first and second occurrence (or to the end).
    pub fn first_segment(&self) -> &'a str {
        self.parts.get(1).copied().unwrap_or("")
    }

    /// Text following the last occurrence.
    pub fn after_last(&self) -> &'a str {
        self.parts.last().copied().unwrap_or("")
    }
}

/// Locate the first marker (in list order) contained in `text` and split on it.
pub fn split_on_first_marker<'a>(text: &'a str, markers: &[&'static str]) -> Option<MarkerSplit<'a>> {
    markers
        .iter()
        .find(|m| !m.is_empty() && text.contains(**m))
        .map(|marker| MarkerSplit { marker: *marker, parts: text.split(*marker).collect() })
}

/// The first marker (in list order) contained in `text`.
pub fn first_present(text: &str, markers: &[&'static str]) -> Option<&'static str> {
    markers.iter().copied().find(|m| text.contains(m))
}

/// Whether any of `words` occurs as a substring of `text`.
pub fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Text following the last occurrence of `marker`, or the whole text.
pub fn after_last<'a>(text: &'a str, marker: &str) -> &'a str {
    text.rsplit_once(marker).map(|(_, rest)| rest).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_marker_in_list_order() {
        let split = split_on_first_marker("look for cats then search dogs", &["search", "look for"]).unwrap();
        assert_eq!(split.marker, "search");
        assert_eq!(split.after_last(), " dogs");
        assert_eq!(split.before(), "look for cats then ");
    }

    #[test]
    fn segments_between_occurrences() {
        let split = split_on_first_marker("a to b to c", &["to"]).unwrap();
        assert_eq!(split.first_segment(), " b ");
        assert_eq!(split.after_last(), " c");
    }

    #[test]
    fn substring_semantics_not_word_semantics() {
        // "to" inside "tomorrow" counts
        let split = split_on_first_marker("call tomorrow", &["to"]).unwrap();
        assert_eq!(split.first_segment(), "morrow");
    }

    #[test]
    fn none_when_absent() {
        assert!(split_on_first_marker("hello", &["bye", "ciao"]).is_none());
        assert_eq!(first_present("hello", &["bye"]), None);
    }

    #[test]
    fn after_last_falls_back_to_whole_text() {
        assert_eq!(after_last("watch cats", "youtube"), "watch cats");
        assert_eq!(after_last("youtube a youtube b", "youtube"), " b");
    }
}
