//! Filtering candidates against the stub and ordering them
//!
//! The stub is the part of the line the user is typing: everything after
//! the last whitespace, quote or `@`. Candidates whose name starts with the
//! stub (ignoring case) survive, ordered by priority and then by name.

use super::completion::Completion;

/// The line being edited: text after the last line break
pub fn last_line(text: &str) -> &str {
    text.rsplit_once('\n').map_or(text, |(_, line)| line)
}

fn is_stub_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch == '"' || ch == '\'' || ch == '@'
}

/// The partial word at the end of `text`
pub fn stub(text: &str) -> &str {
    let line = last_line(text);
    match line.char_indices().rev().find(|&(_, ch)| is_stub_boundary(ch)) {
        Some((index, ch)) => &line[index + ch.len_utf8()..],
        None => line,
    }
}

/// Keep the candidates matching `stub` and sort them by (priority, name)
pub fn crop(mut candidates: Vec<Completion>, stub: &str) -> Vec<Completion> {
    if !stub.is_empty() {
        let stub = stub.to_lowercase();
        let mut keyed: Vec<(String, Completion)> = candidates
            .into_iter()
            .map(|c| (c.sort_name(), c))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let start = keyed.partition_point(|(name, _)| name.as_str() < stub.as_str());
        let end = start
            + keyed[start..]
                .iter()
                .take_while(|(name, _)| name.starts_with(&stub))
                .count();
        candidates = keyed.drain(start..end).map(|(_, c)| c).collect();
    }

    candidates.sort_by_cached_key(|c| (c.priority, c.sort_name()));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(completions: &[Completion]) -> Vec<&str> {
        completions.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_stub_extraction() {
        assert_eq!(stub("GIB abc 5 Sil"), "Sil");
        assert_eq!(stub("GIB abc "), "");
        assert_eq!(stub("BENENNE EINHEIT \"Foo Ba"), "Ba");
        assert_eq!(stub("@ARB"), "ARB");
        assert_eq!(stub("ARBEITE\nLER"), "LER");
        assert_eq!(stub(""), "");
        assert_eq!(last_line("a\nb\nc d"), "c d");
    }

    #[test]
    fn test_prefix_filter() {
        let candidates = vec![Completion::new("ATTACKIERE"), Completion::new("ATMEN")];
        assert_eq!(names(&crop(candidates, "ATT")), vec!["ATTACKIERE"]);

        let candidates = vec![
            Completion::new("silber"),
            Completion::new("Schwert"),
            Completion::new("Silberbeutel"),
            Completion::new("Sense"),
        ];
        assert_eq!(names(&crop(candidates, "SIL")), vec!["silber", "Silberbeutel"]);
    }

    #[test]
    fn test_priority_then_name_order() {
        let candidates = vec![
            Completion::new("b").with_priority(9),
            Completion::new("A").with_priority(9),
            Completion::new("c").with_priority(7),
        ];
        assert_eq!(names(&crop(candidates, "")), vec!["c", "A", "b"]);
    }

    #[test]
    fn test_crop_is_idempotent() {
        let candidates = vec![
            Completion::new("Hinz (abc)").with_value("abc"),
            Completion::new("abc (Hinz)").with_value("abc").with_priority(10),
            Completion::new("Holz"),
            Completion::new("holz").with_priority(7),
            Completion::new("Kunz (def)").with_value("def"),
        ];
        let once = crop(candidates, "h");
        let twice = crop(once.clone(), "h");
        assert_eq!(once, twice);
        assert_eq!(names(&once), vec!["holz", "Hinz (abc)", "Holz"]);
    }

    #[test]
    fn test_unicode_names() {
        let candidates = vec![Completion::new("Kräuterkunde"), Completion::new("Kriegsbeil")];
        assert_eq!(names(&crop(candidates, "KRÄ")), vec!["Kräuterkunde"]);
    }
}
