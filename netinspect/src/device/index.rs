//! Lookup of captured commands by an approximate name.
//!
//! Operators abbreviate commands freely (`dis cpu` for
//! `display cpu-usage`), so checks name commands in full and resolve them
//! against what was actually captured. Matching is positional: both names
//! must have the same number of words and each pair of words must be a
//! prefix of one another.

use indexmap::IndexMap;

use super::command::Command;

/// Score a candidate name against the query words.
///
/// Returns `None` when the word counts differ or any word pair is not a
/// prefix match, otherwise the summed length of the shorter words.
pub fn match_score(query: &[String], candidate: &str) -> Option<usize> {
    let words: Vec<String> = candidate
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    if words.len() != query.len() {
        return None;
    }

    let mut score = 0;
    for (q, c) in query.iter().zip(&words) {
        let (short, long) = if q.len() <= c.len() { (q, c) } else { (c, q) };
        if !long.starts_with(short.as_str()) {
            return None;
        }
        score += short.len();
    }
    Some(score)
}

/// Find the captured command that best matches `query`.
///
/// Ties keep the command captured first. `None` means the device did not
/// capture anything resembling the query, which callers treat as "no data".
pub fn resolve<'a>(commands: &'a IndexMap<String, Command>, query: &str) -> Option<&'a Command> {
    let query: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if query.is_empty() {
        return None;
    }

    let mut best: Option<(usize, &Command)> = None;
    for cmd in commands.values() {
        let Some(score) = match_score(&query, cmd.name()) else {
            continue;
        };
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, cmd));
        }
    }
    best.map(|(_, cmd)| cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(names: &[&str]) -> IndexMap<String, Command> {
        names
            .iter()
            .map(|name| {
                let cmd = Command::new(*name, "");
                (cmd.name().to_string(), cmd)
            })
            .collect()
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_lowercase).collect()
    }

    #[test]
    fn test_match_score() {
        assert_eq!(match_score(&words("dis ver"), "display version"), Some(6));
        assert_eq!(match_score(&words("display version"), "dis ver"), Some(6));
        assert_eq!(match_score(&words("display version"), "display version"), Some(14));
        assert_eq!(match_score(&words("dis ver"), "display device version table"), None);
        assert_eq!(match_score(&words("dis ver"), "display interface"), None);
    }

    #[test]
    fn test_resolve_requires_equal_word_count() {
        let cmds = commands(&["display device version table", "display version"]);
        let found = resolve(&cmds, "dis ver").unwrap();
        assert_eq!(found.name(), "display version");
    }

    #[test]
    fn test_resolve_abbreviated_capture() {
        let cmds = commands(&["dis cpu", "dis int brief"]);
        assert_eq!(resolve(&cmds, "display cpu-usage").unwrap().name(), "dis cpu");
        assert_eq!(
            resolve(&cmds, "display interface brief").unwrap().name(),
            "dis int brief"
        );
    }

    #[test]
    fn test_resolve_prefers_longest_match() {
        let cmds = commands(&["dis mem", "display memory-usage"]);
        let found = resolve(&cmds, "display memory-usage").unwrap();
        assert_eq!(found.name(), "display memory-usage");
    }

    #[test]
    fn test_resolve_tie_keeps_first() {
        let cmds = commands(&["display cpu-usage", "display cpu-usage-extra"]);
        for _ in 0..5 {
            assert_eq!(resolve(&cmds, "dis cpu").unwrap().name(), "display cpu-usage");
        }

        let cmds = commands(&["display cpu-usage-extra", "display cpu-usage"]);
        assert_eq!(
            resolve(&cmds, "dis cpu").unwrap().name(),
            "display cpu-usage-extra"
        );
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let cmds = commands(&["DISPLAY VERSION"]);
        assert!(resolve(&cmds, "dis ver").is_some());
    }

    #[test]
    fn test_resolve_absent() {
        let cmds = commands(&["display version"]);
        assert!(resolve(&cmds, "display power").is_none());
        assert!(resolve(&cmds, "").is_none());
        assert!(resolve(&IndexMap::new(), "display version").is_none());
    }
}
