//! SummaryParser - reactor extraction from accessible-name summaries
//!
//! Reaction groups describe themselves with a sentence like
//! "alice, bob and 3 more reacted with 👍". The parser reduces that sentence
//! to an ordered set of usernames. Best-effort by design: text that does not
//! follow the expected grammar degrades to a single name, never an error.

use regex::Regex;
use std::collections::HashSet;

/// Reactor-list parser with pre-compiled patterns.
pub struct SummaryParser {
    reacted_clause: Regex,
    conjunction: Regex,
    overflow: Regex,
}

impl SummaryParser {
    pub fn new() -> Self {
        // " reacted with 👍" - the trailing clause, dropped wholesale
        let reacted_clause = Regex::new(r" reacted with.*").unwrap();

        // "a, b and c" / "a, b, and c" - fold the conjunction into the
        // comma-separated form. Usernames cannot contain spaces, so the
        // surrounding-space match is unambiguous.
        let conjunction = Regex::new(r",? and ").unwrap();

        // ", 3 more" - the overflow tail left after conjunction folding.
        // Those names are not in the summary at all; they are excluded,
        // never guessed.
        let overflow = Regex::new(r", \d+ more").unwrap();

        Self {
            reacted_clause,
            conjunction,
            overflow,
        }
    }

    /// Every username the summary names, in display order; duplicates
    /// collapse to their first occurrence and blank entries are discarded.
    pub fn parse_names(&self, summary: &str) -> Vec<String> {
        let stripped = self.reacted_clause.replace(summary, "");
        let folded = self.conjunction.replace(&stripped, ", ");
        let listed = self.overflow.replace(&folded, "");

        let mut seen: HashSet<&str> = HashSet::new();
        let mut users = Vec::new();
        for name in listed.split(", ") {
            if name.is_empty() {
                continue;
            }
            if seen.insert(name) {
                users.push(name.to_string());
            }
        }
        users
    }

    /// [`parse_names`](Self::parse_names) with the current viewer removed.
    /// Returns an empty list when nothing usable remains.
    pub fn parse(&self, summary: &str, current_user: &str) -> Vec<String> {
        let mut users = self.parse_names(summary);
        users.retain(|name| name != current_user);
        users
    }
}

impl Default for SummaryParser {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
