//! Keyword groups and the per-page keyword scanner
//!
//! A keyword group is a small set of related terms counted as one unit. Pages
//! are scanned with a case-insensitive substring check; how a group scores on
//! one page depends on the configured [`MatchMode`].

use crate::config::MatchMode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// An ordered set of related keywords
///
/// Exact duplicates are dropped on construction; the first occurrence keeps
/// its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct KeywordGroup {
    keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.into();
            if !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        Self { keywords: unique }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Scores this group against already-lowercased page text
    fn hits(&self, lowered_content: &str, mode: MatchMode) -> u64 {
        let mut matching = self
            .keywords
            .iter()
            .filter(|keyword| lowered_content.contains(&keyword.to_lowercase()));

        match mode {
            MatchMode::AnyMember => u64::from(matching.next().is_some()),
            MatchMode::EachKeyword => matching.count() as u64,
        }
    }
}

impl From<Vec<String>> for KeywordGroup {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl fmt::Display for KeywordGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keywords.join(", "))
    }
}

/// The ordered list of keyword groups a crawl scans for
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct KeywordGroups(Vec<KeywordGroup>);

impl KeywordGroups {
    pub fn new(groups: Vec<KeywordGroup>) -> Self {
        Self(groups)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeywordGroup> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits every group into singleton groups, one per keyword
    ///
    /// A keyword appearing in several groups yields a single singleton.
    pub fn flattened(&self) -> Self {
        let mut singles: Vec<KeywordGroup> = Vec::new();
        for keyword in self.0.iter().flat_map(|group| group.keywords.iter()) {
            let single = KeywordGroup::new([keyword.as_str()]);
            if !singles.contains(&single) {
                singles.push(single);
            }
        }
        Self(singles)
    }
}

/// Occurrence counts per keyword group
///
/// Only groups with a positive count are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTally {
    counts: BTreeMap<KeywordGroup, u64>,
}

impl KeywordTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `hits` to the count of `group`
    pub fn add(&mut self, group: KeywordGroup, hits: u64) {
        if hits > 0 {
            *self.counts.entry(group).or_insert(0) += hits;
        }
    }

    /// Folds another tally into this one (count += hits)
    pub fn merge(&mut self, other: KeywordTally) {
        for (group, hits) in other.counts {
            self.add(group, hits);
        }
    }

    pub fn get(&self, group: &KeywordGroup) -> u64 {
        self.counts.get(group).copied().unwrap_or(0)
    }

    /// Sum of all group counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeywordGroup, u64)> {
        self.counts.iter().map(|(group, hits)| (group, *hits))
    }
}

/// Counts keyword-group hits in one page body
///
/// Matching is a case-insensitive substring check: a group containing
/// `"OFAC"` matches page text containing `"ofac"`.
pub fn scan_keywords(content: &str, groups: &KeywordGroups, mode: MatchMode) -> KeywordTally {
    let lowered = content.to_lowercase();
    let mut tally = KeywordTally::new();

    for group in groups.iter() {
        tally.add(group.clone(), group.hits(&lowered, mode));
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> KeywordGroups {
        KeywordGroups::new(vec![
            KeywordGroup::new(["Sanctions", "OFAC"]),
            KeywordGroup::new(["Cybersecurity", "OLAF"]),
            KeywordGroup::new(["Device Fingerprinting"]),
        ])
    }

    #[test]
    fn test_case_insensitive_match() {
        let tally = scan_keywords("Visit the ofac portal", &groups(), MatchMode::AnyMember);
        assert_eq!(tally.get(&KeywordGroup::new(["Sanctions", "OFAC"])), 1);
        assert_eq!(tally.len(), 1);
    }

    #[test]
    fn test_any_member_counts_group_once() {
        let text = "SANCTIONS lists and OFAC notices";
        let tally = scan_keywords(text, &groups(), MatchMode::AnyMember);
        assert_eq!(tally.get(&KeywordGroup::new(["Sanctions", "OFAC"])), 1);
    }

    #[test]
    fn test_each_keyword_counts_every_member() {
        let text = "SANCTIONS lists and OFAC notices";
        let tally = scan_keywords(text, &groups(), MatchMode::EachKeyword);
        assert_eq!(tally.get(&KeywordGroup::new(["Sanctions", "OFAC"])), 2);
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn test_no_hits_yields_empty_tally() {
        let tally = scan_keywords("nothing relevant here", &groups(), MatchMode::EachKeyword);
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_multi_word_keyword() {
        let tally = scan_keywords(
            "<p>device fingerprinting explained</p>",
            &groups(),
            MatchMode::AnyMember,
        );
        assert_eq!(tally.get(&KeywordGroup::new(["Device Fingerprinting"])), 1);
    }

    #[test]
    fn test_merge_accumulates() {
        let mut total = scan_keywords("ofac", &groups(), MatchMode::AnyMember);
        total.merge(scan_keywords("OFAC and olaf", &groups(), MatchMode::AnyMember));

        assert_eq!(total.get(&KeywordGroup::new(["Sanctions", "OFAC"])), 2);
        assert_eq!(total.get(&KeywordGroup::new(["Cybersecurity", "OLAF"])), 1);
        assert_eq!(total.total(), 3);
    }

    #[test]
    fn test_group_display_and_dedup() {
        let group = KeywordGroup::new(["Sanctions", "OFAC", "Sanctions"]);
        assert_eq!(group.keywords().len(), 2);
        assert_eq!(group.to_string(), "Sanctions, OFAC");
    }

    #[test]
    fn test_flattened_groups() {
        let flat = groups().flattened();
        assert_eq!(flat.len(), 5);
        assert!(flat.iter().any(|g| g == &KeywordGroup::new(["OLAF"])));
    }

    #[test]
    fn test_zero_hits_not_recorded() {
        let mut tally = KeywordTally::new();
        tally.add(KeywordGroup::new(["OFAC"]), 0);
        assert!(tally.is_empty());
    }
}
