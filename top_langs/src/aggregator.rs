use crate::api::{LanguageEdge, Repository};
use derive_more::Constructor;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Constructor)]
pub struct Language {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "language: {}\tcolor: {}\tbytes: {}",
            self.name,
            self.color.as_deref().unwrap_or("-"),
            self.size
        ))
    }
}

/// Language name to [`Language`] map which iterates in insertion order.
///
/// Order is part of the contract: after [`aggregate_languages`] it is the
/// order languages were first seen, after [`rank_languages`] it is the rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    entries: Vec<Language>,
    positions: HashMap<String, usize>,
}

pub type TopLanguages = LanguageMap;

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Language> {
        self.positions.get(name).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Language> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|language| language.name.as_str())
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|language| language.size).sum()
    }

    /// Sizes add up, color is taken from the latest edge.
    pub fn merge(&mut self, edge: LanguageEdge) {
        match self.positions.get(&edge.name) {
            Some(&position) => {
                let language = &mut self.entries[position];
                language.size += edge.size;
                language.color = edge.color;
            }
            None => {
                self.positions.insert(edge.name.clone(), self.entries.len());
                self.entries.push(Language::new(edge.name, edge.color, edge.size));
            }
        }
    }

    fn from_entries(entries: Vec<Language>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(position, language)| (language.name.clone(), position))
            .collect();
        LanguageMap { entries, positions }
    }
}

impl IntoIterator for LanguageMap {
    type Item = Language;
    type IntoIter = std::vec::IntoIter<Language>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LanguageMap {
    type Item = &'a Language;
    type IntoIter = std::slice::Iter<'a, Language>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for LanguageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for language in &self.entries {
            map.serialize_entry(&language.name, language)?;
        }
        map.end()
    }
}

pub fn exclude_repositories<S: AsRef<str>>(repositories: Vec<Repository>, exclude: &[S]) -> Vec<Repository> {
    if exclude.is_empty() {
        return repositories;
    }
    let exclude: HashSet<&str> = exclude.iter().map(AsRef::as_ref).collect();
    repositories
        .into_iter()
        .filter(|repository| !exclude.contains(repository.name.as_str()))
        .collect()
}

pub fn filter_private(repositories: Vec<Repository>, include_private: bool) -> Vec<Repository> {
    if include_private {
        return repositories;
    }
    repositories
        .into_iter()
        .filter(|repository| !repository.is_private)
        .collect()
}

/// Folds language edges of all repositories, in repository order, into one map.
pub fn aggregate_languages(repositories: Vec<Repository>) -> LanguageMap {
    repositories
        .into_iter()
        .filter(|repository| !repository.languages.is_empty())
        .flat_map(|repository| repository.languages)
        .fold(LanguageMap::new(), |mut languages, edge| {
            languages.merge(edge);
            languages
        })
}

/// Orders languages by size, largest first. Ties keep their current order.
pub fn rank_languages(languages: LanguageMap) -> TopLanguages {
    let mut entries = languages.entries;
    entries.sort_by(|a, b| b.size.cmp(&a.size));
    LanguageMap::from_entries(entries)
}

pub fn top_languages<S: AsRef<str>>(
    repositories: Vec<Repository>,
    exclude: &[S],
    include_private: bool,
) -> TopLanguages {
    let repositories = exclude_repositories(repositories, exclude);
    let repositories = filter_private(repositories, include_private);
    rank_languages(aggregate_languages(repositories))
}
