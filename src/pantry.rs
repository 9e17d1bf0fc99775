use crate::config::{DefaultReason, LoadOutcome};
use std::collections::BTreeSet;
use std::path::Path;

/// Ingredients already on hand, lower-cased and trimmed.
///
/// Empty entries are never stored: an empty string is a substring of
/// every ingredient and would wipe the whole shopping list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PantrySet {
    items: BTreeSet<String>,
}

impl PantrySet {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = items
            .into_iter()
            .map(|item| item.as_ref().trim().to_lowercase())
            .filter(|item| !item.is_empty())
            .collect();
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// True when the ingredient's lower-cased name contains any pantry entry.
    ///
    /// Plain substring match: "tomate" covers "sauce tomate" but "riz"
    /// also covers "chorizo".
    pub fn covers(&self, ingredient: &str) -> bool {
        let ingredient = ingredient.to_lowercase();
        self.items.iter().any(|item| ingredient.contains(item.as_str()))
    }
}

/// Load the pantry from a JSON list of strings.
///
/// Never fails: a missing file yields an empty pantry, as does anything
/// that is not a JSON array of strings.
pub fn load_pantry(path: impl AsRef<Path>) -> LoadOutcome<PantrySet> {
    let path = path.as_ref();
    if !path.is_file() {
        return LoadOutcome::Defaulted {
            value: PantrySet::default(),
            reason: DefaultReason::Missing,
        };
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Vec<String>>(&text).map_err(|e| e.to_string()));

    match parsed {
        Ok(items) => LoadOutcome::Loaded(PantrySet::new(items)),
        Err(e) => LoadOutcome::Defaulted {
            value: PantrySet::default(),
            reason: DefaultReason::Malformed(e),
        },
    }
}
