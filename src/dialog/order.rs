//! Order State
//!
//! Which toppings are on the pizza, plus the single most recently
//! selected topping used by the quick-undo path.

use std::collections::BTreeMap;
use tracing::debug;

/// A change to one topping's selection, reported to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppingChange {
    pub topping: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct OrderState {
    /// Every known topping, selected or not
    selected: BTreeMap<String, bool>,
    /// Most recently set-to-true topping
    last_mutated: Option<String>,
}

impl OrderState {
    /// Create an empty order over a topping catalog
    pub fn new<I, S>(catalog: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected = catalog
            .into_iter()
            .map(|t| (normalize_topping(t.as_ref()), false))
            .filter(|(t, _)| !t.is_empty())
            .collect();
        Self {
            selected,
            last_mutated: None,
        }
    }

    /// Resolve a raw slot value to a catalog name
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let key = normalize_topping(name);
        self.selected.get_key_value(&key).map(|(k, _)| k.as_str())
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected
            .get(&normalize_topping(name))
            .copied()
            .unwrap_or(false)
    }

    pub fn last_mutated(&self) -> Option<&str> {
        self.last_mutated.as_deref()
    }

    /// Select a topping and remember it for undo.
    ///
    /// Unknown names are ignored. Returns the change only when the
    /// selection actually flipped.
    pub fn select(&mut self, name: &str) -> Option<ToppingChange> {
        let key = normalize_topping(name);
        let entry = self.selected.get_mut(&key)?;
        let was_selected = std::mem::replace(entry, true);
        self.last_mutated = Some(key.clone());
        debug!("Topping selected: {}", key);

        if was_selected {
            None
        } else {
            Some(ToppingChange {
                topping: key,
                selected: true,
            })
        }
    }

    /// Clear the last selected topping, keeping it as the undo target
    pub fn undo_last(&mut self) -> Option<ToppingChange> {
        let key = self.last_mutated.clone()?;
        let entry = self.selected.get_mut(&key)?;
        if !std::mem::replace(entry, false) {
            return None;
        }
        debug!("Topping cleared: {}", key);
        Some(ToppingChange {
            topping: key,
            selected: false,
        })
    }

    /// Currently selected toppings, in catalog order
    pub fn selected_toppings(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter(|(_, on)| **on)
            .map(|(t, _)| t.as_str())
            .collect()
    }
}

fn normalize_topping(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
