//! Item identities
//!
//! Provides [`Item`], the string identity shared by every graph structure, and
//! the fixed set of base items every search starts from.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// Tier (layer) number of an item; base items are tier 0
pub type Tier = u32;

/// The four axiomatic items, always craftable, never produced by a recipe step
pub const BASE_ITEMS: [&str; 4] = ["Air", "Earth", "Fire", "Water"];

/// Check whether a name is one of [`BASE_ITEMS`]
#[inline]
#[must_use]
pub fn is_base_item(name: &str) -> bool {
    BASE_ITEMS.contains(&name)
}

/// Item identity
///
/// Backed by `Arc<str>` so plans, trees and variant tables can clone items
/// freely across concurrent resolve tasks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Arc<str>);

impl Item {
    /// Create item from a name
    #[inline]
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Item name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is a base item
    #[inline]
    #[must_use]
    pub fn is_base(&self) -> bool {
        is_base_item(&self.0)
    }

    /// All base items, in [`BASE_ITEMS`] order
    #[must_use]
    pub fn base_items() -> Vec<Item> {
        BASE_ITEMS.iter().map(|name| Item::new(name)).collect()
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Item {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Item {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for Item {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Item {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Item {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn base_detection() {
        assert!(Item::new("Fire").is_base());
        assert!(!Item::new("Steam").is_base());
        assert!(!is_base_item("fire"));
    }

    #[test]
    fn lookup_by_str() {
        let mut tiers: HashMap<Item, Tier> = HashMap::new();
        tiers.insert(Item::new("Mud"), 1);
        assert_eq!(tiers.get("Mud"), Some(&1));
    }

    #[test]
    fn serde_transparent() {
        let item = Item::new("Lake");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, "\"Lake\"");

        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn base_items_in_order() {
        let names: Vec<String> = Item::base_items().iter().map(ToString::to_string).collect();
        assert_eq!(names, ["Air", "Earth", "Fire", "Water"]);
    }
}
