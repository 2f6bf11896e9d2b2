//! Known animal categories.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Every animal the bot knows about.
///
/// Categories arrive as free-form strings from chat commands, so parsing is
/// case-insensitive and tolerant of surrounding whitespace. Strings that do
/// not name a known animal are still valid input to the resolver; they just
/// have no source and no fallback pool.
///
/// # Examples
///
/// ```
/// use fauna_core::Animal;
///
/// assert_eq!(Animal::from_category(" Cat "), Some(Animal::Cat));
/// assert_eq!(Animal::from_category("unicorn"), None);
/// assert_eq!(Animal::Hedgehog.to_string(), "hedgehog");
/// assert_eq!(Animal::all().len(), 19);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Animal {
    /// Domestic cat
    Cat,
    /// Domestic dog
    Dog,
    /// Fox
    Fox,
    /// Duck
    Duck,
    /// Rabbit
    Rabbit,
    /// Raccoon
    Raccoon,
    /// Owl
    Owl,
    /// Penguin
    Penguin,
    /// Giant panda
    Panda,
    /// Koala
    Koala,
    /// Sloth
    Sloth,
    /// Hedgehog
    Hedgehog,
    /// Otter
    Otter,
    /// Squirrel
    Squirrel,
    /// Deer
    Deer,
    /// Bear
    Bear,
    /// Wolf
    Wolf,
    /// Eagle
    Eagle,
    /// Dolphin
    Dolphin,
}

impl Animal {
    /// Parse a user-supplied category string.
    pub fn from_category(category: &str) -> Option<Self> {
        category.trim().parse().ok()
    }

    /// Lowercase category name, as used for lookups and storage.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Capitalized name for post titles.
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// All known animals in declaration order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}
