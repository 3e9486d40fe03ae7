//! Items shown on deck cards.

use std::fmt;
use std::hash::Hash;

/// An item that can be placed on a card.
///
/// The key identifies the item across re-renders so hosts can reconcile
/// their card surfaces. Items without a stable key still work, but their
/// cards are keyed by position and may be rebuilt when the stack advances.
pub trait DeckItem {
    /// Stable identity of an item.
    type Key: Clone + Eq + Hash + fmt::Debug;

    /// The item's stable identity, if it has one.
    fn key(&self) -> Option<Self::Key>;
}

/// Key of a rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardKey<K> {
    /// The item's own stable key.
    Item(K),
    /// Fallback: the item's index in the data.
    Position(usize),
}

impl<K> CardKey<K> {
    /// Key for the item at `index`.
    pub fn for_item<T>(item: &T, index: usize) -> Self
    where
        T: DeckItem<Key = K>,
    {
        match item.key() {
            Some(key) => Self::Item(key),
            None => Self::Position(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagged(Option<&'static str>);

    impl DeckItem for Tagged {
        type Key = &'static str;

        fn key(&self) -> Option<&'static str> {
            self.0
        }
    }

    #[test]
    fn test_card_key_prefers_item_key() {
        assert_eq!(CardKey::for_item(&Tagged(Some("a")), 3), CardKey::Item("a"));
        assert_eq!(CardKey::for_item(&Tagged(None), 3), CardKey::Position(3));
    }
}
