//! Render frames handed to the host.
//!
//! The deck does not draw anything. On every frame the host asks for a
//! [`DeckFrame`] and draws the visuals its own [`CardRenderer`] produced,
//! applying each card's [`CardStyle`].

use crate::item::CardKey;
use crate::style::CardStyle;

/// Host-supplied render functions.
///
/// `Output` is whatever the host's toolkit uses for a piece of UI.
pub trait CardRenderer<T> {
    /// The visual produced for a card or the placeholder.
    type Output;

    /// Produce the body of one card.
    fn render_card(&self, item: &T) -> Self::Output;

    /// Produce the placeholder shown once every card has been swiped.
    fn render_no_more_cards(&self) -> Self::Output;
}

/// A [`CardRenderer`] built from two closures.
#[derive(Debug, Clone)]
pub struct RenderFns<C, P> {
    card: C,
    placeholder: P,
}

/// Build a [`CardRenderer`] from closures.
///
/// ```
/// use swipe_deck::render::{render_fns, CardRenderer};
///
/// let renderer = render_fns(|n: &u32| format!("card {n}"), || "empty".to_string());
/// assert_eq!(renderer.render_card(&3), "card 3");
/// assert_eq!(renderer.render_no_more_cards(), "empty");
/// ```
pub fn render_fns<C, P>(card: C, placeholder: P) -> RenderFns<C, P> {
    RenderFns { card, placeholder }
}

impl<T, V, C, P> CardRenderer<T> for RenderFns<C, P>
where
    C: Fn(&T) -> V,
    P: Fn() -> V,
{
    type Output = V;

    fn render_card(&self, item: &T) -> V {
        (self.card)(item)
    }

    fn render_no_more_cards(&self) -> V {
        (self.placeholder)()
    }
}

/// One card as it should appear this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCard<K, V> {
    /// Reconciliation key.
    pub key: CardKey<K>,
    /// Index of the item in the deck's data.
    pub index: usize,
    /// Steps below the top card; 0 for the top card.
    pub depth: usize,
    /// Position and rotation of the card.
    pub style: CardStyle,
    /// Extra vertical offset from an in-flight layout transition.
    pub layout_offset: f32,
    /// Whether pointer events on this card should be routed to the deck.
    pub interactive: bool,
    /// The host's visual for the card.
    pub content: V,
}

impl<K, V> RenderedCard<K, V> {
    /// Whether this is the top card.
    pub fn is_top(&self) -> bool {
        self.depth == 0
    }
}

/// Everything the deck wants drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckFrame<K, V> {
    /// Every card has been swiped; only the placeholder is shown.
    Placeholder(V),
    /// Cards ordered bottom-most first, so the top card is drawn last.
    Cards(Vec<RenderedCard<K, V>>),
}

impl<K, V> DeckFrame<K, V> {
    /// Whether this frame shows the placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// The rendered cards, bottom-most first. Empty for a placeholder.
    pub fn cards(&self) -> &[RenderedCard<K, V>] {
        match self {
            Self::Placeholder(_) => &[],
            Self::Cards(cards) => cards,
        }
    }

    /// The interactive top card, if any.
    pub fn top_card(&self) -> Option<&RenderedCard<K, V>> {
        self.cards().last().filter(|card| card.is_top())
    }
}
