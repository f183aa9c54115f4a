//! Card ranking and placement legality.

use std::cmp::Ordering;

use crate::domain::cards_types::{Card, CardValue, Rank};

impl CardValue {
    /// Two, Three and Ten may be placed on anything.
    pub const fn is_wildcard(self) -> bool {
        matches!(
            self,
            CardValue::Rank(Rank::Two) | CardValue::Rank(Rank::Three) | CardValue::Rank(Rank::Ten)
        )
    }

    /// Position in the placement preorder: Joker lowest, wildcards highest and
    /// tied, everything else by natural rank.
    fn tier(self) -> u8 {
        match self {
            CardValue::Joker => 0,
            v if v.is_wildcard() => u8::MAX,
            CardValue::Rank(rank) => rank as u8 + 2,
        }
    }
}

/// Total preorder over card values used for "can this go on top of that".
///
/// Wildcards compare equal to each other and above every other value; Joker
/// compares below everything. Suits and colors never take part.
pub fn compare_values(a: CardValue, b: CardValue) -> Ordering {
    a.tier().cmp(&b.tier())
}

/// Whether `value` may be placed on a pile whose effective top is `top`.
///
/// `None` means an empty pile (or one made only of Threes). A Seven on top caps
/// the next non-wildcard at Seven. A wildcard on top admits only wildcards.
pub fn can_place_on(value: CardValue, top: Option<CardValue>) -> bool {
    if value == CardValue::Joker {
        return false;
    }
    if value.is_wildcard() {
        return true;
    }
    match top {
        None => true,
        Some(CardValue::Rank(Rank::Seven)) => {
            compare_values(value, CardValue::Rank(Rank::Seven)) != Ordering::Greater
        }
        Some(top) => compare_values(value, top) != Ordering::Less,
    }
}

/// First card from the top that is not a Three. `cards` is ordered bottom to top.
pub fn effective_top(cards: &[Card]) -> Option<Card> {
    cards
        .iter()
        .rev()
        .find(|c| c.value() != CardValue::Rank(Rank::Three))
        .copied()
}

/// Number of consecutive cards of `value` at the top of `cards` (bottom to top).
pub fn matching_run(cards: &[Card], value: CardValue) -> usize {
    cards
        .iter()
        .rev()
        .take_while(|c| c.value() == value)
        .count()
}
