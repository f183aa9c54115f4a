//! Core card-related types: Card, CardValue, Rank, Suit, Color

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Color {
    Black,
    Red,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }
}

/// Face value of a non-Joker card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

/// Value as seen by the rule engine: a rank, or Joker.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CardValue {
    Rank(Rank),
    Joker,
}

impl From<Rank> for CardValue {
    fn from(rank: Rank) -> Self {
        CardValue::Rank(rank)
    }
}

/// A playing card. Jokers carry a color instead of a suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Card {
    Standard { rank: Rank, suit: Suit },
    Joker { color: Color },
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card::Standard { rank, suit }
    }

    pub const fn joker(color: Color) -> Self {
        Card::Joker { color }
    }

    pub const fn value(&self) -> CardValue {
        match self {
            Card::Standard { rank, .. } => CardValue::Rank(*rank),
            Card::Joker { .. } => CardValue::Joker,
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Card::Standard { suit, .. } => suit.color(),
            Card::Joker { color } => *color,
        }
    }

    pub const fn suit(&self) -> Option<Suit> {
        match self {
            Card::Standard { suit, .. } => Some(*suit),
            Card::Joker { .. } => None,
        }
    }

    pub const fn is_joker(&self) -> bool {
        matches!(self, Card::Joker { .. })
    }
}

// Note: Ord on Card is only for stable sorting of hands: suit order C<D<H<S then
// rank, Jokers last. Placement legality goes through `compare_values`.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Card::Standard { rank: ra, suit: sa }, Card::Standard { rank: rb, suit: sb }) => {
                match sa.cmp(sb) {
                    std::cmp::Ordering::Equal => ra.cmp(rb),
                    ord => ord,
                }
            }
            (Card::Standard { .. }, Card::Joker { .. }) => std::cmp::Ordering::Less,
            (Card::Joker { .. }, Card::Standard { .. }) => std::cmp::Ordering::Greater,
            (Card::Joker { color: a }, Card::Joker { color: b }) => a.cmp(b),
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
