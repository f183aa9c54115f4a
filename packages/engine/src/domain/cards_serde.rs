//! Serialization and deserialization for card types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, CardValue, Color, Rank, Suit};

// Suit serde
impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Suit::Clubs => "CLUBS",
            Suit::Diamonds => "DIAMONDS",
            Suit::Hearts => "HEARTS",
            Suit::Spades => "SPADES",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "CLUBS" => Ok(Suit::Clubs),
            "DIAMONDS" => Ok(Suit::Diamonds),
            "HEARTS" => Ok(Suit::Hearts),
            "SPADES" => Ok(Suit::Spades),
            _ => Err(serde::de::Error::custom(format!("Invalid suit: {s}"))),
        }
    }
}

// Color serde
impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Color::Black => "BLACK",
            Color::Red => "RED",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "BLACK" => Ok(Color::Black),
            "RED" => Ok(Color::Red),
            _ => Err(serde::de::Error::custom(format!("Invalid color: {s}"))),
        }
    }
}

fn rank_name(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "TWO",
        Rank::Three => "THREE",
        Rank::Four => "FOUR",
        Rank::Five => "FIVE",
        Rank::Six => "SIX",
        Rank::Seven => "SEVEN",
        Rank::Eight => "EIGHT",
        Rank::Nine => "NINE",
        Rank::Ten => "TEN",
        Rank::Jack => "JACK",
        Rank::Queen => "QUEEN",
        Rank::King => "KING",
        Rank::Ace => "ACE",
    }
}

fn rank_from_name(s: &str) -> Option<Rank> {
    Rank::ALL.into_iter().find(|r| rank_name(*r) == s)
}

// Rank serde
impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(rank_name(*self))
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        rank_from_name(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid rank: {s}")))
    }
}

// CardValue serde: a rank name, or "JOKER"
impl Serialize for CardValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CardValue::Rank(rank) => serializer.serialize_str(rank_name(*rank)),
            CardValue::Joker => serializer.serialize_str("JOKER"),
        }
    }
}

impl<'de> Deserialize<'de> for CardValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == "JOKER" {
            return Ok(CardValue::Joker);
        }
        rank_from_name(&s)
            .map(CardValue::Rank)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid card value: {s}")))
    }
}

// Card serde (compact 2-character format like "AS", "2C", "XR")
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
