//! Card parsing from and formatting to the compact text form (e.g., "AS", "7H", "TD")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

pub(crate) const fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
    }
}

pub(crate) const fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'C',
        Suit::Diamonds => 'D',
        Suit::Hearts => 'H',
        Suit::Spades => 'S',
    }
}

fn parse_rank(token: &str) -> Option<Rank> {
    let rank = match token {
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "T" | "10" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        "A" => Rank::Ace,
        _ => return None,
    };
    Some(rank)
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" | "♣" => Ok(Suit::Clubs),
            "D" | "♦" => Ok(Suit::Diamonds),
            "H" | "♥" => Ok(Suit::Hearts),
            "S" | "♠" => Ok(Suit::Spades),
            _ => Err(DomainError::parse(format!("Invalid suit: {s}"))),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    /// Accepts rank then suit: "AS", "TD", and "10D" for tens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::parse(format!("Parse card: {s}"));

        let suit_ch = s.chars().last().ok_or_else(invalid)?;
        let rank_part = &s[..s.len() - suit_ch.len_utf8()];
        if rank_part.is_empty() {
            return Err(invalid());
        }

        let rank = parse_rank(rank_part).ok_or_else(invalid)?;
        let suit = suit_ch
            .to_string()
            .parse::<Suit>()
            .map_err(|_| invalid())?;
        Ok(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_char(self.rank), suit_char(self.suit))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Non-panicking helper to parse card tokens (e.g., "AS", "7H") into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
