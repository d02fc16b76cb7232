// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative monetary amount (revenue, fee, opportunity value).
///
/// Construction coerces rather than rejects: negative and non-finite
/// amounts collapse to zero. Deserialization accepts a JSON number or a
/// numeric string (`"5,000"` / `"$5000"`); anything unparsable defaults
/// to zero so a damaged field never poisons a whole stored graph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Money {
    amount: f64,
}

impl Money {
    /// Creates a `Money` value, clamping negatives and non-finite input to zero.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            Self { amount }
        } else {
            Self { amount: 0.0 }
        }
    }

    /// The zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self { amount: 0.0 }
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Parses a textual amount, stripping a leading `$` and thousands
    /// separators. Unparsable input coerces to zero.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let cleaned: String = text.trim().trim_start_matches('$').replace(',', "");
        Self::new(cleaned.parse::<f64>().unwrap_or(0.0))
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), std::ops::Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.amount)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.amount)
    }
}

/// Accepted wire shapes for coercing fields.
#[derive(Deserialize)]
#[serde(untagged)]
enum CoercedRepr {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match CoercedRepr::deserialize(deserializer)? {
            CoercedRepr::Number(n) => Ok(Self::new(n)),
            CoercedRepr::Text(s) => Ok(Self::parse(&s)),
            CoercedRepr::Other(IgnoredAny) => Ok(Self::zero()),
        }
    }
}

/// A milestone completion percentage, clamped to 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Progress {
    percent: u8,
}

impl Progress {
    /// Creates a `Progress`, capping values above 100.
    #[must_use]
    pub const fn new(percent: u8) -> Self {
        Self {
            percent: if percent > 100 { 100 } else { percent },
        }
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.percent
    }
}

impl Serialize for Progress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.percent)
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: f64 = match CoercedRepr::deserialize(deserializer)? {
            CoercedRepr::Number(n) => n,
            CoercedRepr::Text(s) => s.trim().trim_end_matches('%').parse().unwrap_or(0.0),
            CoercedRepr::Other(IgnoredAny) => 0.0,
        };
        if raw.is_finite() && raw > 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Ok(Self::new(raw.min(100.0) as u8))
        } else {
            Ok(Self::new(0))
        }
    }
}
