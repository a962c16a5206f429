//! Domain Value Objects
//!
//! Immutable value types for the emissions domain.

use serde::{Deserialize, Serialize};

/// Sanitized activity amount (kWh, litres, km, flights, ...)
///
/// # Invariants
/// - Always finite and `>= 0`
///
/// Untrusted input is coerced rather than rejected: empty or non-numeric
/// text, negative numbers, `NaN`, infinities and non-numeric JSON (`null`,
/// booleans, arrays) all become zero. An unanswered field contributes no emissions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "Option<RawQuantity>", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    /// Coerce a number. Negative and non-finite values become zero.
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    /// Coerce free text from a form field.
    ///
    /// Leading and trailing whitespace is ignored. Anything that is not a
    /// complete decimal number is zero.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .map(Self::new)
            .unwrap_or(Self::ZERO)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Scale by a non-negative factor, keeping the invariant.
    ///
    /// A product too large for `f64` saturates at `f64::MAX` instead of
    /// collapsing to zero.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(saturate(self.0 * factor))
    }
}

/// Clamp an arithmetic result into the finite range.
///
/// Overflow becomes `±f64::MAX`, `NaN` becomes 0. Every computed amount
/// passes through here so no result serializes as JSON `null`.
#[inline]
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-f64::MAX, f64::MAX)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Quantity {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Quantity> for f64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Wire form accepted for a quantity field
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<Option<RawQuantity>> for Quantity {
    fn from(raw: Option<RawQuantity>) -> Self {
        match raw {
            Some(RawQuantity::Number(value)) => Self::new(value),
            Some(RawQuantity::Text(text)) => Self::parse(&text),
            Some(RawQuantity::Other(_)) | None => Self::ZERO,
        }
    }
}

/// Reporting period of a user-entered figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    Monthly,
    Quarterly,
    #[default]
    Annual,
}

impl Period {
    #[inline]
    pub const fn periods_per_year(&self) -> u32 {
        match self {
            Period::Monthly => 12,
            Period::Quarterly => 4,
            Period::Annual => 1,
        }
    }

    /// Convert a per-period quantity into a per-year quantity
    pub fn annualize(&self, quantity: Quantity) -> Quantity {
        quantity.scaled(f64::from(self.periods_per_year()))
    }
}
