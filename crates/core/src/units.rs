//! Unit-tagged amounts: money, distance, weight.
//!
//! Each is a plain `(amount, unit)` pair. In a document they render as a node
//! holding a `Value` leaf plus a unit leaf (`Unit`, or `Currency` for money).

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_object::ValueObject;

/// A unit string that matched no known unit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized {kind}: `{value}`")]
pub struct ParseUnitError {
    kind: &'static str,
    value: String,
}

impl ParseUnitError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// An amount paired with the unit it is measured in.
pub trait UnitPair: ValueObject {
    /// Amount as it appears in the `Value` leaf.
    fn amount_text(&self) -> String;

    /// Tag of the leaf carrying the unit.
    fn unit_tag(&self) -> &'static str {
        "Unit"
    }

    /// Unit as it appears in the unit leaf.
    fn unit_text(&self) -> &str;
}

/// ISO 4217 currency code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(ParseUnitError::new("currency", s))
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = ParseUnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monetary amount. Renders with exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}

impl ValueObject for Money {}

impl UnitPair for Money {
    fn amount_text(&self) -> String {
        let mut rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded.to_string()
    }

    fn unit_tag(&self) -> &'static str {
        "Currency"
    }

    fn unit_text(&self) -> &str {
        self.currency.as_str()
    }
}

/// Length units accepted by the catalog schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Inches,
    Feet,
    Meters,
    Decimeters,
    Centimeters,
    Millimeters,
    Micrometers,
    Nanometers,
    Picometers,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Inches => "inches",
            DistanceUnit::Feet => "feet",
            DistanceUnit::Meters => "meters",
            DistanceUnit::Decimeters => "decimeters",
            DistanceUnit::Centimeters => "centimeters",
            DistanceUnit::Millimeters => "millimeters",
            DistanceUnit::Micrometers => "micrometers",
            DistanceUnit::Nanometers => "nanometers",
            DistanceUnit::Picometers => "picometers",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(DistanceUnit::Inches),
            "ft" | "foot" | "feet" => Ok(DistanceUnit::Feet),
            "m" | "meter" | "meters" => Ok(DistanceUnit::Meters),
            "dm" | "decimeter" | "decimeters" => Ok(DistanceUnit::Decimeters),
            "cm" | "centimeter" | "centimeters" => Ok(DistanceUnit::Centimeters),
            "mm" | "millimeter" | "millimeters" => Ok(DistanceUnit::Millimeters),
            "um" | "micrometer" | "micrometers" => Ok(DistanceUnit::Micrometers),
            "nm" | "nanometer" | "nanometers" => Ok(DistanceUnit::Nanometers),
            "pm" | "picometer" | "picometers" => Ok(DistanceUnit::Picometers),
            _ => Err(ParseUnitError::new("distance unit", s)),
        }
    }
}

/// Mass units accepted by the catalog schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Grams,
    Kilograms,
    Ounces,
    #[default]
    Pounds,
    Milligrams,
}

impl WeightUnit {
    /// Vendor code for the unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Grams => "GR",
            WeightUnit::Kilograms => "KG",
            WeightUnit::Ounces => "OZ",
            WeightUnit::Pounds => "LB",
            WeightUnit::Milligrams => "MG",
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gr" | "g" | "gram" | "grams" => Ok(WeightUnit::Grams),
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilograms),
            "oz" | "ounce" | "ounces" => Ok(WeightUnit::Ounces),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Pounds),
            "mg" | "milligram" | "milligrams" => Ok(WeightUnit::Milligrams),
            _ => Err(ParseUnitError::new("weight unit", s)),
        }
    }
}

/// A length. Amounts render without trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    amount: Decimal,
    unit: DistanceUnit,
}

impl Distance {
    pub fn new(amount: Decimal, unit: DistanceUnit) -> Self {
        Self { amount, unit }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }
}

impl ValueObject for Distance {}

impl UnitPair for Distance {
    fn amount_text(&self) -> String {
        self.amount.normalize().to_string()
    }

    fn unit_text(&self) -> &str {
        self.unit.as_str()
    }
}

/// A mass. Amounts render without trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    amount: Decimal,
    unit: WeightUnit,
}

impl Weight {
    pub fn new(amount: Decimal, unit: WeightUnit) -> Self {
        Self { amount, unit }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn unit(&self) -> WeightUnit {
        self.unit
    }
}

impl ValueObject for Weight {}

impl UnitPair for Weight {
    fn amount_text(&self) -> String {
        self.amount.normalize().to_string()
    }

    fn unit_text(&self) -> &str {
        self.unit.as_str()
    }
}
