//! Values stored in attribute trees and passed to builder calls.

use core::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::attribute_tree::AttributeTree;
use crate::units::{Distance, Money, UnitPair, Weight};

/// Textual form of dates in feed documents.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Bool(bool),
    Date(NaiveDate),
    Money(Money),
    Distance(Distance),
    Weight(Weight),
}

impl Scalar {
    /// True for money, distance and weight, which render as a nested node rather
    /// than a single text leaf.
    pub fn is_unit_pair(&self) -> bool {
        matches!(self, Scalar::Money(_) | Scalar::Distance(_) | Scalar::Weight(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Document rendering of the value.
    ///
    /// Unit pairs flatten to `"<amount> <unit>"`; document emission renders them
    /// as a node instead.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Text(text) => text.clone(),
            Scalar::Integer(n) => n.to_string(),
            Scalar::Decimal(d) => d.normalize().to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Date(date) => date.format(DATE_FORMAT).to_string(),
            Scalar::Money(m) => format!("{} {}", m.amount_text(), m.unit_text()),
            Scalar::Distance(d) => format!("{} {}", d.amount_text(), d.unit_text()),
            Scalar::Weight(w) => format!("{} {}", w.amount_text(), w.unit_text()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Anything that can sit at an attribute-tree key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Tree(AttributeTree),
}

impl Value {
    /// Build a list value from anything convertible to scalars.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&AttributeTree> {
        match self {
            Value::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

macro_rules! impl_scalar_from {
    ($($t:ty => |$v:ident| $e:expr),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from($v: $t) -> Self {
                    $e
                }
            }

            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_scalar_from! {
    String => |v| Scalar::Text(v),
    &str => |v| Scalar::Text(v.to_string()),
    &String => |v| Scalar::Text(v.clone()),
    i64 => |v| Scalar::Integer(v),
    i32 => |v| Scalar::Integer(i64::from(v)),
    u32 => |v| Scalar::Integer(i64::from(v)),
    Decimal => |v| Scalar::Decimal(v),
    bool => |v| Scalar::Bool(v),
    NaiveDate => |v| Scalar::Date(v),
    Money => |v| Scalar::Money(v),
    Distance => |v| Scalar::Distance(v),
    Weight => |v| Scalar::Weight(v),
}

impl From<&Scalar> for Scalar {
    fn from(value: &Scalar) -> Self {
        value.clone()
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(value: Vec<Scalar>) -> Self {
        Value::List(value)
    }
}

impl From<AttributeTree> for Value {
    fn from(value: AttributeTree) -> Self {
        Value::Tree(value)
    }
}
