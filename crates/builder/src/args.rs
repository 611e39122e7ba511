//! Typed extraction of positional builder arguments.

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use feedforge_core::value::DATE_FORMAT;
use feedforge_core::{
    AttributeTree, Currency, Distance, DistanceUnit, FeedError, FeedResult, Money, Scalar, Value,
    Weight, WeightUnit,
};

/// Positional arguments of one builder call, consumed front to back.
///
/// Every failure is reported as [`FeedError::InvalidArgument`] naming the field
/// the arguments were meant for.
#[derive(Debug, Clone, PartialEq)]
pub struct Args<'a> {
    field: &'a str,
    values: VecDeque<Value>,
}

impl<'a> Args<'a> {
    pub fn new(field: &'a str, values: Vec<Value>) -> Self {
        Self {
            field,
            values: values.into(),
        }
    }

    pub fn field(&self) -> &str {
        self.field
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn invalid(&self, reason: impl Into<String>) -> FeedError {
        FeedError::invalid_argument(self.field, reason)
    }

    /// Next argument, whatever its shape.
    pub fn value(&mut self) -> FeedResult<Value> {
        self.values
            .pop_front()
            .ok_or_else(|| self.invalid("missing argument"))
    }

    /// Next argument as a single scalar.
    pub fn scalar(&mut self) -> FeedResult<Scalar> {
        match self.value()? {
            Value::Scalar(scalar) => Ok(scalar),
            Value::List(_) => Err(self.invalid("expected a single value, got a list")),
            Value::Tree(_) => Err(self.invalid("expected a single value, got a nested tree")),
        }
    }

    /// Next argument rendered as text.
    pub fn text(&mut self) -> FeedResult<String> {
        Ok(self.scalar()?.to_text())
    }

    /// Next argument as text, or `None` when the arguments are exhausted.
    pub fn opt_text(&mut self) -> FeedResult<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.text().map(Some)
    }

    pub fn decimal(&mut self) -> FeedResult<Decimal> {
        match self.scalar()? {
            Scalar::Decimal(d) => Ok(d),
            Scalar::Integer(n) => Ok(Decimal::from(n)),
            Scalar::Text(text) => Decimal::from_str(text.trim())
                .map_err(|e| self.invalid(format!("`{text}` is not a number: {e}"))),
            other => Err(self.invalid(format!("expected a number, got `{other}`"))),
        }
    }

    pub fn date(&mut self) -> FeedResult<NaiveDate> {
        match self.scalar()? {
            Scalar::Date(date) => Ok(date),
            Scalar::Text(text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
                .map_err(|e| self.invalid(format!("`{text}` is not a YYYY-MM-DD date: {e}"))),
            other => Err(self.invalid(format!("expected a date, got `{other}`"))),
        }
    }

    /// Next argument as a nested tree.
    pub fn tree(&mut self) -> FeedResult<AttributeTree> {
        match self.value()? {
            Value::Tree(tree) => Ok(tree),
            _ => Err(self.invalid("expected a nested tree")),
        }
    }

    /// Next argument as a nested tree, or an empty tree when none was given.
    pub fn tree_or_empty(&mut self) -> FeedResult<AttributeTree> {
        if self.is_empty() {
            return Ok(AttributeTree::new());
        }
        self.tree()
    }

    /// `(amount, currency)`, or one prebuilt money value.
    pub fn money(&mut self) -> FeedResult<Money> {
        if let Some(money) = self.take_if(|scalar| match scalar {
            Scalar::Money(m) => Some(m.clone()),
            _ => None,
        }) {
            return Ok(money);
        }
        let amount = self.decimal()?;
        let currency = self.text()?;
        let currency = Currency::from_str(&currency).map_err(|e| self.invalid(e.to_string()))?;
        Ok(Money::new(amount, currency))
    }

    /// `(amount[, unit])`, or one prebuilt distance. The unit defaults to inches.
    pub fn distance(&mut self) -> FeedResult<Distance> {
        if let Some(distance) = self.take_if(|scalar| match scalar {
            Scalar::Distance(d) => Some(*d),
            _ => None,
        }) {
            return Ok(distance);
        }
        let amount = self.decimal()?;
        let unit = self.unit::<DistanceUnit>()?;
        Ok(Distance::new(amount, unit))
    }

    /// `(amount[, unit])`, or one prebuilt weight. The unit defaults to pounds.
    pub fn weight(&mut self) -> FeedResult<Weight> {
        if let Some(weight) = self.take_if(|scalar| match scalar {
            Scalar::Weight(w) => Some(*w),
            _ => None,
        }) {
            return Ok(weight);
        }
        let amount = self.decimal()?;
        let unit = self.unit::<WeightUnit>()?;
        Ok(Weight::new(amount, unit))
    }

    /// Fail if any argument is left unconsumed.
    pub fn finish(self) -> FeedResult<()> {
        match self.values.len() {
            0 => Ok(()),
            n => Err(self.invalid(format!("{n} unexpected extra argument(s)"))),
        }
    }

    fn unit<U>(&mut self) -> FeedResult<U>
    where
        U: FromStr + Default,
        U::Err: ToString,
    {
        match self.opt_text()? {
            None => Ok(U::default()),
            Some(text) => U::from_str(&text).map_err(|e| self.invalid(e.to_string())),
        }
    }

    fn take_if<T>(&mut self, pick: impl FnOnce(&Scalar) -> Option<T>) -> Option<T> {
        let picked = match self.values.front()? {
            Value::Scalar(scalar) => pick(scalar)?,
            _ => return None,
        };
        self.values.pop_front();
        Some(picked)
    }
}
