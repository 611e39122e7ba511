//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two amounts with the same number and unit
/// are the same amount. They are immutable once built; "changing" one means
/// constructing a new one.
///
/// ```ignore
/// let a = Weight::new(Decimal::from(2), WeightUnit::Kilograms);
/// let b = Weight::new(Decimal::from(2), WeightUnit::Kilograms);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
