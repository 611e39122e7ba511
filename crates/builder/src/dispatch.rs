//! Name-based dispatch over a [`FieldTarget`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use feedforge_core::{FeedError, FeedResult, Scalar, Value};

use crate::args::Args;
use crate::target::FieldTarget;

/// What happens to a call that names neither a declared field nor anything
/// dynamic storage could hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Ignore the call (logged at `debug`).
    #[default]
    Lenient,
    /// Fail with [`FeedError::UnknownField`].
    Strict,
}

/// A nested configuration block.
pub type Block<'b> = &'b mut dyn FnMut(&mut DynamicBuilder<'_>) -> FeedResult<()>;

/// Transient dispatch context bound to one target for the duration of a block.
///
/// Resolution order for `dispatch(name, args, block)`:
///
/// 1. `name` is a declared field of the target: without a block the field is
///    assigned from `args`; with a block the builder descends into the field's
///    nested target. A block the field cannot take falls through to step 2.
/// 2. The target exposes dynamic storage: a block creates (or reuses) a nested
///    tree at `name` and recurses into it; otherwise the first argument is
///    stored at `name`; with neither, nothing happens.
/// 3. Otherwise the call is ignored or rejected, per [`DispatchMode`].
pub struct DynamicBuilder<'a> {
    target: &'a mut dyn FieldTarget,
    mode: DispatchMode,
}

impl<'a> DynamicBuilder<'a> {
    pub fn new(target: &'a mut dyn FieldTarget) -> Self {
        Self::with_mode(target, DispatchMode::Lenient)
    }

    pub fn strict(target: &'a mut dyn FieldTarget) -> Self {
        Self::with_mode(target, DispatchMode::Strict)
    }

    pub fn with_mode(target: &'a mut dyn FieldTarget, mode: DispatchMode) -> Self {
        Self { target, mode }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Route one call. See the type-level docs for the resolution order.
    pub fn dispatch(
        &mut self,
        name: &str,
        args: Vec<Value>,
        block: Option<Block<'_>>,
    ) -> FeedResult<()> {
        if self.target.supports_field(name) {
            match block {
                None => {
                    trace!(field = name, "assigning declared field");
                    return self.target.set_field(name, Args::new(name, args));
                }
                Some(block) => {
                    let mode = self.mode;
                    if let Some(nested) = self.target.field_target(name) {
                        trace!(field = name, "entering declared field block");
                        return block(&mut DynamicBuilder::with_mode(nested, mode));
                    }
                    return self.dispatch_dynamic(name, args, Some(block));
                }
            }
        }
        self.dispatch_dynamic(name, args, block)
    }

    /// `name value`: assign one value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> FeedResult<()> {
        self.dispatch(name, vec![value.into()], None)
    }

    /// `name arg1, arg2, ...`, for special constructors such as
    /// `msrp(amount, currency)`.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> FeedResult<()> {
        self.dispatch(name, args, None)
    }

    /// `name { ... }`: configure a nested node.
    pub fn node<F>(&mut self, name: &str, mut block: F) -> FeedResult<()>
    where
        F: FnMut(&mut DynamicBuilder<'_>) -> FeedResult<()>,
    {
        let block: Block<'_> = &mut block;
        self.dispatch(name, Vec::new(), Some(block))
    }

    /// Store a distance built from `(amount[, unit])` at `name`. The unit
    /// defaults to inches; a prebuilt distance is accepted as is.
    pub fn distance(&mut self, name: &str, args: Vec<Value>) -> FeedResult<()> {
        let mut args = Args::new(name, args);
        let distance = args.distance()?;
        args.finish()?;
        self.set(name, distance)
    }

    /// Store a weight built from `(amount[, unit])` at `name`. The unit
    /// defaults to pounds.
    pub fn weight(&mut self, name: &str, args: Vec<Value>) -> FeedResult<()> {
        let mut args = Args::new(name, args);
        let weight = args.weight()?;
        args.finish()?;
        self.set(name, weight)
    }

    /// Store money built from `(amount, currency)` at `name`.
    pub fn money(&mut self, name: &str, args: Vec<Value>) -> FeedResult<()> {
        let mut args = Args::new(name, args);
        let money = args.money()?;
        args.finish()?;
        self.set(name, money)
    }

    /// Repeatable call: declared fields are assigned as usual (list fields
    /// append); in dynamic storage the value is appended to a list at `name`
    /// instead of replacing it.
    pub fn append(&mut self, name: &str, item: impl Into<Scalar>) -> FeedResult<()> {
        let item = item.into();
        if self.target.supports_field(name) {
            return self.dispatch(name, vec![Value::Scalar(item)], None);
        }
        let mode = self.mode;
        match self.target.dynamic_tree() {
            Some(tree) => {
                tree.push(name, item);
                Ok(())
            }
            None => unrecognized(mode, name),
        }
    }

    fn dispatch_dynamic(
        &mut self,
        name: &str,
        args: Vec<Value>,
        block: Option<Block<'_>>,
    ) -> FeedResult<()> {
        let mode = self.mode;
        let Some(tree) = self.target.dynamic_tree() else {
            return unrecognized(mode, name);
        };
        match block {
            Some(block) => {
                let child = tree.get_or_create_child(name);
                block(&mut DynamicBuilder::with_mode(child, mode))
            }
            None => {
                match args.into_iter().next() {
                    Some(value) => tree.set(name, value),
                    None => debug!(field = name, "dynamic call without value or block; nothing set"),
                }
                Ok(())
            }
        }
    }
}

fn unrecognized(mode: DispatchMode, name: &str) -> FeedResult<()> {
    match mode {
        DispatchMode::Lenient => {
            debug!(field = name, "ignoring unrecognized builder call");
            Ok(())
        }
        DispatchMode::Strict => Err(FeedError::unknown_field(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed_args;
    use feedforge_core::{AttributeTree, Distance, DistanceUnit, Money, Scalar, Weight, WeightUnit};
    use rust_decimal::Decimal;

    /// Fixed-schema target with one plain field, one money field, one nested
    /// fixed target, and optional dynamic storage.
    #[derive(Debug, Default)]
    struct Listing {
        title: Option<String>,
        price: Option<Money>,
        size: Option<Size>,
        extra: Option<AttributeTree>,
        open: bool,
    }

    #[derive(Debug, Default)]
    struct Size {
        length: Option<Distance>,
    }

    impl FieldTarget for Size {
        fn supports_field(&self, name: &str) -> bool {
            name == "length"
        }

        fn set_field(&mut self, name: &str, mut args: Args<'_>) -> FeedResult<()> {
            match name {
                "length" => self.length = Some(args.distance()?),
                _ => return Err(FeedError::unknown_field(name)),
            }
            args.finish()
        }
    }

    impl FieldTarget for Listing {
        fn supports_field(&self, name: &str) -> bool {
            matches!(name, "title" | "price" | "size")
        }

        fn set_field(&mut self, name: &str, mut args: Args<'_>) -> FeedResult<()> {
            match name {
                "title" => self.title = Some(args.text()?),
                "price" => self.price = Some(args.money()?),
                "size" => self.size = Some(Size::default()),
                _ => return Err(FeedError::unknown_field(name)),
            }
            args.finish()
        }

        fn field_target(&mut self, name: &str) -> Option<&mut dyn FieldTarget> {
            match name {
                "size" => Some(self.size.insert(Size::default()) as &mut dyn FieldTarget),
                _ => None,
            }
        }

        fn dynamic_tree(&mut self) -> Option<&mut AttributeTree> {
            if self.open {
                Some(self.extra.get_or_insert_with(AttributeTree::new))
            } else {
                None
            }
        }
    }

    #[test]
    fn declared_field_is_assigned() {
        let mut listing = Listing::default();
        DynamicBuilder::new(&mut listing).set("title", "Lamp").unwrap();
        assert_eq!(listing.title.as_deref(), Some("Lamp"));
    }

    #[test]
    fn special_constructor_takes_two_arguments() {
        let mut listing = Listing::default();
        DynamicBuilder::new(&mut listing)
            .call("price", feed_args!["12.5", "eur"])
            .unwrap();
        let price = listing.price.unwrap();
        assert_eq!(price.currency().as_str(), "EUR");
    }

    #[test]
    fn block_descends_into_declared_nested_target() {
        let mut listing = Listing::default();
        DynamicBuilder::new(&mut listing)
            .node("size", |b| b.call("length", feed_args![3, "cm"]))
            .unwrap();
        let length = listing.size.unwrap().length.unwrap();
        assert_eq!(length.unit(), feedforge_core::DistanceUnit::Centimeters);
    }

    #[test]
    fn declared_fields_take_precedence_over_dynamic_storage() {
        let mut listing = Listing {
            open: true,
            ..Listing::default()
        };
        DynamicBuilder::new(&mut listing).set("title", "Lamp").unwrap();
        assert_eq!(listing.title.as_deref(), Some("Lamp"));
        assert!(listing.extra.as_ref().is_none_or(|tree| !tree.contains_key("title")));
    }

    #[test]
    fn block_on_field_without_nested_target_falls_through_to_dynamic() {
        let mut listing = Listing {
            open: true,
            ..Listing::default()
        };
        DynamicBuilder::new(&mut listing)
            .node("title", |b| b.set("lang", "en"))
            .unwrap();
        assert!(listing.title.is_none());
        let extra = listing.extra.unwrap();
        let title = extra.get("title").and_then(Value::as_tree).unwrap();
        assert_eq!(title.get("lang"), Some(&Value::from("en")));
    }

    #[test]
    fn unknown_name_is_ignored_in_lenient_mode() {
        let mut listing = Listing::default();
        DynamicBuilder::new(&mut listing).set("colour", "red").unwrap();
        assert!(listing.title.is_none());
        assert!(listing.extra.is_none());
    }

    #[test]
    fn unknown_name_is_rejected_in_strict_mode() {
        let mut listing = Listing::default();
        let err = DynamicBuilder::strict(&mut listing)
            .set("colour", "red")
            .unwrap_err();
        assert_eq!(err, FeedError::unknown_field("colour"));
    }

    #[test]
    fn strict_mode_propagates_into_nested_blocks() {
        let mut listing = Listing::default();
        let err = DynamicBuilder::strict(&mut listing)
            .node("size", |b| b.set("depth", 4))
            .unwrap_err();
        assert_eq!(err, FeedError::unknown_field("depth"));
    }

    #[test]
    fn nested_node_and_sibling_scalar_coexist() {
        let mut tree = AttributeTree::new();
        let mut b = DynamicBuilder::new(&mut tree);
        b.node("a", |b| b.set("x", 1)).unwrap();
        b.set("b", 2).unwrap();

        let keys: Vec<_> = tree.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        let a = tree.get("a").and_then(Value::as_tree).unwrap();
        assert_eq!(a.get("x"), Some(&Value::from(1)));
        assert_eq!(tree.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn nesting_depth_is_unbounded() {
        let mut tree = AttributeTree::new();
        DynamicBuilder::new(&mut tree)
            .node("l1", |b| b.node("l2", |b| b.node("l3", |b| b.set("leaf", true))))
            .unwrap();

        let leaf = tree
            .get("l1")
            .and_then(Value::as_tree)
            .and_then(|t| t.get("l2"))
            .and_then(Value::as_tree)
            .and_then(|t| t.get("l3"))
            .and_then(Value::as_tree)
            .and_then(|t| t.get("leaf"));
        assert_eq!(leaf, Some(&Value::from(true)));
    }

    #[test]
    fn dynamic_call_without_value_or_block_is_a_no_op() {
        let mut tree = AttributeTree::new();
        DynamicBuilder::strict(&mut tree)
            .call("nothing", Vec::new())
            .unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn dynamic_call_stores_first_argument_only() {
        let mut tree = AttributeTree::new();
        DynamicBuilder::new(&mut tree)
            .call("voltage", feed_args![220, "ignored"])
            .unwrap();
        assert_eq!(tree.get("voltage"), Some(&Value::from(220)));
    }

    #[test]
    fn append_builds_list_in_dynamic_storage() {
        let mut tree = AttributeTree::new();
        let mut b = DynamicBuilder::new(&mut tree);
        b.append("used_for", "gift").unwrap();
        b.append("used_for", "travel").unwrap();

        assert_eq!(
            tree.get("used_for"),
            Some(&Value::list(["gift", "travel"]))
        );
    }

    #[test]
    fn failing_block_propagates_error() {
        let mut tree = AttributeTree::new();
        let result = DynamicBuilder::new(&mut tree)
            .node("a", |_| Err(FeedError::validation("boom")));
        assert_eq!(result, Err(FeedError::validation("boom")));
    }

    #[test]
    fn unit_helpers_parse_into_dynamic_storage() {
        let mut tree = AttributeTree::new();
        let mut b = DynamicBuilder::new(&mut tree);
        b.distance("screen_size", feed_args![15, "cm"]).unwrap();
        b.distance("cable_length", feed_args!["2.5"]).unwrap();
        b.weight("item_weight", feed_args![3]).unwrap();
        b.money("list_price", feed_args!["19.99", "usd"]).unwrap();

        assert_eq!(
            tree.get("screen_size"),
            Some(&Value::from(Distance::new(Decimal::from(15), DistanceUnit::Centimeters)))
        );
        assert_eq!(
            tree.get("cable_length"),
            Some(&Value::from(Distance::new(Decimal::new(25, 1), DistanceUnit::Inches)))
        );
        assert_eq!(
            tree.get("item_weight"),
            Some(&Value::from(Weight::new(Decimal::from(3), WeightUnit::Pounds)))
        );
        let Some(Value::Scalar(Scalar::Money(price))) = tree.get("list_price") else {
            panic!("expected money at list_price");
        };
        assert_eq!(price.currency().as_str(), "USD");
    }

    #[test]
    fn unit_helpers_reject_bad_arguments() {
        let mut tree = AttributeTree::new();
        let mut b = DynamicBuilder::new(&mut tree);
        let err = b.weight("item_weight", feed_args![1, "stone"]).unwrap_err();
        assert!(matches!(err, FeedError::InvalidArgument { ref field, .. } if field == "item_weight"));
        let err = b.distance("depth", feed_args![1, "cm", "extra"]).unwrap_err();
        assert!(matches!(err, FeedError::InvalidArgument { .. }));
        assert!(tree.is_empty());
    }

    #[test]
    fn unit_helpers_feed_declared_fields() {
        let mut listing = Listing::default();
        DynamicBuilder::new(&mut listing)
            .money("price", feed_args![5, "gbp"])
            .unwrap();
        assert_eq!(listing.price.unwrap().currency().as_str(), "GBP");
    }
}
