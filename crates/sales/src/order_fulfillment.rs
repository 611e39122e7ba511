use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use feedforge_builder::{Args, DispatchMode, DynamicBuilder, FieldTarget};
use feedforge_core::{FeedError, FeedResult};
use feedforge_document::{Emitter, FeedContext, FeedEntity};

use crate::line_item::LineItem;

const OPTION_FIELDS: &[&str] = &[
    "merchant_order_id",
    "merchant_fulfillment_id",
    "fulfillment_date",
    "carrier",
    "shipping_method",
    "tracking_number",
];

/// Optional shipment details of a fulfillment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentOptions {
    pub merchant_order_id: Option<String>,
    pub merchant_fulfillment_id: Option<String>,
    pub fulfillment_date: Option<NaiveDate>,
    pub carrier: Option<String>,
    pub shipping_method: Option<String>,
    pub tracking_number: Option<String>,
}

impl FulfillmentOptions {
    /// Options from a builder block (`carrier "UPS"`, `fulfillment_date "2024-01-02"`, ...).
    pub fn build<F>(mode: DispatchMode, block: F) -> FeedResult<Self>
    where
        F: FnOnce(&mut DynamicBuilder<'_>) -> FeedResult<()>,
    {
        let mut options = Self::default();
        block(&mut DynamicBuilder::with_mode(&mut options, mode))?;
        Ok(options)
    }
}

impl FieldTarget for FulfillmentOptions {
    fn supports_field(&self, name: &str) -> bool {
        OPTION_FIELDS.contains(&name)
    }

    fn set_field(&mut self, name: &str, mut args: Args<'_>) -> FeedResult<()> {
        match name {
            "merchant_order_id" => self.merchant_order_id = Some(args.text()?),
            "merchant_fulfillment_id" => self.merchant_fulfillment_id = Some(args.text()?),
            "fulfillment_date" => self.fulfillment_date = Some(args.date()?),
            "carrier" => self.carrier = Some(args.text()?),
            "shipping_method" => self.shipping_method = Some(args.text()?),
            "tracking_number" => self.tracking_number = Some(args.text()?),
            _ => return Err(FeedError::unknown_field(name)),
        }
        args.finish()
    }
}

/// Reports shipment of (part of) a marketplace order.
#[derive(Debug, Clone)]
pub struct OrderFulfillment<'a, I: LineItem> {
    amazon_order_id: String,
    options: FulfillmentOptions,
    items: &'a [I],
}

impl<'a, I: LineItem> OrderFulfillment<'a, I> {
    pub fn new(amazon_order_id: impl Into<String>, options: FulfillmentOptions, items: &'a [I]) -> Self {
        Self {
            amazon_order_id: amazon_order_id.into(),
            options,
            items,
        }
    }

    pub fn amazon_order_id(&self) -> &str {
        &self.amazon_order_id
    }

    pub fn options(&self) -> &FulfillmentOptions {
        &self.options
    }

    pub fn items(&self) -> &'a [I] {
        self.items
    }
}

impl<I: LineItem> FeedEntity for OrderFulfillment<'_, I> {
    fn root_name(&self) -> &'static str {
        "OrderFulfillment"
    }

    fn write_body(&self, e: &mut Emitter<'_>, _ctx: &FeedContext) -> FeedResult<()> {
        let options = &self.options;
        let fulfillment_id = options.merchant_fulfillment_id.as_deref();

        e.emit("AmazonOrderID", self.amazon_order_id.as_str())?;
        e.emit_opt("MerchantOrderID", options.merchant_order_id.as_deref())?;
        e.emit_opt("MerchantFulfillmentID", fulfillment_id)?;
        e.emit_opt("FulfillmentDate", options.fulfillment_date)?;
        e.emit_scoped("FulfillmentData", |e| {
            e.emit_opt("CarrierCode", options.carrier.as_deref())?;
            e.emit_opt("ShippingMethod", options.shipping_method.as_deref())?;
            e.emit_opt("ShipperTrackingNumber", options.tracking_number.as_deref())
        })?;
        for item in self.items {
            e.emit_scoped("Item", |e| {
                e.emit("AmazonOrderItemCode", item.amazon_item_id())?;
                e.emit("MerchantOrderItemID", item.id())?;
                e.emit_opt("MerchantFulfillmentItemID", fulfillment_id)?;
                e.emit("Quantity", item.quantity())
            })?;
        }
        Ok(())
    }
}
