use serde::{Deserialize, Serialize};

use feedforge_core::FeedResult;
use feedforge_document::{Emitter, FeedContext, FeedEntity};

use crate::line_item::LineItem;

/// Whether the merchant accepted the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    Success,
    Failure,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Success => "Success",
            StatusCode::Failure => "Failure",
        }
    }
}

/// Acknowledges receipt (or rejection) of a marketplace order.
#[derive(Debug, Clone)]
pub struct OrderAcknowledgement<'a, I: LineItem> {
    amazon_order_id: String,
    merchant_order_id: Option<String>,
    status_code: StatusCode,
    items: &'a [I],
}

impl<'a, I: LineItem> OrderAcknowledgement<'a, I> {
    pub fn new(
        amazon_order_id: impl Into<String>,
        merchant_order_id: Option<String>,
        status_code: StatusCode,
        items: &'a [I],
    ) -> Self {
        Self {
            amazon_order_id: amazon_order_id.into(),
            merchant_order_id,
            status_code,
            items,
        }
    }

    pub fn amazon_order_id(&self) -> &str {
        &self.amazon_order_id
    }

    pub fn merchant_order_id(&self) -> Option<&str> {
        self.merchant_order_id.as_deref()
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn items(&self) -> &'a [I] {
        self.items
    }
}

impl<I: LineItem> FeedEntity for OrderAcknowledgement<'_, I> {
    fn root_name(&self) -> &'static str {
        "OrderAcknowledgement"
    }

    fn write_body(&self, e: &mut Emitter<'_>, _ctx: &FeedContext) -> FeedResult<()> {
        e.emit("AmazonOrderID", self.amazon_order_id.as_str())?;
        e.emit_opt("MerchantOrderID", self.merchant_order_id.as_deref())?;
        e.emit("StatusCode", self.status_code.as_str())?;
        for item in self.items {
            e.emit_scoped("Item", |e| {
                e.emit("AmazonOrderItemCode", item.amazon_item_id())?;
                e.emit("MerchantOrderItemID", item.id())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::OrderItem;

    #[test]
    fn acknowledgement_layout() {
        let items = [OrderItem::new("L1", "A1", 1), OrderItem::new("L2", "A2", 4)];
        let ack = OrderAcknowledgement::new("111-222", Some("M-9".into()), StatusCode::Success, &items);

        assert_eq!(
            ack.to_xml(&FeedContext::default()).unwrap(),
            "<OrderAcknowledgement><AmazonOrderID>111-222</AmazonOrderID>\
             <MerchantOrderID>M-9</MerchantOrderID><StatusCode>Success</StatusCode>\
             <Item><AmazonOrderItemCode>A1</AmazonOrderItemCode><MerchantOrderItemID>L1</MerchantOrderItemID></Item>\
             <Item><AmazonOrderItemCode>A2</AmazonOrderItemCode><MerchantOrderItemID>L2</MerchantOrderItemID></Item>\
             </OrderAcknowledgement>"
        );
    }

    #[test]
    fn failure_without_merchant_id_or_items() {
        let items: [OrderItem; 0] = [];
        let ack = OrderAcknowledgement::new("111-222", None, StatusCode::Failure, &items);
        assert_eq!(
            ack.to_xml(&FeedContext::default()).unwrap(),
            "<OrderAcknowledgement><AmazonOrderID>111-222</AmazonOrderID>\
             <StatusCode>Failure</StatusCode></OrderAcknowledgement>"
        );
    }

    #[test]
    fn items_are_borrowed_not_copied() {
        let items = vec![OrderItem::new("L1", "A1", 1)];
        let ack = OrderAcknowledgement::new("1", None, StatusCode::Success, &items);
        assert!(std::ptr::eq(ack.items().as_ptr(), items.as_ptr()));
    }
}
