use serde::{Deserialize, Serialize};

/// An order line as order messages see it.
///
/// Order entities borrow line items for their whole lifetime; implement this
/// on your own order-line type to avoid copying.
pub trait LineItem {
    /// Merchant-side line identifier (`MerchantOrderItemID`).
    fn id(&self) -> &str;

    /// Marketplace line identifier (`AmazonOrderItemCode`).
    fn amazon_item_id(&self) -> &str;

    fn quantity(&self) -> u32;
}

/// Plain owned [`LineItem`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub amazon_item_id: String,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(id: impl Into<String>, amazon_item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            amazon_item_id: amazon_item_id.into(),
            quantity,
        }
    }
}

impl LineItem for OrderItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn amazon_item_id(&self) -> &str {
        &self.amazon_item_id
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl<T: LineItem + ?Sized> LineItem for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn amazon_item_id(&self) -> &str {
        (**self).amazon_item_id()
    }

    fn quantity(&self) -> u32 {
        (**self).quantity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_item_deserializes_from_json() {
        let item: OrderItem =
            serde_json::from_str(r#"{ "id": "L1", "amazon_item_id": "A1", "quantity": 3 }"#)
                .unwrap();
        assert_eq!(item, OrderItem::new("L1", "A1", 3));
        assert_eq!(item.quantity(), 3);
    }

    #[test]
    fn references_are_line_items() {
        let item = OrderItem::new("L1", "A1", 1);
        let borrowed: Vec<&OrderItem> = vec![&item];
        assert_eq!(borrowed[0].amazon_item_id(), "A1");
    }
}
