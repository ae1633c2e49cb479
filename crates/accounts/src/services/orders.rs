//! Order and receipt books.
//!
//! Append-only records kept alongside the account system. Ids are assigned
//! sequentially from 1 as records are added.

use tracing::debug;

use kitchen_core::{OrderId, ReceiptId};

use crate::models::{Order, Receipt};

/// Orders taken by the kitchen.
#[derive(Debug, Clone, Default)]
pub struct OrderManager {
    orders: Vec<Order>,
    last_id: Option<OrderId>,
}

impl OrderManager {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            orders: Vec::new(),
            last_id: None,
        }
    }

    /// Record `order`, assigning it the next id.
    pub fn add_order(&mut self, mut order: Order) -> OrderId {
        let id = self.last_id.map_or(OrderId::new(1), OrderId::next);
        self.last_id = Some(id);
        order.id = Some(id);

        debug!(order_id = %id, customer = %order.customer, "Order added");
        self.orders.push(order);
        id
    }

    #[must_use]
    pub fn get_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == Some(id))
    }

    /// Every order placed by `customer_email`, oldest first.
    #[must_use]
    pub fn view_all_orders(&self, customer_email: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.customer == customer_email)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Receipts issued by the kitchen.
#[derive(Debug, Clone, Default)]
pub struct ReceiptManager {
    receipts: Vec<Receipt>,
    last_id: Option<ReceiptId>,
}

impl ReceiptManager {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            receipts: Vec::new(),
            last_id: None,
        }
    }

    /// Record `receipt`, assigning it the next id.
    pub fn add_receipt(&mut self, mut receipt: Receipt) -> ReceiptId {
        let id = self.last_id.map_or(ReceiptId::new(1), ReceiptId::next);
        self.last_id = Some(id);
        receipt.id = Some(id);

        debug!(receipt_id = %id, received_by = %receipt.received_by(), "Receipt added");
        self.receipts.push(receipt);
        id
    }

    #[must_use]
    pub fn get_receipt_information(&self, id: ReceiptId) -> Option<&Receipt> {
        self.receipts.iter().find(|receipt| receipt.id == Some(id))
    }

    /// Every receipt for orders received by `staff_email`, oldest first.
    #[must_use]
    pub fn get_all_receipts(&self, staff_email: &str) -> Vec<&Receipt> {
        self.receipts
            .iter()
            .filter(|receipt| *receipt.received_by() == staff_email)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }
}
