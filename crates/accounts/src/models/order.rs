//! Order and receipt domain types.
//!
//! Orders reference accounts by email only; they are records of a sale, not
//! owners of the accounts involved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kitchen_core::{Email, OrderId, Price, ReceiptId};

use super::account::Account;

/// A customer order taken by a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Assigned when the order is added to an [`OrderManager`](crate::OrderManager).
    pub id: Option<OrderId>,
    /// Customer who placed the order.
    pub customer: Email,
    /// Staff member who received the order.
    pub received_by: Email,
    /// When the order was placed.
    pub order_date: Option<DateTime<Utc>>,
    /// Payment method used (e.g. "visa").
    pub payment_method: Option<String>,
    /// Address the payment method is registered to.
    pub billing_address: Option<String>,
    pub shipping_cost: Option<Price>,
    pub tax_cost: Option<Price>,
    pub total_cost: Option<Price>,
}

impl Order {
    /// Start an order for `customer`, received by `staff`.
    #[must_use]
    pub fn new(customer: &Account, staff: &Account) -> Self {
        Self {
            id: None,
            customer: customer.email_address().clone(),
            received_by: staff.email_address().clone(),
            order_date: None,
            payment_method: None,
            billing_address: None,
            shipping_cost: None,
            tax_cost: None,
            total_cost: None,
        }
    }
}

/// A receipt issued for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Assigned when the receipt is added to a [`ReceiptManager`](crate::ReceiptManager).
    pub id: Option<ReceiptId>,
    /// The order this receipt is for.
    pub order: Order,
    /// Rendered receipt text, as mailed to the customer.
    pub content: String,
}

impl Receipt {
    /// Staff member who received the underlying order.
    #[must_use]
    pub const fn received_by(&self) -> &Email {
        &self.order.received_by
    }
}
