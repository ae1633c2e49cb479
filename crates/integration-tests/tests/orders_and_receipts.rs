//! Integration tests for orders, receipts and the email gateway.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};

use kitchen_accounts::{EmailGateway, Order, OrderManager, ReceiptManager, SaleRecord, SavedSale};
use kitchen_core::{CurrencyCode, Price, Role};
use kitchen_integration_tests::TestContext;

fn context() -> TestContext {
    let mut ctx = TestContext::new();
    ctx.add_active("existing@gmail.com", "Password1", Role::Customer);
    ctx.add_active("staff@gmail.com", "StaffPass1", Role::KitchenStaff);
    ctx
}

fn order_for(ctx: &TestContext, customer: &str) -> Order {
    let staff = ctx.manager.get_account("staff@gmail.com").unwrap();
    let mut order = match ctx.manager.get_account(customer) {
        Some(account) => Order::new(account, staff),
        None => {
            let guest = kitchen_accounts::Account::new(customer.parse().unwrap());
            Order::new(&guest, staff)
        }
    };
    order.order_date = Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
    order.payment_method = Some("visa".to_owned());
    order.billing_address = Some("10 valid lane".to_owned());
    order.shipping_cost = Some(Price::from_cents(500, CurrencyCode::USD));
    order.tax_cost = Some(Price::from_cents(130, CurrencyCode::USD));
    order.total_cost = Some(Price::from_cents(2130, CurrencyCode::USD));
    order
}

#[test]
fn test_order_to_receipt_email() {
    let mut ctx = context();
    let mut orders = OrderManager::new();
    let mut receipts = ReceiptManager::new();

    let order_id = orders.add_order(order_for(&ctx, "existing@gmail.com"));
    let order = orders.get_order(order_id).unwrap().clone();

    let gateway = ctx.manager.email_gateway();
    let receipt = gateway.compose_receipt(order).unwrap();
    assert!(receipt.content.contains("Receipt for order #1"));
    assert!(receipt.content.contains("Total: $21.30"));
    assert!(receipt.content.contains("Payment method: visa"));
    assert!(!receipt.content.contains("Create an account"));

    assert!(gateway.send_receipt("existing@gmail.com", &receipt));
    let receipt_id = receipts.add_receipt(receipt);

    let email = ctx.last_email_to("existing@gmail.com");
    assert_eq!(email.subject, "Your receipt for order #1");
    assert_eq!(
        email.body,
        receipts.get_receipt_information(receipt_id).unwrap().content
    );
    assert_eq!(receipts.get_all_receipts("staff@gmail.com").len(), 1);
}

#[test]
fn test_guest_receipt_invites_signup() {
    let mut ctx = context();
    let order = order_for(&ctx, "walk.in@gmail.com");
    let gateway = ctx.manager.email_gateway();

    assert!(!gateway.account_exist("walk.in@gmail.com"));
    let receipt = gateway.compose_receipt(order).unwrap();

    assert!(receipt.content.contains("Receipt for order (pending)"));
    assert!(
        receipt
            .content
            .contains("http://localhost:3000/account/register?email=walk.in%40gmail.com")
    );
    assert!(gateway.send_receipt("walk.in@gmail.com", &receipt));
}

#[test]
fn test_gateway_records_sale() {
    let mut ctx = context();
    ctx.manager.change_personal_information(
        "existing@gmail.com",
        "John",
        "Doe",
        "existing@gmail.com",
        "10 valid drive",
    );
    let order = order_for(&ctx, "existing@gmail.com");

    let customer = ctx.manager.get_account("existing@gmail.com").unwrap().clone();
    let mut gateway = ctx.manager.email_gateway();

    assert!(gateway.get_customer_information("existing@gmail.com"));
    assert!(gateway.validate_shipping_address(customer.address.as_deref().unwrap()));
    assert!(gateway.validate_payment_address(order.billing_address.as_deref().unwrap()));

    // No payment method on file yet.
    assert!(!gateway.save_order(SaleRecord::PaymentDetails(&customer)));
    assert!(gateway.save_order(SaleRecord::Order(&order)));
    assert_eq!(gateway.saved_sales(), [SavedSale::Order(order)]);
}

#[test]
fn test_saved_sales_outlive_gateway() {
    let mut ctx = context();
    let first = order_for(&ctx, "existing@gmail.com");
    let second = order_for(&ctx, "walk.in@gmail.com");

    assert!(ctx.manager.email_gateway().save_order(SaleRecord::Order(&first)));
    assert_eq!(ctx.manager.saved_sales(), [SavedSale::Order(first.clone())]);

    let mut gateway = ctx.manager.email_gateway();
    assert_eq!(gateway.saved_sales().len(), 1);
    assert!(gateway.save_order(SaleRecord::Order(&second)));

    assert_eq!(
        ctx.manager.saved_sales(),
        [SavedSale::Order(first), SavedSale::Order(second)]
    );
}

#[test]
fn test_orders_by_customer() {
    let ctx = context();
    let mut orders = OrderManager::new();

    orders.add_order(order_for(&ctx, "existing@gmail.com"));
    orders.add_order(order_for(&ctx, "walk.in@gmail.com"));
    orders.add_order(order_for(&ctx, "existing@gmail.com"));

    let history = orders.view_all_orders("existing@gmail.com");
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|order| order.received_by == "staff@gmail.com"));
    assert!(orders.view_all_orders("staff@gmail.com").is_empty());
}

#[test]
fn test_blank_receipt_is_not_sent() {
    let mut ctx = context();
    let order = order_for(&ctx, "existing@gmail.com");
    let gateway = ctx.manager.email_gateway();
    let mut receipt = gateway.compose_receipt(order).unwrap();
    receipt.content = "\n  \n".to_owned();

    assert!(!gateway.validate_receipt_content(&receipt.content));
    assert!(!gateway.send_receipt("existing@gmail.com", &receipt));
    assert!(ctx.manager.mailer().is_empty());
}
