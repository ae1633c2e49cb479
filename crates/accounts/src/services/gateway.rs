//! Email gateway.
//!
//! The seam between account storage and the ordering side of the kitchen:
//! receipt delivery, customer lookup, address checks and sale recording.

use tracing::{debug, info, warn};
use url::Url;

use kitchen_core::Email;

use crate::config::AccountsConfig;
use crate::models::{Account, Order, Receipt};
use crate::services::mail::{self, MailError, Mailer};
use crate::store::AccountStore;
use crate::validation;

/// Something that can be recorded as part of a sale.
#[derive(Debug, Clone, Copy)]
pub enum SaleRecord<'a> {
    /// A completed order.
    Order(&'a Order),
    /// A customer's payment details.
    PaymentDetails(&'a Account),
}

/// A sale recorded by [`StoreEmailGateway::save_order`].
///
/// Recorded sales land in a log owned by the caller, normally the
/// [`AccountManager`](crate::AccountManager), and outlive the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedSale {
    Order(Order),
    PaymentDetails {
        customer: Email,
        address: String,
        payment_method: String,
    },
}

/// Operations the ordering side needs from the account system.
pub trait EmailGateway {
    /// Mail `receipt` to `email`. Returns `false` if the address or the
    /// receipt content is invalid, or delivery fails.
    fn send_receipt(&self, email: &str, receipt: &Receipt) -> bool;

    /// Whether customer information is on file for `email`.
    fn get_customer_information(&self, email: &str) -> bool;

    /// Whether `address` is acceptable for shipping.
    fn validate_shipping_address(&self, address: &str) -> bool;

    /// Whether `address` is acceptable as a billing address.
    fn validate_payment_address(&self, address: &str) -> bool;

    /// Record part of a sale.
    fn save_order(&mut self, record: SaleRecord<'_>) -> bool;

    /// Whether an account is registered under `email`.
    fn account_exist(&self, email: &str) -> bool;

    /// Whether `content` is usable as a receipt body.
    fn validate_receipt_content(&self, content: &str) -> bool;
}

/// [`EmailGateway`] backed by an account store, a mailer and a sales log.
pub struct StoreEmailGateway<'a, S, M> {
    store: &'a S,
    mailer: &'a M,
    config: &'a AccountsConfig,
    saved: &'a mut Vec<SavedSale>,
}

impl<'a, S: AccountStore, M: Mailer> StoreEmailGateway<'a, S, M> {
    /// Create a gateway that appends saved sales to `saved`.
    #[must_use]
    pub const fn new(
        store: &'a S,
        mailer: &'a M,
        config: &'a AccountsConfig,
        saved: &'a mut Vec<SavedSale>,
    ) -> Self {
        Self {
            store,
            mailer,
            config,
            saved,
        }
    }

    /// Sales recorded so far, oldest first, including those saved through
    /// earlier gateways over the same log.
    #[must_use]
    pub fn saved_sales(&self) -> &[SavedSale] {
        self.saved
    }

    /// Whether `email` belongs to a guest: no account, or an account that
    /// never set a password.
    #[must_use]
    pub fn is_guest(&self, email: &Email) -> bool {
        self.store
            .find_by_email(email.as_str())
            .is_none_or(|account| !account.has_password())
    }

    /// Render a receipt for `order`.
    ///
    /// Guest customers get a link to create an account.
    ///
    /// # Errors
    ///
    /// Returns `MailError` if the signup link or the template fails.
    pub fn compose_receipt(&self, order: Order) -> Result<Receipt, MailError> {
        let signup_link = if self.is_guest(&order.customer) {
            Some(self.config.signup_link(&order.customer)?)
        } else {
            None
        };

        let content = mail::render_receipt_content(&order, signup_link.as_ref().map(Url::as_str))?;

        Ok(Receipt {
            id: None,
            order,
            content,
        })
    }
}

impl<S: AccountStore, M: Mailer> EmailGateway for StoreEmailGateway<'_, S, M> {
    fn send_receipt(&self, email: &str, receipt: &Receipt) -> bool {
        let Ok(to) = Email::parse(email) else {
            warn!(email = %email, "Receipt not sent: invalid email");
            return false;
        };
        if !self.validate_receipt_content(&receipt.content) {
            warn!(email = %email, "Receipt not sent: empty content");
            return false;
        }

        match mail::receipt_email(self.config, &to, receipt).and_then(|message| self.mailer.send(&message)) {
            Ok(delivery) => {
                info!(email = %delivery.to, message_id = %delivery.message_id, "Receipt sent");
                true
            }
            Err(e) => {
                warn!(email = %email, error = %e, "Receipt delivery failed");
                false
            }
        }
    }

    fn get_customer_information(&self, email: &str) -> bool {
        self.store.contains(email)
    }

    fn validate_shipping_address(&self, address: &str) -> bool {
        validation::verify_shipping_address(address)
    }

    fn validate_payment_address(&self, address: &str) -> bool {
        validation::verify_payment_address(address)
    }

    fn save_order(&mut self, record: SaleRecord<'_>) -> bool {
        match record {
            SaleRecord::Order(order) => {
                debug!(customer = %order.customer, "Order saved");
                self.saved.push(SavedSale::Order(order.clone()));
                true
            }
            SaleRecord::PaymentDetails(account) => {
                let (Some(address), Some(payment_method)) = (&account.address, &account.payment_method)
                else {
                    debug!(customer = %account.email_address(), "Payment details incomplete");
                    return false;
                };

                debug!(customer = %account.email_address(), "Payment details saved");
                self.saved.push(SavedSale::PaymentDetails {
                    customer: account.email_address().clone(),
                    address: address.clone(),
                    payment_method: payment_method.clone(),
                });
                true
            }
        }
    }

    fn account_exist(&self, email: &str) -> bool {
        self.store.contains(email)
    }

    fn validate_receipt_content(&self, content: &str) -> bool {
        !content.trim().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::mail::MemoryMailer;
    use crate::store::InMemoryAccountStore;

    fn account(email: &str) -> Account {
        Account::new(Email::parse(email).unwrap())
    }

    fn fixture() -> (InMemoryAccountStore, MemoryMailer, AccountsConfig) {
        let mut existing = account("existing@gmail.com").with_password("Password1").unwrap();
        existing.address = Some("10 valid lane".to_owned());
        existing.payment_method = Some("visa".to_owned());

        let store = [existing, account("staff@gmail.com")].into_iter().collect();
        (store, MemoryMailer::new(), AccountsConfig::default())
    }

    fn receipt(content: &str) -> Receipt {
        Receipt {
            id: None,
            order: Order::new(&account("existing@gmail.com"), &account("staff@gmail.com")),
            content: content.to_owned(),
        }
    }

    #[test]
    fn test_send_receipt() {
        let (store, mailer, config) = fixture();
        let mut sales = Vec::new();
        let gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);

        assert!(gateway.send_receipt("existing@gmail.com", &receipt("Order #1: Total $10.00")));
        assert!(!gateway.send_receipt("existing@gmail.com", &receipt("   ")));
        assert!(!gateway.send_receipt("not an email", &receipt("Order #1")));
        assert_eq!(mailer.len(), 1);
    }

    #[test]
    fn test_send_receipt_delivery_failure() {
        let (store, _, config) = fixture();
        let mailer = MemoryMailer::rejecting();
        let mut sales = Vec::new();
        let gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);

        assert!(!gateway.send_receipt("existing@gmail.com", &receipt("Order #1")));
    }

    #[test]
    fn test_customer_lookup() {
        let (store, mailer, config) = fixture();
        let mut sales = Vec::new();
        let gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);

        assert!(gateway.get_customer_information("existing@gmail.com"));
        assert!(!gateway.get_customer_information("fake@gmail.com"));
        assert!(gateway.account_exist("staff@gmail.com"));
        assert!(!gateway.account_exist("fake@gmail.com"));
    }

    #[test]
    fn test_address_validation() {
        let (store, mailer, config) = fixture();
        let mut sales = Vec::new();
        let gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);

        assert!(gateway.validate_shipping_address("10 valid drive"));
        assert!(!gateway.validate_shipping_address("10 not valid 10 drive"));
        assert!(gateway.validate_payment_address("10 valid lane"));
        assert!(!gateway.validate_payment_address("valid lane"));
    }

    #[test]
    fn test_save_order_and_payment_details() {
        let (store, mailer, config) = fixture();
        let mut sales = Vec::new();
        let order = Order::new(&account("existing@gmail.com"), &account("staff@gmail.com"));

        {
            let mut gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);
            assert!(gateway.save_order(SaleRecord::Order(&order)));
            assert!(gateway.save_order(SaleRecord::PaymentDetails(
                store.find_by_email("existing@gmail.com").unwrap()
            )));
            assert!(!gateway.save_order(SaleRecord::PaymentDetails(
                store.find_by_email("staff@gmail.com").unwrap()
            )));
            assert_eq!(gateway.saved_sales().len(), 2);
        }

        // Sales outlive the gateway that recorded them.
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0], SavedSale::Order(order.clone()));
        assert!(matches!(
            &sales[1],
            SavedSale::PaymentDetails { payment_method, .. } if payment_method == "visa"
        ));

        let mut gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);
        assert!(gateway.save_order(SaleRecord::Order(&order)));
        assert_eq!(gateway.saved_sales().len(), 3);
    }

    #[test]
    fn test_validate_receipt_content() {
        let (store, mailer, config) = fixture();
        let mut sales = Vec::new();
        let gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);

        assert!(gateway.validate_receipt_content("Total: $5.00"));
        assert!(!gateway.validate_receipt_content(""));
        assert!(!gateway.validate_receipt_content(" \n\t"));
    }

    #[test]
    fn test_compose_receipt_invites_guests() {
        let (store, mailer, config) = fixture();
        let mut sales = Vec::new();
        let gateway = StoreEmailGateway::new(&store, &mailer, &config, &mut sales);
        let staff = account("staff@gmail.com");

        let member = gateway
            .compose_receipt(Order::new(&account("existing@gmail.com"), &staff))
            .unwrap();
        assert!(!member.content.contains("account/register"));

        let guest = gateway
            .compose_receipt(Order::new(&account("walk.in@gmail.com"), &staff))
            .unwrap();
        assert!(guest.content.contains("account/register?email=walk.in%40gmail.com"));
        assert!(gateway.validate_receipt_content(&guest.content));
    }
}
