//! Outgoing account email.
//!
//! Messages are rendered from Askama text templates and handed to a
//! [`Mailer`]. Actual delivery (SMTP or otherwise) is up to the `Mailer`
//! implementation; this crate ships one that logs and one that keeps an
//! in-memory outbox.

use std::cell::RefCell;

use askama::Template;
use chrono::{DateTime, Utc};
use kitchen_core::{ActivationCode, Email, ResetCode};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AccountsConfig;
use crate::models::{Order, Receipt};

/// Text template for the email verification message.
#[derive(Template)]
#[template(path = "email/verification.txt")]
struct VerificationEmailText<'a> {
    name: &'a str,
    link: &'a str,
    code: &'a str,
}

/// Text template for the password reset message.
#[derive(Template)]
#[template(path = "email/password_reset.txt")]
struct PasswordResetEmailText<'a> {
    name: &'a str,
    email: &'a str,
    link: &'a str,
    code: &'a str,
}

/// Text template for an order receipt.
#[derive(Template)]
#[template(path = "email/receipt.txt")]
struct ReceiptText<'a> {
    order_number: String,
    customer: &'a str,
    received_by: &'a str,
    lines: Vec<(&'static str, String)>,
    signup_link: Option<&'a str>,
}

/// Errors that can occur when composing or sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// No account exists for the intended recipient.
    #[error("no account for recipient: {0}")]
    UnknownRecipient(String),

    /// The recipient's account is already active; there is nothing to verify.
    #[error("account already activated: {0}")]
    AlreadyActivated(String),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// A link could not be built from the configured base URL.
    #[error("invalid link: {0}")]
    Link(#[from] url::ParseError),

    /// Message body failed content checks.
    #[error("message has no content")]
    EmptyContent,

    /// The mailer refused the message.
    #[error("delivery to {0} rejected")]
    Rejected(String),
}

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: Email,
    pub to: Email,
    pub subject: String,
    pub body: String,
}

/// Descriptor returned by a [`Mailer`] once it accepts a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Identifier assigned to the message.
    pub message_id: Uuid,
    /// Recipient address.
    pub to: Email,
    /// Message subject.
    pub subject: String,
    /// When the message was accepted.
    pub sent_at: DateTime<Utc>,
}

impl Delivery {
    /// Descriptor for a message accepted now.
    #[must_use]
    pub fn accepted(email: &OutgoingEmail) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            to: email.to.clone(),
            subject: email.subject.clone(),
            sent_at: Utc::now(),
        }
    }
}

/// Delivers rendered messages.
pub trait Mailer {
    /// Deliver a message.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Rejected` if the message cannot be delivered.
    fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError>;
}

impl<M: Mailer + ?Sized> Mailer for &M {
    fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError> {
        (**self).send(email)
    }
}

/// Mailer that writes messages to the log instead of sending them.
///
/// Useful for development where you don't want to send real emails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError> {
        let delivery = Delivery::accepted(email);
        info!(
            message_id = %delivery.message_id,
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "Email sent (log only)"
        );
        Ok(delivery)
    }
}

/// Mailer that keeps every accepted message in an in-memory outbox.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: RefCell<Vec<OutgoingEmail>>,
    reject_all: bool,
}

impl MemoryMailer {
    /// Create a mailer that accepts everything.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outbox: RefCell::new(Vec::new()),
            reject_all: false,
        }
    }

    /// Create a mailer that rejects every message.
    #[must_use]
    pub const fn rejecting() -> Self {
        Self {
            outbox: RefCell::new(Vec::new()),
            reject_all: true,
        }
    }

    /// The most recent message accepted for `to`.
    #[must_use]
    pub fn last_sent_to(&self, to: &str) -> Option<OutgoingEmail> {
        self.outbox
            .borrow()
            .iter()
            .rev()
            .find(|email| email.to == to)
            .cloned()
    }

    /// Number of accepted messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outbox.borrow().len()
    }

    /// Whether no message has been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outbox.borrow().is_empty()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError> {
        if self.reject_all {
            warn!(to = %email.to, subject = %email.subject, "Email rejected");
            return Err(MailError::Rejected(email.to.to_string()));
        }
        self.outbox.borrow_mut().push(email.clone());
        Ok(Delivery::accepted(email))
    }
}

/// Compose the activation email for `to`.
///
/// # Errors
///
/// Returns `MailError` if the link or template cannot be rendered.
pub fn verification_email(
    config: &AccountsConfig,
    to: &Email,
    name: Option<&str>,
    code: &ActivationCode,
) -> Result<OutgoingEmail, MailError> {
    let link = config.activation_link(code.as_str())?;
    let body = VerificationEmailText {
        name: name.unwrap_or("there"),
        link: link.as_str(),
        code: code.as_str(),
    }
    .render()?;

    Ok(OutgoingEmail {
        from: config.mail_from.clone(),
        to: to.clone(),
        subject: "Activate your account".to_owned(),
        body,
    })
}

/// Compose the password reset email for `to`.
///
/// # Errors
///
/// Returns `MailError` if the link or template cannot be rendered.
pub fn password_reset_email(
    config: &AccountsConfig,
    to: &Email,
    name: Option<&str>,
    code: &ResetCode,
) -> Result<OutgoingEmail, MailError> {
    let link = config.password_reset_link(code.as_str())?;
    let body = PasswordResetEmailText {
        name: name.unwrap_or("there"),
        email: to.as_str(),
        link: link.as_str(),
        code: code.as_str(),
    }
    .render()?;

    Ok(OutgoingEmail {
        from: config.mail_from.clone(),
        to: to.clone(),
        subject: "Reset your password".to_owned(),
        body,
    })
}

/// Render receipt text for `order`.
///
/// Guests get a link inviting them to create an account.
///
/// # Errors
///
/// Returns `MailError::Template` if rendering fails.
pub fn render_receipt_content(order: &Order, signup_link: Option<&str>) -> Result<String, MailError> {
    let order_number = order
        .id
        .map_or_else(|| "(pending)".to_owned(), |id| format!("#{id}"));

    let mut lines = Vec::new();
    if let Some(date) = order.order_date {
        lines.push(("Date", date.format("%Y-%m-%d %H:%M UTC").to_string()));
    }
    if let Some(method) = &order.payment_method {
        lines.push(("Payment method", method.clone()));
    }
    if let Some(address) = &order.billing_address {
        lines.push(("Billing address", address.clone()));
    }
    for (label, cost) in [
        ("Shipping", order.shipping_cost),
        ("Tax", order.tax_cost),
        ("Total", order.total_cost),
    ] {
        if let Some(cost) = cost {
            lines.push((label, cost.to_string()));
        }
    }

    let content = ReceiptText {
        order_number,
        customer: order.customer.as_str(),
        received_by: order.received_by.as_str(),
        lines,
        signup_link,
    }
    .render()?;

    Ok(content)
}

/// Compose the email carrying `receipt` to `to`.
///
/// # Errors
///
/// Returns `MailError::EmptyContent` if the receipt has no content.
pub fn receipt_email(
    config: &AccountsConfig,
    to: &Email,
    receipt: &Receipt,
) -> Result<OutgoingEmail, MailError> {
    if receipt.content.trim().is_empty() {
        return Err(MailError::EmptyContent);
    }

    let subject = receipt
        .order
        .id
        .map_or_else(|| "Your receipt".to_owned(), |id| format!("Your receipt for order #{id}"));

    Ok(OutgoingEmail {
        from: config.mail_from.clone(),
        to: to.clone(),
        subject,
        body: receipt.content.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kitchen_core::{CurrencyCode, OrderId, Price};

    use super::*;
    use crate::models::Account;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_verification_email_embeds_code_and_link() {
        let config = AccountsConfig::default();
        let message = verification_email(
            &config,
            &email("greg.ton@example.com"),
            Some("Greg"),
            &ActivationCode::new("Test123"),
        )
        .unwrap();

        assert_eq!(message.from, config.mail_from);
        assert!(message.body.starts_with("Hello Greg,"));
        assert!(message.body.contains("Test123"));
        assert!(
            message
                .body
                .contains("http://localhost:3000/account/activate?code=Test123")
        );
    }

    #[test]
    fn test_password_reset_email_embeds_link() {
        let config = AccountsConfig::default();
        let message = password_reset_email(
            &config,
            &email("test@gmail.com"),
            None,
            &ResetCode::new("r3set"),
        )
        .unwrap();

        assert!(message.body.starts_with("Hello there,"));
        assert!(message.body.contains("test@gmail.com"));
        assert!(message.body.contains("/account/reset-password?code=r3set"));
    }

    #[test]
    fn test_memory_mailer_records_outbox() {
        let mailer = MemoryMailer::new();
        let message = OutgoingEmail {
            from: email("no-reply@kitchen.local"),
            to: email("guest@gmail.com"),
            subject: "Hi".to_owned(),
            body: "Body".to_owned(),
        };

        let delivery = mailer.send(&message).unwrap();

        assert_eq!(delivery.to, message.to);
        assert_eq!(mailer.len(), 1);
        assert_eq!(mailer.last_sent_to("guest@gmail.com"), Some(message));
        assert!(mailer.last_sent_to("other@gmail.com").is_none());
    }

    #[test]
    fn test_rejecting_mailer() {
        let mailer = MemoryMailer::rejecting();
        let message = OutgoingEmail {
            from: email("no-reply@kitchen.local"),
            to: email("guest@gmail.com"),
            subject: "Hi".to_owned(),
            body: "Body".to_owned(),
        };

        assert!(matches!(mailer.send(&message), Err(MailError::Rejected(_))));
        assert!(mailer.is_empty());
    }

    #[test]
    fn test_receipt_content() {
        let customer = Account::new(email("guest@gmail.com"));
        let staff = Account::new(email("staff@gmail.com"));
        let mut order = Order::new(&customer, &staff);
        order.id = Some(OrderId::new(3));
        order.payment_method = Some("visa".to_owned());
        order.total_cost = Some(Price::from_cents(1250, CurrencyCode::USD));

        let with_link =
            render_receipt_content(&order, Some("http://localhost:3000/account/register")).unwrap();
        assert!(with_link.starts_with("Receipt for order #3"));
        assert!(with_link.contains("Customer: guest@gmail.com"));
        assert!(with_link.contains("Received by: staff@gmail.com"));
        assert!(with_link.contains("Payment method: visa"));
        assert!(with_link.contains("Total: $12.50"));
        assert!(with_link.contains("http://localhost:3000/account/register"));

        let without_link = render_receipt_content(&order, None).unwrap();
        assert!(!without_link.contains("Create an account"));
    }

    #[test]
    fn test_receipt_email_requires_content() {
        let customer = Account::new(email("guest@gmail.com"));
        let staff = Account::new(email("staff@gmail.com"));
        let receipt = Receipt {
            id: None,
            order: Order::new(&customer, &staff),
            content: "  ".to_owned(),
        };

        assert!(matches!(
            receipt_email(&AccountsConfig::default(), customer.email_address(), &receipt),
            Err(MailError::EmptyContent)
        ));
    }
}
