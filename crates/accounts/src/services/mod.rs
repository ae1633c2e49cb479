//! Business logic services.
//!
//! # Services
//!
//! - `accounts` - Registration, activation, login and administration
//! - `mail` - Account email composition and delivery
//! - `gateway` - Receipt delivery and sale recording for the ordering side
//! - `orders` - Order and receipt books

pub mod accounts;
pub mod gateway;
pub mod mail;
pub mod orders;

pub use accounts::{AccountManager, LoginError, PasswordResetError, Registration, RegistrationError};
pub use gateway::{EmailGateway, SaleRecord, SavedSale, StoreEmailGateway};
pub use mail::{Delivery, LogMailer, MailError, Mailer, MemoryMailer, OutgoingEmail};
pub use orders::{OrderManager, ReceiptManager};
