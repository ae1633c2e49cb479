//! Kitchen account system.
//!
//! Customer and staff accounts for the kitchen ordering system: sign-up with
//! email verification, password login, password reset, role-gated
//! administration, and the gateway the ordering side uses to mail receipts.
//!
//! [`AccountManager`] is the entry point. It owns an [`AccountStore`] and a
//! [`Mailer`]:
//!
//! ```rust
//! use kitchen_accounts::{AccountManager, AccountsConfig, Registration};
//!
//! let mut manager = AccountManager::in_memory(AccountsConfig::default());
//! manager
//!     .register(&Registration {
//!         first_name: Some("Greg"),
//!         last_name: Some("Gregton"),
//!         email: "greg.ton@example.com",
//!         home_address: Some("46 Greg Ave"),
//!         password: "Password1",
//!     })
//!     .unwrap();
//!
//! assert!(manager.login("greg.ton@example.com", "Password1").is_err());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod models;
pub mod password;
pub mod services;
pub mod store;
pub mod validation;

pub use config::{AccountsConfig, ConfigError};
pub use models::{Account, Order, Receipt};
pub use services::{
    AccountManager, Delivery, EmailGateway, LogMailer, LoginError, MailError, Mailer,
    MemoryMailer, OrderManager, OutgoingEmail, PasswordResetError, ReceiptManager, Registration,
    RegistrationError, SaleRecord, SavedSale, StoreEmailGateway,
};
pub use store::{AccountStore, InMemoryAccountStore};
