//! Role and status enums for accounts.

use serde::{Deserialize, Serialize};

/// Error returned when a role name is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// Account role with different permission levels.
///
/// Serialized in the application's `PascalCase` spelling (`KitchenStaff`),
/// which is also what [`Display`](std::fmt::Display) produces. Parsing
/// additionally accepts the `snake_case` spelling (`kitchen_staff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// A customer placing orders. No access to other accounts.
    #[default]
    Customer,
    /// Kitchen staff. Read access to all accounts.
    KitchenStaff,
    /// Kitchen manager. Read access to all accounts and may create
    /// management accounts.
    KitchenManager,
}

impl Role {
    /// Whether this role may see every account in the system.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::KitchenStaff | Self::KitchenManager)
    }

    /// Whether this role may create accounts through the administrative path.
    #[must_use]
    pub const fn can_create_accounts(self) -> bool {
        matches!(self, Self::KitchenManager)
    }

    /// Whether accounts of this role may be created through the
    /// administrative path. Customers register themselves.
    #[must_use]
    pub const fn is_assignable_by_admin(self) -> bool {
        self.is_privileged()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "Customer"),
            Self::KitchenStaff => write!(f, "KitchenStaff"),
            Self::KitchenManager => write!(f, "KitchenManager"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" | "customer" => Ok(Self::Customer),
            "KitchenStaff" | "kitchen_staff" => Ok(Self::KitchenStaff),
            "KitchenManager" | "kitchen_manager" => Ok(Self::KitchenManager),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

/// Lifecycle status of an account, derived from its flags.
///
/// A banned account reports `Banned` even while still locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Registered but not yet activated.
    Locked,
    /// Activated and allowed to sign in.
    Active,
    /// Administratively disabled.
    Banned,
}

impl AccountStatus {
    /// Derive the status from an account's lock and ban flags.
    #[must_use]
    pub const fn from_flags(is_locked: bool, is_banned: bool) -> Self {
        if is_banned {
            Self::Banned
        } else if is_locked {
            Self::Locked
        } else {
            Self::Active
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locked => write!(f, "locked"),
            Self::Active => write!(f, "active"),
            Self::Banned => write!(f, "banned"),
        }
    }
}
