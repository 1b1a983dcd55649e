//! Role and status enums for users and orders.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated user.
///
/// The backend returns this as part of the user record; the admin panel is
/// gated on [`UserRole::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access to the back-office.
    Admin,
    /// Regular shopper.
    #[default]
    Customer,
}

impl UserRole {
    /// Whether this role grants back-office access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Order lifecycle status.
///
/// Orders move forward through these states in the back-office; `Cancelled`
/// is terminal and reachable from any non-delivered state. Wire values
/// follow the backend's Spanish schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "preparando")]
    Preparing,
    #[serde(rename = "entregado")]
    Delivered,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl OrderStatus {
    /// The next status in the fulfillment flow, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Preparing => "En preparación",
            Self::Delivered => "Entregado",
            Self::Cancelled => "Cancelado",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pendiente"),
            Self::Preparing => write!(f, "preparando"),
            Self::Delivered => write!(f, "entregado"),
            Self::Cancelled => write!(f, "cancelado"),
        }
    }
}
