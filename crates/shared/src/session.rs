use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Session envelope
// ============================================================================

/// Read-only session data supplied by the identity provider on each request.
///
/// Consumers derive display state from the envelope; they never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnvelope {
    pub user: SessionUser,
}

/// Identity fields combined with application role/tenant metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub company: Option<Company>,
}

/// Tenant company record, including its subscription sub-record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

/// Billing state for a company.
///
/// `trial_end` is absent for subscriptions that never had a trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub trial_end: Option<DateTime<Utc>>,
}

// ============================================================================
// Enumerations
// ============================================================================

/// Application role granted to a user within their company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Owner,
    Manager,
    Employee,
    Admin,
    Technician,
    Client,
    Solo,
    FieldWorker,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Owner => "OWNER",
            UserRole::Manager => "MANAGER",
            UserRole::Employee => "EMPLOYEE",
            UserRole::Admin => "ADMIN",
            UserRole::Technician => "TECHNICIAN",
            UserRole::Client => "CLIENT",
            UserRole::Solo => "SOLO",
            UserRole::FieldWorker => "FIELD_WORKER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(UserRole::Owner),
            "MANAGER" => Ok(UserRole::Manager),
            "EMPLOYEE" => Ok(UserRole::Employee),
            "ADMIN" => Ok(UserRole::Admin),
            "TECHNICIAN" => Ok(UserRole::Technician),
            "CLIENT" => Ok(UserRole::Client),
            "SOLO" => Ok(UserRole::Solo),
            "FIELD_WORKER" => Ok(UserRole::FieldWorker),
            other => Err(ParseEnumError::unknown("role", other)),
        }
    }
}

/// Subscription lifecycle state as reported by the billing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Canceled,
    Inactive,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trialing => "TRIALING",
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::PastDue => "PAST_DUE",
            SubscriptionStatus::Canceled => "CANCELED",
            SubscriptionStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRIALING" => Ok(SubscriptionStatus::Trialing),
            "ACTIVE" => Ok(SubscriptionStatus::Active),
            "PAST_DUE" => Ok(SubscriptionStatus::PastDue),
            "CANCELED" => Ok(SubscriptionStatus::Canceled),
            "INACTIVE" => Ok(SubscriptionStatus::Inactive),
            other => Err(ParseEnumError::unknown("subscription status", other)),
        }
    }
}

/// Failure to parse a closed enumeration from its wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn unknown(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
