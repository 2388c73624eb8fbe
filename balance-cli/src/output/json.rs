//! JSON output formatting.

use anyhow::Result;
use balance_core::Account;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for the balances list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsOutput<'a> {
    /// `null` until the first refresh.
    pub accounts: Option<&'a [Account]>,
    #[serde(serialize_with = "serialize_datetime_opt")]
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// JSON output for the TrueLayer client state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueLayerOutput<'a> {
    pub configured: bool,
    pub client_id: Option<&'a str>,
}

fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the balances list.
    pub fn format_accounts(
        &self,
        accounts: Option<&[Account]>,
        last_refreshed_at: Option<DateTime<Utc>>,
    ) -> Result<String> {
        self.format(&AccountsOutput {
            accounts,
            last_refreshed_at,
        })
    }

    /// Formats the TrueLayer client state.
    pub fn format_truelayer(&self, client_id: Option<&str>) -> Result<String> {
        self.format(&TrueLayerOutput {
            configured: client_id.is_some(),
            client_id,
        })
    }
}
