//! Text output formatting with colors.

use balance_core::{Account, Credential};
use chrono::{DateTime, Duration, Local, Utc};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the balances list, grouped by bank in the order banks first
    /// appear.
    pub fn format_accounts(
        &self,
        accounts: Option<&[Account]>,
        last_refreshed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> String {
        let Some(accounts) = accounts else {
            return "No balances yet. Link a bank with `balance link`.".to_string();
        };

        let mut lines = Vec::new();
        if accounts.is_empty() {
            lines.push("No accounts returned.".to_string());
        }

        let width = accounts
            .iter()
            .filter(|a| !a.has_error)
            .map(|a| a.name.chars().count())
            .max()
            .unwrap_or(0);

        let mut banks: Vec<&str> = Vec::new();
        for account in accounts {
            if !banks.contains(&account.bank.name.as_str()) {
                banks.push(&account.bank.name);
            }
        }

        for (i, bank) in banks.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.push(self.bold(bank));

            for account in accounts.iter().filter(|a| a.bank.name == *bank) {
                if account.has_error {
                    lines.push(format!("  {}", self.red(&account.name)));
                    lines.push(format!("  {}", self.dim(&account.balance)));
                } else {
                    lines.push(format!(
                        "  {:<width$}  {}",
                        account.name, account.balance
                    ));
                }
            }
        }

        if let Some(at) = last_refreshed_at {
            lines.push(String::new());
            lines.push(self.dim(&format!("Last refreshed {}", format_age(at, now))));
        }

        lines.join("\n")
    }

    /// Formats the linked banks.
    pub fn format_credentials(&self, credentials: &[Credential]) -> String {
        if credentials.is_empty() {
            return "No banks linked.".to_string();
        }

        credentials
            .iter()
            .map(|c| {
                format!(
                    "{:<16} {}",
                    self.bold(&c.provider.display_name),
                    self.dim(&format!("{} ({})", c.credentials_id, c.provider.provider_id))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats the TrueLayer client state.
    pub fn format_truelayer(&self, client_id: Option<&str>) -> String {
        match client_id {
            Some(id) => format!("TrueLayer client: {}", self.green(id)),
            None => format!("TrueLayer client: {}", self.dim("not configured")),
        }
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

/// Describes how long ago `at` was, relative to `now`.
pub(crate) fn format_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - at;

    if diff < Duration::minutes(1) {
        "just now".to_string()
    } else if diff < Duration::hours(1) {
        let mins = diff.num_minutes();
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < Duration::hours(24) {
        let hours = diff.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        at.with_timezone(&Local)
            .format("on %d %b %Y at %H:%M")
            .to_string()
    }
}
