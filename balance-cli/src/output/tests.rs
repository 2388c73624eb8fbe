//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

use balance_core::{Account, Bank, Credential, ProviderInfo};
use chrono::{Duration, TimeZone, Utc};

fn bank(name: &str) -> Bank {
    Bank {
        name: name.to_string(),
        logo: format!("https://example.com/{name}.svg"),
    }
}

fn sample_accounts() -> Vec<Account> {
    vec![
        Account::new(bank("Monzo"), "Current", "£12.50"),
        Account::fetch_failed(&ProviderInfo::new("Barclaycard", "", "ob-barclaycard")),
        Account::balance_unavailable(bank("Monzo"), "Savings"),
    ]
}

mod text_formatter_tests {
    use super::*;
    use crate::output::TextFormatter;
    use crate::output::text::format_age;

    #[test]
    fn test_never_refreshed() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_accounts(None, None, Utc::now());
        assert!(output.contains("No balances yet"));
    }

    #[test]
    fn test_empty_accounts() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_accounts(Some(&[]), None, Utc::now());
        assert_eq!(output, "No accounts returned.");
    }

    #[test]
    fn test_accounts_grouped_by_bank() {
        let formatter = TextFormatter::new(false);
        let accounts = sample_accounts();

        let output = formatter.format_accounts(Some(&accounts), None, Utc::now());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Monzo");
        assert_eq!(lines[1], "  Current  £12.50");
        assert_eq!(lines[2], "  Savings  Unable to get balance");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Barclaycard");
        assert_eq!(lines[5], "  Unable to fetch accounts");
        assert!(lines[6].contains("Either try again, or reconnect"));
    }

    #[test]
    fn test_error_rows_are_red() {
        let formatter = TextFormatter::new(true);
        let accounts = sample_accounts();

        let output = formatter.format_accounts(Some(&accounts), None, Utc::now());
        assert!(output.contains("\x1b[31mUnable to fetch accounts\x1b[0m"));
    }

    #[test]
    fn test_no_colors_has_no_escapes() {
        let formatter = TextFormatter::new(false);
        let accounts = sample_accounts();
        let now = Utc::now();

        let output = formatter.format_accounts(Some(&accounts), Some(now), now);
        assert!(!output.contains('\x1b'));
        assert!(output.ends_with("Last refreshed just now"));
    }

    #[test]
    fn test_format_age() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert_eq!(format_age(now - Duration::seconds(30), now), "just now");
        assert_eq!(format_age(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_age(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(format_age(now - Duration::hours(3), now), "3 hours ago");
        assert!(format_age(now - Duration::days(3), now).starts_with("on "));
    }

    #[test]
    fn test_format_credentials() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_credentials(&[]), "No banks linked.");

        let credentials = vec![Credential::new(
            "abc",
            ProviderInfo::new("Monzo", "", "ob-monzo"),
        )];
        let output = formatter.format_credentials(&credentials);
        assert!(output.starts_with("Monzo"));
        assert!(output.contains("abc (ob-monzo)"));
    }

    #[test]
    fn test_format_truelayer() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_truelayer(Some("my-app")),
            "TrueLayer client: my-app"
        );
        assert_eq!(
            formatter.format_truelayer(None),
            "TrueLayer client: not configured"
        );
    }
}

mod json_formatter_tests {
    use super::*;
    use crate::output::JsonFormatter;

    #[test]
    fn test_accounts_json() {
        let formatter = JsonFormatter::new(false);
        let accounts = sample_accounts();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let output = formatter.format_accounts(Some(&accounts), Some(at)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["lastRefreshedAt"], "2024-03-01T12:00:00+00:00");
        assert_eq!(value["accounts"].as_array().unwrap().len(), 3);
        assert_eq!(value["accounts"][0]["balance"], "£12.50");
        assert_eq!(value["accounts"][1]["hasError"], true);
        assert_eq!(value["accounts"][2]["hasError"], false);
    }

    #[test]
    fn test_never_refreshed_is_null() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_accounts(None, None).unwrap();
        assert_eq!(output, r#"{"accounts":null,"lastRefreshedAt":null}"#);
    }

    #[test]
    fn test_truelayer_json() {
        let formatter = JsonFormatter::new(false);
        assert_eq!(
            formatter.format_truelayer(Some("my-app")).unwrap(),
            r#"{"configured":true,"clientId":"my-app"}"#
        );
        assert_eq!(
            formatter.format_truelayer(None).unwrap(),
            r#"{"configured":false,"clientId":null}"#
        );
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format_truelayer(None).unwrap();
        assert!(output.contains('\n'));
    }
}
