//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::{parse_timestamp, Theme, TransactionKind};

#[derive(Parser)]
#[command(
    name = "walletsync",
    version,
    about = "Personal finance client: session, currencies and transactions"
)]
pub struct Cli {
    /// Config file (default: <config dir>/walletsync/config.toml).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the snapshot directory from the config file.
    #[arg(long = "state-dir", value_name = "DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and keep the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and log in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the session and the local transaction list.
    Logout,

    /// Show the logged-in user and local preferences.
    Whoami,

    /// Change name and email.
    UpdateProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },

    /// Change the account password.
    ChangePassword {
        #[arg(long = "new-password")]
        new_password: String,
    },

    /// Delete the account on the backend and log out.
    DeleteAccount,

    /// Pull and list currencies.
    Currencies,

    /// Choose the preferred currency by code (e.g. EUR) or id.
    SetCurrency { currency: String },

    /// Pull and list transactions.
    List,

    /// Record a transaction.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, value_parser = parse_kind)]
        kind: TransactionKind,
        #[arg(long, default_value_t = 1)]
        category: i64,
        /// Date (YYYY-MM-DD or RFC 3339); defaults to now.
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,
    },

    /// Edit title and amount of a transaction.
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        amount: Decimal,
    },

    /// Delete a transaction.
    Delete { id: i64 },

    /// Income, expense and balance over the local transaction list.
    Summary {
        /// Pull transactions before summarizing.
        #[arg(long)]
        refresh: bool,
    },

    /// Show or change local preferences.
    Prefs {
        #[arg(long, value_parser = parse_theme)]
        theme: Option<Theme>,
        #[arg(long)]
        lang: Option<String>,
    },
}

fn parse_kind(raw: &str) -> Result<TransactionKind, String> {
    TransactionKind::parse(raw).ok_or_else(|| format!("expected income or expense, got '{}'", raw))
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    Theme::parse(raw).ok_or_else(|| format!("expected dark or light, got '{}'", raw))
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw).ok_or_else(|| format!("expected YYYY-MM-DD or RFC 3339, got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_defaults() {
        let cli = Cli::try_parse_from([
            "walletsync", "add", "--title", "Coffee", "--amount", "10.5", "--kind", "expense",
        ])
        .unwrap();
        match cli.command {
            Command::Add {
                title,
                amount,
                kind,
                category,
                date,
            } => {
                assert_eq!(title, "Coffee");
                assert_eq!(amount, Decimal::new(105, 1));
                assert_eq!(kind, TransactionKind::Expense);
                assert_eq!(category, 1);
                assert!(date.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = Cli::try_parse_from([
            "walletsync", "add", "--title", "x", "--amount", "1", "--kind", "gift",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_state_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["walletsync", "list", "--state-dir", "/tmp/ws"]).unwrap();
        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/ws")));
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn prefs_parses_theme() {
        let cli = Cli::try_parse_from(["walletsync", "prefs", "--theme", "LIGHT"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Prefs {
                theme: Some(Theme::Light),
                lang: None
            }
        ));
    }
}
