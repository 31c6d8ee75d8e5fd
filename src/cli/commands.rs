//! Subcommand execution: dispatch an intent, wait for its terminal phase,
//! acknowledge it and print the outcome.

use chrono::Utc;
use thiserror::Error;

use crate::domain::{NewTransaction, TransactionUpdate};
use crate::phase::{ErrorCode, Phase, Verb};
use crate::secret::SecureString;
use crate::selectors;
use crate::slices::auth::AuthIntent;
use crate::slices::currency::CurrencyIntent;
use crate::slices::transaction::TransactionIntent;
use crate::store::{AppIntent, AppState, Store};

use super::args::Command;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{tag}: {code}")]
    Operation { tag: &'static str, code: ErrorCode },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),
}

/// Dispatch `intent`, wait for the selected phase to settle and acknowledge it.
async fn perform<V: Verb>(
    store: &Store,
    intent: impl Into<AppIntent>,
    select: fn(&AppState) -> &Phase<V>,
    reset: impl Into<AppIntent>,
) -> Result<(), CliError> {
    store.dispatch(intent);
    store.settle(select).await;
    match store.take_terminal(select, reset) {
        Some(Phase::Failed(verb, code)) => Err(CliError::Operation {
            tag: verb.error_tag(),
            code,
        }),
        _ => Ok(()),
    }
}

async fn auth(store: &Store, intent: AuthIntent) -> Result<(), CliError> {
    perform(store, intent, selectors::auth_phase, AuthIntent::ResetPhase).await
}

async fn currency(store: &Store, intent: CurrencyIntent) -> Result<(), CliError> {
    perform(store, intent, selectors::currency_phase, CurrencyIntent::ResetPhase).await
}

async fn transaction(store: &Store, intent: TransactionIntent) -> Result<(), CliError> {
    perform(
        store,
        intent,
        selectors::transaction_phase,
        TransactionIntent::ResetPhase,
    )
    .await
}

fn require_login(store: &Store) -> Result<(), CliError> {
    if store.select(|state| state.auth.is_logged_in()) {
        Ok(())
    } else {
        Err(CliError::NotLoggedIn)
    }
}

pub async fn run(store: &Store, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            auth(store, AuthIntent::login(email, password)).await?;
            print_user(&store.state());
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            auth(
                store,
                AuthIntent::Register {
                    name,
                    email,
                    password: SecureString::new(password),
                },
            )
            .await?;
            print_user(&store.state());
        }
        Command::Logout => {
            store.dispatch(AuthIntent::Logout);
            println!("Logged out");
        }
        Command::Whoami => {
            let state = store.state();
            if state.auth.user.is_none() {
                println!("Not logged in");
            } else {
                print_user(&state);
            }
            println!("theme: {}", state.auth.theme.as_str());
            println!("lang: {}", state.auth.lang);
        }
        Command::UpdateProfile { name, email } => {
            require_login(store)?;
            auth(store, AuthIntent::UpdateUser { name, email }).await?;
            print_user(&store.state());
        }
        Command::ChangePassword { new_password } => {
            require_login(store)?;
            auth(
                store,
                AuthIntent::UpdatePassword {
                    new_password: SecureString::new(new_password),
                },
            )
            .await?;
            println!("Password changed");
        }
        Command::DeleteAccount => {
            require_login(store)?;
            auth(store, AuthIntent::DeleteUser).await?;
            println!("Account deleted");
        }
        Command::Currencies => {
            currency(store, CurrencyIntent::Pull).await?;
            let state = store.state();
            let selected = selectors::selected_currency(&state).map(|c| c.id);
            for c in &state.currency.currencies {
                let marker = if Some(c.id) == selected { "*" } else { " " };
                println!("{} {:>4}  {}  {}  {}", marker, c.id, c.code, c.symbol, c.name);
            }
        }
        Command::SetCurrency { currency: wanted } => {
            require_login(store)?;
            if store.select(|state| state.currency.currencies.is_empty()) {
                currency(store, CurrencyIntent::Pull).await?;
            }
            let currency_id = store
                .select(|state| {
                    wanted
                        .parse::<i64>()
                        .ok()
                        .and_then(|id| state.currency.find(id))
                        .or_else(|| state.currency.find_by_code(&wanted))
                        .map(|c| c.id)
                })
                .ok_or_else(|| CliError::UnknownCurrency(wanted.clone()))?;
            auth(store, AuthIntent::SetCurrency { currency_id }).await?;
            if let Some(c) = selectors::selected_currency(&store.state()) {
                println!("Currency set to {} ({})", c.code, c.name);
            }
        }
        Command::List => {
            require_login(store)?;
            transaction(store, TransactionIntent::Pull).await?;
            print_transactions(&store.state());
        }
        Command::Add {
            title,
            amount,
            kind,
            category,
            date,
        } => {
            require_login(store)?;
            let new = NewTransaction {
                title,
                amount,
                kind,
                category_id: category,
                created_at: date.unwrap_or_else(Utc::now),
            };
            transaction(store, TransactionIntent::Add(new)).await?;
            if let Some(t) = store.state().transactions.transactions.first() {
                println!("Added #{}", t.id);
            }
        }
        Command::Update { id, title, amount } => {
            require_login(store)?;
            let update = TransactionUpdate { id, title, amount };
            transaction(store, TransactionIntent::Update(update)).await?;
            println!("Updated #{}", id);
        }
        Command::Delete { id } => {
            require_login(store)?;
            transaction(store, TransactionIntent::Delete { id }).await?;
            println!("Deleted #{}", id);
        }
        Command::Summary { refresh } => {
            if refresh {
                require_login(store)?;
                transaction(store, TransactionIntent::Pull).await?;
            }
            let state = store.state();
            let totals = selectors::totals(&state);
            let symbol = selectors::selected_currency(&state)
                .map(|c| c.symbol.as_str())
                .unwrap_or("");
            println!("income:  {}{}", symbol, totals.income);
            println!("expense: {}{}", symbol, totals.expense);
            println!("balance: {}{}", symbol, totals.balance);
        }
        Command::Prefs { theme, lang } => {
            if let Some(theme) = theme {
                store.dispatch(AuthIntent::SetTheme(theme));
            }
            if let Some(lang) = lang {
                store.dispatch(AuthIntent::SetLang(lang));
            }
            let state = store.state();
            println!("theme: {}", state.auth.theme.as_str());
            println!("lang: {}", state.auth.lang);
        }
    }
    Ok(())
}

fn print_user(state: &AppState) {
    let Some(user) = selectors::current_user(state) else {
        return;
    };
    println!("{} <{}>", user.display_name(), user.email.as_deref().unwrap_or("-"));
    if let Some(c) = selectors::selected_currency(state) {
        println!("currency: {} ({})", c.code, c.name);
    }
}

fn print_transactions(state: &AppState) {
    for t in &state.transactions.transactions {
        println!(
            "{:>6}  {}  {:<7}  {:>12}  {}",
            t.id,
            t.created_at.format("%Y-%m-%d"),
            t.kind,
            t.amount,
            t.title
        );
    }
}
