use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::{
    AccessToken, Currency, CurrencyId, NewTransaction, Transaction, TransactionId,
    TransactionUpdate, User, UserId,
};

use super::error::ApiError;
use super::types::{
    CurrenciesEnvelope, ExpensesEnvelope, Session, UpdatedExpenseEnvelope, UserDataEnvelope,
};

/// Fields the backend uses to report a failure in an otherwise normal body.
const ERROR_FIELDS: &[&str] = &["error"];

/// Registration reports validation failures per input field.
const REGISTER_ERROR_FIELDS: &[&str] = &["name", "email", "password", "error"];

/// HTTP client bound to one backend.
///
/// Cloning is cheap and clones share the bearer token, so a token set after
/// login is attached by every clone.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach (or with `None`, stop attaching) a bearer token.
    pub fn set_token(&self, token: Option<AccessToken>) {
        *self.token.write() = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    // -- auth -----------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = json!({ "email": email, "password": password });
        let value = self
            .execute(Method::POST, "/login", Some(body), ERROR_FIELDS)
            .await?;
        decode("/login", value)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let value = self
            .execute(Method::POST, "/register", Some(body), REGISTER_ERROR_FIELDS)
            .await?;
        decode("/register", value)
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<(), ApiError> {
        let path = format!("/delete-user/{}", user_id);
        self.execute(Method::POST, &path, None, ERROR_FIELDS)
            .await
            .map(|_| ())
    }

    pub async fn update_password(
        &self,
        user_id: UserId,
        new_password: &str,
    ) -> Result<User, ApiError> {
        let body = json!({ "userId": user_id, "newPassword": new_password });
        let value = self
            .execute(Method::POST, "/updateUserPassword", Some(body), ERROR_FIELDS)
            .await?;
        decode::<UserDataEnvelope>("/updateUserPassword", value).map(|e| e.user_data)
    }

    pub async fn update_currency(
        &self,
        user_id: UserId,
        currency_id: CurrencyId,
    ) -> Result<User, ApiError> {
        let path = format!("/update-currency/{}", user_id);
        let body = json!({ "currency_id": currency_id });
        let value = self
            .execute(Method::POST, &path, Some(body), ERROR_FIELDS)
            .await?;
        decode::<UserDataEnvelope>(&path, value).map(|e| e.user_data)
    }

    pub async fn update_user_info(
        &self,
        user_id: UserId,
        name: &str,
        email: &str,
    ) -> Result<User, ApiError> {
        let path = format!("/update-user-info/{}", user_id);
        let body = json!({ "name": name, "email": email });
        let value = self
            .execute(Method::POST, &path, Some(body), ERROR_FIELDS)
            .await?;
        decode::<UserDataEnvelope>(&path, value).map(|e| e.user_data)
    }

    // -- currencies -----------------------------------------------------------

    pub async fn currencies(&self) -> Result<Vec<Currency>, ApiError> {
        let value = self
            .execute(Method::GET, "/get-currencies", None, ERROR_FIELDS)
            .await?;
        decode::<CurrenciesEnvelope>("/get-currencies", value).map(|e| e.currencies)
    }

    // -- transactions ---------------------------------------------------------

    pub async fn transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, ApiError> {
        let path = format!("/get-expenses/{}", user_id);
        let value = self.execute(Method::GET, &path, None, ERROR_FIELDS).await?;
        decode::<ExpensesEnvelope<Vec<Transaction>>>(&path, value).map(|e| e.expenses)
    }

    pub async fn create_transaction(
        &self,
        user_id: UserId,
        transaction: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let body = json!({
            "title": transaction.title,
            "amount": transaction.amount.to_string(),
            "type": transaction.kind,
            "category_id": transaction.category_id,
            "user_id": user_id,
            "created_at": transaction.created_at,
        });
        let value = self
            .execute(Method::POST, "/create-expense", Some(body), ERROR_FIELDS)
            .await?;
        decode::<ExpensesEnvelope<Transaction>>("/create-expense", value).map(|e| e.expenses)
    }

    /// PATCH is the canonical method for this endpoint.
    pub async fn update_transaction(
        &self,
        update: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        let path = format!("/update-expense/{}", update.id);
        let body = json!({
            "title": update.title,
            "amount": update.amount.to_string(),
        });
        let value = self
            .execute(Method::PATCH, &path, Some(body), ERROR_FIELDS)
            .await?;
        decode::<UpdatedExpenseEnvelope>(&path, value).map(|e| e.expense)
    }

    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), ApiError> {
        let path = format!("/delete-expense/{}", id);
        self.execute(Method::POST, &path, None, ERROR_FIELDS)
            .await
            .map(|_| ())
    }

    // -- plumbing -------------------------------------------------------------

    /// Send one request and classify the response.
    ///
    /// Returns the parsed JSON body (`None` when the body is empty or not
    /// JSON) for 2xx responses that carry no error field.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        error_fields: &[&str],
    ) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method.clone(), url);

        let token = self.token.read().clone();
        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose());
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let transport = |source| ApiError::Transport {
            path: path.to_string(),
            source,
        };

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;
        let value: Option<Value> = serde_json::from_slice(&bytes).ok();

        debug!(method = %method, path = %path, status = status.as_u16(), "Backend responded");

        if let Some(code) = value
            .as_ref()
            .and_then(|v| server_error_code(v, error_fields))
        {
            warn!(path = %path, status = status.as_u16(), code = %code, "Backend reported an error");
            return Err(ApiError::Application {
                path: path.to_string(),
                code,
            });
        }

        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(value)
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Option<Value>) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| ApiError::Decode {
        path: path.to_string(),
        message: "body is not JSON".to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// First non-empty error message found under one of `fields`.
///
/// Validation errors arrive either as a string or as a list of strings.
fn server_error_code(body: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match body.get(*field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.as_str().filter(|s| !s.is_empty()))
            .map(String::from),
        _ => None,
    })
}
