//! Account-wide state: the overall balance and the list of spaces.

use serde_json::{Map, Value};

use crate::account::Account;
use crate::error::LemonError;
use crate::rest::{RestClient, endpoints};
use crate::space::Space;
use crate::types::numeric_field;

/// State of an [`Account`].
///
/// Reading [`state`](Self::state), [`balance`](Self::balance) or
/// [`spaces`](Self::spaces) always refetches first. Cached values are only replaced
/// after a fetch fully succeeded, and remain readable through the `cached_*`
/// accessors.
///
/// # Example
///
/// ```rust,no_run
/// use lemon_markets_client::{Account, RestClient, State};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut state = State::new(RestClient::new(), Account::with_token("token"));
///     println!("Balance: {}", state.balance().await?);
///     println!("Spaces: {}", state.spaces().await?.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct State {
    client: RestClient,
    account: Account,
    state: Option<Map<String, Value>>,
    balance: Option<f64>,
    spaces: Vec<Space>,
}

impl State {
    /// Create the state handle. No request is made.
    pub fn new(client: RestClient, account: Account) -> Self {
        Self {
            client,
            account,
            state: None,
            balance: None,
            spaces: Vec::new(),
        }
    }

    /// Refetch the account state from `state/`.
    ///
    /// Payloads without a numeric `state.balance` fail with
    /// [`LemonError::AccountState`], which keeps the cause as its source.
    pub async fn refresh_state(&mut self) -> Result<(), LemonError> {
        self.fetch_state().await?;
        Ok(())
    }

    /// Refetch every page of `spaces/` and rebuild the list of spaces.
    ///
    /// A single undecodable row fails the whole refresh.
    pub async fn refresh_spaces(&mut self) -> Result<(), LemonError> {
        tracing::debug!("refreshing spaces");
        let rows: Vec<Value> = self
            .client
            .request_paged(&self.account, endpoints::SPACES)
            .await?;
        let spaces = rows
            .iter()
            .map(|row| Space::from_response(self.client.clone(), self.account.clone(), row))
            .collect::<Result<Vec<_>, _>>()?;
        self.spaces = spaces;
        Ok(())
    }

    /// Refetch and return the full `state/` payload.
    pub async fn state(&mut self) -> Result<&Map<String, Value>, LemonError> {
        let (state, _) = self.fetch_state().await?;
        Ok(state)
    }

    /// Refetch and return the account balance.
    pub async fn balance(&mut self) -> Result<f64, LemonError> {
        let (_, balance) = self.fetch_state().await?;
        Ok(balance)
    }

    /// Refetch and return the spaces of the account in server order.
    pub async fn spaces(&mut self) -> Result<&[Space], LemonError> {
        self.refresh_spaces().await?;
        Ok(&self.spaces)
    }

    /// Payload of the last successful state fetch.
    pub fn cached_state(&self) -> Option<&Map<String, Value>> {
        self.state.as_ref()
    }

    /// Balance of the last successful state fetch.
    pub fn cached_balance(&self) -> Option<f64> {
        self.balance
    }

    /// Spaces of the last successful spaces fetch.
    pub fn cached_spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// Account this state belongs to.
    pub fn account(&self) -> &Account {
        &self.account
    }

    async fn fetch_state(&mut self) -> Result<(&Map<String, Value>, f64), LemonError> {
        tracing::debug!("refreshing account state");
        let data: Value = self.client.request(&self.account, endpoints::STATE).await?;
        let (state, balance) =
            decode_account_state(data).map_err(|e| LemonError::AccountState(Box::new(e)))?;
        self.balance = Some(balance);
        let state: &Map<String, Value> = self.state.insert(state);
        Ok((state, balance))
    }
}

/// Split a `state/` payload into the raw object and its `state.balance`.
fn decode_account_state(data: Value) -> Result<(Map<String, Value>, f64), LemonError> {
    let map = match data {
        Value::Object(map) => map,
        other => {
            return Err(LemonError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                other
            )));
        }
    };
    let balance = {
        let inner = match map.get("state") {
            None | Some(Value::Null) => {
                return Err(LemonError::MissingField("state".to_string()));
            }
            Some(Value::Object(inner)) => inner,
            Some(other) => {
                return Err(LemonError::InvalidResponse(format!(
                    "expected `state` to be a JSON object, got {}",
                    other
                )));
            }
        };
        numeric_field(inner, "balance")?
    };
    Ok((map, balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_account_state() {
        let (state, balance) =
            decode_account_state(json!({"state": {"balance": "123.45"}, "mode": "paper"}))
                .unwrap();
        assert_eq!(balance, 123.45);
        assert_eq!(state["mode"], "paper");
    }

    #[test]
    fn test_decode_account_state_without_state() {
        let error = decode_account_state(json!({"balance": "1"})).unwrap_err();
        assert!(matches!(error, LemonError::MissingField(ref f) if f == "state"));
    }

    #[test]
    fn test_decode_account_state_with_non_object_state() {
        let error = decode_account_state(json!({"state": "x"})).unwrap_err();
        match error {
            LemonError::InvalidResponse(message) => assert!(message.contains("\"x\"")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_account_state_non_object() {
        let error = decode_account_state(json!([1, 2])).unwrap_err();
        assert!(matches!(error, LemonError::InvalidResponse(_)));
    }

    #[test]
    fn test_new_state_has_empty_cache() {
        let state = State::new(RestClient::new(), Account::with_token("token"));
        assert!(state.cached_state().is_none());
        assert!(state.cached_balance().is_none());
        assert!(state.cached_spaces().is_empty());
    }
}
