//! Trading spaces of an account.
//!
//! A space partitions the account's money between strategies and apps. Every read of
//! a live figure (`state`, `balance`, `cash_to_invest`) refetches the space first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::Account;
use crate::error::LemonError;
use crate::rest::{RestClient, endpoints};
use crate::types::numeric_field;

/// Kind of a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    /// Space driven by a trading strategy
    Strategy,
    /// Space managed by an app
    App,
}

impl SpaceType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceType::Strategy => "strategy",
            SpaceType::App => "app",
        }
    }

    /// Decode the `type` field of a space payload.
    ///
    /// Anything but the strings `"strategy"` and `"app"`, including a missing field,
    /// fails with [`LemonError::InvalidSpaceType`] carrying the raw value.
    pub fn from_value(value: Option<&Value>) -> Result<Self, LemonError> {
        match value {
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(LemonError::InvalidSpaceType {
                value: other.to_string(),
            }),
            None => Err(LemonError::InvalidSpaceType {
                value: Value::Null.to_string(),
            }),
        }
    }
}

impl FromStr for SpaceType {
    type Err = LemonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strategy" => Ok(SpaceType::Strategy),
            "app" => Ok(SpaceType::App),
            _ => Err(LemonError::InvalidSpaceType {
                value: Value::String(s.to_string()).to_string(),
            }),
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Fields copied from a space payload, `type` excluded.
#[derive(Debug, Deserialize)]
struct SpaceRecord {
    uuid: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: Option<Map<String, Value>>,
}

/// Decode a full payload; nothing is applied anywhere unless this succeeds.
fn decode(data: &Value) -> Result<(SpaceType, SpaceRecord), LemonError> {
    let space_type = SpaceType::from_value(data.get("type"))?;
    let record = SpaceRecord::deserialize(data)?;
    Ok((space_type, record))
}

/// A trading space belonging to an [`Account`].
///
/// # Example
///
/// ```rust,no_run
/// use lemon_markets_client::{Account, RestClient, State};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut state = State::new(RestClient::new(), Account::with_token("token"));
///     let mut spaces = state.spaces().await?.to_vec();
///     for space in &mut spaces {
///         let balance = space.balance().await?;
///         println!("{} ({}): {}", space.name(), space.space_type(), balance);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Space {
    uuid: String,
    name: String,
    space_type: SpaceType,
    state: Map<String, Value>,
    client: RestClient,
    account: Account,
}

impl Space {
    /// Build a space from an already fetched payload.
    ///
    /// Expects `uuid`, `name`, `type` and `state`. No request is made.
    pub fn from_response(
        client: RestClient,
        account: Account,
        data: &Value,
    ) -> Result<Self, LemonError> {
        let (space_type, record) = decode(data)?;
        Ok(Self {
            uuid: record.uuid,
            name: record.name.unwrap_or_default(),
            space_type,
            state: record.state.unwrap_or_default(),
            client,
            account,
        })
    }

    /// Overwrite this space with a freshly fetched payload.
    ///
    /// Fails without touching any field if the payload does not decode.
    pub fn update_from_response(&mut self, data: &Value) -> Result<(), LemonError> {
        let (space_type, record) = decode(data)?;
        self.uuid = record.uuid;
        self.name = record.name.unwrap_or_default();
        self.state = record.state.unwrap_or_default();
        self.space_type = space_type;
        Ok(())
    }

    /// Refetch this space from `spaces/{uuid}/`.
    pub async fn refresh(&mut self) -> Result<(), LemonError> {
        tracing::debug!(uuid = %self.uuid, "refreshing space");
        let data: Value = self
            .client
            .request(&self.account, &endpoints::space(&self.uuid))
            .await?;
        self.update_from_response(&data)
    }

    /// Refetch and return the space state.
    pub async fn state(&mut self) -> Result<&Map<String, Value>, LemonError> {
        self.refresh().await?;
        Ok(&self.state)
    }

    /// Refetch and return the space balance.
    pub async fn balance(&mut self) -> Result<f64, LemonError> {
        self.refresh().await?;
        numeric_field(&self.state, "balance")
    }

    /// Refetch and return the cash available for investing.
    ///
    /// Reported separately from [`balance`](Self::balance) by the server; the two are
    /// not assumed to match.
    pub async fn cash_to_invest(&mut self) -> Result<f64, LemonError> {
        self.refresh().await?;
        numeric_field(&self.state, "cash_to_invest")
    }

    /// Space identifier.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of space.
    pub fn space_type(&self) -> SpaceType {
        self.space_type
    }

    /// State from the last successful decode, without refetching.
    pub fn cached_state(&self) -> &Map<String, Value> {
        &self.state
    }

    /// Account owning this space.
    pub fn account(&self) -> &Account {
        &self.account
    }
}
