//! Authentication module for the lemon.markets API.
//!
//! Requests are authorized with a bearer access token. This module provides
//! credential storage that never leaks the token through `Debug`, and providers
//! that source the token statically or from the environment.

mod credentials;

pub use credentials::{
    ACCESS_TOKEN_VAR, Credentials, CredentialsProvider, EnvCredentials, StaticCredentials,
};
