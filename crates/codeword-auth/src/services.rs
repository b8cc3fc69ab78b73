//! The platform services each credential stage calls.
//!
//! The chain doesn't implement any HTTP itself. Each stage is a trait with
//! a single async method, in the same spirit as a pluggable authenticator:
//! production wires in real HTTP clients, tests wire in counters.

use std::fmt;
use std::future::Future;

use codeword_protocol::{DeviceIdentity, InstallTicket};
use serde::Deserialize;

use crate::{ApplicationToken, DeviceToken, ServiceError};

/// Stage 1: exchanges the device's certificate for a device token.
pub trait DeviceAuthService: Send + Sync + 'static {
    fn device_token(
        &self,
        identity: &DeviceIdentity,
        system_version: u32,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;
}

/// Everything application auth needs for one request.
#[derive(Debug, Clone, Copy)]
pub struct AppAuthRequest<'a> {
    pub title_id: u64,
    pub title_version: u32,
    pub device_token: &'a DeviceToken,
    pub ticket: &'a InstallTicket,
    pub system_version: u32,
}

/// Stage 2: proves title entitlement, bound to a device token.
pub trait AppAuthService: Send + Sync + 'static {
    fn application_token(
        &self,
        request: AppAuthRequest<'_>,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;
}

/// Username and password of the account the lookup logs in as.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccountCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything account login needs for one request.
#[derive(Debug, Clone, Copy)]
pub struct AccountLoginRequest<'a> {
    pub device_token: &'a DeviceToken,
    pub application_token: &'a ApplicationToken,
    pub account: &'a AccountCredentials,
    pub system_version: u32,
}

/// The raw account-service response.
///
/// `user_id` is hexadecimal text exactly as the service sends it; the chain
/// parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLogin {
    pub user_id: String,
    pub id_token: String,
}

/// Stage 3: logs the account in.
pub trait AccountService: Send + Sync + 'static {
    fn login(
        &self,
        request: AccountLoginRequest<'_>,
    ) -> impl Future<Output = Result<AccountLogin, ServiceError>> + Send;
}
