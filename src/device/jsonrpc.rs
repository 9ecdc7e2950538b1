//! JSON-RPC over HTTPS client for PDU management endpoints.

use super::{DeviceApi, DeviceFailure, DeviceIdentity, FailureKind};
use crate::constants;
use crate::models::config::DeviceSection;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Deserialize)]
struct RpcReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct Nameplate {
    #[serde(rename = "serialNumber")]
    serial_number: String,
}

/// Blocking JSON-RPC client. One request per call, no session reuse.
pub struct JsonRpcDevice {
    client: Client,
    scheme: String,
    next_id: AtomicU64,
}

impl JsonRpcDevice {
    pub fn new(config: &DeviceSection) -> Result<Self, DeviceFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| {
                DeviceFailure::new(FailureKind::Transport, format!("build HTTP client: {}", e))
            })?;
        Ok(Self {
            client,
            scheme: config.scheme.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    fn url(&self, host: &str, resource: &str) -> String {
        format!("{}://{}{}", self.scheme, host, resource)
    }

    /// Invoke `method` on `resource` and return the `_ret_` member of the result.
    fn call(
        &self,
        host: &str,
        resource: &str,
        username: &str,
        secret: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, DeviceFailure> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });
        tracing::debug!(host, resource, method, id, "json-rpc request");

        let response = self
            .client
            .post(self.url(host, resource))
            .basic_auth(username, Some(secret))
            .json(&body)
            .send()
            .map_err(|e| DeviceFailure::new(FailureKind::Transport, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| DeviceFailure::new(FailureKind::Transport, e.to_string()))?;
        if !status.is_success() {
            return Err(DeviceFailure::new(
                FailureKind::Http,
                format!("HTTP {}: {}", status, text),
            ));
        }

        let reply: RpcReply = serde_json::from_str(&text).map_err(|e| {
            DeviceFailure::new(FailureKind::Protocol, format!("unreadable reply to {}: {}", method, e))
        })?;
        if let Some(err) = reply.error {
            return Err(DeviceFailure::new(
                FailureKind::Protocol,
                format!("{} failed with JSON-RPC error {}: {}", method, err.code, err.message),
            ));
        }
        reply
            .result
            .and_then(|mut result| result.get_mut("_ret_").map(Value::take))
            .ok_or_else(|| {
                DeviceFailure::new(
                    FailureKind::Protocol,
                    format!("reply to {} has no return value", method),
                )
            })
    }
}

impl DeviceApi for JsonRpcDevice {
    fn get_identity(
        &self,
        host: &str,
        username: &str,
        secret: &str,
    ) -> Result<DeviceIdentity, DeviceFailure> {
        let ret = self.call(
            host,
            constants::PDU_RESOURCE,
            username,
            secret,
            "getNameplate",
            json!({}),
        )?;
        let nameplate: Nameplate = serde_json::from_value(ret).map_err(|e| {
            DeviceFailure::new(FailureKind::Protocol, format!("unreadable nameplate: {}", e))
        })?;
        Ok(DeviceIdentity {
            serial_number: nameplate.serial_number,
        })
    }

    fn change_credential(
        &self,
        host: &str,
        username: &str,
        secret: &str,
        new_secret: &str,
    ) -> Result<i64, DeviceFailure> {
        let resource = user_resource(username);
        // Confirms the account exists and the session is accepted before mutating.
        self.call(host, &resource, username, secret, "getInfo", json!({}))?;
        let ret = self.call(
            host,
            &resource,
            username,
            secret,
            "setAccountPassword",
            json!({ "password": new_secret }),
        )?;
        ret.as_i64().ok_or_else(|| {
            DeviceFailure::new(
                FailureKind::Protocol,
                format!("setAccountPassword returned a non-integer: {}", ret),
            )
        })
    }
}

fn user_resource(username: &str) -> String {
    format!("{}{}", constants::USER_RESOURCE_PREFIX, username)
}
