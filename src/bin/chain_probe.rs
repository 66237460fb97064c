//! Connectivity probe for the Cronos zkEVM mainnet RPC endpoint.
//!
//! Prints whether the node answers at all, then the current chain head
//! block number. Any failure after the connectivity check propagates out
//! of `main` and terminates the process.

use anyhow::{anyhow, Result};
use serde_json::{json, Value};

const RPC_URL: &str = "https://mainnet.zkevm.cronos.org";

#[tokio::main]
async fn main() -> Result<()> {
    let client = reqwest::Client::new();

    let connected = rpc_call(&client, "eth_chainId", json!([])).await.is_ok();
    println!("Connected to Cronos zkEVM node: {}", connected);

    let response = rpc_call(&client, "eth_blockNumber", json!([])).await?;
    let raw = response
        .get("result")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("eth_blockNumber result was missing"))?;
    let latest_block = parse_hex_u64(raw)?;
    println!("Latest block number: {}", latest_block);

    Ok(())
}

async fn rpc_call(client: &reqwest::Client, method: &str, params: Value) -> Result<Value> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let response: Value = client
        .post(RPC_URL)
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if let Some(error) = response.get("error") {
        return Err(anyhow!("{} failed: {}", method, error));
    }
    Ok(response)
}

/// Parse a `0x`-prefixed JSON-RPC quantity.
fn parse_hex_u64(raw: &str) -> Result<u64> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("quantity is not 0x-prefixed: {}", raw))?;
    u64::from_str_radix(digits, 16).map_err(|err| anyhow!("invalid hex quantity {}: {}", raw, err))
}
