use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Error body returned by the host on a failed invocation.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Value,
}

pub struct HostClient {
    client: Client,
    host_url: String,
}

impl HostClient {
    pub fn new(host_url: &str) -> Self {
        Self {
            client: Client::new(),
            host_url: host_url.to_string(),
        }
    }

    /// Invoke the hosted lambda with the given payload.
    ///
    /// A 200 yields the delegate's result. A non-2xx status yields an error
    /// carrying the host's `error` field when the body has one, or the raw
    /// status and body otherwise.
    pub async fn invoke(&self, payload: &Value) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(&self.host_url)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
                return Err(format!("Host returned error: {}", body.error).into());
            }
            return Err(format!("Host returned error status {}: {}", status, text).into());
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(result) => Ok(result),
            Err(e) => Err(e.into()),
        }
    }
}
