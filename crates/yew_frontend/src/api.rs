//! REST calls to the pharmachat server
//!
//! The shapes here mirror the server's wire types by hand; the native
//! core crate pulls image decoding and is not built for WASM.

use gloo_net::http::{Request, RequestBuilder};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct TextQueryRequest {
    drug_name: String,
}

#[derive(Serialize)]
struct ImageQueryRequest {
    file_name: String,
    data_b64: String,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Submit a drug-name query; returns the answer text or a user-facing
/// error message.
pub async fn post_text_query(drug_name: &str) -> Result<String, String> {
    let request = TextQueryRequest {
        drug_name: drug_name.to_string(),
    };
    send(Request::post("/api/chat/text"), &request).await
}

/// Submit an uploaded image (base64 bytes) for description.
pub async fn post_image_query(file_name: &str, data_b64: &str) -> Result<String, String> {
    let request = ImageQueryRequest {
        file_name: file_name.to_string(),
        data_b64: data_b64.to_string(),
    };
    send(Request::post("/api/chat/image"), &request).await
}

/// Strip the `data:<mime>;base64,` prefix from a data URL, leaving the
/// payload the server expects.
pub fn base64_of_data_url(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, data)| data)
        .unwrap_or(data_url)
}

async fn send<T: Serialize>(builder: RequestBuilder, body: &T) -> Result<String, String> {
    let response = builder
        .json(body)
        .map_err(|err| format!("failed to encode request: {}", err))?
        .send()
        .await
        .map_err(|err| format!("request failed: {}", err))?;

    if response.ok() {
        let body: AnswerResponse = response
            .json()
            .await
            .map_err(|err| format!("malformed response: {}", err))?;
        Ok(body.answer)
    } else {
        match response.json::<ErrorResponse>().await {
            Ok(body) => Err(body.error),
            Err(_) => Err(format!("request failed: HTTP {}", response.status())),
        }
    }
}
