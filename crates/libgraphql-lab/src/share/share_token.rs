use crate::operation::Operation;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::Read;
use std::io::Write;
use url::Url;

type Result<T> = std::result::Result<T, ShareError>;

/// Query parameter that carries the token in a share URL.
pub const SHARE_QUERY_PARAM: &str = "share";

/// The wire form of a shared operation. Empty variables, headers and
/// extensions are left out of the token.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SharedOperation {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "q")]
    pub query: String,
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
    #[serde(rename = "h", default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<String>,
}
impl SharedOperation {
    /// A new operation (with a fresh id) seeded from the shared fields.
    pub fn into_operation(self) -> Operation {
        Operation {
            variables: self.variables.unwrap_or_default(),
            headers: self.headers.unwrap_or_default(),
            extensions: self.extensions.unwrap_or_default(),
            ..Operation::new(self.name, self.query)
        }
    }
}
impl From<&Operation> for SharedOperation {
    fn from(operation: &Operation) -> Self {
        let non_empty = |text: &str| (!text.is_empty()).then(|| text.to_string());
        Self {
            name: operation.name.clone(),
            query: operation.query.clone(),
            variables: non_empty(&operation.variables),
            headers: non_empty(&operation.headers),
            extensions: non_empty(&operation.extensions),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("share token failed to (de)compress: {0}")]
    Compression(#[from] std::io::Error),

    #[error("share token does not hold an operation: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("URL has no `{SHARE_QUERY_PARAM}` query parameter")]
    MissingToken,
}

/// Serializes the operation to JSON, deflates it and encodes the result as
/// unpadded URL-safe base64.
pub fn encode_share(operation: &Operation) -> Result<String> {
    let json = serde_json::to_vec(&SharedOperation::from(operation))?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

pub fn decode_share(token: &str) -> Result<SharedOperation> {
    let compressed = URL_SAFE_NO_PAD.decode(token.trim())?;
    let mut json = Vec::new();
    DeflateDecoder::new(compressed.as_slice()).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}

/// `base_url` with the operation's token set as its `share` parameter.
/// Any other query parameters on `base_url` are kept.
pub fn share_url(base_url: &str, operation: &Operation) -> Result<Url> {
    let token = encode_share(operation)?;
    let mut url = Url::parse(base_url)?;
    let others = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect::<Vec<_>>();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(others)
        .append_pair(SHARE_QUERY_PARAM, &token);
    Ok(url)
}

/// Reads the token out of a share URL produced by [`share_url`].
pub fn shared_operation_from_url(share_url: &str) -> Result<SharedOperation> {
    let url = Url::parse(share_url)?;
    let token = url
        .query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(ShareError::MissingToken)?;
    decode_share(&token)
}
