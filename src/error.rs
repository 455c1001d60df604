//! Error type for the wasm boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    /// The host page is missing a required global (window, document, body)
    #[error("document unavailable: {0}")]
    Dom(&'static str),

    /// A DOM operation was rejected by the host
    #[error("DOM operation failed: {0}")]
    Js(String),

    /// The JSON options object failed to parse
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(format!("{value:?}"))
    }
}

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
