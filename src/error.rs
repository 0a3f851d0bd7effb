use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// A browser API call failed or returned an unexpected value.
    #[error("dom: {0}")]
    Dom(String),
    #[error("world module `poopySnake` is not loaded")]
    MissingModule,
    #[error("world module does not export its memory")]
    MissingMemory,
    #[error("canvas has no 2d context")]
    Context,
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        UiError::Dom(msg)
    }
}

