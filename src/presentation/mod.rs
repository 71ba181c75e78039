pub mod options_json;
pub mod wasm_api;

pub use wasm_api::LineToolsApi;
