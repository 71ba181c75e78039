#![cfg(target_arch = "wasm32")]

use chart_line_tools::domain::logging::{LogComponent, LogLevel, Logger, TimeProvider};
use chart_line_tools::infrastructure::services::{BrowserTimeProvider, ConsoleLogger};
use js_sys::Date;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn browser_clock_formats_local_time() {
    let clock = BrowserTimeProvider::new();
    let ts = 1_700_000_000_123u64;
    let date = Date::new(&JsValue::from_f64(ts as f64));
    assert_eq!(
        clock.format_timestamp(ts),
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    );
    assert!(clock.current_timestamp() > ts);
}

#[wasm_bindgen_test]
fn console_logger_accepts_every_level() {
    let logger = ConsoleLogger::new(LogLevel::Trace);
    logger.trace(LogComponent::Application("Test"), "trace");
    logger.debug(LogComponent::Application("Test"), "debug");
    logger.info(LogComponent::Domain("Test"), "info");
    logger.warn(LogComponent::Presentation("Test"), "warn");
}
