//! Browser logging setup

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_web::MakeWebConsoleWriter;

/// Route `tracing` events and `log` records to the browser console
pub fn init(level: Level) {
    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_span_events(FmtSpan::NONE)
        .with_writer(MakeWebConsoleWriter::new().with_max_level(level));

    let subscriber = tracing_subscriber::registry().with(fmt_layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }

    wasm_logger::init(wasm_logger::Config::new(to_log_level(level)));
}

const fn to_log_level(level: Level) -> log::Level {
    match level {
        Level::ERROR => log::Level::Error,
        Level::WARN => log::Level::Warn,
        Level::INFO => log::Level::Info,
        Level::DEBUG => log::Level::Debug,
        Level::TRACE => log::Level::Trace,
    }
}
