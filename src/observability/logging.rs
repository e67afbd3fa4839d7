//! Structured console logging.
//!
//! # Responsibilities
//! - Compose log lines from a message, an origin tag and a JSON payload
//! - Color the message by level
//! - Install the `tracing` subscriber that stamps and prints every line
//!
//! # Design Decisions
//! - `Logger` is a cheap `Copy` value handed to whoever logs
//! - Lines go through `tracing`, so request traces and our lines share a sink
//! - Payload objects are pretty-printed with four-space indentation

use std::fmt::{self, Write as _};

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{format::Writer, time::FormatTime, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

/// UTC offset of Asia/Kolkata. The zone has no daylight saving time.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// ANSI sequence restoring the default terminal color.
pub const RESET: &str = "\x1b[0m";

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// ANSI color the message is wrapped in.
    pub fn color(self) -> &'static str {
        match self {
            LogLevel::Info => "\x1b[97m",
            LogLevel::Warning => "\x1b[93m",
            LogLevel::Error => "\x1b[91m",
        }
    }
}

/// A single log line before it is handed to the sink.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: LogLevel,
    pub message: Option<&'a str>,
    pub origin: Option<&'a str>,
    pub data: Option<&'a Value>,
}

impl<'a> Record<'a> {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            message: None,
            origin: None,
            data: None,
        }
    }

    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn origin(mut self, origin: &'a str) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn data(mut self, data: &'a Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Render the record as `[Origin: o - ]<color>message<reset>[ - Data: payload]`.
    pub fn compose(&self) -> String {
        let mut line = String::new();

        if let Some(origin) = self.origin.filter(|o| !o.is_empty()) {
            let _ = write!(line, "Origin: {} - ", origin);
        }

        line.push_str(self.level.color());
        line.push_str(self.message.unwrap_or_default());
        line.push_str(RESET);

        if let Some(payload) = self.data.and_then(render_payload) {
            let _ = write!(line, " - Data: {}", payload);
        }

        line
    }
}

/// Text form of a payload, or `None` when there is nothing worth printing.
fn render_payload(data: &Value) -> Option<String> {
    match data {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => Some(to_pretty_json(data)),
        other => Some(other.to_string()),
    }
}

fn to_pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Leveled logger with origin tags and structured payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Logger {
    pub fn info(&self, message: &str, origin: Option<&str>, data: Option<&Value>) {
        self.log(&build(LogLevel::Info, message, origin, data));
    }

    pub fn warning(&self, message: &str, origin: Option<&str>, data: Option<&Value>) {
        self.log(&build(LogLevel::Warning, message, origin, data));
    }

    pub fn error(&self, message: &str, origin: Option<&str>, data: Option<&Value>) {
        self.log(&build(LogLevel::Error, message, origin, data));
    }

    /// Emit a prepared record through `tracing`.
    pub fn log(&self, record: &Record<'_>) {
        let line = record.compose();
        match record.level {
            LogLevel::Info => tracing::info!("{}", line),
            LogLevel::Warning => tracing::warn!("{}", line),
            LogLevel::Error => tracing::error!("{}", line),
        }
    }
}

fn build<'a>(
    level: LogLevel,
    message: &'a str,
    origin: Option<&'a str>,
    data: Option<&'a Value>,
) -> Record<'a> {
    Record {
        level,
        message: Some(message),
        origin,
        data,
    }
}

/// Process-wide logger for code that has no injected one.
pub fn logger() -> Logger {
    static LOGGER: Logger = Logger;
    LOGGER
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("+05:30 is a valid UTC offset")
}

/// RFC 3339 timestamp in Asia/Kolkata with millisecond precision.
pub fn format_ist(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&ist())
        .to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Timer stamping events in Asia/Kolkata.
#[derive(Debug, Clone, Copy, Default)]
pub struct IstTime;

impl FormatTime for IstTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.write_str(&format_ist(Utc::now()))
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Event format producing `<timestamp> - <LEVEL> - <message>`.
#[derive(Debug, Clone, Default)]
pub struct ConsoleFormat<T = IstTime> {
    timer: T,
}

// Writes the message verbatim so the ANSI colors composed by `Record` survive.
#[derive(Default)]
struct RawFields {
    message: String,
    extra: String,
}

impl Visit for RawFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.extra, " {}={:?}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.extra, " {}={:?}", field.name(), value);
        }
    }
}

impl<S, N, T> FormatEvent<S, N> for ConsoleFormat<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;
        write!(writer, " - {} - ", level_name(event.metadata().level()))?;
        let mut fields = RawFields::default();
        event.record(&mut fields);
        writeln!(writer, "{}{}", fields.message, fields.extra)
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().event_format(ConsoleFormat::<IstTime>::default()))
        .init();
}
