use colored::*;
use lazy_static::lazy_static;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod catppuccin;
pub mod table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Debug => "debug",
        }
    }
}

/// Where emitted events end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// stdout/stderr, depending on level
    Terminal,
    /// Kept in memory while the TUI owns the screen; see [`take_captured`]
    Capture,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    pub format: OutputFormat,
    pub color: bool,
    pub sink: Sink,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            sink: Sink::Terminal,
        }
    }
}

/// An event recorded while output is captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
}

lazy_static! {
    static ref RENDERER: RwLock<Renderer> = RwLock::new(Renderer::default());
    static ref CAPTURED: RwLock<Option<CapturedEvent>> = RwLock::new(None);
}

static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

pub fn init(format: OutputFormat, color: bool) {
    if let Ok(mut r) = RENDERER.write() {
        r.format = format;
        r.color = color;
    }
}

pub fn set_sink(sink: Sink) {
    if let Ok(mut r) = RENDERER.write() {
        r.sink = sink;
    }
}

/// Take the most recent captured event, leaving none behind
pub fn take_captured() -> Option<CapturedEvent> {
    CAPTURED.write().ok().and_then(|mut slot| slot.take())
}

#[derive(Serialize)]
struct Event<'a> {
    level: &'a str,
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

fn colorize(level: Level, s: &str, enable: bool) -> String {
    if !enable {
        return s.to_string();
    }
    match level {
        Level::Info => s.normal().to_string(),
        Level::Success => s.green().bold().to_string(),
        Level::Warn => s.yellow().bold().to_string(),
        Level::Error => s.red().bold().to_string(),
        Level::Debug => s.cyan().to_string(),
    }
}

fn renderer() -> Renderer {
    RENDERER.read().map(|r| r.clone()).unwrap_or_default()
}

pub fn emit(level: Level, code: &str, message: &str, data: Option<serde_json::Value>) {
    if level == Level::Debug && !is_debug_enabled() {
        return;
    }

    let r = renderer();

    if r.sink == Sink::Capture {
        if let Ok(mut slot) = CAPTURED.write() {
            *slot = Some(CapturedEvent {
                level,
                message: message.to_string(),
            });
        }
        return;
    }

    let line = match r.format {
        OutputFormat::Text => colorize(level, message, r.color),
        OutputFormat::Json => {
            let ev = Event {
                level: level.as_str(),
                code,
                message,
                data,
            };
            match serde_json::to_string(&ev) {
                Ok(s) => s,
                Err(_) => return,
            }
        }
    };

    let mut out: Box<dyn Write> = match level {
        Level::Error | Level::Warn => Box::new(io::stderr()),
        _ => Box::new(io::stdout()),
    };
    let _ = writeln!(out, "{}", line);
}

pub fn get_output_format() -> OutputFormat {
    renderer().format
}

/// Whether text output should be colored
pub fn color_enabled() -> bool {
    renderer().color
}

pub mod prelude {
    pub use super::{Level, OutputFormat, emit, get_output_format};
}
