//! Opt-in verbosity control layered on top of the `log` facade.
//!
//! The rule evaluator always emits `trace!`/`debug!`/`info!` records; a
//! host application's own `log` subscriber decides what to do with them.
//! `TraceLevel` is a convenience for callers (and the demo CLI) who want a
//! single knob instead of configuring their logger directly.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    Off,
    Basic,
    Detailed,
    Trace,
}

impl TraceLevel {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "off" => Ok(TraceLevel::Off),
            "basic" => Ok(TraceLevel::Basic),
            "detailed" => Ok(TraceLevel::Detailed),
            "trace" => Ok(TraceLevel::Trace),
            other => Err(format!("invalid trace level: {other:?}")),
        }
    }

    fn log_level_filter(self) -> log::LevelFilter {
        match self {
            TraceLevel::Off => log::LevelFilter::Off,
            TraceLevel::Basic => log::LevelFilter::Info,
            TraceLevel::Detailed => log::LevelFilter::Debug,
            TraceLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

static TRACE_LEVEL: OnceLock<TraceLevel> = OnceLock::new();

/// Initialize `env_logger` at the given level and record it for
/// [`trace_level`]. Only the first call takes effect; later calls are a
/// harmless no-op (mirrors the teacher's `set_debug_config` guard).
pub fn set_trace_level(level: TraceLevel) {
    if TRACE_LEVEL.set(level).is_err() {
        return;
    }
    let _ = env_logger::Builder::new()
        .filter_level(level.log_level_filter())
        .try_init();
}

pub fn trace_level() -> TraceLevel {
    *TRACE_LEVEL.get().unwrap_or(&TraceLevel::Off)
}
