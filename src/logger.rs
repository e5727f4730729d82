//! `log` backend writing formatted records into a host supplied sink
//!
//! The host decides where lines go (serial port, stderr, a capture buffer)
//! by handing over any `core::fmt::Write + Send` with static lifetime.

use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

pub type Sink = &'static mut (dyn Write + Send);

static SINK: Mutex<Option<Sink>> = Mutex::new(None);
static LOGGER: SinkLogger = SinkLogger {};

pub struct SinkLogger {}

impl Log for SinkLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = SINK.lock().as_mut() {
            let _ = writeln!(
                sink,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Replaces the sink, returning the previous one.
pub fn set_sink(sink: Sink) -> Option<Sink> {
    SINK.lock().replace(sink)
}

/// Detaches the sink; records are dropped until a new one is set.
pub fn take_sink() -> Option<Sink> {
    SINK.lock().take()
}

/// Installs the logger with `sink` as output. Fails if another logger is
/// already installed; the sink is kept either way.
pub fn init_logger(sink: Sink, level: LevelFilter) -> Result<(), SetLoggerError> {
    set_sink(sink);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
