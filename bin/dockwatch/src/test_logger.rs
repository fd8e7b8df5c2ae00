//! Captures `log` records per test thread so tests can assert on them.

use std::cell::RefCell;

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

/// Installs the capturing logger and clears this thread's records.
pub fn capture() {
    // another test may have installed it already
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);

    RECORDS.with(|records| records.borrow_mut().clear());
}

pub fn records() -> Vec<(Level, String)> {
    RECORDS.with(|records| records.borrow().clone())
}

pub fn messages_at(level: Level) -> Vec<String> {
    records()
        .into_iter()
        .filter(|(record_level, _)| *record_level == level)
        .map(|(_, message)| message)
        .collect()
}
