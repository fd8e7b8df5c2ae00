use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Sends every record to the console and appends it to a log file.
///
/// The console side is `pretty_env_logger` with `info` as the default level,
/// `RUST_LOG` filters apply to both sinks.
pub struct Logger {
    console: Box<dyn Log>,
    file: Mutex<LineWriter<File>>,
    max_level: LevelFilter,
}

impl Logger {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Logger> {
        let mut builder = pretty_env_logger::formatted_timed_builder();
        builder.filter_level(LevelFilter::Info);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        let console = builder.build();
        let max_level = console.filter();

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Logger {
            console: Box::new(console),
            file: Mutex::new(LineWriter::new(file)),
            max_level,
        })
    }

    /// Makes this logger the process-wide `log` backend. Can only succeed once.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let max_level = self.max_level;

        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);

        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        self.console.log(record);

        if let Err(err) = writeln!(self.file(), "{}", FileLine(record)) {
            eprintln!("dockwatch: unable to write log file: {err}");
        }
    }

    fn flush(&self) {
        self.console.flush();

        if let Err(err) = self.file().flush() {
            eprintln!("dockwatch: unable to flush log file: {err}");
        }
    }
}

impl Logger {
    // A panic while holding the lock leaves the writer usable.
    fn file(&self) -> MutexGuard<'_, LineWriter<File>> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct FileLine<'a, 'r>(&'a Record<'r>);

impl fmt::Display for FileLine<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            self.0.level(),
            self.0.args()
        )
    }
}
