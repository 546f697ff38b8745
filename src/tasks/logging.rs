/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use std::fmt;
use std::path::{Path, PathBuf};
use log::{Level, LevelFilter};

const LALG_CRATES: &[&str] = &[
    "lalg",
    "lalg_tasks",
    "lalg_objects",
    "lalg_slice_math",
    "lalg_config_utils",
];

/// Builder-style setup for logging
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl GlobalLogger {
    pub fn new() -> Self
    { Default::default() }

    /// Also write the log to this file.  The file is truncated.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: i32) -> &mut Self
    {
        self.verbosity = match level > 0 {
            true => Verbosity::Loud,
            false => Verbosity::Default,
        };
        self
    }

    fn lalg_level(&self) -> LevelFilter {
        match self.verbosity {
            Verbosity::Default => LevelFilter::Info,
            Verbosity::Loud => LevelFilter::Trace,
        }
    }

    /// Install the logger.  Fails if a logger was already installed.
    pub fn apply(&mut self) -> FailResult<()>
    {
        use std::time::Instant;

        let start = Instant::now();
        let mut dispatch = fern::Dispatch::new()
            .format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    record.target(),
                    ColorizedLevel(record.level()),
                    message))
            })
            .level(LevelFilter::Info);

        for &krate in LALG_CRATES {
            dispatch = dispatch.level_for(krate, self.lalg_level());
        }

        // stdout is reserved for results
        dispatch = dispatch.chain(std::io::stderr());
        if let Some(path) = self.path.as_ref() {
            dispatch = dispatch.chain(fern::log_file(path)?);
        }

        dispatch.apply()?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.0 {
            Level::Error => ansi_term::Colour::Red.bold(),
            Level::Warn  => ansi_term::Colour::Red.normal(),
            Level::Info  => ansi_term::Colour::Cyan.bold(),
            Level::Debug => ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(self.0.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_saturates() {
        assert_eq!(GlobalLogger::new().lalg_level(), LevelFilter::Info);
        assert_eq!(GlobalLogger::new().verbosity(-3).lalg_level(), LevelFilter::Info);
        assert_eq!(GlobalLogger::new().verbosity(1).lalg_level(), LevelFilter::Trace);
        assert_eq!(GlobalLogger::new().verbosity(10).lalg_level(), LevelFilter::Trace);
    }

    #[test]
    fn colorized_level_keeps_the_name() {
        let s = ColorizedLevel(Level::Warn).to_string();
        assert!(s.contains("WARN"), "{:?}", s);
    }
}
