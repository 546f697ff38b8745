/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::Script;
use crate::logging::GlobalLogger;
use crate::script::run_script;

use lalg_config_utils::YamlRead;

use clap::{App, Arg};
use std::ffi::OsStr;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        }
        std::process::exit(1);
    });
}

// %% CRATES: binary: lalg-eval %%
pub fn lalg_eval() {
    wrap_result_main(|| {
        let matches = {
            App::new("lalg-eval")
                .version(env!("CARGO_PKG_VERSION"))
                .about("Evaluates a YAML script of vector and matrix operations.")
                .args(&[
                    Arg::with_name("script")
                        .value_name("SCRIPT")
                        .required(true)
                        .help("YAML script with 'objects' and 'steps'"),
                    Arg::with_name("verbose")
                        .short("v")
                        .long("verbose")
                        .multiple(true)
                        .help("log every operation"),
                    Arg::with_name("log")
                        .long("log")
                        .value_name("FILE")
                        .takes_value(true)
                        .help("also write the log to FILE"),
                ])
        }.get_matches();

        let mut logger = GlobalLogger::new();
        logger.verbosity(matches.occurrences_of("verbose") as i32);
        if let Some(path) = matches.value_of_os("log") {
            logger.path(path);
        }
        logger.apply()?;

        let path = match matches.value_of_os("script") {
            Some(path) => path,
            None => bail!("no script given"),
        };
        let script = Script::from_path(path)?;
        for line in run_script(&script)? {
            println!("{}", line);
        }
        Ok(())
    });
}
