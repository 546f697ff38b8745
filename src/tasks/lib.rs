/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Front-end for lalg: YAML evaluation scripts, logging setup, and the
//! functions behind each binary.

#[macro_use] extern crate log;
#[macro_use] extern crate failure;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate lalg_config_utils;
#[cfg(test)] #[macro_use] extern crate lalg_assert_close;

pub type FailResult<T> = Result<T, failure::Error>;

pub use crate::config::{Script, Step, Op};
mod config;

pub use crate::script::{Evaluator, Outcome, run_script, value_from_yaml};
mod script;

pub use crate::logging::GlobalLogger;
mod logging;

pub mod entry_points;
