/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Reading of YAML documents.
//!
//! Types implement [`YamlRead`] through [`derive_yaml_read!`]. Unrecognized
//! keys are reported through `log::warn!` rather than rejected, so that a
//! typo in a script is visible without making the script unusable.

pub use self::monomorphize::YamlRead;
#[macro_use]
mod monomorphize;

#[doc(hidden)] // used by macro
pub mod reexports {
    pub use failure;
    pub use log;
    pub use serde_ignored;
    pub use serde_yaml;
}

pub type FailResult<T> = Result<T, failure::Error>;
