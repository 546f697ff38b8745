/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

use failure::{Error, ResultExt};

use std::io::Read;
use std::path::Path;

/// Alternative to `serde_yaml::from_reader` that warns about unused keys.
///
/// Implement it with `derive_yaml_read!`; the deserialization code is then
/// generated once, in the crate that owns the type.
pub trait YamlRead: for <'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|_| format!("could not open {}", path.display()))?;
        let out = YamlRead::from_dyn_reader(&mut file)
            .with_context(|_| format!("while reading {}", path.display()))?;
        Ok(out)
    }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, Error> {
        // serde_ignored needs a Deserializer, and serde_yaml only offers one
        // through Value.  Errors coming back through serde_ignored lose their
        // location info, so on failure the text is parsed a second time
        // without it to get a useful message.
        let mut s = String::new();
        r.read_to_string(&mut s)?;

        let value = value_from_str(&s)?;
        match Self::__serde_ignored__from_value(value) {
            Ok(out) => Ok(out),
            Err(first) => match Self::__serde_yaml__from_str(&s) {
                Err(e) => Err(e),
                // can't happen unless the two paths disagree
                Ok(_) => Err(first),
            },
        }
    }

    #[doc(hidden)]
    fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<Self, Error>;
    #[doc(hidden)]
    fn __serde_yaml__from_str(s: &str) -> Result<Self, Error>;
}

#[macro_export]
macro_rules! derive_yaml_read {
    ($Type:ty) => {
        const _: () = {
            use std::result::Result;
            use std::convert::Into;
            use $crate::reexports::serde_yaml;
            use $crate::reexports::serde_ignored;
            use $crate::reexports::failure::Error;
            use $crate::reexports::log::warn;

            impl $crate::YamlRead for $Type {
                fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<$Type, Error> {
                    serde_ignored::deserialize(
                        value,
                        |path| warn!("Unused config item (possible typo?): {}", path),
                    ).map_err(Into::into)
                }

                fn __serde_yaml__from_str(s: &str) -> Result<$Type, Error> {
                    serde_yaml::from_str(s).map_err(Into::into)
                }
            }
        };
    };
}

derive_yaml_read!{serde_yaml::Value}

fn value_from_str(r: &str) -> Result<serde_yaml::Value, Error>
{ serde_yaml::from_str(r).map_err(Into::into) }
