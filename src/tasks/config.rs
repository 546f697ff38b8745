/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// NOTE: Read these types through the YamlRead trait, so that typos in
//       scripts produce warnings.

use serde_yaml::Value as YamlValue;

use std::collections::BTreeMap;
use std::fmt;

/// Root object of an evaluation script.
///
/// # Example:
///
/// ```yaml
/// objects:
///   a: [1, 2, 3]
///   m: [[2, 3], [1, 2]]
/// steps:
///   - op: mul
///     args: [m, [1, 1]]
///     save: b
///   - op: angle
///     args: [a, [1, 0, 0]]
///     degrees: true
/// ```
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Script {
    /// Named literals: a number, a list of numbers (a vector), or a list of
    /// lists of numbers (the rows of a matrix).
    #[serde(default)]
    pub objects: BTreeMap<String, YamlValue>,

    /// Evaluated in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}
derive_yaml_read!{Script}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Step {
    pub op: Op,

    /// Each argument is either the name of an object or an inline literal.
    #[serde(default)]
    pub args: Vec<YamlValue>,

    /// Bind the result to this name.
    #[serde(default)]
    pub save: Option<String>,

    /// `angle` only.  Report the angle in degrees instead of radians.
    #[serde(default)]
    pub degrees: bool,

    /// `round` and `rounded` only.  May be negative.
    #[serde(default)]
    pub places: i32,
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Op {
    Add,
    Sub,
    Mul,
    Truediv,
    Floordiv,
    Eq,
    Ne,
    Dot,
    Cross,
    Angle,
    Magnitude,
    Dimensions,
    /// In place.
    Round,
    Rounded,
    /// In place.
    Resize,
}

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Truediv => "truediv",
            Op::Floordiv => "floordiv",
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Dot => "dot",
            Op::Cross => "cross",
            Op::Angle => "angle",
            Op::Magnitude => "magnitude",
            Op::Dimensions => "dimensions",
            Op::Round => "round",
            Op::Rounded => "rounded",
            Op::Resize => "resize",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Op::Magnitude | Op::Dimensions | Op::Round | Op::Rounded => 1,
            _ => 2,
        }
    }

    /// Ops that modify their first argument, which must therefore be a name.
    pub fn is_in_place(self) -> bool {
        match self {
            Op::Round | Op::Resize => true,
            _ => false,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { f.write_str(self.name()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lalg_config_utils::YamlRead;

    #[test]
    fn defaults() {
        let script = Script::from_reader("steps: [{op: magnitude, args: [[3, 4]]}]".as_bytes()).unwrap();
        assert!(script.objects.is_empty());
        assert_eq!(script.steps.len(), 1);

        let step = &script.steps[0];
        assert_eq!(step.op, Op::Magnitude);
        assert_eq!(step.save, None);
        assert_eq!(step.degrees, false);
        assert_eq!(step.places, 0);
    }

    #[test]
    fn unknown_op_is_an_error() {
        let err = Script::from_reader("steps: [{op: frobnicate, args: []}]".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("frobnicate"), "{}", err);
    }

    #[test]
    fn in_place_ops() {
        let in_place: Vec<_> = [Op::Add, Op::Round, Op::Rounded, Op::Resize, Op::Magnitude]
            .iter().filter(|op| op.is_in_place()).cloned().collect();
        assert_eq!(in_place, vec![Op::Round, Op::Resize]);
    }

    #[test]
    fn names_round_trip_through_serde() {
        for &op in &[Op::Add, Op::Truediv, Op::Floordiv, Op::Ne, Op::Rounded, Op::Resize] {
            let yaml = serde_yaml::to_string(&op).unwrap();
            assert!(yaml.contains(op.name()), "{} vs {}", yaml, op);
        }
    }
}
