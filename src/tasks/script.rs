/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::{Script, Step, Op};

use lalg_objects::{Value, Vector, Matrix, Scalar, AngleUnit, Error};
use failure::ResultExt;
use itertools::Itertools;
use serde_yaml::Value as YamlValue;

use std::collections::BTreeMap;
use std::fmt;

/// Convert a loosely typed YAML literal into a value.
///
/// A number becomes a scalar, a list of numbers a vector, and a list of
/// lists of numbers a matrix (one list per row).
pub fn value_from_yaml(yaml: &YamlValue) -> Result<Value, Error> {
    match yaml {
        YamlValue::Sequence(items) => match items.first() {
            Some(YamlValue::Sequence(_)) => {
                let rows = items.iter().map(row_from_yaml).collect::<Result<Vec<_>, _>>()?;
                Ok(Matrix::new(rows)?.into())
            },
            _ => Ok(Vector::new(row_from_yaml(yaml)?).into()),
        },
        _ => Ok(scalar_from_yaml(yaml)?.into()),
    }
}

fn row_from_yaml(yaml: &YamlValue) -> Result<Vec<Scalar>, Error> {
    match yaml {
        YamlValue::Sequence(items) => items.iter().map(scalar_from_yaml).collect(),
        _ => Err(Error::type_error(format!(
            "matrix rows must be lists of numbers (got {})", describe(yaml),
        ))),
    }
}

fn scalar_from_yaml(yaml: &YamlValue) -> Result<Scalar, Error> {
    if let YamlValue::Number(x) = yaml {
        if let Some(x) = x.as_i64() {
            return Ok(Scalar::Int(x));
        }
        if let Some(x) = x.as_f64() {
            return Ok(Scalar::Real(x));
        }
    }
    Err(Error::type_error(format!("expected a number (got {})", describe(yaml))))
}

fn describe(yaml: &YamlValue) -> String {
    match yaml {
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => format!("bool {}", b),
        YamlValue::Number(x) => format!("number {:?}", x),
        YamlValue::String(s) => format!("string {:?}", s),
        YamlValue::Sequence(_) => "a list".to_string(),
        YamlValue::Mapping(_) => "a mapping".to_string(),
    }
}

/// Result of a single step.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(Value),
    Bool(bool),
    Real(f64),
    Dimensions(Vec<usize>),
}

impl Outcome {
    /// The value bound by `save:`, if this kind of result can be bound.
    fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::Real(x) => Some(Scalar::Real(x).into()),
            Outcome::Dimensions(ref dims) if dims.len() == 1 => {
                Some(Scalar::Int(dims[0] as i64).into())
            },
            Outcome::Bool(_) | Outcome::Dimensions(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "{}", v),
            Outcome::Bool(b) => write!(f, "{}", b),
            Outcome::Real(x) => write!(f, "{}", Scalar::Real(*x)),
            Outcome::Dimensions(dims) => match &dims[..] {
                [n] => write!(f, "{}", n),
                dims => write!(f, "({})", dims.iter().format(", ")),
            },
        }
    }
}

/// Holds the named objects of a script while its steps run.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    objects: BTreeMap<String, Value>,
}

impl Evaluator {
    pub fn new() -> Self
    { Default::default() }

    pub fn from_script(script: &Script) -> FailResult<Self> {
        let mut out = Evaluator::new();
        for (name, yaml) in &script.objects {
            let value = value_from_yaml(yaml)
                .with_context(|_| format!("in object '{}'", name))?;
            out.insert(name.clone(), value);
        }
        Ok(out)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if self.objects.contains_key(&name) {
            debug!("rebinding '{}'", name);
        }
        self.objects.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value>
    { self.objects.get(name) }

    /// Run one step, returning the line that reports it.
    pub fn run_step(&mut self, step: &Step) -> FailResult<String> {
        let op = step.op;
        if step.args.len() != op.arity() {
            bail!("{} takes {} argument(s) (got {})", op, op.arity(), step.args.len());
        }
        if step.degrees && op != Op::Angle {
            warn!("'degrees' has no effect on {}", op);
        }

        let args = step.args.iter().map(|a| self.resolve(a)).collect::<FailResult<Vec<_>>>()?;
        let outcome = match op.is_in_place() {
            true => self.run_in_place(step, &args)?,
            false => evaluate(step, &args)?,
        };

        let line = format!("{}({}) = {}", op, args.iter().map(|a| &a.label).join(", "), outcome);

        if let Some(name) = &step.save {
            match outcome.into_value() {
                Some(value) => self.insert(name.clone(), value),
                None => bail!("the result of {} cannot be saved", op),
            }
        }
        Ok(line)
    }

    fn resolve(&self, arg: &YamlValue) -> FailResult<Arg> {
        match arg {
            YamlValue::String(name) => match self.objects.get(name) {
                Some(value) => Ok(Arg {
                    label: name.clone(),
                    name: Some(name.clone()),
                    value: value.clone(),
                }),
                None => bail!("no object named '{}'", name),
            },
            _ => {
                let value = value_from_yaml(arg)?;
                Ok(Arg { label: value.to_string(), name: None, value })
            },
        }
    }

    fn run_in_place(&mut self, step: &Step, args: &[Arg]) -> FailResult<Outcome> {
        let name = match &args[0].name {
            Some(name) => name,
            None => bail!("{} modifies its first argument, so it must name an object", step.op),
        };
        let target = match self.objects.get_mut(name) {
            Some(target) => target,
            None => bail!("no object named '{}'", name),
        };

        match step.op {
            Op::Round => target.round(step.places),
            Op::Resize => target.resize(&args[1].value)?,
            _ => bail!("{} is not an in-place operation", step.op),
        }
        Ok(Outcome::Value(target.clone()))
    }
}

struct Arg {
    label: String,
    name: Option<String>,
    value: Value,
}

fn evaluate(step: &Step, args: &[Arg]) -> FailResult<Outcome> {
    let a = &args[0].value;
    let b = || &args[1].value;
    Ok(match step.op {
        Op::Add => Outcome::Value(a.add(b())?),
        Op::Sub => Outcome::Value(a.sub(b())?),
        Op::Mul => Outcome::Value(a.mul(b())?),
        Op::Truediv => Outcome::Value(a.truediv(b())?),
        Op::Floordiv => Outcome::Value(a.floordiv(b())?),
        Op::Eq => Outcome::Bool(a.equals(b())),
        Op::Ne => Outcome::Bool(a.not_equals(b())),
        Op::Dot => Outcome::Value(a.dot(b())?.into()),
        Op::Cross => Outcome::Value(a.cross(b())?.into()),
        Op::Angle => {
            let unit = match step.degrees {
                true => AngleUnit::Degrees,
                false => AngleUnit::Radians,
            };
            Outcome::Real(a.get_angle(b(), unit)?)
        },
        Op::Magnitude => Outcome::Real(a.magnitude()?),
        Op::Dimensions => Outcome::Dimensions(a.dimensions()),
        Op::Rounded => Outcome::Value(lalg_objects::round(a, step.places)),
        Op::Round | Op::Resize => bail!("{} must be run in place", step.op),
    })
}

/// Evaluate every step of a script, returning one line per step.
pub fn run_script(script: &Script) -> FailResult<Vec<String>> {
    let mut evaluator = Evaluator::from_script(script)?;
    info!("{} object(s), {} step(s)", script.objects.len(), script.steps.len());

    let mut lines = vec![];
    for (i, step) in script.steps.iter().enumerate() {
        let line = evaluator.run_step(step)
            .with_context(|_| format!("in step {} ({})", i + 1, step.op))?;
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lalg_config_utils::YamlRead;
    use lalg_objects::ErrorKind;
    use pretty_assertions::assert_eq;

    fn yaml(s: &str) -> YamlValue
    { serde_yaml::from_str(s).unwrap() }

    fn script(s: &str) -> Script
    { Script::from_reader(s.as_bytes()).unwrap() }

    fn objects_error(err: &failure::Error) -> Option<&Error>
    { err.iter_chain().filter_map(|c| c.downcast_ref::<Error>()).next() }

    #[test]
    fn literals() {
        assert_eq!(value_from_yaml(&yaml("3")).unwrap(), Value::Scalar(Scalar::Int(3)));
        assert_eq!(value_from_yaml(&yaml("2.5")).unwrap(), Value::Scalar(Scalar::Real(2.5)));
        assert_eq!(value_from_yaml(&yaml("[1, 2.5]")).unwrap(), Value::Vector(Vector::new(vec![1.0, 2.5])));
        assert_eq!(value_from_yaml(&yaml("[]")).unwrap(), Value::Vector(Vector::zero(0)));
        assert_eq!(
            value_from_yaml(&yaml("[[1, 2], [3, 4]]")).unwrap(),
            Value::Matrix(Matrix::new(vec![vec![1, 2], vec![3, 4]]).unwrap()),
        );
    }

    #[test]
    fn bad_literals() {
        let kind = |s| value_from_yaml(&yaml(s)).unwrap_err().kind();
        assert_eq!(kind("abc"), ErrorKind::Type);
        assert_eq!(kind("[1, x]"), ErrorKind::Type);
        assert_eq!(kind("[true]"), ErrorKind::Type);
        assert_eq!(kind("[[1, 2], 3]"), ErrorKind::Type);
        assert_eq!(kind("{a: 1}"), ErrorKind::Type);
        assert_eq!(kind("[[1, 2], [3]]"), ErrorKind::Dimensions);
    }

    #[test]
    fn runs_every_step() {
        let lines = run_script(&script("
objects:
  a: [1, 3, 7.3]
  b: [2, 2, 2]
  m: [[2, 3], [1, 2]]
steps:
  - {op: add, args: [a, b]}
  - {op: mul, args: [m, [1, 1]], save: c}
  - {op: dot, args: [c, [1, 0]]}
  - {op: magnitude, args: [[3, 4]]}
  - {op: dimensions, args: [m]}
  - {op: eq, args: [b, [2, 2, 2.0]]}
  - {op: floordiv, args: [a, 2]}
")).unwrap();
        assert_eq!(lines, vec![
            "add(a, b) = Vector(3, 5, 9.3)",
            "mul(m, Vector(1, 1)) = Vector(5, 3)",
            "dot(c, Vector(1, 0)) = 5",
            "magnitude(Vector(3, 4)) = 5.0",
            "dimensions(m) = (2, 2)",
            "eq(b, Vector(2, 2, 2)) = true",
            "floordiv(a, 2) = Vector(0, 1, 3)",
        ]);
    }

    #[test]
    fn in_place_steps_modify_the_object() {
        let s = script("
objects:
  v: [1.234, 5.678]
steps:
  - {op: round, args: [v], places: 1}
  - {op: resize, args: [v, 3]}
  - {op: dimensions, args: [v], save: n}
");
        let mut evaluator = Evaluator::from_script(&s).unwrap();
        for step in &s.steps {
            evaluator.run_step(step).unwrap();
        }
        assert_eq!(evaluator.get("v"), Some(&Value::Vector(Vector::new(vec![1.2, 5.7, 0.0]))));
        assert_eq!(evaluator.get("n"), Some(&Value::Scalar(Scalar::Int(3))));
    }

    #[test]
    fn in_place_needs_a_name() {
        let err = run_script(&script("steps: [{op: round, args: [[1.5]]}]")).unwrap_err();
        assert!(format!("{}", err.find_root_cause()).contains("name"), "{}", err);
    }

    #[test]
    fn angle_in_degrees() {
        let s = script("steps: [{op: angle, args: [[1, 0], [0, 2]], degrees: true, save: t}]");
        let mut evaluator = Evaluator::from_script(&s).unwrap();
        evaluator.run_step(&s.steps[0]).unwrap();
        match evaluator.get("t") {
            Some(Value::Scalar(x)) => { assert_close!(x.to_f64(), 90.0); },
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn errors_keep_their_kind() {
        let check = |text: &str, kind: ErrorKind| {
            let err = run_script(&script(text)).unwrap_err();
            match objects_error(&err) {
                Some(e) => assert_eq!(e.kind(), kind, "{}", err),
                None => panic!("unexpected error: {}", err),
            }
        };
        check("steps: [{op: add, args: [[1, 2], [1, 2, 3]]}]", ErrorKind::Dimensions);
        check("steps: [{op: truediv, args: [[1, 2], 0]}]", ErrorKind::Division);
        check("steps: [{op: angle, args: [[0, 0], [1, 0]]}]", ErrorKind::ZeroMagnitude);
        check("steps: [{op: mul, args: [[1, 2], [1, 2]]}]", ErrorKind::Type);
        check("steps: [{op: resize, args: [v, -1]}]\nobjects: {v: [1]}", ErrorKind::Type);
        check("objects: {m: [[1], [2, 3]]}", ErrorKind::Dimensions);
    }

    #[test]
    fn script_errors() {
        let message = |text: &str| format!("{}", run_script(&script(text)).unwrap_err().find_root_cause());
        assert!(message("steps: [{op: add, args: [a, b]}]").contains("no object named 'a'"));
        assert!(message("steps: [{op: add, args: [1]}]").contains("takes 2 argument(s)"));
        assert!(message("steps: [{op: eq, args: [1, 1], save: x}]").contains("cannot be saved"));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Bool(false).to_string(), "false");
        assert_eq!(Outcome::Real(0.5).to_string(), "0.5");
        assert_eq!(Outcome::Dimensions(vec![4]).to_string(), "4");
        assert_eq!(Outcome::Dimensions(vec![]).to_string(), "()");
    }
}
