//! Runtime value model: a tagged sum over the variants spec §3 lists.

use std::fmt;
use std::rc::Rc;

use once_cell::sync::Lazy;

use crate::ast::{BlockStatement, Identifier};
use crate::environment::Environment;

/// String tags for each object variant, per spec §6.
pub const NULL_OBJ: &str = "NULL";
pub const INTEGER_OBJ: &str = "INTEGER";
pub const BOOLEAN_OBJ: &str = "BOOLEAN";
pub const STRING_OBJ: &str = "STRING";
pub const ARRAY_OBJ: &str = "ARRAY";
pub const RETURN_VALUE_OBJ: &str = "RETURN_VALUE";
pub const ERROR_OBJ: &str = "ERROR";
pub const FUNCTION_OBJ: &str = "FUNCTION";
pub const BUILTIN_OBJ: &str = "BUILTIN";

pub type BuiltinFn = fn(&[Object]) -> Object;

#[derive(Debug, Clone)]
pub enum Object {
    Null,
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Object>),
    ReturnValue(Box<Object>),
    Error(String),
    Function {
        parameters: Vec<Identifier>,
        body: Rc<BlockStatement>,
        env: Environment,
    },
    Builtin(BuiltinFn),
}

/// The shared `Null`/`True`/`False` singletons. Every site that would
/// otherwise construct one of these values returns this instance instead,
/// so [`Object::ref_eq`] can treat them as identity-comparable.
pub static NULL: Lazy<Object> = Lazy::new(|| Object::Null);
pub static TRUE: Lazy<Object> = Lazy::new(|| Object::Boolean(true));
pub static FALSE: Lazy<Object> = Lazy::new(|| Object::Boolean(false));

/// Maps a host `bool` to the shared `True`/`False` singleton.
pub fn native_bool(value: bool) -> Object {
    if value {
        TRUE.clone()
    } else {
        FALSE.clone()
    }
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => NULL_OBJ,
            Object::Integer(_) => INTEGER_OBJ,
            Object::Boolean(_) => BOOLEAN_OBJ,
            Object::String(_) => STRING_OBJ,
            Object::Array(_) => ARRAY_OBJ,
            Object::ReturnValue(_) => RETURN_VALUE_OBJ,
            Object::Error(_) => ERROR_OBJ,
            Object::Function { .. } => FUNCTION_OBJ,
            Object::Builtin(_) => BUILTIN_OBJ,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Null => "null".to_string(),
            Object::Integer(v) => v.to_string(),
            Object::Boolean(v) => v.to_string(),
            Object::String(v) => v.clone(),
            Object::Array(elems) => {
                let rendered: Vec<String> = elems.iter().map(Object::inspect).collect();
                format!("[{}]", rendered.join(", "))
            }
            Object::ReturnValue(inner) => inner.inspect(),
            Object::Error(message) => format!("ERROR: {message}"),
            Object::Function { parameters, body, .. } => {
                let params: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
        }
    }

    /// Every object except `False` and `Null` is truthy — `0` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Reference-identity equality, used by the evaluator's `==`/`!=`
    /// fallback for non-integer operands (spec §4.3.2). `Null` and
    /// `Boolean` are singletons, so structural and identity comparison
    /// coincide; every other variant (`String`, `Array`, `Function`,
    /// mismatched types) is never identity-equal to a separately
    /// constructed value, even one with identical contents — this is
    /// deliberate, not an oversight (see DESIGN.md).
    pub fn ref_eq(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Null, Object::Null) => true,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Builtin(a), Object::Builtin(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

/// Evaluator errors compare equal only by rendered message text, which is
/// all the object model retains (spec: `Error` carries a `message` string).
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Null, Object::Null) => true,
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::Builtin(a), Object::Builtin(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_renders_variants() {
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(Object::Integer(5).inspect(), "5");
        assert_eq!(Object::Boolean(true).inspect(), "true");
        assert_eq!(Object::String("hi".to_string()).inspect(), "hi");
        assert_eq!(Object::Error("boom".to_string()).inspect(), "ERROR: boom");
    }

    #[test]
    fn array_inspect_joins_elements() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        assert_eq!(arr.inspect(), "[1, 2]");
    }

    #[test]
    fn truthiness() {
        assert!(!Object::Null.is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(Object::Integer(0).is_truthy());
    }

    #[test]
    fn native_bool_returns_singletons() {
        assert_eq!(native_bool(true), *TRUE);
        assert_eq!(native_bool(false), *FALSE);
    }
}
