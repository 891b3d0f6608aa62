//! The fixed name → builtin table (spec §4.3.3), plus the `exit` builtin
//! some builds expose (spec §9, Design Notes), gated by [`OnExit`].

use once_cell::sync::Lazy;
use std::cell::Cell;
use std::collections::HashMap;

use crate::error::EvalError;
use crate::object::{Object, NULL};

/// Configuration switch for the `exit` builtin. Defaults to `ReturnNull`
/// so tests can exercise the call site without killing the test runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnExit {
    #[default]
    ReturnNull,
    TerminateProcess,
}

thread_local! {
    // The core is single-threaded (spec §5); a thread-local is the
    // simplest way to let the `exit` builtin — a bare `fn` pointer, like
    // every other entry in this table — see the active Evaluator's config
    // without threading it through the builtin call signature.
    static ON_EXIT: Cell<OnExit> = const { Cell::new(OnExit::ReturnNull) };
}

pub fn set_on_exit(mode: OnExit) {
    ON_EXIT.with(|cell| cell.set(mode));
}

pub static BUILTINS: Lazy<HashMap<&'static str, Object>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, Object> = HashMap::new();
    m.insert("len", Object::Builtin(len));
    m.insert("first", Object::Builtin(first));
    m.insert("last", Object::Builtin(last));
    m.insert("rest", Object::Builtin(rest));
    m.insert("push", Object::Builtin(push));
    m.insert("pop", Object::Builtin(pop));
    m.insert("exit", Object::Builtin(exit));
    m
});

pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS.get(name).cloned()
}

fn arity_error(got: usize, want: usize) -> Object {
    if got > want {
        Object::Error(EvalError::TooManyArgs { got, want }.to_string())
    } else {
        Object::Error(EvalError::TooFewArgs { got, want }.to_string())
    }
}

fn len(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(elems) => Object::Integer(elems.len() as i64),
        other => Object::Error(
            EvalError::TypeNotSupported {
                builtin: "len",
                type_name: other.type_name(),
            }
            .to_string(),
        ),
    }
}

fn first(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elems) => elems.first().cloned().unwrap_or(NULL.clone()),
        other => Object::Error(
            EvalError::ArrayNeeded {
                builtin: "first",
                type_name: other.type_name(),
            }
            .to_string(),
        ),
    }
}

fn last(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elems) => elems.last().cloned().unwrap_or(NULL.clone()),
        other => Object::Error(
            EvalError::ArrayNeeded {
                builtin: "last",
                type_name: other.type_name(),
            }
            .to_string(),
        ),
    }
}

fn rest(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elems) => {
            if elems.is_empty() {
                NULL.clone()
            } else {
                Object::Array(elems[1..].to_vec())
            }
        }
        other => Object::Error(
            EvalError::ArrayNeeded {
                builtin: "rest",
                type_name: other.type_name(),
            }
            .to_string(),
        ),
    }
}

fn push(args: &[Object]) -> Object {
    if args.len() != 2 {
        return arity_error(args.len(), 2);
    }
    match &args[0] {
        Object::Array(elems) => {
            let mut new_elems = elems.clone();
            new_elems.push(args[1].clone());
            Object::Array(new_elems)
        }
        other => Object::Error(
            EvalError::ArrayNeeded {
                builtin: "push",
                type_name: other.type_name(),
            }
            .to_string(),
        ),
    }
}

fn exit(args: &[Object]) -> Object {
    let code = match args.first() {
        None => 0,
        Some(Object::Integer(n)) => *n as i32,
        Some(other) => {
            return Object::Error(
                EvalError::TypeNotSupported {
                    builtin: "exit",
                    type_name: other.type_name(),
                }
                .to_string(),
            )
        }
    };
    match ON_EXIT.with(|cell| cell.get()) {
        OnExit::ReturnNull => NULL.clone(),
        OnExit::TerminateProcess => std::process::exit(code),
    }
}

fn pop(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elems) => {
            if elems.is_empty() {
                NULL.clone()
            } else {
                Object::Array(elems[..elems.len() - 1].to_vec())
            }
        }
        other => Object::Error(
            EvalError::ArrayNeeded {
                builtin: "pop",
                type_name: other.type_name(),
            }
            .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Object]) -> Object {
        let Object::Builtin(f) = lookup(name).unwrap() else {
            panic!("not a builtin");
        };
        f(args)
    }

    #[test]
    fn len_of_string_and_array() {
        assert_eq!(
            call("len", &[Object::String("hello".to_string())]),
            Object::Integer(5)
        );
        assert_eq!(
            call("len", &[Object::Array(vec![Object::Integer(1), Object::Integer(2)])]),
            Object::Integer(2)
        );
    }

    #[test]
    fn len_rejects_unsupported_type() {
        let result = call("len", &[Object::Integer(1)]);
        assert!(matches!(result, Object::Error(_)));
    }

    #[test]
    fn first_and_last_on_empty_array_are_null() {
        assert_eq!(call("first", &[Object::Array(vec![])]), Object::Null);
        assert_eq!(call("last", &[Object::Array(vec![])]), Object::Null);
    }

    #[test]
    fn rest_drops_first_element() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)]);
        assert_eq!(
            call("rest", &[arr]),
            Object::Array(vec![Object::Integer(2), Object::Integer(3)])
        );
    }

    #[test]
    fn push_returns_new_array_without_mutating_original() {
        let original = vec![Object::Integer(1), Object::Integer(2)];
        let arr = Object::Array(original.clone());
        let result = call("push", &[arr.clone(), Object::Integer(3)]);
        assert_eq!(
            result,
            Object::Array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)])
        );
        assert_eq!(arr, Object::Array(original));
    }

    #[test]
    fn pop_drops_last_element() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        assert_eq!(call("pop", &[arr]), Object::Array(vec![Object::Integer(1)]));
        assert_eq!(call("pop", &[Object::Array(vec![])]), Object::Null);
    }

    #[test]
    fn exit_defaults_to_returning_null() {
        set_on_exit(OnExit::ReturnNull);
        assert_eq!(call("exit", &[Object::Integer(1)]), Object::Null);
        assert_eq!(call("exit", &[]), Object::Null);
    }

    #[test]
    fn arity_violations_are_errors() {
        assert!(matches!(call("len", &[]), Object::Error(_)));
        assert!(matches!(
            call("len", &[Object::Integer(1), Object::Integer(2)]),
            Object::Error(_)
        ));
    }
}
