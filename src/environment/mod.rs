//! Lexically scoped environment chain. `Function` values capture a
//! reference to the environment active at creation time (the closure
//! contract), so frames are shared, heap-allocated, and must outlive any
//! closure that references them — `Rc<RefCell<_>>` is the natural fit.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

struct Frame {
    store: HashMap<String, Object>,
    outer: Option<Environment>,
}

/// A mapping from names to [`Object`]s plus an optional outer environment.
/// Cloning an `Environment` clones the handle, not the frame — all clones
/// observe the same bindings, which is what lets multiple closures share
/// one captured scope.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// Creates the top-level (global) environment.
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            store: HashMap::new(),
            outer: None,
        })))
    }

    /// Creates a nested environment enclosed by `outer`.
    pub fn new_enclosed(outer: Environment) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            store: HashMap::new(),
            outer: Some(outer),
        })))
    }

    /// Looks up `name` in this frame, then walks outer frames until found.
    pub fn get(&self, name: &str) -> Option<Object> {
        let frame = self.0.borrow();
        if let Some(value) = frame.store.get(name) {
            return Some(value.clone());
        }
        frame.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds `name` in the *current* frame. The language has no
    /// reassignment syntax, so this always writes the innermost scope —
    /// there is no separate "assign to outer" operation.
    pub fn set(&self, name: impl Into<String>, value: Object) {
        self.0.borrow_mut().store.insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_walks_outer_chain() {
        let outer = Environment::new();
        outer.set("x", Object::Integer(5));
        let inner = Environment::new_enclosed(outer);
        assert_eq!(inner.get("x"), Some(Object::Integer(5)));
    }

    #[test]
    fn set_always_targets_current_frame() {
        let outer = Environment::new();
        outer.set("x", Object::Integer(1));
        let inner = Environment::new_enclosed(outer.clone());
        inner.set("x", Object::Integer(2));
        assert_eq!(inner.get("x"), Some(Object::Integer(2)));
        assert_eq!(outer.get("x"), Some(Object::Integer(1)));
    }

    #[test]
    fn missing_name_returns_none() {
        let env = Environment::new();
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn clones_share_the_same_frame() {
        let env = Environment::new();
        let handle = env.clone();
        handle.set("x", Object::Integer(42));
        assert_eq!(env.get("x"), Some(Object::Integer(42)));
    }
}
