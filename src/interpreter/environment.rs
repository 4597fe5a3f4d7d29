//! Execution environments and the shared data stack
//!
//! An [`Environment`] is one link in a parent chain created per block
//! invocation. Each link owns a private namespace and an optional implicit
//! iterator slot; all links share the *root* environment's data stack,
//! program parameters and storage collaborator by reference. In ownership
//! terms every child borrows the root's stack for its lifetime; there is
//! exactly one stack per run, visible at every nesting depth.
//!
//! # Underflow
//!
//! `pop` on an empty stack yields [`Value::Absent`] rather than failing.
//! Programs lean on this to terminate gather loops and to seed missing
//! arguments.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::iterator::Iter;
use crate::interpreter::storage::Storage;
use crate::values::Value;

/// State owned by the root environment and shared with every descendant.
pub struct SharedState {
    stack: RefCell<Vec<Value>>,
    parameters: Vec<Value>,
    storage: RefCell<Box<dyn Storage>>,
}

struct EnvData {
    parent: Option<Environment>,
    namespace: RefCell<FxHashMap<String, Value>>,
    implicit: RefCell<Option<Rc<RefCell<Iter>>>>,
    shared: Rc<SharedState>,
}

/// One lexical environment in the chain.
#[derive(Clone)]
pub struct Environment {
    data: Rc<EnvData>,
}

impl Environment {
    /// Create the root environment owning the shared run state.
    ///
    /// Parameter 0 is the program's display name.
    pub fn new_root(parameters: Vec<Value>, storage: Box<dyn Storage>) -> Self {
        Environment {
            data: Rc::new(EnvData {
                parent: None,
                namespace: RefCell::new(FxHashMap::default()),
                implicit: RefCell::new(None),
                shared: Rc::new(SharedState {
                    stack: RefCell::new(Vec::new()),
                    parameters,
                    storage: RefCell::new(storage),
                }),
            }),
        }
    }

    /// Create a child environment sharing the root's stack.
    pub fn child(&self) -> Environment {
        Environment {
            data: Rc::new(EnvData {
                parent: Some(self.clone()),
                namespace: RefCell::new(FxHashMap::default()),
                implicit: RefCell::new(None),
                shared: Rc::clone(&self.data.shared),
            }),
        }
    }

    // --- Stack ------------------------------------------------------------

    pub fn push(&self, value: Value) {
        self.data.shared.stack.borrow_mut().push(value);
    }

    /// Pop the top value; `Absent` on an empty stack.
    pub fn pop(&self) -> Value {
        self.data
            .shared
            .stack
            .borrow_mut()
            .pop()
            .unwrap_or(Value::Absent)
    }

    /// Read the top value without removing it; `Absent` on an empty stack.
    pub fn peek(&self) -> Value {
        self.data
            .shared
            .stack
            .borrow()
            .last()
            .cloned()
            .unwrap_or(Value::Absent)
    }

    /// Copy the value `n` positions below the top onto the top.
    pub fn deep(&self, n: i64) {
        let mut stack = self.data.shared.stack.borrow_mut();
        let len = stack.len();
        if n >= 1 && (n as usize) < len {
            let copied = stack[len - 1 - n as usize].clone();
            stack.push(copied);
        }
    }

    /// The whole stack from bottom to top.
    pub fn stack_contents(&self) -> Vec<Value> {
        self.data.shared.stack.borrow().clone()
    }

    pub fn stack_depth(&self) -> usize {
        self.data.shared.stack.borrow().len()
    }

    // Stack shuffles, each a fixed push sequence over already-popped values.

    /// `a -> a a`
    pub fn dup(&self, x: Value) {
        self.push(x.clone());
        self.push(x);
    }

    /// `a b -> a b a b`
    pub fn dup2(&self, x: Value, y: Value) {
        self.push(x.clone());
        self.push(y.clone());
        self.push(x);
        self.push(y);
    }

    /// `a b -> b a`
    pub fn swap(&self, x: Value, y: Value) {
        self.push(y);
        self.push(x);
    }

    /// `a b c -> b c a`
    pub fn rotate3(&self, x: Value, y: Value, z: Value) {
        self.push(y);
        self.push(z);
        self.push(x);
    }

    /// `a b -> a b a`
    pub fn under(&self, x: Value, y: Value) {
        self.push(x.clone());
        self.push(y);
        self.push(x);
    }

    /// `a b -> a a b`
    pub fn dup_under(&self, x: Value, y: Value) {
        self.push(x.clone());
        self.push(x);
        self.push(y);
    }

    // --- Names ------------------------------------------------------------

    /// Bind a name in this environment's own namespace.
    pub fn assign(&self, name: &str, value: Value) {
        self.data
            .namespace
            .borrow_mut()
            .insert(name.to_string(), value);
    }

    /// Resolve a name through the environment chain.
    ///
    /// `_` resolves to the innermost iterator's current value. A miss at
    /// the root is fatal.
    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        if name == "_" {
            return Ok(self.implicit(0));
        }
        let mut env = Some(self.clone());
        while let Some(current) = env {
            if let Some(value) = current.data.namespace.borrow().get(name) {
                return Ok(value.clone());
            }
            env = current.data.parent.clone();
        }
        Err(RuntimeError::UnboundName {
            name: name.to_string(),
            span: None,
        })
    }

    /// Pop `n` values and bind them as positional locals `local_1..local_n`.
    ///
    /// Values come off oldest-first; a short stack pads the tail with
    /// `Absent`.
    pub fn pin(&self, n: usize) {
        let mut values: Vec<Value> = (0..n).map(|_| self.pop()).collect();
        values.reverse();
        let present: Vec<Value> = values.into_iter().filter(|v| !v.is_absent()).collect();
        for (i, value) in present.iter().enumerate() {
            self.assign(&format!("local_{}", i + 1), value.clone());
        }
        for i in present.len()..n {
            self.assign(&format!("local_{}", i + 1), Value::Absent);
        }
    }

    /// Read pinned local `i` (1-based); `Absent` when unbound.
    pub fn local(&self, i: i64) -> Value {
        self.lookup(&format!("local_{}", i)).unwrap_or(Value::Absent)
    }

    // --- Program parameters -----------------------------------------------

    pub fn parameter(&self, index: usize) -> Option<Value> {
        self.data.shared.parameters.get(index).cloned()
    }

    /// The program's display name (parameter 0).
    pub fn program_name(&self) -> String {
        match self.data.shared.parameters.first() {
            Some(Value::Text(name)) if !name.is_empty() => name.clone(),
            _ => "f".to_string(),
        }
    }

    // --- Implicit iterator values -----------------------------------------

    /// Install a live iterator as this environment's implicit object.
    pub fn install_iterator(&self, iter: Rc<RefCell<Iter>>) {
        *self.data.implicit.borrow_mut() = Some(iter);
    }

    pub fn remove_iterator(&self) {
        *self.data.implicit.borrow_mut() = None;
    }

    /// The current value of the innermost iterator, skipping `back_ref`
    /// enclosing iterators; `Absent` when there is no such loop.
    pub fn implicit(&self, back_ref: usize) -> Value {
        match (self.data.implicit.borrow().as_ref(), back_ref) {
            (Some(iter), 0) => iter.borrow().current.clone(),
            (Some(_), n) => match &self.data.parent {
                Some(parent) => parent.implicit(n - 1),
                None => Value::Absent,
            },
            (None, n) => match &self.data.parent {
                Some(parent) => parent.implicit(n),
                None => Value::Absent,
            },
        }
    }

    /// The previous value of the innermost iterator.
    pub fn previous_implicit(&self) -> Value {
        match self.data.implicit.borrow().as_ref() {
            Some(iter) => iter.borrow().previous.clone(),
            None => match &self.data.parent {
                Some(parent) => parent.previous_implicit(),
                None => Value::Absent,
            },
        }
    }

    /// Ask the innermost enclosing iterator to stop after the current
    /// body run.
    pub fn exit_iteration(&self) {
        if let Some(iter) = self.data.implicit.borrow().as_ref() {
            iter.borrow_mut().request_exit();
            return;
        }
        if let Some(parent) = &self.data.parent {
            parent.exit_iteration();
        }
    }

    // --- File-backed parameters -------------------------------------------

    pub fn load_value(&self) -> Result<Option<String>, RuntimeError> {
        let name = self.program_name();
        self.data.shared.storage.borrow_mut().load_line(&name)
    }

    pub fn save_value(&self, line: &str) -> Result<(), RuntimeError> {
        let name = self.program_name();
        self.data.shared.storage.borrow_mut().save_line(&name, line)
    }

    pub fn file_lines(&self) -> Result<Option<Vec<String>>, RuntimeError> {
        let name = self.program_name();
        self.data.shared.storage.borrow_mut().read_all(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::storage::FileStorage;
    use std::path::PathBuf;

    fn root() -> Environment {
        Environment::new_root(
            vec![Value::Text("f".to_string())],
            Box::new(FileStorage::new(PathBuf::from("."))),
        )
    }

    #[test]
    fn test_pop_underflow_yields_absent() {
        let env = root();
        assert_eq!(env.pop(), Value::Absent);
    }

    #[test]
    fn test_stack_is_shared_down_the_chain() {
        let env = root();
        let inner = env.child().child();
        inner.push(Value::Number(1));
        assert_eq!(env.pop(), Value::Number(1));
    }

    #[test]
    fn test_shuffles() {
        let env = root();
        env.swap(Value::Number(1), Value::Number(2));
        assert_eq!(env.pop(), Value::Number(1));
        assert_eq!(env.pop(), Value::Number(2));

        env.rotate3(Value::Number(1), Value::Number(2), Value::Number(3));
        assert_eq!(env.stack_contents(), vec![
            Value::Number(2),
            Value::Number(3),
            Value::Number(1),
        ]);
    }

    #[test]
    fn test_deep_copies_without_removing() {
        let env = root();
        env.push(Value::Number(10));
        env.push(Value::Number(20));
        env.push(Value::Number(30));
        env.deep(2);
        assert_eq!(env.pop(), Value::Number(10));
        assert_eq!(env.stack_depth(), 3);
    }

    #[test]
    fn test_lookup_walks_the_chain() {
        let env = root();
        env.assign("a", Value::Number(5));
        let inner = env.child();
        assert_eq!(inner.lookup("a").expect("lookup failed"), Value::Number(5));
        assert!(matches!(
            inner.lookup("missing"),
            Err(RuntimeError::UnboundName { .. })
        ));
    }

    #[test]
    fn test_child_bindings_shadow_without_leaking() {
        let env = root();
        env.assign("a", Value::Number(5));
        let inner = env.child();
        inner.assign("a", Value::Number(6));
        assert_eq!(inner.lookup("a").expect("lookup failed"), Value::Number(6));
        assert_eq!(env.lookup("a").expect("lookup failed"), Value::Number(5));
    }

    #[test]
    fn test_pin_pads_with_absent() {
        let env = root();
        env.push(Value::Number(1));
        env.push(Value::Number(2));
        env.pin(3);
        assert_eq!(env.local(1), Value::Number(1));
        assert_eq!(env.local(2), Value::Number(2));
        assert_eq!(env.local(3), Value::Absent);
        assert_eq!(env.stack_depth(), 0);
    }
}
