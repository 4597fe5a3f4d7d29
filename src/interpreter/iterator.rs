//! The iterator protocol
//!
//! All looping in the language runs through one state machine: evaluate
//! `init` to seed the current value, then repeat *condition → body →
//! update* until the condition is falsy or an exit is requested. The
//! different loop flavors (ascending and descending integer ranges,
//! null-skipping sequence traversal, regularly spaced slices, and fully
//! general three-thunk loops) differ only in which [`Step`]s they plug
//! into the three slots; the driving loop in the engine never branches on
//! flavor.
//!
//! While a loop runs, its iterator is installed as the enclosing
//! environment's implicit object: `_` reads the current value, `⍛` the
//! previous one, and circled-digit glyphs reach outer loops by depth.
//! `⌁` requests exit; the body always finishes, and the flag short-circuits
//! the next condition check.

use crate::interpreter::closure::Callable;
use crate::interpreter::errors::RuntimeError;
use crate::values::slice::Slice;
use crate::values::{List, Value};

/// Loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    NotStarted,
    Running,
    Exited,
}

/// Which of the three protocol slots to evaluate.
#[derive(Debug, Clone, Copy)]
pub enum StepSlot {
    Init,
    Cond,
    Update,
}

/// One deferred computation in an iterator's protocol.
///
/// Only [`Step::Run`] executes program code; the engine evaluates it and
/// pops the result. Everything else is resolved against the iterator's own
/// state.
#[derive(Clone)]
pub enum Step {
    /// Yield a fixed value.
    Const(Value),
    /// Condition: current value strictly below the bound.
    Below(i64),
    /// Condition: current value strictly above the bound.
    Above(i64),
    /// Update: current value plus a fixed stride.
    Add(i64),
    /// Run a deferred callable and take what it leaves on the stack.
    Run(Callable),
    /// Sequence flavor: move to the first non-null slot.
    SeqFirst,
    /// Sequence flavor: is the cursor still in range?
    SeqMore,
    /// Sequence flavor: advance to the next non-null slot.
    SeqNext,
}

struct SeqCursor {
    items: Vec<Value>,
    pos: usize,
}

/// A live loop: three protocol steps plus the produced values.
pub struct Iter {
    init: Step,
    cond: Step,
    update: Step,
    pub current: Value,
    pub previous: Value,
    pub state: IterState,
    exit_requested: bool,
    seq: Option<SeqCursor>,
}

impl Iter {
    fn new(init: Step, cond: Step, update: Step) -> Self {
        Iter {
            init,
            cond,
            update,
            current: Value::Absent,
            previous: Value::Absent,
            state: IterState::NotStarted,
            exit_requested: false,
            seq: None,
        }
    }

    /// Count from 1 up to `n`, or from `|n|` down to 1 for negative `n`.
    pub fn range(n: i64) -> Self {
        if n > 0 {
            Iter::new(
                Step::Const(Value::Number(1)),
                Step::Below(n + 1),
                Step::Add(1),
            )
        } else {
            Iter::new(
                Step::Const(Value::Number(-n)),
                Step::Above(0),
                Step::Add(-1),
            )
        }
    }

    /// The arithmetic progression a slice designates (stop exclusive).
    pub fn from_slice(slice: &Slice) -> Self {
        let (start, stop, step) = slice.progression();
        let cond = if step >= 0 {
            Step::Below(stop)
        } else {
            Step::Above(stop)
        };
        Iter::new(Step::Const(Value::Number(start)), cond, Step::Add(step))
    }

    /// Traverse a sequence of values, skipping null slots.
    pub fn sequence(items: Vec<Value>) -> Self {
        let mut iter = Iter::new(Step::SeqFirst, Step::SeqMore, Step::SeqNext);
        iter.seq = Some(SeqCursor { items, pos: 0 });
        iter
    }

    /// General three-thunk loop: each slot is either a fixed number
    /// (seed / bound / stride) or a deferred callable.
    pub fn general(init: Value, cond: Value, update: Value) -> Self {
        let descending = matches!(update, Value::Number(n) if n < 0);

        let init_step = match init {
            Value::Function(c) => Step::Run(c),
            other => Step::Const(other),
        };
        let cond_step = match cond {
            Value::Function(c) => Step::Run(c),
            Value::Number(bound) => {
                if descending {
                    Step::Above(bound)
                } else {
                    Step::Below(bound)
                }
            }
            other => Step::Const(other),
        };
        let update_step = match update {
            Value::Function(c) => Step::Run(c),
            Value::Number(stride) => Step::Add(stride),
            other => Step::Const(other),
        };

        Iter::new(init_step, cond_step, update_step)
    }

    /// Build the natural iterator for any value: numbers count, text walks
    /// characters, lists and coordinates walk their items, slices generate
    /// their progression, null is empty, and anything else is a one-shot.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => Iter::range(*n),
            Value::Text(s) => Iter::sequence(List::characters(s).raw()),
            Value::List(l) => Iter::sequence(l.raw()),
            Value::Coordinate(c) => {
                Iter::sequence(c.values().iter().map(|v| Value::Number(*v)).collect())
            }
            Value::Slice(s) => Iter::from_slice(s),
            Value::Absent => Iter::sequence(Vec::new()),
            other => Iter::sequence(vec![other.clone()]),
        }
    }

    /// Stop after the current body run; the next condition check fails.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub(crate) fn step(&self, slot: StepSlot) -> Step {
        match slot {
            StepSlot::Init => self.init.clone(),
            StepSlot::Cond => self.cond.clone(),
            StepSlot::Update => self.update.clone(),
        }
    }

    /// Current value as an integer, required by range-style steps.
    pub(crate) fn current_int(&self) -> Result<i64, RuntimeError> {
        self.current.int_value().ok_or(RuntimeError::TypeMismatch {
            expected: "numeric loop value",
            got: self.current.type_tag().to_string(),
            span: None,
        })
    }

    // Sequence cursor steps. The cursor belongs to the iterator so that
    // all three slots observe the same position.

    pub(crate) fn seq_first(&mut self) -> Value {
        let Some(seq) = self.seq.as_mut() else {
            return Value::Absent;
        };
        seq.pos = 0;
        while seq.pos < seq.items.len() && seq.items[seq.pos].is_absent() {
            seq.pos += 1;
        }
        seq.items.get(seq.pos).cloned().unwrap_or(Value::Absent)
    }

    pub(crate) fn seq_more(&self) -> Value {
        let more = match &self.seq {
            Some(seq) => seq.pos < seq.items.len(),
            None => false,
        };
        Value::Number(more as i64)
    }

    pub(crate) fn seq_next(&mut self) -> Value {
        let Some(seq) = self.seq.as_mut() else {
            return Value::Absent;
        };
        seq.pos += 1;
        while seq.pos < seq.items.len() && seq.items[seq.pos].is_absent() {
            seq.pos += 1;
        }
        seq.items.get(seq.pos).cloned().unwrap_or(Value::Absent)
    }
}

impl std::fmt::Debug for Iter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("state", &self.state)
            .field("exit_requested", &self.exit_requested)
            .finish()
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use crate::interpreter::engine::Interpreter;
use crate::interpreter::environment::Environment;

impl Interpreter {
    /// Drive an iterator over a body.
    ///
    /// The iterator is installed as the environment's implicit object for
    /// the duration of the loop, then removed. Every iteration runs the
    /// body in a fresh child environment so closures created inside see
    /// the loop state as of their own invocation. The condition is
    /// re-evaluated after every update, and an exit request is honored
    /// right after the running body completes.
    pub fn run_iterator(
        &self,
        env: &Environment,
        iter: Rc<RefCell<Iter>>,
        body: &Callable,
    ) -> Result<(), RuntimeError> {
        env.install_iterator(Rc::clone(&iter));
        iter.borrow_mut().state = IterState::Running;

        let first = self.iter_step(env, &iter, StepSlot::Init)?;
        {
            let mut it = iter.borrow_mut();
            it.previous = std::mem::replace(&mut it.current, first);
        }

        loop {
            if iter.borrow().exit_requested {
                break;
            }
            let go_on = self.iter_step(env, &iter, StepSlot::Cond)?;
            if !go_on.truthy() {
                break;
            }

            let body_env = env.child();
            self.run_callable(&body_env, body)?;

            if iter.borrow().exit_requested {
                break;
            }
            let next = self.iter_step(env, &iter, StepSlot::Update)?;
            {
                let mut it = iter.borrow_mut();
                it.previous = std::mem::replace(&mut it.current, next);
            }
        }

        iter.borrow_mut().state = IterState::Exited;
        env.remove_iterator();
        Ok(())
    }

    /// Evaluate one protocol step.
    ///
    /// The step is cloned out first so that code run by [`Step::Run`] can
    /// freely read the iterator (the implicit glyphs do exactly that).
    fn iter_step(
        &self,
        env: &Environment,
        iter: &Rc<RefCell<Iter>>,
        slot: StepSlot,
    ) -> Result<Value, RuntimeError> {
        let step = iter.borrow().step(slot);
        match step {
            Step::Const(v) => Ok(v),
            Step::Below(bound) => {
                let current = iter.borrow().current_int()?;
                Ok(Value::Number((current < bound) as i64))
            }
            Step::Above(bound) => {
                let current = iter.borrow().current_int()?;
                Ok(Value::Number((current > bound) as i64))
            }
            Step::Add(stride) => {
                let current = iter.borrow().current_int()?;
                current
                    .checked_add(stride)
                    .map(Value::Number)
                    .ok_or(RuntimeError::Overflow {
                        operation: format!("{} + {}", current, stride),
                        span: None,
                    })
            }
            Step::Run(callable) => {
                self.run_callable(env, &callable)?;
                Ok(env.pop())
            }
            Step::SeqFirst => Ok(iter.borrow_mut().seq_first()),
            Step::SeqMore => Ok(iter.borrow().seq_more()),
            Step::SeqNext => Ok(iter.borrow_mut().seq_next()),
        }
    }
}
