use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Index of a scope inside [`Var`].
pub type Scope = usize;

#[derive(Debug, Default)]
struct Frame {
    vars: HashMap<Rc<str>, Val>,
    parent: Option<Scope>,
}

/// ## Variable memory
///
/// An arena of scopes linked to their parents by index. The global
/// scope is always present. Scopes are released in reverse order of
/// creation, so a parent always outlives its children.

#[derive(Debug)]
pub struct Var {
    scopes: Vec<Frame>,
}

impl Default for Var {
    fn default() -> Self {
        Var {
            scopes: vec![Frame::default()],
        }
    }
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn global(&self) -> Scope {
        0
    }

    pub fn clear(&mut self) {
        self.scopes.truncate(1);
        self.scopes[0].vars.clear();
    }

    /// Drop every scope except the global one.
    pub fn unwind(&mut self) {
        self.scopes.truncate(1);
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self, parent: Scope) -> Scope {
        debug_assert!(parent < self.scopes.len());
        self.scopes.push(Frame {
            vars: HashMap::new(),
            parent: Some(parent),
        });
        self.scopes.len() - 1
    }

    pub fn pop_scope(&mut self, scope: Scope) {
        debug_assert_eq!(scope + 1, self.scopes.len());
        if scope > 0 {
            self.scopes.truncate(scope);
        }
    }

    /// Create or overwrite `name` in `scope` only.
    pub fn define(&mut self, scope: Scope, name: &str, value: Val) {
        self.scopes[scope].vars.insert(name.into(), value);
    }

    pub fn lookup(&self, scope: Scope, name: &str) -> Result<&Val> {
        match self.find(scope, name) {
            Some(found) => Ok(&self.scopes[found].vars[name]),
            None => Err(error!(UnknownVariable; name)),
        }
    }

    /// Update the nearest scope that already holds `name`,
    /// or define it in `scope` when none does.
    pub fn assign(&mut self, scope: Scope, name: &str, value: Val) {
        match self.find(scope, name) {
            Some(found) => {
                if let Some(var) = self.scopes[found].vars.get_mut(name) {
                    *var = value;
                }
            }
            None => self.define(scope, name, value),
        }
    }

    fn find(&self, scope: Scope, name: &str) -> Option<Scope> {
        let mut current = Some(scope);
        while let Some(index) = current {
            let frame = &self.scopes[index];
            if frame.vars.contains_key(name) {
                return Some(index);
            }
            current = frame.parent;
        }
        None
    }
}
