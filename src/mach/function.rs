use super::{Address, Program};
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

/// ## A function body
///
/// A view into the program that defined it.

#[derive(Debug, Clone)]
pub struct Body {
    pub program: Program,
    pub range: Range<Address>,
}

/// ## User-defined functions
///
/// One table for a whole run. Defining a name again replaces it.

#[derive(Debug, Default)]
pub struct Function {
    table: HashMap<Rc<str>, Body>,
}

impl Function {
    pub fn new() -> Function {
        Function::default()
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn define(&mut self, name: &str, program: &Program, range: Range<Address>) {
        self.table.insert(
            name.into(),
            Body {
                program: program.clone(),
                range,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redefine_replaces() {
        let first = Program::from_str("a", "func f 1 end");
        let second = Program::from_str("b", "func f 2 2 end");
        let mut f = Function::new();
        f.define("f", &first, 2..3);
        f.define("f", &second, 2..4);
        assert_eq!(f.len(), 1);
        let body = f.get("f").unwrap();
        assert_eq!(body.program.source(), "b");
        assert_eq!(body.range, 2..4);
        assert!(!f.contains("g"));
    }
}
