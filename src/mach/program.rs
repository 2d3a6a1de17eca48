use super::{Address, Opcode, ProgramSource};
use crate::lang::{lex_lines, Column, Error, Location, Row};
use std::ops::Range;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Immutable operation sequence
///
/// Cloning is cheap. Blocks are address ranges into the same sequence.

#[derive(Clone)]
pub struct Program {
    source: Rc<str>,
    ops: Rc<[Opcode]>,
    positions: Rc<[(Row, Column)]>,
}

impl Program {
    pub fn load<I>(source: &str, lines: I) -> Program
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut ops: Vec<Opcode> = vec![];
        let mut positions: Vec<(Row, Column)> = vec![];
        for token in lex_lines(source, lines) {
            let op = match (ops.last(), Opcode::from(&token)) {
                (Some(Opcode::Func), Opcode::Word(name)) => Opcode::FuncName(name),
                (Some(Opcode::VarDecl), Opcode::Word(name)) => Opcode::VarName(name),
                (_, op) => op,
            };
            ops.push(op);
            positions.push((token.row, token.column));
        }
        Program {
            source: Rc::from(source),
            ops: ops.into(),
            positions: positions.into(),
        }
    }

    pub fn from_str(source: &str, text: &str) -> Program {
        Program::load(source, text.lines())
    }

    pub fn read<S: ProgramSource + ?Sized>(source: &mut S, path: &str) -> Result<Program> {
        let lines = source.read_lines(path)?;
        Ok(Program::load(path, lines))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    pub fn op(&self, addr: Address) -> Option<&Opcode> {
        self.ops.get(addr)
    }

    pub fn range(&self) -> Range<Address> {
        0..self.ops.len()
    }

    pub fn location(&self, addr: Address) -> Option<Location> {
        let (row, column) = self.positions.get(addr)?;
        Some(Location {
            source: self.source.clone(),
            row: *row,
            column: column.clone(),
        })
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.ops)
    }
}
