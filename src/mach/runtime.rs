use super::val::format_number;
use super::{Address, Function, Link, Opcode, Operation, Program, Scope, Stack, Val, Var};
use crate::error;
use crate::lang::Error;
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

/// Prompt shown by the `input` word.
pub const INPUT_PROMPT: &str = "\n? ";

/// ## Runtime events
///
/// Returned by [`Runtime::execute`] whenever the host needs to act.

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Nothing left to execute.
    Stopped,
    /// The cycle budget ran out. Call `execute` again.
    Running,
    /// Text to print without a trailing newline.
    Print(String),
    /// Answer with [`Runtime::enter`].
    Input(String),
    /// Load the named file and answer with [`Runtime::attach`]
    /// or [`Runtime::error`].
    Attach(String),
    /// The run failed and has stopped.
    Error(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Top level of the loaded program. Registers functions then starts `main`.
    Entry,
    /// Top level of an attached file. Registers functions only.
    Attach,
    /// Branch of an `if`, a function body, or a direct statement.
    Block,
    /// Body of a `while`. Repeats while the top of stack is nonzero.
    Loop,
}

#[derive(Debug)]
struct Frame {
    kind: Kind,
    program: Program,
    range: Range<Address>,
    ip: Address,
    scope: Scope,
    owns_scope: bool,
}

impl Frame {
    fn harvesting(&self) -> bool {
        matches!(self.kind, Kind::Entry | Kind::Attach)
    }
}

/// ## Stack machine
///
/// Blocks and calls live on an explicit frame stack so that deep
/// recursion in a program fails with `OUT OF MEMORY` instead of
/// exhausting the host stack.

#[derive(Debug)]
pub struct Runtime {
    stack: Stack<Val>,
    vars: Var,
    functions: Function,
    frames: Stack<Frame>,
    pending: Option<Event>,
    fault: Option<Error>,
    interrupted: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            stack: Stack::unbounded(),
            vars: Var::new(),
            functions: Function::new(),
            frames: Stack::new("CALL STACK OVERFLOW"),
            pending: None,
            fault: None,
            interrupted: false,
        }
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    /// Start a whole-program run from a clean machine.
    pub fn load(&mut self, program: Program) {
        self.reset();
        let scope = self.vars.global();
        self.start(Kind::Entry, &program, program.range(), scope);
    }

    /// Run the top level of `program` as ordinary statements against
    /// the current stack, variables, and functions.
    pub fn direct(&mut self, program: Program) {
        self.frames.clear();
        self.vars.unwind();
        self.pending = None;
        self.fault = None;
        self.interrupted = false;
        let scope = self.vars.global();
        self.start(Kind::Block, &program, program.range(), scope);
    }

    /// Answer an [`Event::Input`] request.
    pub fn enter(&mut self, line: &str) {
        if !matches!(self.pending, Some(Event::Input(_))) {
            debug_assert!(false, "input was not requested");
            return;
        }
        self.pending = None;
        if let Err(error) = self.stack.push(Val::String(line.to_string())) {
            self.fail(error);
        }
    }

    /// Answer an [`Event::Attach`] request with the loaded file.
    pub fn attach(&mut self, program: Program) {
        if !matches!(self.pending, Some(Event::Attach(_))) {
            debug_assert!(false, "attach was not requested");
            return;
        }
        self.pending = None;
        tracing::debug!(source = program.source(), ops = program.len(), "attaching");
        let scope = match self.frames.as_slice().last() {
            Some(frame) => frame.scope,
            None => self.vars.global(),
        };
        self.start(Kind::Attach, &program, program.range(), scope);
    }

    /// Answer an outstanding request with a failure.
    pub fn error(&mut self, error: Error) {
        self.pending = None;
        self.fail(error);
    }

    pub fn interrupt(&mut self) {
        if !self.frames.is_empty() {
            self.interrupted = true;
        }
    }

    pub fn is_running(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn stack(&self) -> &[Val] {
        self.stack.as_slice()
    }

    /// Read a variable from the global scope.
    pub fn var(&self, name: &str) -> Option<&Val> {
        self.vars.lookup(self.vars.global(), name).ok()
    }

    pub fn functions(&self) -> &Function {
        &self.functions
    }

    /// Run at most `cycles` operations.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(error) = self.fault.take() {
            return Event::Error(error);
        }
        if let Some(request) = &self.pending {
            return request.clone();
        }
        if self.frames.is_empty() {
            return Event::Stopped;
        }
        if self.interrupted {
            let error = match self.current() {
                Some((program, addr)) => locate(error!(Break), &program, addr),
                None => error!(Break),
            };
            self.stop();
            return Event::Error(error);
        }
        for _ in 0..cycles {
            match self.step() {
                Ok(None) => {}
                Ok(Some(event)) => return event,
                Err(error) => {
                    tracing::debug!(%error, "runtime error");
                    self.stop();
                    return Event::Error(error);
                }
            }
        }
        Event::Running
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.vars.clear();
        self.functions.clear();
        self.frames.clear();
        self.pending = None;
        self.fault = None;
        self.interrupted = false;
    }

    fn stop(&mut self) {
        self.frames.clear();
        self.vars.unwind();
        self.pending = None;
        self.interrupted = false;
    }

    fn fail(&mut self, error: Error) {
        let error = match self.current() {
            Some((program, addr)) => locate(error, &program, addr),
            None => error,
        };
        self.stop();
        self.fault = Some(error);
    }

    /// Program and address of the operation that ran last.
    fn current(&self) -> Option<(Program, Address)> {
        let frame = self.frames.as_slice().last()?;
        Some((frame.program.clone(), frame.ip.saturating_sub(1)))
    }

    fn start(&mut self, kind: Kind, program: &Program, range: Range<Address>, scope: Scope) {
        if let Err(error) = self.enter_block(kind, program, range, scope, false) {
            self.fail(error);
        }
    }

    fn enter_block(
        &mut self,
        kind: Kind,
        program: &Program,
        range: Range<Address>,
        scope: Scope,
        owns_scope: bool,
    ) -> Result<()> {
        self.frames.push(Frame {
            kind,
            program: program.clone(),
            ip: range.start,
            range,
            scope,
            owns_scope,
        })
    }

    fn jump(&mut self, addr: Address) {
        if let Some(frame) = self.frames.last_mut() {
            frame.ip = addr;
        }
    }

    fn step(&mut self) -> Result<Option<Event>> {
        let (program, addr, limit, scope, harvesting) = match self.frames.last_mut() {
            None => return Ok(Some(Event::Stopped)),
            Some(frame) => {
                if frame.ip >= frame.range.end {
                    let program = frame.program.clone();
                    let end = frame.range.end;
                    return self.finish_frame().map_err(|e| locate(e, &program, end));
                }
                let addr = frame.ip;
                frame.ip += 1;
                (
                    frame.program.clone(),
                    addr,
                    frame.range.end,
                    frame.scope,
                    frame.harvesting(),
                )
            }
        };
        let op = match program.op(addr) {
            Some(op) => op,
            None => return Err(error!(InternalError; "ADDRESS OUT OF RANGE")),
        };
        if harvesting
            && !matches!(
                op,
                Opcode::PushLiteral(_) | Opcode::Func | Opcode::VarDecl | Opcode::Attach
            )
        {
            return Ok(None);
        }
        tracing::trace!(addr, op = %op, "dispatch");
        self.dispatch(&program, addr, limit, op, scope)
            .map_err(|e| locate(e, &program, addr))
    }

    fn finish_frame(&mut self) -> Result<Option<Event>> {
        let looping = matches!(self.frames.as_slice().last(), Some(frame) if frame.kind == Kind::Loop);
        if looping && self.loop_condition()? {
            if let Some(frame) = self.frames.last_mut() {
                frame.ip = frame.range.start;
            }
            return Ok(None);
        }
        let frame = self.frames.pop()?;
        if frame.owns_scope {
            self.vars.pop_scope(frame.scope);
        }
        if frame.kind == Kind::Entry {
            if let Some(main) = self.functions.get("main").cloned() {
                tracing::debug!(source = main.program.source(), "entering main");
                self.stack.clear();
                self.enter_block(Kind::Block, &main.program, main.range, frame.scope, false)?;
            }
        }
        if self.frames.is_empty() {
            return Ok(Some(Event::Stopped));
        }
        Ok(None)
    }

    fn loop_condition(&self) -> Result<bool> {
        match self.stack.as_slice().last() {
            Some(val) => val.is_truthy(),
            None => Ok(false),
        }
    }

    fn binary(&mut self, f: fn(Val, Val) -> Result<Val>) -> Result<()> {
        let (lhs, rhs) = self.stack.pop_2()?;
        self.stack.push(f(lhs, rhs)?)
    }

    fn operand<'a>(program: &'a Program, addr: Address, limit: Address) -> Option<&'a Opcode> {
        if addr < limit {
            program.op(addr)
        } else {
            None
        }
    }

    fn dispatch(
        &mut self,
        program: &Program,
        addr: Address,
        limit: Address,
        op: &Opcode,
        scope: Scope,
    ) -> Result<Option<Event>> {
        use Opcode::*;
        match op {
            PushLiteral(val) => self.stack.push(val.clone())?,
            Dup => {
                let n = self.stack.last()?.to_number()?;
                self.stack.push(Val::Number(n))?;
            }
            Pop => {
                self.stack.pop()?;
            }
            Roll => self.stack.roll()?,

            Add => self.binary(Operation::sum)?,
            Sub => self.binary(Operation::subtract)?,
            Mul => self.binary(Operation::multiply)?,
            Div => self.binary(Operation::divide)?,
            Mod => self.binary(Operation::remainder)?,
            Equal => self.binary(Operation::equal)?,
            Greater => self.binary(Operation::greater)?,
            Less => self.binary(Operation::less)?,
            Not => {
                let val = self.stack.pop()?;
                self.stack.push(Operation::not(val)?)?;
            }

            Dump => {
                let n = self.stack.pop()?.to_number()?;
                return Ok(Some(Event::Print(format_number(n))));
            }
            Write => {
                let val = self.stack.pop()?;
                return Ok(Some(Event::Print(val.to_string())));
            }
            Input => {
                let event = Event::Input(INPUT_PROMPT.to_string());
                self.pending = Some(event.clone());
                return Ok(Some(event));
            }

            If => {
                let condition = self.stack.pop()?.is_truthy()?;
                let link = Link::resolve(program, addr, limit, true)?;
                self.jump(link.end + 1);
                if condition {
                    self.enter_block(Kind::Block, program, link.then_range(), scope, false)?;
                } else if let Some(range) = link.else_range() {
                    self.enter_block(Kind::Block, program, range, scope, false)?;
                }
            }
            While => {
                let link = Link::resolve(program, addr, limit, false)?;
                self.jump(link.end + 1);
                if self.loop_condition()? {
                    let child = self.vars.push_scope(scope);
                    self.enter_block(Kind::Loop, program, link.then_range(), child, true)?;
                }
            }
            Func => {
                let name = match Runtime::operand(program, addr + 1, limit) {
                    Some(FuncName(name)) => name,
                    _ => return Err(error!(SyntaxError; "FUNC WITHOUT NAME")),
                };
                let link = Link::resolve(program, addr, limit, false)?;
                tracing::debug!(name = %name, source = program.source(), "function defined");
                self.functions.define(name, program, addr + 2..link.end);
                self.jump(link.end + 1);
            }
            Else | End | FuncName(_) | VarName(_) => {}

            Attach => {
                let path = self.stack.pop()?.to_string();
                let event = Event::Attach(path);
                self.pending = Some(event.clone());
                return Ok(Some(event));
            }
            VarDecl => {
                let name = match Runtime::operand(program, addr + 1, limit) {
                    Some(VarName(name)) => name,
                    _ => return Err(error!(SyntaxError; "VAR WITHOUT NAME")),
                };
                self.vars.define(scope, name, Val::Number(0.0));
                self.jump(addr + 2);
            }
            SetVar => {
                let name = self.stack.pop()?.to_string();
                let value = self.stack.pop()?;
                self.vars.assign(scope, &name, value);
            }
            Word(name) => {
                if let Some(body) = self.functions.get(name).cloned() {
                    let child = self.vars.push_scope(scope);
                    self.enter_block(Kind::Block, &body.program, body.range, child, true)?;
                } else if Runtime::operand(program, addr + 1, limit) == Some(&SetVar) {
                    self.stack.push(Val::String(name.clone()))?;
                } else {
                    let val = match self.vars.lookup(scope, name) {
                        Ok(val) => val.clone(),
                        Err(_) => return Err(error!(UnknownWord; name.as_str())),
                    };
                    self.stack.push(val)?;
                }
            }
        }
        Ok(None)
    }
}

fn locate(error: Error, program: &Program, addr: Address) -> Error {
    if error.is_located() {
        return error;
    }
    match program.location(addr) {
        Some(location) => error.in_location(location),
        None => error,
    }
}
