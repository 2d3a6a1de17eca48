#![allow(dead_code)]

use funny::lang::Error;
use funny::mach::{host, Console, Event, Program, ProgramSource, Runtime, Val};
use std::collections::{HashMap, VecDeque};

pub const MAIN: &str = "main.funny";

/// Console that records output and answers input from a queue.
#[derive(Default)]
pub struct Term {
    pub output: String,
    pub input: VecDeque<String>,
    /// Report an interrupt on this poll, counting from one.
    pub interrupt_at: Option<usize>,
    pub polls: usize,
}

impl Term {
    pub fn with_input(lines: &[&str]) -> Term {
        Term {
            input: lines.iter().map(|s| s.to_string()).collect(),
            ..Term::default()
        }
    }
}

impl Console for Term {
    fn write(&mut self, text: &str) -> Result<(), Error> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, Error> {
        self.output.push_str(prompt);
        match self.input.pop_front() {
            Some(line) => {
                self.output.push_str(&line);
                self.output.push('\n');
                Ok(line)
            }
            None => Err(Error::new(funny::lang::ErrorCode::InputPastEnd)),
        }
    }

    fn interrupted(&mut self) -> bool {
        self.polls += 1;
        self.interrupt_at == Some(self.polls)
    }
}

/// Program files held in memory.
#[derive(Default)]
pub struct Files {
    pub files: HashMap<String, String>,
    pub reads: Vec<String>,
}

impl Files {
    pub fn new(files: &[(&str, &str)]) -> Files {
        Files {
            files: files
                .iter()
                .map(|(path, text)| (path.to_string(), text.to_string()))
                .collect(),
            reads: vec![],
        }
    }
}

impl ProgramSource for Files {
    fn read_lines(&mut self, path: &str) -> Result<Vec<String>, Error> {
        self.reads.push(path.to_string());
        match self.files.get(path) {
            Some(text) => Ok(text.lines().map(String::from).collect()),
            None => Err(Error::new(funny::lang::ErrorCode::FileNotFound).message(path)),
        }
    }
}

/// Run `text` as a whole program. Output is followed by any error.
pub fn exec(text: &str) -> String {
    exec_files(&[(MAIN, text)], &[])
}

pub fn exec_input(text: &str, input: &[&str]) -> String {
    exec_files(&[(MAIN, text)], input)
}

pub fn exec_files(files: &[(&str, &str)], input: &[&str]) -> String {
    let (_, term, result) = run_files(files, input);
    render(term, result)
}

/// Run the program in `main.funny` and keep the machine for inspection.
pub fn run_files(files: &[(&str, &str)], input: &[&str]) -> (Runtime, Term, Result<(), Error>) {
    let mut source = Files::new(files);
    let mut term = Term::with_input(input);
    let mut runtime = Runtime::default();
    let result = Program::read(&mut source, MAIN).and_then(|program| {
        runtime.load(program);
        host::run(&mut runtime, &mut term, &mut source)
    });
    (runtime, term, result)
}

pub fn render(term: Term, result: Result<(), Error>) -> String {
    let mut s = term.output;
    if let Err(error) = result {
        s.push_str(&format!("{}\n", error));
    }
    s
}

/// Run `text` as plain statements and return what is left on the stack.
pub fn direct(text: &str) -> Result<Vec<Val>, Error> {
    let mut runtime = Runtime::default();
    direct_on(&mut runtime, text)?;
    Ok(runtime.stack().to_vec())
}

pub fn direct_on(runtime: &mut Runtime, text: &str) -> Result<String, Error> {
    runtime.direct(Program::from_str("direct", text));
    let mut s = String::new();
    loop {
        match runtime.execute(5000) {
            Event::Stopped => return Ok(s),
            Event::Running => {}
            Event::Print(ps) => s.push_str(&ps),
            Event::Error(error) => return Err(error),
            Event::Input(_) | Event::Attach(_) => {
                panic!("direct statements must not ask the host")
            }
        }
    }
}

pub fn numbers(vals: &[f64]) -> Vec<Val> {
    vals.iter().map(|n| Val::Number(*n)).collect()
}
