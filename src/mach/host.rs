use super::{Event, Program, Runtime};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Operations executed per call to [`Runtime::execute`].
pub const CYCLES: usize = 5000;

/// ## Line oriented terminal

pub trait Console {
    /// Write `text` as is, without adding a newline.
    fn write(&mut self, text: &str) -> Result<()>;
    /// Block until one line is read. The line ending is not included.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
    /// Polled between execution slices.
    fn interrupted(&mut self) -> bool {
        false
    }
}

/// ## Where program text comes from
///
/// Used for the main program and for every `attach`.

pub trait ProgramSource {
    fn read_lines(&mut self, path: &str) -> Result<Vec<String>>;
}

/// Drive `runtime` until it stops, servicing its requests.
pub fn run<C, S>(runtime: &mut Runtime, console: &mut C, source: &mut S) -> Result<()>
where
    C: Console + ?Sized,
    S: ProgramSource + ?Sized,
{
    loop {
        if console.interrupted() {
            runtime.interrupt();
        }
        match runtime.execute(CYCLES) {
            Event::Stopped => return Ok(()),
            Event::Running => {}
            Event::Print(s) => console.write(&s)?,
            Event::Input(prompt) => match console.read_line(&prompt) {
                Ok(line) => runtime.enter(&line),
                Err(error) => runtime.error(error),
            },
            Event::Attach(path) => match Program::read(source, &path) {
                Ok(program) => runtime.attach(program),
                Err(error) => runtime.error(error),
            },
            Event::Error(error) => return Err(error),
        }
    }
}

/// Load the program at `path` and run it to completion.
pub fn run_file<C, S>(path: &str, console: &mut C, source: &mut S) -> Result<Runtime>
where
    C: Console + ?Sized,
    S: ProgramSource + ?Sized,
{
    let program = Program::read(source, path)?;
    tracing::debug!(path, ops = program.len(), "program loaded");
    let mut runtime = Runtime::default();
    runtime.load(program);
    run(&mut runtime, console, source)?;
    Ok(runtime)
}
