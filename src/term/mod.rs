/*!
## Terminal host

Runs a program file against the process terminal: output goes to
stdout, `input` reads through `linefeed`, and Ctrl-C breaks a running
program.

*/

use crate::error;
use crate::lang::Error;
use crate::mach::{host, Console, ProgramSource};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// Run the program at `path`. Returns the process exit status.
pub fn main(path: &str) -> i32 {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!(%error, "Ctrl-C handler not installed");
    }
    let mut console = LineConsole::new(interrupted);
    let mut source = FileSource::new();
    match host::run_file(path, &mut console, &mut source) {
        Ok(_) => 0,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            1
        }
    }
}

enum Reader {
    Unopened,
    Line(Interface<DefaultTerminal>),
    Plain,
}

/// ## Console on the process terminal
///
/// Falls back to plain stdin when no terminal is attached.

pub struct LineConsole {
    reader: Reader,
    interrupted: Arc<AtomicBool>,
}

impl LineConsole {
    pub fn new(interrupted: Arc<AtomicBool>) -> LineConsole {
        LineConsole {
            reader: Reader::Unopened,
            interrupted,
        }
    }

    fn open(&mut self) {
        if let Reader::Unopened = self.reader {
            self.reader = match Interface::new("funny") {
                Ok(interface) => {
                    interface.set_report_signal(Signal::Interrupt, true);
                    Reader::Line(interface)
                }
                Err(error) => {
                    tracing::debug!(%error, "no terminal, reading plain stdin");
                    Reader::Plain
                }
            };
        }
    }
}

fn write_out(text: &str) -> Result<()> {
    let mut out = std::io::stdout();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

impl Console for LineConsole {
    fn write(&mut self, text: &str) -> Result<()> {
        write_out(text)
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let (lead, prompt) = match prompt.rfind('\n') {
            Some(index) => prompt.split_at(index + 1),
            None => ("", prompt),
        };
        write_out(lead)?;
        self.open();
        match &self.reader {
            Reader::Line(interface) => {
                interface.set_prompt(prompt)?;
                match interface.read_line()? {
                    ReadResult::Input(line) => Ok(line),
                    ReadResult::Eof => Err(error!(InputPastEnd)),
                    ReadResult::Signal(_) => Err(error!(Break)),
                }
            }
            Reader::Plain | Reader::Unopened => {
                write_out(prompt)?;
                let mut line = String::new();
                if std::io::stdin().read_line(&mut line)? == 0 {
                    return Err(error!(InputPastEnd));
                }
                let len = line.trim_end_matches(&['\r', '\n'][..]).len();
                line.truncate(len);
                Ok(line)
            }
        }
    }

    fn interrupted(&mut self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}

/// ## Program files on disk
///
/// Relative paths resolve against `root` when one is given,
/// otherwise against the working directory.

#[derive(Debug, Default, Clone)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> FileSource {
        FileSource::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> FileSource {
        FileSource {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) if Path::new(path).is_relative() => root.join(path),
            _ => PathBuf::from(path),
        }
    }
}

impl ProgramSource for FileSource {
    fn read_lines(&mut self, path: &str) -> Result<Vec<String>> {
        let reader = match File::open(self.resolve(path)) {
            Ok(file) => BufReader::new(file),
            Err(error) => {
                let msg = format!("{}: {}", path, error);
                match error.kind() {
                    ErrorKind::NotFound => return Err(error!(FileNotFound; msg)),
                    _ => return Err(error!(DiskIoError; msg)),
                }
            }
        };
        let mut lines = vec![];
        for line in reader.lines() {
            match line {
                Ok(line) => lines.push(line),
                Err(error) => return Err(error!(DiskIoError; format!("{}: {}", path, error))),
            }
        }
        Ok(lines)
    }
}
