use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack and variable value

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(String),
}

impl Val {
    /// Coerce to a number the way arithmetic sees it.
    pub fn to_number(&self) -> Result<f64> {
        match self {
            Val::Number(n) => Ok(*n),
            Val::String(s) => match parse_number(s) {
                Some(n) => Ok(n),
                None => Err(error!(TypeMismatch; format!("NOT A NUMBER: {:?}", s))),
            },
        }
    }

    /// True for numbers and for text that parses fully as a number.
    pub fn looks_numeric(&self) -> bool {
        match self {
            Val::Number(_) => true,
            Val::String(s) => parse_number(s).is_some(),
        }
    }

    pub fn is_truthy(&self) -> Result<bool> {
        Ok(self.to_number()? != 0.0)
    }
}

/// Decimal text with at least one digit. `inf` and `nan` are words.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Shortest round-trip form with a fractional part, switching to
/// exponent form outside `1e-4..1e16`: `5.0`, `1e+16`, `1.5e-07`, `nan`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = n.abs();
    if abs == 0.0 || (1e-4..1e16).contains(&abs) {
        return format!("{:?}", n);
    }
    let sci = format!("{:e}", n);
    match sci.split_once('e') {
        Some((mantissa, exp)) => match exp.strip_prefix('-') {
            Some(digits) => format!("{}e-{:0>2}", mantissa, digits),
            None => format!("{}e+{:0>2}", mantissa, exp),
        },
        None => sci,
    }
}

impl From<f64> for Val {
    fn from(n: f64) -> Self {
        Val::Number(n)
    }
}

impl From<bool> for Val {
    fn from(b: bool) -> Self {
        Val::Number(if b { 1.0 } else { 0.0 })
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::String(s.to_string())
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{}", format_number(*n)),
            Val::String(s) => write!(f, "{}", s),
        }
    }
}
