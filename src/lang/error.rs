use super::Location;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    location: Option<Location>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $loc:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_location($loc)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $loc:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_location($loc)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            location: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }

    pub fn in_location(self, location: Location) -> Error {
        debug_assert!(self.location.is_none());
        Error {
            location: Some(location),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => error!(FileNotFound; error.to_string()),
            _ => error!(DiskIoError; error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    OutOfMemory = 7,
    IndexOutOfRange = 9,
    DivisionByZero = 11,
    TypeMismatch = 13,
    Break = 17,
    UnknownWord = 18,
    UnknownVariable = 19,
    StackUnderflow = 22,
    MissingEnd = 26,
    InternalError = 51,
    FileNotFound = 53,
    DiskIoError = 57,
    InputPastEnd = 62,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self {
            SyntaxError => "SYNTAX ERROR",
            OutOfMemory => "OUT OF MEMORY",
            IndexOutOfRange => "INDEX OUT OF RANGE",
            DivisionByZero => "DIVISION BY ZERO",
            TypeMismatch => "TYPE MISMATCH",
            Break => "BREAK",
            UnknownWord => "UNKNOWN WORD",
            UnknownVariable => "UNKNOWN VARIABLE",
            StackUnderflow => "STACK UNDERFLOW",
            MissingEnd => "BLOCK WITHOUT END",
            InternalError => "INTERNAL ERROR",
            FileNotFound => "FILE NOT FOUND",
            DiskIoError => "DISK I/O ERROR",
            InputPastEnd => "INPUT PAST END",
        };
        write!(f, "{}", code_str)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(location) = &self.location {
            suffix.push_str(&format!(" {}", location));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if suffix.is_empty() {
            write!(f, "{}", self.code)
        } else if self.location.is_some() {
            write!(f, "{} IN{}", self.code, suffix)
        } else {
            write!(f, "{}{}", self.code, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_display_code_only() {
        assert_eq!(error!(DivisionByZero).to_string(), "DIVISION BY ZERO");
    }

    #[test]
    fn test_display_with_message() {
        let e = error!(UnknownWord; "frob");
        assert_eq!(e.to_string(), "UNKNOWN WORD; frob");
        assert_eq!(e.code(), ErrorCode::UnknownWord);
    }

    #[test]
    fn test_display_with_location() {
        let loc = Location {
            source: Rc::from("main.funny"),
            row: 3,
            column: 4..5,
        };
        let e = error!(TypeMismatch, loc; "+");
        assert_eq!(e.to_string(), "TYPE MISMATCH IN main.funny:3:5; +");
    }

    #[test]
    fn test_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(io).code(), ErrorCode::FileNotFound);
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(Error::from(io).code(), ErrorCode::DiskIoError);
    }
}
