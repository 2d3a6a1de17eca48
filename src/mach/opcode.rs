use super::val::parse_number;
use super::Val;
use crate::lang::Token;

/// ## Virtual machine instruction set
///
/// The funny virtual machine has no registers.
/// Every operation is performed on the stack.
///
/// For example: `2 3 + .` maps to
/// `[PushLiteral(2), PushLiteral(3), Add, Dump]`
///
/// See <https://en.wikipedia.org/wiki/Reverse_Polish_notation>

#[derive(Clone, PartialEq)]
pub enum Opcode {
    // *** Stack manipulation
    /// Push a literal value on to the stack.
    PushLiteral(Val),
    Dup,
    Pop,
    /// Move the second value from the top to the top.
    Roll,

    // *** Arithmetic and comparison
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Equal,
    Greater,
    Less,
    Not,

    // *** Console
    /// Pop and print as a number.
    Dump,
    /// Pop and print as text.
    Write,
    Input,

    // *** Blocks
    If,
    Else,
    End,
    While,
    Func,
    /// Operand of the `Func` before it. Never executed on its own.
    FuncName(String),

    // *** Names
    Attach,
    VarDecl,
    /// Operand of the `VarDecl` before it. Never executed on its own.
    VarName(String),
    /// Pop a name then a value and assign.
    SetVar,
    /// Call a function or read a variable.
    Word(String),
}

impl Opcode {
    pub fn from_keyword(word: &str) -> Option<Opcode> {
        use Opcode::*;
        Some(match word {
            "+" => Add,
            "-" => Sub,
            "*" => Mul,
            "/" => Div,
            "%" => Mod,
            "." => Dump,
            "write" => Write,
            "dup" => Dup,
            "pop" => Pop,
            ":" => Roll,
            "if" => If,
            "else" => Else,
            "end" => End,
            "while" => While,
            "func" => Func,
            "=" => Equal,
            ">" => Greater,
            "<" => Less,
            "not" => Not,
            "input" => Input,
            "attach" => Attach,
            "var" => VarDecl,
            "@" => SetVar,
            _ => return None,
        })
    }

    /// Openers counted when matching blocks to their `end`.
    pub fn opens_block(&self) -> bool {
        matches!(self, Opcode::If | Opcode::While | Opcode::Func)
    }
}

impl From<&Token> for Opcode {
    fn from(token: &Token) -> Self {
        let word = token.text.as_str();
        if let Some(op) = Opcode::from_keyword(word) {
            return op;
        }
        if let Some(n) = parse_number(word) {
            return Opcode::PushLiteral(Val::Number(n));
        }
        if token.is_quoted() {
            let inner = &word[1..word.len() - 1];
            return Opcode::PushLiteral(Val::String(inner.to_string()));
        }
        Opcode::Word(word.to_string())
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            PushLiteral(Val::Number(n)) => write!(f, "{:?}", n),
            PushLiteral(Val::String(s)) => write!(f, "{:?}", s),
            Dup => write!(f, "dup"),
            Pop => write!(f, "pop"),
            Roll => write!(f, ":"),

            Add => write!(f, "+"),
            Sub => write!(f, "-"),
            Mul => write!(f, "*"),
            Div => write!(f, "/"),
            Mod => write!(f, "%"),
            Equal => write!(f, "="),
            Greater => write!(f, ">"),
            Less => write!(f, "<"),
            Not => write!(f, "not"),

            Dump => write!(f, "."),
            Write => write!(f, "write"),
            Input => write!(f, "input"),

            If => write!(f, "if"),
            Else => write!(f, "else"),
            End => write!(f, "end"),
            While => write!(f, "while"),
            Func => write!(f, "func"),
            FuncName(s) => write!(f, "{}", s),

            Attach => write!(f, "attach"),
            VarDecl => write!(f, "var"),
            VarName(s) => write!(f, "{}", s),
            SetVar => write!(f, "@"),
            Word(s) => write!(f, "{}", s),
        }
    }
}
