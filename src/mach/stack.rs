use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and optionally size limited vector

pub struct Stack<T> {
    overflow_message: &'static str,
    max_len: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    /// Holds at most 65535 values.
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            max_len: u16::max_value() as usize,
            vec: vec![],
        }
    }
    /// Grows until the allocator gives up.
    pub fn unbounded() -> Stack<T> {
        Stack {
            overflow_message: "",
            max_len: usize::max_value(),
            vec: vec![],
        }
    }
    fn underflow_error(&self) -> Error {
        error!(StackUnderflow)
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn as_slice(&self) -> &[T] {
        &self.vec
    }
    pub fn last(&self) -> Result<&T> {
        match self.vec.last() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.vec.last_mut()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.max_len {
            return Err(error!(OutOfMemory; self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
    /// Move the second value from the top to the top.
    pub fn roll(&mut self) -> Result<()> {
        let n = 1;
        if n >= self.vec.len() {
            return Err(error!(IndexOutOfRange; format!(
                "ROLL {} ON STACK OF {}",
                n,
                self.vec.len()
            )));
        }
        let val = self.vec.remove(self.vec.len() - (n + 1));
        self.vec.push(val);
        Ok(())
    }
}
