use super::{Address, Opcode, Program};
use crate::error;
use crate::lang::Error;
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

/// ## Block boundaries
///
/// Matches a block opener to its `end`. Openers and closers are
/// paired by nesting depth, not by kind.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub open: Address,
    pub else_addr: Option<Address>,
    pub end: Address,
}

impl Link {
    /// Scan `program` forward from the opener at `open`, never past `limit`.
    pub fn resolve(program: &Program, open: Address, limit: Address, want_else: bool) -> Result<Link> {
        let mut depth = 0usize;
        let mut else_addr = None;
        let limit = limit.min(program.len());
        for addr in open..limit {
            match program.op(addr) {
                Some(op) if op.opens_block() => depth += 1,
                Some(Opcode::End) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(Link {
                            open,
                            else_addr: if want_else { else_addr } else { None },
                            end: addr,
                        });
                    }
                }
                Some(Opcode::Else) if want_else && depth == 1 && else_addr.is_none() => {
                    else_addr = Some(addr);
                }
                _ => {}
            }
        }
        let opener = program.op(open).map(|op| op.to_string()).unwrap_or_default();
        let err = error!(MissingEnd; opener);
        Err(match program.location(open) {
            Some(location) => err.in_location(location),
            None => err,
        })
    }

    /// Ops run when the condition holds, or the whole body for `while`.
    pub fn then_range(&self) -> Range<Address> {
        self.open + 1..self.else_addr.unwrap_or(self.end)
    }

    pub fn else_range(&self) -> Option<Range<Address>> {
        self.else_addr.map(|addr| addr + 1..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn program(s: &str) -> Program {
        Program::from_str("t", s)
    }

    #[test]
    fn test_simple_if() {
        let p = program("1 if 2 end");
        let link = Link::resolve(&p, 1, p.len(), true).unwrap();
        assert_eq!(link.end, 3);
        assert_eq!(link.else_addr, None);
        assert_eq!(link.then_range(), 2..3);
        assert_eq!(link.else_range(), None);
    }

    #[test]
    fn test_if_else() {
        let p = program("if 1 else 2 end");
        let link = Link::resolve(&p, 0, p.len(), true).unwrap();
        assert_eq!(link.else_addr, Some(2));
        assert_eq!(link.end, 4);
        assert_eq!(link.then_range(), 1..2);
        assert_eq!(link.else_range(), Some(3..4));
    }

    #[test]
    fn test_else_ignored_without_request() {
        let p = program("while else end");
        let link = Link::resolve(&p, 0, p.len(), false).unwrap();
        assert_eq!(link.else_addr, None);
        assert_eq!(link.then_range(), 1..2);
    }

    #[test]
    fn test_nested_if_else_inside_while() {
        // 0     1 2  3 4    5 6 7   8
        // while 1 if 2 else 3 end 4 end
        let p = program("while 1 if 2 else 3 end 4 end");
        let outer = Link::resolve(&p, 0, p.len(), false).unwrap();
        assert_eq!(outer.end, 8);
        let inner = Link::resolve(&p, 2, p.len(), true).unwrap();
        assert_eq!(inner.else_addr, Some(4));
        assert_eq!(inner.end, 6);
    }

    #[test]
    fn test_inner_else_not_taken_by_outer_if() {
        // 0  1  2 3    4   5 6    7 8
        // if if 1 else end 2 else 3 end
        let p = program("if if 1 else end 2 else 3 end");
        let outer = Link::resolve(&p, 0, p.len(), true).unwrap();
        assert_eq!(outer.else_addr, Some(6));
        assert_eq!(outer.end, 8);
    }

    #[test]
    fn test_first_else_wins() {
        let p = program("if 1 else 2 else 3 end");
        let link = Link::resolve(&p, 0, p.len(), true).unwrap();
        assert_eq!(link.else_addr, Some(2));
    }

    #[test]
    fn test_func_counts_as_opener() {
        let p = program("func f if 1 end end 9");
        let link = Link::resolve(&p, 0, p.len(), false).unwrap();
        assert_eq!(link.end, 5);
    }

    #[test]
    fn test_missing_end() {
        let p = program("while 1 if 2 end");
        let err = Link::resolve(&p, 0, p.len(), false).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingEnd);
        assert_eq!(err.to_string(), "BLOCK WITHOUT END IN t:1:1; while");
    }

    #[test]
    fn test_limit_bounds_the_scan() {
        let p = program("if 1 end");
        assert!(Link::resolve(&p, 0, 2, false).is_err());
    }
}
