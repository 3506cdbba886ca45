use crate::interval::Interval;
use smallvec::SmallVec;

/// Parse tree of the pattern surface syntax.
///
/// Postfix operators and grouping survive parsing unchanged; lowering to the
/// operator core happens in [`crate::regex::core`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// A single literal character
    Literal(char),
    /// `.` - any character except `\n`
    AnyChar,
    /// `[...]` or `[^...]`
    Class {
        atoms: SmallVec<[Interval; 4]>,
        negated: bool,
    },
    /// Two patterns in sequence
    Concat(Box<Ast>, Box<Ast>),
    /// `a|b`
    Alt(Box<Ast>, Box<Ast>),
    /// `a*`
    Star(Box<Ast>),
    /// `a+`
    Plus(Box<Ast>),
    /// `a?`
    Opt(Box<Ast>),
    /// `a{n}`, `a{n,}`, `a{n,m}`
    Repeat {
        node: Box<Ast>,
        min: u32,
        max: Option<u32>,
    },
    /// `(...)`
    Group(Box<Ast>),
}

impl Ast {
    #[must_use]
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// A class from explicit atoms
    #[must_use]
    pub fn class(atoms: impl IntoIterator<Item = Interval>, negated: bool) -> Self {
        Self::Class {
            atoms: atoms.into_iter().collect(),
            negated,
        }
    }
}
