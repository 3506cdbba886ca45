//! Operator core and desugaring
//!
//! The automaton construction only understands five operators. Everything
//! the surface syntax adds on top (any-char, classes, `+`, `?`, bounded
//! repetition, grouping) is lowered here by syntactic expansion; no
//! algebraic simplification is attempted.

use crate::interval::{self, ClassInterval};
use crate::regex::ast::Ast;

/// A pattern over the minimal operator set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreExpr {
    /// Matches the empty string
    Epsilon,
    /// Matches any single character inside the interval
    Interval(ClassInterval),
    /// `ab`
    Concat(Box<CoreExpr>, Box<CoreExpr>),
    /// `a|b`
    Alt(Box<CoreExpr>, Box<CoreExpr>),
    /// `a*`
    Star(Box<CoreExpr>),
}

impl CoreExpr {
    #[must_use]
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

/// Lower a surface pattern into the operator core.
#[must_use]
pub fn desugar(ast: &Ast) -> CoreExpr {
    match ast {
        Ast::Literal(c) => CoreExpr::Interval(ClassInterval::single(*c)),
        Ast::AnyChar => class_to_core(&interval::complement(&[ClassInterval::single('\n')])),
        Ast::Class { atoms, negated } => {
            let inclusive: Vec<ClassInterval> =
                atoms.iter().filter_map(|iv| iv.to_inclusive()).collect();
            let normalized = interval::normalize(&inclusive);
            if *negated {
                class_to_core(&interval::complement(&normalized))
            } else {
                class_to_core(&normalized)
            }
        }
        Ast::Concat(a, b) => CoreExpr::Concat(desugar(a).boxed(), desugar(b).boxed()),
        Ast::Alt(a, b) => CoreExpr::Alt(desugar(a).boxed(), desugar(b).boxed()),
        Ast::Star(a) => CoreExpr::Star(desugar(a).boxed()),
        Ast::Plus(a) => {
            let inner = desugar(a);
            CoreExpr::Concat(inner.clone().boxed(), CoreExpr::Star(inner.boxed()).boxed())
        }
        Ast::Opt(a) => CoreExpr::Alt(CoreExpr::Epsilon.boxed(), desugar(a).boxed()),
        Ast::Repeat { node, min, max } => desugar_repeat(&desugar(node), *min, *max),
        Ast::Group(a) => desugar(a),
    }
}

/// `a{n,m}` as `n` required copies followed by `m - n` optional ones, or a
/// trailing star when the upper bound is open
fn desugar_repeat(inner: &CoreExpr, min: u32, max: Option<u32>) -> CoreExpr {
    let mut parts: Vec<CoreExpr> = Vec::new();
    for _ in 0..min {
        parts.push(inner.clone());
    }
    match max {
        Some(max) => {
            for _ in min..max {
                parts.push(CoreExpr::Alt(
                    CoreExpr::Epsilon.boxed(),
                    inner.clone().boxed(),
                ));
            }
        }
        None => parts.push(CoreExpr::Star(inner.clone().boxed())),
    }
    concat_all(parts)
}

/// Fold a union of intervals into an alternation of interval literals.
/// An empty union is the empty language, encoded as an interval no
/// character satisfies.
fn class_to_core(intervals: &[ClassInterval]) -> CoreExpr {
    let mut iter = intervals.iter().filter(|iv| !iv.is_empty()).copied();
    let Some(first) = iter.next() else {
        return CoreExpr::Interval(ClassInterval::EMPTY);
    };
    iter.fold(CoreExpr::Interval(first), |acc, iv| {
        CoreExpr::Alt(acc.boxed(), CoreExpr::Interval(iv).boxed())
    })
}

fn concat_all(parts: Vec<CoreExpr>) -> CoreExpr {
    let mut iter = parts.into_iter();
    let Some(first) = iter.next() else {
        return CoreExpr::Epsilon;
    };
    iter.fold(first, |acc, part| {
        CoreExpr::Concat(acc.boxed(), part.boxed())
    })
}
