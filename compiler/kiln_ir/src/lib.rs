//! Kiln IR - syntax tree and identifiers.
//!
//! This crate holds the data the parser produces and the evaluator consumes:
//! - [`Name`]: identifiers, cheap to clone and hash
//! - [`Expr`] and its definition nodes ([`ClassDef`], [`FunctionDef`],
//!   [`NamedCall`], [`Lambda`])
//!
//! It has no dependencies so that external front ends can build trees
//! without pulling in the runtime.

pub mod ast;
mod name;

pub use ast::{ClassDef, Expr, FunctionDef, Lambda, NamedCall, SharedExpr};
pub use name::Name;
