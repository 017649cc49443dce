//! Syntax tree consumed by the evaluator.
//!
//! The parser is not part of this workspace; it hands the evaluator one
//! [`Expr`] per top-level form. Function and lambda bodies are stored as
//! [`SharedExpr`] so runtime function values can keep their body alive
//! without copying the subtree.
//!
//! Surface forms and the nodes they produce:
//!
//! ```text
//! (class Point (x y) (fun norm (p) ...))   ClassDef
//! (fun add (a b) (+ a b))                  FunctionDef
//! (do a b c)                               Do
//! (if c t f)                               If
//! (or a b) / (and a b)                     Or / And
//! ((get-f) a b)                            Call
//! (add a b)                                NamedCall
//! [a b c]                                  Array
//! (fun [x y] body)                         Lambda
//! (let x v body)                           Let
//! (<3 f a b)                               Coroutine
//! ```

use std::sync::Arc;

use crate::Name;

/// Reference-counted expression, shared between the tree and function values.
pub type SharedExpr = Arc<Expr>;

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `(class Name (fields...) methods...)`
    ClassDef(ClassDef),
    /// `(fun name (params...) body)`
    FunctionDef(FunctionDef),
    /// `(do statements...)`
    Do(Vec<Expr>),
    /// `(if condition then else)`
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `(or args...)`
    Or(Vec<Expr>),
    /// `(and args...)`
    And(Vec<Expr>),
    /// Call whose callee is an arbitrary expression.
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// Call whose callee is a bare identifier.
    NamedCall(NamedCall),
    /// Variable reference.
    Ident(Name),
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// `[elements...]`
    Array(Vec<Expr>),
    /// `(fun [params...] body)`
    Lambda(Lambda),
    /// `(let name value body)`
    Let {
        name: Name,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    /// `(<3 f args...)`: asynchronous call. Parsed, never evaluated.
    Coroutine(NamedCall),
}

/// Class definition: field layout plus methods.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    pub name: Name,
    pub fields: Vec<Name>,
    pub methods: Vec<FunctionDef>,
}

/// Named function definition, also used for class methods.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: SharedExpr,
}

/// `(name args...)`
#[derive(Clone, Debug, PartialEq)]
pub struct NamedCall {
    pub function: Name,
    pub args: Vec<Expr>,
}

/// Anonymous function literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Lambda {
    pub params: Vec<Name>,
    pub body: SharedExpr,
}

fn names(list: &[&str]) -> Vec<Name> {
    list.iter().copied().map(Name::new).collect()
}

impl FunctionDef {
    pub fn new(name: &str, params: &[&str], body: Expr) -> Self {
        FunctionDef {
            name: Name::new(name),
            params: names(params),
            body: Arc::new(body),
        }
    }
}

impl ClassDef {
    pub fn new(name: &str, fields: &[&str], methods: Vec<FunctionDef>) -> Self {
        ClassDef {
            name: Name::new(name),
            fields: names(fields),
            methods,
        }
    }
}

// Constructors for building trees by hand (hosts without a parser, tests).
impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(Name::new(name))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expr::Str(text.into())
    }

    pub fn array(elements: Vec<Expr>) -> Self {
        Expr::Array(elements)
    }

    pub fn do_block(statements: Vec<Expr>) -> Self {
        Expr::Do(statements)
    }

    pub fn if_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn named_call(function: &str, args: Vec<Expr>) -> Self {
        Expr::NamedCall(NamedCall {
            function: Name::new(function),
            args,
        })
    }

    pub fn let_in(name: &str, value: Expr, body: Expr) -> Self {
        Expr::Let {
            name: Name::new(name),
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    pub fn lambda(params: &[&str], body: Expr) -> Self {
        Expr::Lambda(Lambda {
            params: names(params),
            body: Arc::new(body),
        })
    }

    pub fn function(name: &str, params: &[&str], body: Expr) -> Self {
        Expr::FunctionDef(FunctionDef::new(name, params, body))
    }

    pub fn class(name: &str, fields: &[&str], methods: Vec<FunctionDef>) -> Self {
        Expr::ClassDef(ClassDef::new(name, fields, methods))
    }

    /// Short node description for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::ClassDef(_) => "class definition",
            Expr::FunctionDef(_) => "function definition",
            Expr::Do(_) => "do",
            Expr::If { .. } => "if",
            Expr::Or(_) => "or",
            Expr::And(_) => "and",
            Expr::Call { .. } => "call",
            Expr::NamedCall(_) => "named call",
            Expr::Ident(_) => "identifier",
            Expr::Nil => "nil literal",
            Expr::Bool(_) => "bool literal",
            Expr::Int(_) => "int literal",
            Expr::Float(_) => "float literal",
            Expr::Str(_) => "string literal",
            Expr::Array(_) => "array literal",
            Expr::Lambda(_) => "lambda",
            Expr::Let { .. } => "let",
            Expr::Coroutine(_) => "coroutine",
        }
    }
}
