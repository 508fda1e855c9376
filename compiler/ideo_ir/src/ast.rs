//! The typed abstract tree produced by the parser (§3.2 of the core spec).
//!
//! Every node is a plain owned tree (`Box`/`Vec`), not an arena — the
//! compiler never recompiles incrementally, so there is no memoization
//! benefit to interned node ids, only extra indirection.

use crate::{Name, Span};

/// A full source file: an ordered list of declarations.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Declaration {
    Type(TypeDecl),
    Import(ImportDecl),
    Extern(ExternDecl),
    Const(ConstDecl),
    Function(FunctionDecl),
    Test(TestDecl),
}

impl Declaration {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Declaration::Type(d) => d.span,
            Declaration::Import(d) => d.span,
            Declaration::Extern(d) => d.span,
            Declaration::Const(d) => d.span,
            Declaration::Function(d) => d.span,
            Declaration::Test(d) => d.span,
        }
    }

    /// Name used for alphabetical / uniqueness ordering within a category.
    /// Imports and tests have no single name and are ordered/keyed elsewhere.
    #[must_use]
    pub fn name(&self) -> Option<Name> {
        match self {
            Declaration::Type(d) => Some(d.name),
            Declaration::Const(d) => Some(d.name),
            Declaration::Function(d) => Some(d.name),
            Declaration::Import(_) | Declaration::Extern(_) | Declaration::Test(_) => None,
        }
    }

    #[must_use]
    pub fn is_exported(&self) -> bool {
        match self {
            Declaration::Type(d) => d.exported,
            Declaration::Const(d) => d.exported,
            Declaration::Function(d) => d.exported,
            Declaration::Import(_) | Declaration::Extern(_) | Declaration::Test(_) => false,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TypeDecl {
    pub name: Name,
    pub exported: bool,
    pub type_params: Vec<Name>,
    pub def: TypeDef,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum TypeDef {
    Sum(Vec<SumVariant>),
    Product(Vec<ProductField>),
    Alias(Type),
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SumVariant {
    pub name: Name,
    pub fields: Vec<Type>,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProductField {
    pub name: Name,
    pub ty: Type,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ImportDecl {
    pub segments: Vec<Name>,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExternDecl {
    pub segments: Vec<Name>,
    pub members: Vec<ExternMember>,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExternMember {
    pub name: Name,
    pub ty: Type,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ConstDecl {
    pub name: Name,
    pub exported: bool,
    pub ty: Type,
    pub value: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FunctionDecl {
    pub name: Name,
    pub exported: bool,
    pub mockable: bool,
    pub params: Vec<Param>,
    pub effects: Vec<Name>,
    pub return_type: Type,
    pub body: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Param {
    pub name: Name,
    pub ty: Type,
    pub mutable: bool,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TestDecl {
    pub description: String,
    pub effects: Vec<Name>,
    pub body: Expr,
    pub span: Span,
}

// ---------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Int,
    Float,
    Bool,
    String,
    Char,
    Unit,
    List(Box<Type>),
    Tuple(Vec<Type>),
    Map(Box<Type>, Box<Type>),
    Function { params: Vec<Type>, effects: Vec<Name>, ret: Box<Type> },
    Named { name: Name, args: Vec<Type> },
    Var(Name),
    Qualified { module: Name, name: Name, args: Vec<Type> },
}

// ---------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Char(char),
    Unit,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum ExprKind {
    Literal(Literal),
    Ident(Name),
    Lambda {
        params: Vec<Param>,
        effects: Vec<Name>,
        return_type: Type,
        body: Box<Expr>,
    },
    Apply {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    Let {
        pattern: Pattern,
        ty: Type,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    ListLit(Vec<Expr>),
    RecordLit(Vec<(Name, Expr)>),
    TupleLit(Vec<Expr>),
    Field {
        base: Box<Expr>,
        name: Name,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Pipeline {
        op: PipelineOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Map {
        list: Box<Expr>,
        func: Box<Expr>,
    },
    Filter {
        list: Box<Expr>,
        pred: Box<Expr>,
    },
    Fold {
        list: Box<Expr>,
        func: Box<Expr>,
        init: Box<Expr>,
    },
    MemberAccess {
        module: Name,
        member: Name,
    },
    WithMock {
        key: Box<Expr>,
        replacement: Box<Expr>,
        body: Box<Expr>,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Concat,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Len,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum PipelineOp {
    /// `x |> f` == `f(x)`
    Forward,
    /// `f >> g` == `λx. g(f(x))`
    ComposeForward,
    /// `f << g` == `λx. f(g(x))`
    ComposeBackward,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Expr,
    pub span: Span,
}

// ---------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum PatternKind {
    Literal(Literal),
    Ident(Name),
    Wildcard,
    Constructor {
        name: Name,
        args: Vec<Pattern>,
    },
    ListEmpty,
    ListCons {
        head: Vec<Pattern>,
        rest: Option<Box<Pattern>>,
        tail: Vec<Pattern>,
    },
    Record(Vec<(Name, Pattern)>),
    Tuple(Vec<Pattern>),
}
