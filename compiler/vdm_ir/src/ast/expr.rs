//! Expression and statement trees.
//!
//! Evaluation is not this workspace's concern. The trees exist so that
//! expression patterns can carry their guard, and so that cross-tree folds
//! (free variables, hidden names) have something to walk into.

use crate::{Literal, Name, Pattern, Span, TypeId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    Minus,
    Card,
    Len,
    Dom,
    Rng,
    Hd,
    Tl,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Implies,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    InSet,
    Union,
    Inter,
    Difference,
    Concat,
    MapUnion,
    Override,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Minus => "-",
            UnaryOp::Card => "card",
            UnaryOp::Len => "len",
            UnaryOp::Dom => "dom",
            UnaryOp::Rng => "rng",
            UnaryOp::Hd => "hd",
            UnaryOp::Tl => "tl",
        }
    }
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Implies => "=>",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::InSet => "in set",
            BinaryOp::Union => "union",
            BinaryOp::Inter => "inter",
            BinaryOp::Difference => "\\",
            BinaryOp::Concat => "^",
            BinaryOp::MapUnion => "munion",
            BinaryOp::Override => "++",
        }
    }
}

/// `let pattern : type = value` inside a `let` expression or block.
#[derive(Clone, PartialEq, Debug)]
pub struct LetBinding {
    pub pattern: Pattern,
    pub declared: Option<TypeId>,
    pub value: Expr,
}

/// One `pattern -> body` alternative of a `cases` expression.
#[derive(Clone, PartialEq, Debug)]
pub struct CaseArm {
    pub pattern: Pattern,
    pub body: Expr,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Variable(Name),
    Literal(Literal),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Apply {
        root: Box<Expr>,
        args: Vec<Expr>,
    },
    Tuple(Vec<Expr>),
    SetEnum(Vec<Expr>),
    SeqEnum(Vec<Expr>),
    MapEnum(Vec<(Expr, Expr)>),
    FieldSelect {
        object: Box<Expr>,
        field: Name,
    },
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Let {
        bindings: Vec<LetBinding>,
        body: Box<Expr>,
    },
    Cases {
        scrutinee: Box<Expr>,
        arms: Vec<CaseArm>,
        others: Option<Box<Expr>>,
    },
    Lambda {
        params: Vec<(Pattern, TypeId)>,
        body: Box<Expr>,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn variable(name: Name, span: Span) -> Self {
        Expr::new(ExprKind::Variable(name), span)
    }

    pub fn literal(lit: Literal, span: Span) -> Self {
        Expr::new(ExprKind::Literal(lit), span)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    Assign {
        target: Name,
        value: Expr,
    },
    Block {
        bindings: Vec<LetBinding>,
        body: Vec<Stmt>,
    },
    Call {
        name: Name,
        args: Vec<Expr>,
    },
    Return(Option<Expr>),
    Skip,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}
