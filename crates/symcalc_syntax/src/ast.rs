//! AST
//!
//! 表达式与语句的语法树。每个节点都带有源码 span，解析一次、求值后丢弃。

pub use symcalc_diagnostics::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // 数字字面量: 1, 0.5, 1e-3
    Literal(f64),

    // 变量引用: x, theta_1
    Variable(String),

    // 一元操作: -a, +a, a!, a!!
    Unary(UnaryOp, Box<Expr>),

    // 二元操作: a + b, a ^ b
    Binary(Box<Expr>, BinaryOp, Box<Expr>),

    // 函数调用: sin(x), atan2(y, x)
    Call { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow, // ^ 或 **
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,             // -x
    Pos,             // +x
    Factorial,       // x!
    DoubleFactorial, // x!!
}

/// 以 `;` 分隔的一条语句
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    // 表达式: 2 * (a + 1)
    Expr(Expr),

    // 赋值: a = 3
    Assign { name: String, value: Expr },
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// 语句右侧的表达式
    pub fn value(&self) -> &Expr {
        match &self.kind {
            StmtKind::Expr(expr) => expr,
            StmtKind::Assign { value, .. } => value,
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// 后序遍历所有节点
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expr)) {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::Variable(_) => {}
            ExprKind::Unary(_, child) => child.walk(visit),
            ExprKind::Binary(lhs, _, rhs) => {
                lhs.walk(visit);
                rhs.walk(visit);
            }
            ExprKind::Call { args, .. } => {
                for arg in args {
                    arg.walk(visit);
                }
            }
        }
        visit(self);
    }

    /// 表达式中引用到的变量名（按首次出现顺序，去重）
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        self.walk(&mut |expr| {
            if let ExprKind::Variable(name) = &expr.kind {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        });
        names
    }
}
