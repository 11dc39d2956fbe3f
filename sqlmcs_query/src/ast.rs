//! Syntax tree for the supported SELECT subset.

use std::fmt;

/// A parsed `SELECT` statement.
///
/// Clauses are kept in the order they are written, which is the order column
/// references are visited in when building the query graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    pub distinct: bool,
    pub projection: Vec<SelectItem>,
    /// Every table of the FROM clause, joined tables included.
    pub tables: Vec<TableRef>,
    /// `ON` conditions of the joins, in join order.
    pub join_conditions: Vec<Condition>,
    pub selection: Option<Condition>,
    pub group_by: Vec<Expr>,
    pub having: Option<Condition>,
    pub order_by: Vec<Expr>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `*`
    Wildcard,
    /// `alias.*`
    QualifiedWildcard(String),
    Expr { expr: Expr, alias: Option<String> },
}

/// A possibly qualified column reference, `name` or `qualifier.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub qualifier: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(ColumnRef),
    /// Literal as written, keywords upper-cased.
    Literal(String),
    Function {
        name: String,
        distinct: bool,
        args: Vec<Expr>,
    },
    /// `*` as a function argument.
    Wildcard,
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Nested(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
    Group(Box<Condition>),
    Compare {
        left: Expr,
        op: CompareOp,
        right: Expr,
    },
    In {
        expr: Expr,
        negated: bool,
        list: Vec<Expr>,
    },
    IsNull {
        expr: Expr,
        negated: bool,
    },
    Like {
        expr: Expr,
        negated: bool,
        pattern: Expr,
    },
    Between {
        expr: Expr,
        negated: bool,
        low: Expr,
        high: Expr,
    },
    /// A bare expression used as a predicate.
    Expr(Expr),
}

impl Expr {
    /// Append the column references of this expression in reading order.
    pub fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Self::Column(column) => out.push(column),
            Self::Literal(_) | Self::Wildcard => {}
            Self::Function { args, .. } => {
                for arg in args {
                    arg.collect_columns(out);
                }
            }
            Self::Binary { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            Self::Nested(inner) => inner.collect_columns(out),
        }
    }

    pub const fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }
}

impl Condition {
    /// Append the column references of this condition in reading order.
    pub fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            Self::Not(inner) | Self::Group(inner) => inner.collect_columns(out),
            Self::Compare { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            Self::In { expr, list, .. } => {
                expr.collect_columns(out);
                for item in list {
                    item.collect_columns(out);
                }
            }
            Self::IsNull { expr, .. } | Self::Expr(expr) => expr.collect_columns(out),
            Self::Like { expr, pattern, .. } => {
                expr.collect_columns(out);
                pattern.collect_columns(out);
            }
            Self::Between {
                expr, low, high, ..
            } => {
                expr.collect_columns(out);
                low.collect_columns(out);
                high.collect_columns(out);
            }
        }
    }

    /// Every condition node, this one included, in reading order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        match self {
            Self::And(left, right) | Self::Or(left, right) => {
                left.walk(visit);
                right.walk(visit);
            }
            Self::Not(inner) | Self::Group(inner) => inner.walk(visit),
            _ => {}
        }
    }
}

impl SelectStatement {
    /// Column references of the select list.
    pub fn projected_columns(&self) -> Vec<&ColumnRef> {
        let mut out = Vec::new();
        for item in &self.projection {
            if let SelectItem::Expr { expr, .. } = item {
                expr.collect_columns(&mut out);
            }
        }
        out
    }

    /// Column references outside the select list, in clause order.
    pub fn clause_columns(&self) -> Vec<&ColumnRef> {
        let mut out = Vec::new();
        for condition in &self.join_conditions {
            condition.collect_columns(&mut out);
        }
        if let Some(selection) = &self.selection {
            selection.collect_columns(&mut out);
        }
        for expr in &self.group_by {
            expr.collect_columns(&mut out);
        }
        if let Some(having) = &self.having {
            having.collect_columns(&mut out);
        }
        for expr in &self.order_by {
            expr.collect_columns(&mut out);
        }
        out
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{qualifier}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        })
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => fmt::Display::fmt(column, f),
            Self::Literal(text) => f.write_str(text),
            Self::Function {
                name,
                distinct,
                args,
            } => {
                write!(f, "{name}(")?;
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                write_list(f, args)?;
                f.write_str(")")
            }
            Self::Wildcard => f.write_str("*"),
            Self::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Nested(inner) => write!(f, "({inner})"),
        }
    }
}

pub(crate) fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    Ok(())
}
