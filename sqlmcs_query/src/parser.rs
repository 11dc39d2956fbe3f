//! pest-based parser for the supported SELECT subset.

use pest::Parser as _;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::ast::{ColumnRef, CompareOp, Condition, Expr, SelectItem, SelectStatement, TableRef};
use crate::error::QueryError;

#[derive(Parser)]
#[grammar = "sql.pest"]
struct SqlParser;

/// Parse a single SELECT statement. A trailing `;` is accepted.
///
/// # Errors
///
/// [`QueryError::Parse`] for text outside the grammar and
/// [`QueryError::Unsupported`] for statements other than SELECT.
pub fn parse_select(sql: &str) -> Result<SelectStatement, QueryError> {
    let mut pairs = SqlParser::parse(Rule::statement, sql).map_err(|e| {
        let position = match e.location {
            InputLocation::Pos(p) => p,
            InputLocation::Span((s, _)) => s,
        };
        QueryError::parse(position, e.to_string())
    })?;

    let statement = pairs
        .next()
        .ok_or_else(|| QueryError::parse(0, "empty query"))?;

    for inner in statement.into_inner() {
        match inner.as_rule() {
            Rule::select_stmt => return select_statement(inner),
            Rule::unsupported_stmt => {
                let keyword = inner
                    .into_inner()
                    .next()
                    .map(|k| k.as_str().to_ascii_uppercase())
                    .unwrap_or_default();
                return Err(QueryError::unsupported(format!("{keyword} statement")));
            }
            _ => {}
        }
    }

    Err(QueryError::parse(0, "expected a SELECT statement"))
}

fn syntax_error(pair: &Pair<'_, Rule>, expected: &str) -> QueryError {
    QueryError::parse(
        pair.as_span().start(),
        format!("expected {expected} in '{}'", pair.as_str()),
    )
}

/// First child of `pair` matching `rule`.
fn child<'i>(pair: &Pair<'i, Rule>, rule: Rule, expected: &str) -> Result<Pair<'i, Rule>, QueryError> {
    pair.clone()
        .into_inner()
        .find(|p| p.as_rule() == rule)
        .ok_or_else(|| syntax_error(pair, expected))
}

fn has_child(pair: &Pair<'_, Rule>, rule: Rule) -> bool {
    pair.clone().into_inner().any(|p| p.as_rule() == rule)
}

fn exprs(pair: &Pair<'_, Rule>) -> Result<Vec<Expr>, QueryError> {
    pair.clone()
        .into_inner()
        .filter(|p| p.as_rule() == Rule::expr)
        .map(expr)
        .collect()
}

fn identifier(pair: &Pair<'_, Rule>) -> String {
    let text = pair.as_str();
    let quoted = text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('`') && text.ends_with('`')));
    if quoted {
        text[1..text.len() - 1].to_string()
    } else {
        text.to_string()
    }
}

fn alias(pair: &Pair<'_, Rule>) -> Result<Option<String>, QueryError> {
    match pair.clone().into_inner().find(|p| p.as_rule() == Rule::alias) {
        Some(alias) => Ok(Some(identifier(&child(&alias, Rule::identifier, "alias name")?))),
        None => Ok(None),
    }
}

fn select_statement(pair: Pair<'_, Rule>) -> Result<SelectStatement, QueryError> {
    let mut stmt = SelectStatement::default();

    for clause in pair.into_inner() {
        match clause.as_rule() {
            Rule::DISTINCT => stmt.distinct = true,
            Rule::select_list => {
                stmt.projection = clause
                    .into_inner()
                    .map(select_item)
                    .collect::<Result<_, _>>()?;
            }
            Rule::from_clause => from_clause(clause, &mut stmt)?,
            Rule::where_clause => {
                stmt.selection = Some(or_expr(child(&clause, Rule::or_expr, "condition")?)?);
            }
            Rule::group_by_clause => stmt.group_by = exprs(&clause)?,
            Rule::having_clause => {
                stmt.having = Some(or_expr(child(&clause, Rule::or_expr, "condition")?)?);
            }
            Rule::order_by_clause => {
                stmt.order_by = clause
                    .into_inner()
                    .filter(|p| p.as_rule() == Rule::order_item)
                    .map(|item| child(&item, Rule::expr, "expression").and_then(expr))
                    .collect::<Result<_, _>>()?;
            }
            Rule::limit_clause => {
                let count = child(&clause, Rule::integer, "row count")?;
                let limit = count
                    .as_str()
                    .parse()
                    .map_err(|_| syntax_error(&count, "a row count that fits in 64 bits"))?;
                stmt.limit = Some(limit);
            }
            _ => {}
        }
    }

    Ok(stmt)
}

fn select_item(pair: Pair<'_, Rule>) -> Result<SelectItem, QueryError> {
    let inner = pair
        .clone()
        .into_inner()
        .next()
        .ok_or_else(|| syntax_error(&pair, "select item"))?;

    match inner.as_rule() {
        Rule::star => Ok(SelectItem::Wildcard),
        Rule::qualified_star => {
            let qualifier = child(&inner, Rule::identifier, "table qualifier")?;
            Ok(SelectItem::QualifiedWildcard(identifier(&qualifier)))
        }
        Rule::expr => Ok(SelectItem::Expr {
            expr: expr(inner)?,
            alias: alias(&pair)?,
        }),
        _ => Err(syntax_error(&inner, "select item")),
    }
}

fn from_clause(pair: Pair<'_, Rule>, stmt: &mut SelectStatement) -> Result<(), QueryError> {
    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::table_ref => stmt.tables.push(table_ref(&item)?),
            Rule::join_clause => {
                stmt.tables
                    .push(table_ref(&child(&item, Rule::table_ref, "joined table")?)?);
                if let Some(on) = item.into_inner().find(|p| p.as_rule() == Rule::or_expr) {
                    stmt.join_conditions.push(or_expr(on)?);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn table_ref(pair: &Pair<'_, Rule>) -> Result<TableRef, QueryError> {
    Ok(TableRef {
        name: identifier(&child(pair, Rule::identifier, "table name")?),
        alias: alias(pair)?,
    })
}

fn or_expr(pair: Pair<'_, Rule>) -> Result<Condition, QueryError> {
    let mut operands = pair.clone().into_inner().filter(|p| p.as_rule() == Rule::and_expr);
    let first = operands
        .next()
        .ok_or_else(|| syntax_error(&pair, "condition"))?;

    let mut result = and_expr(first)?;
    for operand in operands {
        result = Condition::Or(Box::new(result), Box::new(and_expr(operand)?));
    }
    Ok(result)
}

fn and_expr(pair: Pair<'_, Rule>) -> Result<Condition, QueryError> {
    let mut operands = pair.clone().into_inner().filter(|p| p.as_rule() == Rule::not_expr);
    let first = operands
        .next()
        .ok_or_else(|| syntax_error(&pair, "condition"))?;

    let mut result = not_expr(first)?;
    for operand in operands {
        result = Condition::And(Box::new(result), Box::new(not_expr(operand)?));
    }
    Ok(result)
}

fn not_expr(pair: Pair<'_, Rule>) -> Result<Condition, QueryError> {
    if let Some(negated) = pair.clone().into_inner().find(|p| p.as_rule() == Rule::not_expr) {
        return Ok(Condition::Not(Box::new(not_expr(negated)?)));
    }
    predicate(child(&pair, Rule::predicate, "predicate")?)
}

fn predicate(pair: Pair<'_, Rule>) -> Result<Condition, QueryError> {
    let inner = pair
        .clone()
        .into_inner()
        .next()
        .ok_or_else(|| syntax_error(&pair, "predicate"))?;
    let negated = has_child(&inner, Rule::NOT);

    match inner.as_rule() {
        Rule::or_expr => Ok(Condition::Group(Box::new(or_expr(inner)?))),
        Rule::expr => Ok(Condition::Expr(expr(inner)?)),
        Rule::in_expr => {
            let mut operands = exprs(&inner)?.into_iter();
            let target = operands
                .next()
                .ok_or_else(|| syntax_error(&inner, "IN operand"))?;
            Ok(Condition::In {
                expr: target,
                negated,
                list: operands.collect(),
            })
        }
        Rule::between_expr => match <[Expr; 3]>::try_from(exprs(&inner)?) {
            Ok([target, low, high]) => Ok(Condition::Between {
                expr: target,
                negated,
                low,
                high,
            }),
            Err(_) => Err(syntax_error(&inner, "BETWEEN operands")),
        },
        Rule::like_expr => match <[Expr; 2]>::try_from(exprs(&inner)?) {
            Ok([target, pattern]) => Ok(Condition::Like {
                expr: target,
                negated,
                pattern,
            }),
            Err(_) => Err(syntax_error(&inner, "LIKE operands")),
        },
        Rule::is_null_expr => Ok(Condition::IsNull {
            expr: expr(child(&inner, Rule::expr, "IS operand")?)?,
            negated,
        }),
        Rule::compare_expr => {
            let op = compare_op(&child(&inner, Rule::compare_op, "comparison operator")?)?;
            match <[Expr; 2]>::try_from(exprs(&inner)?) {
                Ok([left, right]) => Ok(Condition::Compare { left, op, right }),
                Err(_) => Err(syntax_error(&inner, "comparison operands")),
            }
        }
        _ => Err(syntax_error(&inner, "predicate")),
    }
}

fn compare_op(pair: &Pair<'_, Rule>) -> Result<CompareOp, QueryError> {
    match pair.as_str() {
        "=" => Ok(CompareOp::Eq),
        "<>" | "!=" => Ok(CompareOp::NotEq),
        "<" => Ok(CompareOp::Lt),
        "<=" => Ok(CompareOp::LtEq),
        ">" => Ok(CompareOp::Gt),
        ">=" => Ok(CompareOp::GtEq),
        _ => Err(syntax_error(pair, "comparison operator")),
    }
}

fn expr(pair: Pair<'_, Rule>) -> Result<Expr, QueryError> {
    let mut parts = pair.clone().into_inner();
    let first = parts.next().ok_or_else(|| syntax_error(&pair, "expression"))?;
    let mut result = term(first)?;

    while let Some(op) = parts.next() {
        let right = parts
            .next()
            .ok_or_else(|| syntax_error(&op, "right operand"))?;
        result = Expr::Binary {
            left: Box::new(result),
            op: op.as_str().to_string(),
            right: Box::new(term(right)?),
        };
    }
    Ok(result)
}

fn term(pair: Pair<'_, Rule>) -> Result<Expr, QueryError> {
    let inner = pair
        .clone()
        .into_inner()
        .next()
        .ok_or_else(|| syntax_error(&pair, "term"))?;

    match inner.as_rule() {
        Rule::literal => Ok(Expr::Literal(literal(&inner))),
        Rule::function_call => function_call(inner),
        Rule::column_ref => column_ref(&inner).map(Expr::Column),
        Rule::expr => Ok(Expr::Nested(Box::new(expr(inner)?))),
        _ => Err(syntax_error(&inner, "term")),
    }
}

fn literal(pair: &Pair<'_, Rule>) -> String {
    match pair.clone().into_inner().next() {
        Some(inner) if matches!(inner.as_rule(), Rule::string | Rule::number) => {
            inner.as_str().to_string()
        }
        _ => pair.as_str().to_ascii_uppercase(),
    }
}

fn function_call(pair: Pair<'_, Rule>) -> Result<Expr, QueryError> {
    let name = identifier(&child(&pair, Rule::identifier, "function name")?);
    let distinct = has_child(&pair, Rule::DISTINCT);
    let args = if has_child(&pair, Rule::star) {
        vec![Expr::Wildcard]
    } else {
        exprs(&pair)?
    };
    Ok(Expr::Function {
        name,
        distinct,
        args,
    })
}

fn column_ref(pair: &Pair<'_, Rule>) -> Result<ColumnRef, QueryError> {
    let parts: Vec<String> = pair
        .clone()
        .into_inner()
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| identifier(&p))
        .collect();

    match <[String; 2]>::try_from(parts) {
        Ok([qualifier, name]) => Ok(ColumnRef {
            qualifier: Some(qualifier),
            name,
        }),
        Err(parts) => match <[String; 1]>::try_from(parts) {
            Ok([name]) => Ok(ColumnRef {
                qualifier: None,
                name,
            }),
            Err(_) => Err(syntax_error(pair, "column reference")),
        },
    }
}
