//! Query graph construction from a parsed statement.
//!
//! The graph has one TABLE node per real table, one COLUMN node per distinct
//! `table.column` reference and one FILTER node per column and predicate kind
//! found in the WHERE clause. Edges run table -> column -> filter.

use std::collections::{HashMap, HashSet};

use sqlmcs_subgraph::{Graph, NodeId, NodeKind};

use crate::ast::{ColumnRef, CompareOp, Condition, Expr, SelectStatement};
use crate::error::QueryError;

/// Predicate kinds that become FILTER nodes, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKind {
    Equals,
    In,
    NotNull,
}

impl FilterKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::In => "IN",
            Self::NotNull => "NOT_NULL",
        }
    }
}

/// A WHERE predicate whose left operand is a plain column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPredicate<'q> {
    pub kind: FilterKind,
    pub column: &'q ColumnRef,
    /// Right-hand side as written.
    pub value: String,
}

/// Filter predicates of `condition`, grouped by kind and in reading order
/// within a kind.
pub fn filter_predicates(condition: &Condition) -> Vec<FilterPredicate<'_>> {
    let mut found = Vec::new();
    condition.walk(&mut |c| match c {
        Condition::Compare {
            left: Expr::Column(column),
            op: CompareOp::Eq,
            right,
        } => found.push(FilterPredicate {
            kind: FilterKind::Equals,
            column,
            value: right.to_string(),
        }),
        Condition::In {
            expr: Expr::Column(column),
            list,
            ..
        } => {
            let items: Vec<String> = list.iter().map(ToString::to_string).collect();
            found.push(FilterPredicate {
                kind: FilterKind::In,
                column,
                value: format!("({})", items.join(", ")),
            });
        }
        Condition::IsNull {
            expr: Expr::Column(column),
            negated,
        } => found.push(FilterPredicate {
            kind: FilterKind::NotNull,
            column,
            value: (if *negated { "NOT NULL" } else { "NULL" }).to_string(),
        }),
        _ => {}
    });

    // Stable: keeps reading order inside each kind.
    found.sort_by_key(|p| p.kind);
    found
}

/// Build the query graph of `stmt`.
///
/// # Errors
///
/// Only fails on an internal edge inconsistency, reported as
/// [`QueryError::Graph`].
pub fn build_graph(stmt: &SelectStatement) -> Result<Graph, QueryError> {
    let mut builder = QueryGraphBuilder::new(stmt);

    for column in stmt.projected_columns() {
        builder.add_column(column, true)?;
    }
    for column in stmt.clause_columns() {
        builder.add_column(column, false)?;
    }
    if let Some(selection) = &stmt.selection {
        for predicate in filter_predicates(selection) {
            builder.add_filter(&predicate)?;
        }
    }

    tracing::debug!(
        "built query graph: {} tables, {} columns, {} filters",
        builder.tables.len(),
        builder.columns.len(),
        builder.filters.len()
    );
    Ok(builder.graph)
}

struct QueryGraphBuilder<'q> {
    graph: Graph,
    /// Alias or table name -> table name.
    aliases: HashMap<&'q str, &'q str>,
    /// Table unqualified columns bind to.
    default_table: Option<&'q str>,
    tables: HashMap<&'q str, NodeId>,
    columns: HashMap<(&'q str, &'q str), NodeId>,
    filters: HashSet<(FilterKind, NodeId)>,
}

impl<'q> QueryGraphBuilder<'q> {
    fn new(stmt: &'q SelectStatement) -> Self {
        let mut graph = Graph::new();
        let mut aliases = HashMap::new();
        let mut tables = HashMap::new();

        for table in &stmt.tables {
            if let Some(alias) = &table.alias {
                aliases.insert(alias.as_str(), table.name.as_str());
            }
            aliases.insert(table.name.as_str(), table.name.as_str());
            tables
                .entry(table.name.as_str())
                .or_insert_with(|| graph.add_node(NodeKind::Table, table.name.as_str()));
        }

        Self {
            graph,
            aliases,
            default_table: stmt.tables.first().map(|t| t.name.as_str()),
            tables,
            columns: HashMap::new(),
            filters: HashSet::new(),
        }
    }

    fn resolve(&self, column: &ColumnRef) -> Option<&'q str> {
        match &column.qualifier {
            Some(qualifier) => self.aliases.get(qualifier.as_str()).copied(),
            None => self.default_table,
        }
    }

    fn add_column(&mut self, column: &'q ColumnRef, selected: bool) -> Result<(), QueryError> {
        let Some(table) = self.resolve(column) else {
            tracing::debug!("skipping column {column}: unknown table qualifier");
            return Ok(());
        };
        let key = (table, column.name.as_str());
        if self.columns.contains_key(&key) {
            return Ok(());
        }

        let id = self
            .graph
            .add_attributed_node(NodeKind::Column, column.name.as_str(), None, selected);
        if let Some(&table_id) = self.tables.get(table) {
            self.graph.add_edge(table_id, id)?;
        }
        self.columns.insert(key, id);
        Ok(())
    }

    fn add_filter(&mut self, predicate: &FilterPredicate<'q>) -> Result<(), QueryError> {
        let Some(table) = self.resolve(predicate.column) else {
            return Ok(());
        };
        let Some(&column_id) = self.columns.get(&(table, predicate.column.name.as_str())) else {
            return Ok(());
        };
        if !self.filters.insert((predicate.kind, column_id)) {
            return Ok(());
        }

        let id = self.graph.add_attributed_node(
            NodeKind::Filter,
            predicate.kind.label(),
            Some(predicate.value.clone()),
            false,
        );
        self.graph.add_edge(column_id, id)?;
        Ok(())
    }
}
