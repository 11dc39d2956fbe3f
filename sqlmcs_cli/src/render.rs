//! Graphviz DOT output for query graphs.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use sqlmcs_subgraph::{Graph, NodeKind};

/// Display adapter rendering a graph as a DOT digraph.
pub struct Dot<'a> {
    graph: &'a Graph,
    title: &'a str,
}

impl<'a> Dot<'a> {
    pub const fn new(graph: &'a Graph, title: &'a str) -> Self {
        Self { graph, title }
    }
}

const fn fill_color(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Table => "skyblue",
        NodeKind::Column => "lightgreen",
        NodeKind::Filter => "salmon",
        NodeKind::Other(_) => "grey",
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph \"{}\" {{", escape(self.title))?;
        writeln!(f, "    node [style=filled, shape=ellipse];")?;
        for node in self.graph.nodes() {
            writeln!(
                f,
                "    n{} [label=\"{}\", fillcolor=\"{}\"];",
                node.id,
                escape(&node.label),
                fill_color(&node.kind)
            )?;
        }
        for (from, to) in self.graph.edges() {
            writeln!(f, "    n{from} -> n{to};")?;
        }
        writeln!(f, "}}")
    }
}

/// Write `graph` as DOT text to `path`.
///
/// # Errors
///
/// Propagates the I/O error from writing the file.
pub fn write_dot(graph: &Graph, title: &str, path: &Path) -> io::Result<()> {
    fs::write(path, Dot::new(graph, title).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nodes_and_edges() {
        let mut graph = Graph::new();
        let users = graph.add_node(NodeKind::Table, "users");
        let status = graph.add_node(NodeKind::Column, "status");
        let eq = graph.add_node(NodeKind::Filter, "EQUALS");
        let other = graph.add_node("VIEW", "say \"hi\"");
        graph.add_edge(users, status).unwrap();
        graph.add_edge(status, eq).unwrap();

        let dot = Dot::new(&graph, "MCS - case.txt").to_string();
        assert!(dot.starts_with("digraph \"MCS - case.txt\" {\n"));
        assert!(dot.contains("n0 [label=\"users\", fillcolor=\"skyblue\"];"));
        assert!(dot.contains("n1 [label=\"status\", fillcolor=\"lightgreen\"];"));
        assert!(dot.contains("n2 [label=\"EQUALS\", fillcolor=\"salmon\"];"));
        assert!(dot.contains(&format!("n{other} [label=\"say \\\"hi\\\"\", fillcolor=\"grey\"];")));
        assert!(dot.contains("n0 -> n1;\n    n1 -> n2;"));
        assert!(dot.trim_end().ends_with('}'));
    }
}
