//! The fixed prerequisite graph between workflow units.
//!
//! ```text
//! project_details
//!   -> interface_dut -> transaction_class -> agent_class -> environment_class -> test_class
//!                                        \-> scoreboard_class (optional)
//!                                        \-> sequence_class
//!   interface_dut + test_class -> top_module
//! ```

use crate::unit::WorkflowUnit;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Direct prerequisites, listed in the order they are reported.
const PREREQUISITES: &[(WorkflowUnit, &[WorkflowUnit])] = &[
    (WorkflowUnit::InterfaceDut, &[WorkflowUnit::ProjectDetails]),
    (WorkflowUnit::TransactionClass, &[WorkflowUnit::InterfaceDut]),
    (WorkflowUnit::AgentClass, &[WorkflowUnit::TransactionClass]),
    (WorkflowUnit::ScoreboardClass, &[WorkflowUnit::TransactionClass]),
    (WorkflowUnit::EnvironmentClass, &[WorkflowUnit::AgentClass]),
    (WorkflowUnit::SequenceClass, &[WorkflowUnit::TransactionClass]),
    (WorkflowUnit::TestClass, &[WorkflowUnit::EnvironmentClass]),
    (
        WorkflowUnit::TopModule,
        &[WorkflowUnit::TestClass, WorkflowUnit::InterfaceDut],
    ),
];

/// The prerequisite DAG. Edges point from prerequisite to dependent; the
/// edge weight is the prerequisite's reporting position.
pub struct WorkflowGraph {
    graph: DiGraph<WorkflowUnit, usize>,
    nodes: HashMap<WorkflowUnit, NodeIndex>,
}

impl Default for WorkflowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowGraph {
    /// Builds the fixed graph over the configurable units.
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for unit in WorkflowUnit::CONFIGURABLE {
            nodes.insert(unit, graph.add_node(unit));
        }
        for (unit, prereqs) in PREREQUISITES {
            for (pos, prereq) in prereqs.iter().enumerate() {
                graph.add_edge(nodes[prereq], nodes[unit], pos);
            }
        }
        Self { graph, nodes }
    }

    /// Direct prerequisites of `unit`, in reporting order.
    pub fn prerequisites(&self, unit: WorkflowUnit) -> Vec<WorkflowUnit> {
        let Some(&node) = self.nodes.get(&unit) else {
            return Vec::new();
        };
        let mut parents: Vec<(usize, WorkflowUnit)> = self
            .graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| (*e.weight(), self.graph[e.source()]))
            .collect();
        parents.sort();
        parents.into_iter().map(|(_, u)| u).collect()
    }

    /// Units that list `unit` as a direct prerequisite, in display order.
    pub fn dependents(&self, unit: WorkflowUnit) -> Vec<WorkflowUnit> {
        let Some(&node) = self.nodes.get(&unit) else {
            return Vec::new();
        };
        let mut children: Vec<WorkflowUnit> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|n| self.graph[n])
            .collect();
        children.sort();
        children
    }

    /// A dependency-respecting order of the configurable units.
    pub fn topological_order(&self) -> Vec<WorkflowUnit> {
        match toposort(&self.graph, None) {
            Ok(order) => order.into_iter().map(|n| self.graph[n]).collect(),
            // the table above is acyclic; display order is also a valid order
            Err(_) => WorkflowUnit::CONFIGURABLE.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_has_two_prerequisites_in_order() {
        let g = WorkflowGraph::new();
        assert_eq!(
            g.prerequisites(WorkflowUnit::TopModule),
            vec![WorkflowUnit::TestClass, WorkflowUnit::InterfaceDut]
        );
        assert!(g.prerequisites(WorkflowUnit::ProjectDetails).is_empty());
        assert!(g.prerequisites(WorkflowUnit::Preview).is_empty());
    }

    #[test]
    fn nothing_depends_on_scoreboard() {
        let g = WorkflowGraph::new();
        assert!(g.dependents(WorkflowUnit::ScoreboardClass).is_empty());
        assert_eq!(
            g.dependents(WorkflowUnit::TransactionClass),
            vec![
                WorkflowUnit::AgentClass,
                WorkflowUnit::ScoreboardClass,
                WorkflowUnit::SequenceClass
            ]
        );
    }

    #[test]
    fn topological_order_respects_edges() {
        let g = WorkflowGraph::new();
        let order = g.topological_order();
        assert_eq!(order.len(), WorkflowUnit::CONFIGURABLE.len());
        let pos = |u: WorkflowUnit| order.iter().position(|x| *x == u).unwrap();
        for (unit, prereqs) in PREREQUISITES {
            for p in *prereqs {
                assert!(pos(*p) < pos(*unit), "{p} must precede {unit}");
            }
        }
    }
}
