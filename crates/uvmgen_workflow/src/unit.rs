//! Workflow units: the dashboard's view of the project model.

use serde::{Deserialize, Serialize};
use std::fmt;
use uvmgen_model::keys;

/// One entry of the workflow, in dashboard display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowUnit {
    /// Project basics and DUT path.
    ProjectDetails,
    /// Interface signals, clock and reset.
    InterfaceDut,
    /// Transaction class.
    TransactionClass,
    /// Agent and its sub-components.
    AgentClass,
    /// Optional scoreboard.
    ScoreboardClass,
    /// Environment.
    EnvironmentClass,
    /// Sequence.
    SequenceClass,
    /// Test.
    TestClass,
    /// Top-level testbench module.
    TopModule,
    /// Preview page.
    Preview,
    /// State machine page.
    StateMachine,
    /// Dashboard page.
    Dashboard,
}

impl WorkflowUnit {
    /// Every unit, in display order.
    pub const ALL: [WorkflowUnit; 12] = [
        WorkflowUnit::ProjectDetails,
        WorkflowUnit::InterfaceDut,
        WorkflowUnit::TransactionClass,
        WorkflowUnit::AgentClass,
        WorkflowUnit::ScoreboardClass,
        WorkflowUnit::EnvironmentClass,
        WorkflowUnit::SequenceClass,
        WorkflowUnit::TestClass,
        WorkflowUnit::TopModule,
        WorkflowUnit::Preview,
        WorkflowUnit::StateMachine,
        WorkflowUnit::Dashboard,
    ];

    /// Units backed by a snapshot record, in display order.
    pub const CONFIGURABLE: [WorkflowUnit; 9] = [
        WorkflowUnit::ProjectDetails,
        WorkflowUnit::InterfaceDut,
        WorkflowUnit::TransactionClass,
        WorkflowUnit::AgentClass,
        WorkflowUnit::ScoreboardClass,
        WorkflowUnit::EnvironmentClass,
        WorkflowUnit::SequenceClass,
        WorkflowUnit::TestClass,
        WorkflowUnit::TopModule,
    ];

    /// The stable key (`"interface_dut"`).
    pub fn key(self) -> &'static str {
        match self {
            WorkflowUnit::ProjectDetails => "project_details",
            WorkflowUnit::InterfaceDut => "interface_dut",
            WorkflowUnit::TransactionClass => "transaction_class",
            WorkflowUnit::AgentClass => "agent_class",
            WorkflowUnit::ScoreboardClass => "scoreboard_class",
            WorkflowUnit::EnvironmentClass => "environment_class",
            WorkflowUnit::SequenceClass => "sequence_class",
            WorkflowUnit::TestClass => "test_class",
            WorkflowUnit::TopModule => "top_module",
            WorkflowUnit::Preview => "preview",
            WorkflowUnit::StateMachine => "state_machine",
            WorkflowUnit::Dashboard => "dashboard",
        }
    }

    /// The dashboard label.
    pub fn label(self) -> &'static str {
        match self {
            WorkflowUnit::ProjectDetails => "Project Details",
            WorkflowUnit::InterfaceDut => "Interface & DUT",
            WorkflowUnit::TransactionClass => "Transaction",
            WorkflowUnit::AgentClass => "Agent",
            WorkflowUnit::ScoreboardClass => "Scoreboard (Optional)",
            WorkflowUnit::EnvironmentClass => "Environment",
            WorkflowUnit::SequenceClass => "Sequence",
            WorkflowUnit::TestClass => "Test",
            WorkflowUnit::TopModule => "Top Module",
            WorkflowUnit::Preview => "Preview",
            WorkflowUnit::StateMachine => "State Machine",
            WorkflowUnit::Dashboard => "Dashboard",
        }
    }

    /// The name used when this unit is listed as a missing prerequisite.
    pub fn requirement_name(self) -> &'static str {
        match self {
            WorkflowUnit::ProjectDetails => "Project Details",
            WorkflowUnit::InterfaceDut => "Interface",
            WorkflowUnit::TransactionClass => "Transaction",
            WorkflowUnit::AgentClass => "Agent",
            WorkflowUnit::ScoreboardClass => "Scoreboard",
            WorkflowUnit::EnvironmentClass => "Environment",
            WorkflowUnit::SequenceClass => "Sequence",
            WorkflowUnit::TestClass => "Test",
            WorkflowUnit::TopModule => "Top Module",
            other => other.label(),
        }
    }

    /// The snapshot key holding this unit's record, if any.
    pub fn snapshot_key(self) -> Option<&'static str> {
        match self {
            WorkflowUnit::ProjectDetails => Some(keys::PROJECT),
            WorkflowUnit::InterfaceDut => Some(keys::INTERFACE),
            WorkflowUnit::TransactionClass => Some(keys::TRANSACTION),
            WorkflowUnit::AgentClass => Some(keys::AGENT),
            WorkflowUnit::ScoreboardClass => Some(keys::SCOREBOARD),
            WorkflowUnit::EnvironmentClass => Some(keys::ENVIRONMENT),
            WorkflowUnit::SequenceClass => Some(keys::SEQUENCE),
            WorkflowUnit::TestClass => Some(keys::TEST),
            WorkflowUnit::TopModule => Some(keys::TOP),
            WorkflowUnit::Preview | WorkflowUnit::StateMachine | WorkflowUnit::Dashboard => None,
        }
    }

    /// Returns `true` for the scoreboard, which never gates other units.
    pub fn is_optional(self) -> bool {
        self == WorkflowUnit::ScoreboardClass
    }

    /// Returns `true` for units that count towards completion.
    pub fn is_required(self) -> bool {
        self.snapshot_key().is_some() && !self.is_optional()
    }

    /// Looks a unit up by its stable key.
    pub fn from_key(key: &str) -> Option<WorkflowUnit> {
        WorkflowUnit::ALL.into_iter().find(|u| u.key() == key)
    }
}

impl fmt::Display for WorkflowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
