//! Shared inputs and name resolution for every renderer.

use uvmgen_common::safe_name;
use uvmgen_hdl::SourceProvider;
use uvmgen_model::{
    AgentUnit, EnvironmentUnit, InterfaceUnit, ProjectModel, ProjectUnit, ScoreboardUnit,
    SequenceUnit, TestUnit, TopUnit, TransactionUnit,
};

/// Default transaction class name.
pub const DEFAULT_TXN: &str = "txn_item";

/// Everything a renderer may read: the decoded model and a way to read the
/// DUT source for port lookup.
///
/// Absent units resolve to their default records, so renderers never see a
/// missing dependency.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// The decoded snapshot.
    pub model: &'a ProjectModel,
    /// Where DUT source text comes from.
    pub source: &'a dyn SourceProvider,
}

fn first_nonblank<'s>(candidates: &[&'s str]) -> &'s str {
    candidates
        .iter()
        .copied()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

impl<'a> RenderContext<'a> {
    /// Creates a context over `model` reading DUT text through `source`.
    pub fn new(model: &'a ProjectModel, source: &'a dyn SourceProvider) -> Self {
        Self { model, source }
    }

    /// The `project` unit or its defaults.
    pub fn project(&self) -> ProjectUnit {
        self.model.project.clone().unwrap_or_default()
    }

    /// The `interface` unit or its defaults.
    pub fn interface(&self) -> InterfaceUnit {
        self.model.interface.clone().unwrap_or_default()
    }

    /// The `transaction` unit or its defaults.
    pub fn transaction(&self) -> TransactionUnit {
        self.model.transaction.clone().unwrap_or_default()
    }

    /// The `agent` unit or its defaults.
    pub fn agent(&self) -> AgentUnit {
        self.model.agent.clone().unwrap_or_default()
    }

    /// The `scoreboard` unit or its defaults.
    pub fn scoreboard(&self) -> ScoreboardUnit {
        self.model.scoreboard.clone().unwrap_or_default()
    }

    /// The `environment` unit or its defaults.
    pub fn environment(&self) -> EnvironmentUnit {
        self.model.environment.clone().unwrap_or_default()
    }

    /// The `sequence` unit or its defaults.
    pub fn sequence(&self) -> SequenceUnit {
        self.model.sequence.clone().unwrap_or_default()
    }

    /// The `test` unit or its defaults.
    pub fn test(&self) -> TestUnit {
        self.model.test.clone().unwrap_or_default()
    }

    /// The `top` unit or its defaults.
    pub fn top(&self) -> TopUnit {
        self.model.top.clone().unwrap_or_default()
    }

    /// Resolves a unit's transaction reference: `explicit`, then the
    /// transaction class name, then `txn_item`.
    pub fn txn_type(&self, explicit: &str) -> String {
        let class = self.model.transaction_class();
        safe_name(first_nonblank(&[explicit, class.as_str()]), DEFAULT_TXN)
    }

    /// Interface name, `my_if` by default.
    pub fn interface_name(&self) -> String {
        safe_name(&self.interface().name, "my_if")
    }

    /// Agent class name, `my_agent` by default.
    pub fn agent_name(&self) -> String {
        safe_name(&self.agent().agent_name, "my_agent")
    }

    /// Scoreboard class name, `my_scoreboard` by default.
    pub fn scoreboard_name(&self) -> String {
        safe_name(&self.scoreboard().name, "my_scoreboard")
    }

    /// Environment class name, `env` by default.
    pub fn environment_name(&self) -> String {
        safe_name(&self.environment().name, "env")
    }

    /// Sequence class name, `my_sequence` by default.
    pub fn sequence_name(&self) -> String {
        safe_name(&self.sequence().name, "my_sequence")
    }

    /// Test class name, `base_test` by default.
    pub fn test_name(&self) -> String {
        safe_name(&self.test().name, "base_test")
    }

    /// Top-level testbench module name, `top_tb` by default.
    pub fn top_name(&self) -> String {
        safe_name(&self.top().name, "top_tb")
    }

    /// DUT module: `top.dut_module`, then `project.module_name`, then `dut`.
    pub fn dut_module(&self) -> String {
        let top = self.top();
        let project = self.project();
        safe_name(first_nonblank(&[top.dut_module.as_str(), project.module_name.as_str()]), "dut")
    }

    /// DUT source path: `top.dut_path`, then `project.dut_path`.
    pub fn dut_path(&self) -> String {
        let top = self.top();
        let project = self.project();
        first_nonblank(&[top.dut_path.as_str(), project.dut_path.as_str()]).to_string()
    }

    /// Project name used for the generation root, `testbench` by default.
    pub fn project_name(&self) -> String {
        safe_name(&self.project().project_name, "testbench")
    }
}
