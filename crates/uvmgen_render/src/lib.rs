//! Per-unit SystemVerilog renderers.
//!
//! Every renderer is a pure function of a [`RenderContext`]: the decoded
//! project model plus a [`SourceProvider`](uvmgen_hdl::SourceProvider) for the
//! top module's DUT port lookup. Missing units fall back to documented
//! default names, and every identifier passes through
//! [`safe_name`](uvmgen_common::safe_name) before it is emitted.
//!
//! [`render_sources`] runs all of them and adds the package file; the
//! [`Artifact`] list lets callers render one unit at a time.

#![warn(missing_docs)]

pub mod agent;
pub mod context;
pub mod environment;
pub mod interface;
pub mod package;
pub mod scoreboard;
pub mod sequence;
pub mod test_class;
pub mod top;
pub mod transaction;

pub use agent::{render_agent_files, AGENT_FILES};
pub use context::{RenderContext, DEFAULT_TXN};
pub use environment::render_environment;
pub use interface::{render_interface, vector_decl};
pub use package::{include_order, render_package, INCLUDE_ORDER, PACKAGE_FILE};
pub use scoreboard::{is_integral_type, render_scoreboard};
pub use sequence::render_sequence;
pub use test_class::render_test;
pub use top::render_top;
pub use transaction::{render_transaction, FieldMacro};

use std::collections::BTreeMap;
use uvmgen_common::GenResult;

/// Rendered `src/` files keyed by bare file name (`agent.sv`).
pub type SourceFiles = BTreeMap<String, String>;

/// One renderer and the file(s) it produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// `interface.sv`
    Interface,
    /// `transaction.sv`
    Transaction,
    /// `sequence.sv`
    Sequence,
    /// `agent.sv` plus driver, monitor and sequencer files.
    Agent,
    /// `scoreboard.sv`
    Scoreboard,
    /// `environment.sv`
    Environment,
    /// `test.sv`
    Test,
    /// `top.sv`
    Top,
}

impl Artifact {
    /// Every renderer, in rendering order.
    pub const ALL: [Artifact; 8] = [
        Artifact::Interface,
        Artifact::Transaction,
        Artifact::Sequence,
        Artifact::Agent,
        Artifact::Scoreboard,
        Artifact::Environment,
        Artifact::Test,
        Artifact::Top,
    ];

    /// The main file this renderer produces.
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Interface => "interface.sv",
            Artifact::Transaction => "transaction.sv",
            Artifact::Sequence => "sequence.sv",
            Artifact::Agent => "agent.sv",
            Artifact::Scoreboard => "scoreboard.sv",
            Artifact::Environment => "environment.sv",
            Artifact::Test => "test.sv",
            Artifact::Top => "top.sv",
        }
    }

    /// Renders this artifact's files.
    pub fn render(self, ctx: &RenderContext<'_>) -> GenResult<Vec<(&'static str, String)>> {
        let single = |text: String| vec![(self.file_name(), text)];
        let rendered = match self {
            Artifact::Interface => render_interface(ctx).map(single),
            Artifact::Transaction => render_transaction(ctx).map(single),
            Artifact::Sequence => render_sequence(ctx).map(single),
            Artifact::Agent => render_agent_files(ctx),
            Artifact::Scoreboard => render_scoreboard(ctx).map(single),
            Artifact::Environment => render_environment(ctx).map(single),
            Artifact::Test => render_test(ctx).map(single),
            Artifact::Top => render_top(ctx).map(single),
        };
        rendered.map_err(|e| e.in_artifact(self.file_name()))
    }
}

/// Adds `tb_pkg.sv` including whichever class files are in `files`.
pub fn add_package(files: &mut SourceFiles) -> GenResult<()> {
    let order = include_order(|f| files.contains_key(f));
    let text = render_package(&order).map_err(|e| e.in_artifact(PACKAGE_FILE))?;
    files.insert(PACKAGE_FILE.to_string(), text);
    Ok(())
}

/// Renders every artifact plus the package. Any renderer failure is
/// returned as is.
pub fn render_sources(ctx: &RenderContext<'_>) -> GenResult<SourceFiles> {
    let mut files = SourceFiles::new();
    for artifact in Artifact::ALL {
        for (name, text) in artifact.render(ctx)? {
            tracing::debug!(file = name, bytes = text.len(), "rendered");
            files.insert(name.to_string(), text);
        }
    }
    add_package(&mut files)?;
    Ok(files)
}
