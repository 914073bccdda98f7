//! Typed unit records decoded from a project snapshot.
//!
//! Every record derives `Default` and is decoded with `#[serde(default)]`, so
//! a missing field always takes the value a fresh form would show. Legacy
//! field spellings are folded into the canonical names before decoding (see
//! [`crate::model`]), never here.

use crate::de::{self, TextMap};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The `project` unit: basics plus the last DUT analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectUnit {
    /// The project name; also names the generation root directory.
    #[serde(deserialize_with = "de::text")]
    pub project_name: String,
    /// Directory under which the project root is created.
    #[serde(deserialize_with = "de::text")]
    pub output_dir: String,
    /// Path to the DUT source file.
    #[serde(deserialize_with = "de::text")]
    pub dut_path: String,
    /// DUT module name detected by the last analysis.
    #[serde(deserialize_with = "de::text")]
    pub module_name: String,
    /// Structural facts from the last DUT analysis.
    pub dut_info: DutInfo,
    /// Informational only.
    #[serde(deserialize_with = "de::text")]
    pub owner_name: String,
    /// Informational only.
    #[serde(deserialize_with = "de::text")]
    pub uvm_version: String,
    /// Informational only.
    #[serde(deserialize_with = "de::text")]
    pub language: String,
    /// Informational only.
    #[serde(deserialize_with = "de::text")]
    pub notes: String,
}

/// Facts recovered from the DUT source and stored in the project record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DutInfo {
    /// `parameter` / `localparam` values as raw expression text.
    #[serde(deserialize_with = "de::text_map")]
    pub parameters: TextMap,
    /// Port declarations with resolved widths.
    #[serde(deserialize_with = "de::records")]
    pub signals: Vec<DutSignal>,
}

/// One port declaration found in the DUT.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DutSignal {
    /// `input`, `output` or `inout`.
    #[serde(deserialize_with = "de::text")]
    pub direction: String,
    /// Port name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Resolved width, or the raw bracket text when unresolvable.
    #[serde(deserialize_with = "de::text")]
    pub width: String,
    /// The declared range text, `1` for scalars.
    #[serde(deserialize_with = "de::text")]
    pub raw: String,
}

/// The `interface` unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceUnit {
    /// Interface name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Clock signal name; blank means no clock port.
    #[serde(deserialize_with = "de::text")]
    pub clock: String,
    /// Reset signal name; blank means no reset port.
    #[serde(deserialize_with = "de::text")]
    pub reset: String,
    /// Signals in declaration order.
    #[serde(deserialize_with = "de::records")]
    pub signals: Vec<SignalDecl>,
    /// Modports in authored order.
    #[serde(
        deserialize_with = "deserialize_modports",
        serialize_with = "serialize_modports"
    )]
    pub modports: Vec<Modport>,
}

/// One interface signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalDecl {
    /// Signal direction; blank is treated as `input`.
    #[serde(deserialize_with = "de::text")]
    pub direction: String,
    /// Signal name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Bit width as text (`"8"`, `"WIDTH"`, `"[W-1:0]"`).
    #[serde(deserialize_with = "de::text")]
    pub width: String,
}

impl Default for SignalDecl {
    fn default() -> Self {
        Self {
            direction: "input".to_string(),
            name: String::new(),
            width: "1".to_string(),
        }
    }
}

/// A named modport: signal name to access direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modport {
    /// Modport name.
    pub name: String,
    /// Signal name to `input` / `output` / `inout`, in authored order.
    pub access: TextMap,
}

fn deserialize_modports<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Modport>, D::Error> {
    struct ModportsVisitor;

    impl<'de> Visitor<'de> for ModportsVisitor {
        type Value = Vec<Modport>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of modport names to access lists")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Vec<Modport>, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Vec<Modport>, A::Error> {
            let mut out = Vec::new();
            while let Some((name, value)) = access.next_entry::<String, Value>()? {
                let access = de::value_text_map(&value);
                out.push(Modport { name, access });
            }
            Ok(out)
        }
    }

    d.deserialize_any(ModportsVisitor)
}

fn serialize_modports<S: Serializer>(modports: &[Modport], s: S) -> Result<S::Ok, S::Error> {
    let mut map = s.serialize_map(Some(modports.len()))?;
    for mp in modports {
        map.serialize_entry(&mp.name, &mp.access)?;
    }
    map.end()
}

/// The `transaction` unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionUnit {
    /// Class name.
    #[serde(deserialize_with = "de::text")]
    pub class_name: String,
    /// Base class; blank means `uvm_sequence_item`.
    #[serde(deserialize_with = "de::text")]
    pub base_class: String,
    /// Fields in declaration order.
    #[serde(deserialize_with = "de::records")]
    pub fields: Vec<TransactionField>,
    /// Constraint blocks in declaration order.
    #[serde(deserialize_with = "de::records")]
    pub constraints: Vec<Constraint>,
}

/// One transaction field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionField {
    /// Whether the field is declared `rand`.
    #[serde(deserialize_with = "de::flag")]
    pub rand: bool,
    /// SystemVerilog type text (`bit [7:0]`, `string`, `my_enum_t`).
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub ty: String,
    /// Field name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Default value text. Carried but not emitted.
    #[serde(deserialize_with = "de::text")]
    pub default: String,
}

/// One constraint block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraint {
    /// Constraint name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Constraint expression.
    #[serde(deserialize_with = "de::text")]
    pub body: String,
}

/// Whether an agent drives the bus or only observes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Sequencer, driver and monitor.
    #[default]
    Active,
    /// Monitor only.
    Passive,
}

impl AgentKind {
    /// Parses `passive` case-insensitively; everything else is active.
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("passive") {
            AgentKind::Passive
        } else {
            AgentKind::Active
        }
    }
}

impl<'de> Deserialize<'de> for AgentKind {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        de::text(d).map(|s| AgentKind::parse(&s))
    }
}

/// Which agent sub-components to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    /// Build a sequencer.
    #[serde(deserialize_with = "de::flag")]
    pub sequencer: bool,
    /// Build a driver.
    #[serde(deserialize_with = "de::flag")]
    pub driver: bool,
    /// Build a monitor.
    #[serde(deserialize_with = "de::flag")]
    pub monitor: bool,
}

impl Default for Components {
    fn default() -> Self {
        Self {
            sequencer: true,
            driver: true,
            monitor: true,
        }
    }
}

/// Agent sub-component files that accept custom code.
pub const AGENT_COMPONENTS: [&str; 4] = ["agent", "driver", "monitor", "sequencer"];

/// The `agent` unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentUnit {
    /// Agent class name.
    #[serde(deserialize_with = "de::text")]
    pub agent_name: String,
    /// Active or passive.
    #[serde(rename = "type")]
    pub kind: AgentKind,
    /// Transaction type; blank falls back to the transaction unit.
    #[serde(deserialize_with = "de::text")]
    pub transaction: String,
    /// Sub-component include flags.
    pub include_components: Components,
    /// Use per-component custom code where provided.
    #[serde(deserialize_with = "de::flag")]
    pub use_custom_code: bool,
    /// Component name (`agent`, `driver`, `monitor`, `sequencer`) to text.
    #[serde(deserialize_with = "de::text_map")]
    pub custom_code: TextMap,
}

impl AgentUnit {
    /// Returns a copy with include flags consistent with the agent kind.
    ///
    /// Passive agents never build a sequencer or driver and always build a
    /// monitor.
    pub fn normalized(&self) -> AgentUnit {
        let mut out = self.clone();
        if out.kind == AgentKind::Passive {
            out.include_components = Components {
                sequencer: false,
                driver: false,
                monitor: true,
            };
        }
        out
    }

    /// Returns `true` if a sequencer handle should exist.
    pub fn has_sequencer(&self) -> bool {
        self.kind == AgentKind::Active && self.include_components.sequencer
    }

    /// Returns `true` if a driver handle should exist.
    pub fn has_driver(&self) -> bool {
        self.kind == AgentKind::Active && self.include_components.driver
    }

    /// Returns `true` if a monitor handle should exist.
    pub fn has_monitor(&self) -> bool {
        self.include_components.monitor
    }

    /// Custom text for `component`, when custom code is enabled and the
    /// stored text is not blank.
    pub fn custom_text(&self, component: &str) -> Option<&str> {
        if !self.use_custom_code {
            return None;
        }
        self.custom_code
            .get(component)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }
}

/// How the scoreboard compares actual against expected transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// `uvm_comparer` based object compare.
    #[default]
    UvmCompare,
    /// Per-field `!==` checks.
    Manual,
}

impl CompareMode {
    /// Parses `manual` case-insensitively; everything else is `uvm_compare`.
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("manual") {
            CompareMode::Manual
        } else {
            CompareMode::UvmCompare
        }
    }
}

impl<'de> Deserialize<'de> for CompareMode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        de::text(d).map(|s| CompareMode::parse(&s))
    }
}

/// The `scoreboard` unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardUnit {
    /// Scoreboard class name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Transaction type; blank falls back to the transaction unit.
    #[serde(deserialize_with = "de::text")]
    pub transaction: String,
    /// Keep a queue of expected transactions.
    #[serde(deserialize_with = "de::flag")]
    pub use_expected_queue: bool,
    /// Comparison strategy.
    pub compare_mode: CompareMode,
    /// Emit a covergroup over the selected fields.
    #[serde(deserialize_with = "de::flag")]
    pub enable_coverage: bool,
    /// Selected transaction field names.
    #[serde(deserialize_with = "de::names")]
    pub fields: Vec<String>,
}

impl Default for ScoreboardUnit {
    fn default() -> Self {
        Self {
            name: String::new(),
            transaction: String::new(),
            use_expected_queue: true,
            compare_mode: CompareMode::UvmCompare,
            enable_coverage: false,
            fields: Vec::new(),
        }
    }
}

/// The `environment` unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentUnit {
    /// Environment class name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Instantiate the agent.
    #[serde(deserialize_with = "de::flag")]
    pub include_agent: bool,
    /// Instantiate the scoreboard.
    #[serde(deserialize_with = "de::flag")]
    pub include_scoreboard: bool,
}

impl Default for EnvironmentUnit {
    fn default() -> Self {
        Self {
            name: String::new(),
            include_agent: true,
            include_scoreboard: true,
        }
    }
}

/// The `sequence` unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceUnit {
    /// Sequence class name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Transaction type; blank falls back to the transaction unit.
    #[serde(deserialize_with = "de::text")]
    pub transaction_class: String,
    /// Steps, replayed in order.
    #[serde(deserialize_with = "de::records")]
    pub steps: Vec<SequenceStep>,
}

/// One sequence step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceStep {
    /// Handle name passed to `create`.
    #[serde(deserialize_with = "de::text")]
    pub item_name: String,
    /// Delay before the item, `0` for none.
    #[serde(deserialize_with = "de::text")]
    pub delay: String,
    /// Repeat count as text; anything below 1 or unparsable means once.
    #[serde(deserialize_with = "de::text")]
    pub repeat: String,
    /// Randomize the item (assignments become inline constraints).
    #[serde(deserialize_with = "de::flag")]
    pub randomize: bool,
    /// Directed field assignments in authored order.
    #[serde(deserialize_with = "de::text_map")]
    pub assignments: TextMap,
}

impl Default for SequenceStep {
    fn default() -> Self {
        Self {
            item_name: String::new(),
            delay: "0".to_string(),
            repeat: "1".to_string(),
            randomize: true,
            assignments: TextMap::new(),
        }
    }
}

impl SequenceStep {
    /// The effective repeat count, never below 1.
    pub fn repeat_count(&self) -> u64 {
        self.repeat.trim().parse::<i64>().map_or(1, |n| n.max(1) as u64)
    }
}

/// The `test` unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestUnit {
    /// Test class name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// Base class; blank means `uvm_test`.
    #[serde(deserialize_with = "de::text")]
    pub base_class: String,
    /// Create an environment instance.
    #[serde(deserialize_with = "de::flag")]
    pub create_env: bool,
    /// Start a sequence in `run_phase`.
    #[serde(deserialize_with = "de::flag")]
    pub start_sequence: bool,
    /// Sequence to start; blank falls back to the sequence unit.
    #[serde(deserialize_with = "de::text")]
    pub sequence_name: String,
    /// Wrap the sequence in an objection.
    #[serde(deserialize_with = "de::flag")]
    pub raise_objection: bool,
    /// Print the topology at end of elaboration.
    #[serde(deserialize_with = "de::flag")]
    pub print_topology: bool,
}

impl Default for TestUnit {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_class: String::new(),
            create_env: true,
            start_sequence: false,
            sequence_name: String::new(),
            raise_objection: true,
            print_topology: false,
        }
    }
}

/// The `top` unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopUnit {
    /// Top module name.
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    /// DUT module; blank falls back to the project record.
    #[serde(deserialize_with = "de::text")]
    pub dut_module: String,
    /// DUT source path; blank falls back to the project record.
    #[serde(deserialize_with = "de::text")]
    pub dut_path: String,
    /// Interface type; blank falls back to the interface unit.
    #[serde(deserialize_with = "de::text")]
    pub interface: String,
    /// Test name; blank falls back to the test unit.
    #[serde(deserialize_with = "de::text")]
    pub test: String,
}
