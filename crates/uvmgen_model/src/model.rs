//! One-time normalization of a [`Snapshot`] into typed unit records.
//!
//! This is the only place legacy spellings are recognised. Renderers and the
//! workflow engine read canonical fields from [`ProjectModel`] and never look
//! at raw JSON.

use crate::de::value_flag;
use crate::snapshot::{keys, Snapshot};
use crate::types::{
    AgentUnit, EnvironmentUnit, InterfaceUnit, ProjectUnit, ScoreboardUnit, SequenceUnit,
    TestUnit, TopUnit, TransactionUnit, AGENT_COMPONENTS,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uvmgen_diagnostics::{Category, Degraded, Diagnostic, DiagnosticCode};

/// Diagnostic codes raised while normalizing a snapshot.
pub mod codes {
    use super::{Category, DiagnosticCode};

    /// A present unit value could not be read as its record.
    pub const MALFORMED_UNIT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 202);
    /// Agent custom code names a component that does not exist.
    pub const UNKNOWN_COMPONENT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 203);
    /// `custom_files` is not a mapping.
    pub const MALFORMED_OVERRIDES: DiagnosticCode = DiagnosticCode::new(Category::Warning, 204);
}

/// One user override as stored: a path and its text, `None` when the stored
/// value is not a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverrideEntry {
    /// The path as written by the user, not yet validated.
    pub path: String,
    /// Replacement text, or `None` for a non-text value.
    pub text: Option<String>,
}

/// The typed view of a snapshot.
///
/// Each unit is `Some` exactly when its key is present in the snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectModel {
    /// `project`
    pub project: Option<ProjectUnit>,
    /// `interface`
    pub interface: Option<InterfaceUnit>,
    /// `transaction`
    pub transaction: Option<TransactionUnit>,
    /// `agent`
    pub agent: Option<AgentUnit>,
    /// `scoreboard`
    pub scoreboard: Option<ScoreboardUnit>,
    /// `environment`
    pub environment: Option<EnvironmentUnit>,
    /// `sequence`
    pub sequence: Option<SequenceUnit>,
    /// `test`
    pub test: Option<TestUnit>,
    /// `top`
    pub top: Option<TopUnit>,
    /// Overrides in authored order.
    pub custom_files: Vec<OverrideEntry>,
    /// Whether overrides are applied.
    pub custom_files_enabled: bool,
}

impl Default for ProjectModel {
    fn default() -> Self {
        Self {
            project: None,
            interface: None,
            transaction: None,
            agent: None,
            scoreboard: None,
            environment: None,
            sequence: None,
            test: None,
            top: None,
            custom_files: Vec::new(),
            custom_files_enabled: true,
        }
    }
}

impl ProjectModel {
    /// Decodes every unit of `snapshot`, folding legacy field names into
    /// their canonical spelling.
    ///
    /// Never fails: a unit whose value has the wrong shape is reported as a
    /// warning and replaced by its default record.
    pub fn from_snapshot(snapshot: &Snapshot) -> Degraded<ProjectModel> {
        let mut warnings = Vec::new();

        let project = decode_unit(snapshot, keys::PROJECT, &mut warnings, |map| {
            rename_legacy(map, "name", "project_name");
        });
        let interface = decode_unit(snapshot, keys::INTERFACE, &mut warnings, |_| {});
        let transaction = decode_unit(snapshot, keys::TRANSACTION, &mut warnings, |_| {});
        let mut agent: Option<AgentUnit> =
            decode_unit(snapshot, keys::AGENT, &mut warnings, |map| {
                rename_legacy(map, "agent_type", "type");
                rename_legacy(map, "components", "include_components");
                fold_agent_code(map, snapshot.get(keys::AGENT_CODE));
            });
        if let Some(agent) = agent.as_mut() {
            drop_unknown_components(agent, &mut warnings);
        }
        let scoreboard = decode_unit(snapshot, keys::SCOREBOARD, &mut warnings, |map| {
            rename_legacy(map, "use_queue", "use_expected_queue");
            rename_legacy(map, "use_coverage", "enable_coverage");
        });
        let environment = decode_unit(snapshot, keys::ENVIRONMENT, &mut warnings, |_| {});
        let sequence = decode_unit(snapshot, keys::SEQUENCE, &mut warnings, |map| {
            if let Some(Value::Array(steps)) = map.get_mut("steps") {
                for step in steps.iter_mut() {
                    if let Value::Object(step) = step {
                        rename_legacy(step, "item", "item_name");
                    }
                }
            }
        });
        let test = decode_unit(snapshot, keys::TEST, &mut warnings, |_| {});
        let top = decode_unit(snapshot, keys::TOP, &mut warnings, |_| {});

        let custom_files = decode_overrides(snapshot.get(keys::CUSTOM_FILES), &mut warnings);
        let custom_files_enabled = snapshot
            .get(keys::CUSTOM_FILES_ENABLED)
            .map_or(true, value_flag);

        if !warnings.is_empty() {
            tracing::warn!(count = warnings.len(), "snapshot normalized with warnings");
        }

        Degraded::new(
            ProjectModel {
                project,
                interface,
                transaction,
                agent,
                scoreboard,
                environment,
                sequence,
                test,
                top,
                custom_files,
                custom_files_enabled,
            },
            warnings,
        )
    }

    /// The transaction class name, `txn_item` when unset.
    pub fn transaction_class(&self) -> String {
        self.transaction
            .as_ref()
            .map(|t| t.class_name.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or("txn_item")
            .to_string()
    }
}

fn decode_unit<T, F>(
    snapshot: &Snapshot,
    key: &str,
    warnings: &mut Vec<Diagnostic>,
    migrate: F,
) -> Option<T>
where
    T: DeserializeOwned + Default,
    F: FnOnce(&mut Map<String, Value>),
{
    let value = snapshot.get(key)?;
    let mut map = match value {
        Value::Null => return Some(T::default()),
        Value::Object(map) => map.clone(),
        other => {
            warnings.push(malformed(key, &format!("expected a record, found {}", kind_of(other))));
            return Some(T::default());
        }
    };
    migrate(&mut map);
    match serde_json::from_value(Value::Object(map)) {
        Ok(unit) => Some(unit),
        Err(e) => {
            warnings.push(malformed(key, &e.to_string()));
            Some(T::default())
        }
    }
}

fn malformed(key: &str, detail: &str) -> Diagnostic {
    Diagnostic::warning(
        codes::MALFORMED_UNIT,
        format!("unit '{key}' could not be read; using defaults"),
    )
    .with_subject(key)
    .with_note(detail.to_string())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}

/// Moves `legacy` to `canonical` unless the canonical field is already set.
/// The legacy field is removed either way.
fn rename_legacy(map: &mut Map<String, Value>, legacy: &str, canonical: &str) {
    if let Some(value) = map.remove(legacy) {
        if !map.contains_key(canonical) {
            map.insert(canonical.to_string(), value);
        }
    }
}

fn fold_agent_code(map: &mut Map<String, Value>, agent_code: Option<&Value>) {
    let has_own = match map.get("custom_code") {
        Some(Value::Object(code)) => !code.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    };
    if has_own {
        return;
    }
    if let Some(code @ Value::Object(_)) = agent_code {
        map.insert("custom_code".to_string(), code.clone());
    }
}

fn drop_unknown_components(agent: &mut AgentUnit, warnings: &mut Vec<Diagnostic>) {
    let mut dropped = Vec::new();
    agent.custom_code.retain(|component, _| {
        let known = AGENT_COMPONENTS.contains(&component.as_str());
        if !known {
            dropped.push(component.clone());
        }
        known
    });
    for component in dropped {
        warnings.push(
            Diagnostic::warning(
                codes::UNKNOWN_COMPONENT,
                format!("ignored custom code for unknown agent component '{component}'"),
            )
            .with_subject(keys::AGENT)
            .with_help(format!("expected one of: {}", AGENT_COMPONENTS.join(", "))),
        );
    }
}

fn decode_overrides(value: Option<&Value>, warnings: &mut Vec<Diagnostic>) -> Vec<OverrideEntry> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(path, text)| OverrideEntry {
                path: path.clone(),
                text: text.as_str().map(str::to_string),
            })
            .collect(),
        Some(other) => {
            warnings.push(
                Diagnostic::warning(
                    codes::MALFORMED_OVERRIDES,
                    format!("custom files must be a mapping, found {}", kind_of(other)),
                )
                .with_subject(keys::CUSTOM_FILES),
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentKind, CompareMode};
    use serde_json::json;

    fn model(value: Value) -> Degraded<ProjectModel> {
        ProjectModel::from_snapshot(&Snapshot::from_value(value).unwrap())
    }

    #[test]
    fn empty_snapshot_has_no_units() {
        let m = model(json!({}));
        assert!(m.is_clean());
        assert!(m.value.project.is_none());
        assert!(m.value.top.is_none());
        assert!(m.value.custom_files_enabled);
        assert!(m.value.custom_files.is_empty());
    }

    #[test]
    fn null_unit_is_present_with_defaults() {
        let m = model(json!({"scoreboard": null}));
        let sb = m.value.scoreboard.unwrap();
        assert!(sb.use_expected_queue);
        assert!(m.warnings.is_empty());
    }

    #[test]
    fn malformed_unit_warns_and_defaults() {
        let m = model(json!({"interface": "bus_if"}));
        assert_eq!(m.value.interface, Some(InterfaceUnit::default()));
        assert_eq!(m.warnings.len(), 1);
        assert_eq!(m.warnings[0].code, codes::MALFORMED_UNIT);
        assert_eq!(m.warnings[0].subject.as_deref(), Some("interface"));
    }

    #[test]
    fn project_name_alias() {
        let m = model(json!({"project": {"name": "legacy"}}));
        assert_eq!(m.value.project.unwrap().project_name, "legacy");
        let m = model(json!({"project": {"name": "old", "project_name": "new"}}));
        assert_eq!(m.value.project.unwrap().project_name, "new");
    }

    #[test]
    fn scoreboard_aliases() {
        let m = model(json!({"scoreboard": {"use_queue": false, "use_coverage": true}}));
        let sb = m.value.scoreboard.unwrap();
        assert!(!sb.use_expected_queue);
        assert!(sb.enable_coverage);
        assert_eq!(sb.compare_mode, CompareMode::UvmCompare);
    }

    #[test]
    fn agent_aliases_saved_side_by_side() {
        let m = model(json!({"agent": {
            "agent_name": "a",
            "type": "passive",
            "agent_type": "passive",
            "include_components": {"monitor": true},
            "components": {"monitor": true}
        }}));
        assert!(m.is_clean());
        let agent = m.value.agent.unwrap();
        assert_eq!(agent.kind, AgentKind::Passive);
    }

    #[test]
    fn agent_legacy_names_only() {
        let m = model(json!({"agent": {
            "agent_type": "passive",
            "components": {"sequencer": false, "driver": true, "monitor": false}
        }}));
        let agent = m.value.agent.unwrap();
        assert_eq!(agent.kind, AgentKind::Passive);
        assert!(!agent.include_components.sequencer);
        assert!(!agent.include_components.monitor);
    }

    #[test]
    fn top_level_agent_code_is_folded() {
        let m = model(json!({
            "agent": {"agent_name": "a", "use_custom_code": true},
            "agent_code": {"driver": "class custom_driver; endclass"}
        }));
        let agent = m.value.agent.unwrap();
        assert_eq!(agent.custom_text("driver"), Some("class custom_driver; endclass"));
    }

    #[test]
    fn own_custom_code_wins_over_agent_code() {
        let m = model(json!({
            "agent": {"use_custom_code": true, "custom_code": {"monitor": "mine"}},
            "agent_code": {"driver": "theirs"}
        }));
        let agent = m.value.agent.unwrap();
        assert_eq!(agent.custom_text("monitor"), Some("mine"));
        assert_eq!(agent.custom_text("driver"), None);
    }

    #[test]
    fn unknown_component_warns() {
        let m = model(json!({"agent": {"custom_code": {"driver": "x", "scoreboard": "y"}}}));
        assert_eq!(m.warnings.len(), 1);
        assert_eq!(m.warnings[0].code, codes::UNKNOWN_COMPONENT);
        let agent = m.value.agent.unwrap();
        assert_eq!(agent.custom_code.keys().map(String::as_str).collect::<Vec<_>>(), vec!["driver"]);
    }

    #[test]
    fn step_item_alias() {
        let m = model(json!({"sequence": {"steps": [{"item": "req"}, {"item_name": "rsp"}]}}));
        let seq = m.value.sequence.unwrap();
        assert_eq!(seq.steps[0].item_name, "req");
        assert_eq!(seq.steps[1].item_name, "rsp");
    }

    #[test]
    fn overrides_keep_order_and_flag_non_text() {
        let m = model(json!({
            "custom_files": {"src/top.sv": "// custom\n", "notes.txt": 42},
            "custom_files_enabled": "no"
        }));
        assert!(!m.value.custom_files_enabled);
        assert_eq!(
            m.value.custom_files,
            vec![
                OverrideEntry {
                    path: "src/top.sv".into(),
                    text: Some("// custom\n".into())
                },
                OverrideEntry {
                    path: "notes.txt".into(),
                    text: None
                },
            ]
        );
    }

    #[test]
    fn overrides_wrong_shape_warns() {
        let m = model(json!({"custom_files": ["src/top.sv"]}));
        assert!(m.value.custom_files.is_empty());
        assert_eq!(m.warnings[0].code, codes::MALFORMED_OVERRIDES);
    }

    #[test]
    fn transaction_class_fallback() {
        assert_eq!(model(json!({})).value.transaction_class(), "txn_item");
        assert_eq!(
            model(json!({"transaction": {"class_name": " "}}))
                .value
                .transaction_class(),
            "txn_item"
        );
        assert_eq!(
            model(json!({"transaction": {"class_name": "pkt"}}))
                .value
                .transaction_class(),
            "pkt"
        );
    }
}
