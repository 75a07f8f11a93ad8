//! Line-oriented finite-state machine for block-structured configuration.
//!
//! Blocks are entered by trigger lines and left by a blank line, a `!`
//! comment, or the first non-indented line.

use serde::Serialize;
use std::fmt;

use crate::rules::{RuleStore, StateRules, GLOBAL_STATE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineError {
    pub line_number: usize,
    pub offending_text: String,
    pub state: String,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {}: invalid command '{}' in state {}",
            self.line_number, self.offending_text, self.state
        )
    }
}

pub struct LineAutomaton<'a> {
    store: &'a RuleStore,
    current_state: String,
    errors: Vec<LineError>,
}

impl<'a> LineAutomaton<'a> {
    pub fn new(store: &'a RuleStore) -> Self {
        Self {
            store,
            current_state: GLOBAL_STATE.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    pub fn into_errors(self) -> Vec<LineError> {
        self.errors
    }

    pub fn process_line(&mut self, raw_line: &str, line_number: usize) {
        let store = self.store;
        let trimmed = raw_line.trim();

        if trimmed.is_empty() || trimmed.starts_with('!') {
            self.enter(GLOBAL_STATE, line_number);
            return;
        }

        if self.current_state != GLOBAL_STATE && !raw_line.starts_with(' ') {
            self.enter(GLOBAL_STATE, line_number);
        }

        if let Some(target) = store.trigger_for(trimmed) {
            self.enter(target, line_number);
            return;
        }

        let valid = match store.lookup(&self.current_state) {
            StateRules::Known(patterns) => {
                let indented = raw_line.trim_end();
                patterns
                    .iter()
                    .any(|re| re.is_match(trimmed) || re.is_match(indented))
            }
            StateRules::Unknown => false,
        };

        if !valid {
            tracing::debug!(
                line = line_number,
                state = %self.current_state,
                "line matches no rule"
            );
            self.errors.push(LineError {
                line_number,
                offending_text: trimmed.to_string(),
                state: self.current_state.clone(),
            });
        }
    }

    fn enter(&mut self, state: &str, line_number: usize) {
        if self.current_state != state {
            tracing::trace!(
                line = line_number,
                from = %self.current_state,
                to = state,
                "state transition"
            );
            self.current_state = state.to_string();
        }
    }
}

/// Run a fresh automaton over every line of `text` (1-based numbering).
pub fn run(store: &RuleStore, text: &str) -> Vec<LineError> {
    let mut fsm = LineAutomaton::new(store);
    for (i, line) in text.lines().enumerate() {
        fsm.process_line(line, i + 1);
    }
    fsm.into_errors()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::triggers::{trigger_table, TriggerDef};
    use crate::rules::DEFAULT_RULES;

    const RULES: &str = r#"
GLOBAL:
  - '^hostname\s+\S+$'
  - '^end$'
INTERFACE:
  - '^ ip address .*'
  - '^description\s+.*'
  - '^(no\s+)?shutdown$'
"#;

    fn store() -> RuleStore {
        RuleStore::from_source(RULES, &trigger_table(&[])).unwrap()
    }

    #[test]
    fn test_interface_block_is_valid() {
        let store = store();
        let errors = run(
            &store,
            "interface GigabitEthernet0/1\n ip address 10.0.0.1 255.255.255.0\nend",
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_implicit_exit_on_unindented_line() {
        let store = store();
        let errors = run(&store, "interface Gi0/1\nbogus line");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line_number, 2);
        assert_eq!(errors[0].state, "GLOBAL");
        assert_eq!(errors[0].offending_text, "bogus line");
    }

    #[test]
    fn test_indented_line_checked_in_block_state() {
        let store = store();
        let errors = run(&store, "interface Gi0/1\n description uplink\n mtu 9000");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line_number, 3);
        assert_eq!(errors[0].state, "INTERFACE");
        assert_eq!(errors[0].offending_text, "mtu 9000");
    }

    #[test]
    fn test_blank_and_comment_reset_to_global() {
        let store = store();
        let mut fsm = LineAutomaton::new(&store);

        fsm.process_line("interface Gi0/1", 1);
        assert_eq!(fsm.current_state(), "INTERFACE");
        fsm.process_line("", 2);
        assert_eq!(fsm.current_state(), "GLOBAL");

        fsm.process_line("interface Gi0/2", 3);
        fsm.process_line(" ! a comment", 4);
        assert_eq!(fsm.current_state(), "GLOBAL");

        fsm.process_line("interface Gi0/3", 5);
        fsm.process_line("   ", 6);
        assert_eq!(fsm.current_state(), "GLOBAL");
        assert!(fsm.into_errors().is_empty());
    }

    #[test]
    fn test_trigger_line_is_never_an_error() {
        let store = store();
        let mut fsm = LineAutomaton::new(&store);
        fsm.process_line("router ospf 1", 1);
        assert_eq!(fsm.current_state(), "ROUTER");
        fsm.process_line("vlan 20", 2);
        assert_eq!(fsm.current_state(), "VLAN");
        assert!(fsm.into_errors().is_empty());
    }

    #[test]
    fn test_indented_trigger_changes_state() {
        let store = store();
        let mut fsm = LineAutomaton::new(&store);
        fsm.process_line("interface Gi0/1", 1);
        fsm.process_line(" vlan 30", 2);
        assert_eq!(fsm.current_state(), "VLAN");
        assert!(fsm.into_errors().is_empty());
    }

    #[test]
    fn test_builtin_ssid_block_leaves_on_vlan_trigger() {
        let store = RuleStore::from_source(DEFAULT_RULES, &trigger_table(&[])).unwrap();
        let ssid = "dot11 ssid GUEST\n authentication open\n guest-mode\n";
        assert!(run(&store, ssid).is_empty());

        // ` vlan 20` is itself a trigger, so the rest of the block is read as VLAN.
        let errors = run(&store, "dot11 ssid GUEST\n vlan 20\n guest-mode\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line_number, 3);
        assert_eq!(errors[0].state, "VLAN");
    }

    #[test]
    fn test_unknown_state_rejects_every_line() {
        // ROUTER is a trigger target with no rules in this store.
        let store = store();
        let errors = run(
            &store,
            "router ospf 1\n network 10.0.0.0 0.0.0.255 area 0\n router-id 1.1.1.1\nhostname r1",
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.state == "ROUTER"));
        assert_eq!(errors[0].line_number, 2);
        assert_eq!(errors[1].line_number, 3);
    }

    #[test]
    fn test_tab_indentation_is_not_indentation() {
        let store = store();
        let errors = run(&store, "interface Gi0/1\n\tdescription uplink");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].state, "GLOBAL");
    }

    #[test]
    fn test_custom_trigger_after_builtins() {
        let extra = vec![TriggerDef::new(r"^policy-map\s+.*", "POLICY_MAP")];
        let store = RuleStore::from_source(
            "GLOBAL: []\nPOLICY_MAP:\n  - '^class\\s+\\S+$'\n",
            &trigger_table(&extra),
        )
        .unwrap();
        let errors = run(&store, "policy-map QOS\n class VOICE\n police 8000");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].state, "POLICY_MAP");
        assert_eq!(errors[0].line_number, 3);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let store = store();
        let input = "hostname r1\nbad\ninterface Gi0/1\n nonsense\n\nrouter bgp 1\n x";
        assert_eq!(run(&store, input), run(&store, input));
    }

    #[test]
    fn test_errors_accumulate_without_masking() {
        let store = store();
        let errors = run(&store, "one\ntwo\nhostname ok\nthree");
        let lines: Vec<_> = errors.iter().map(|e| e.line_number).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn test_line_error_display() {
        let err = LineError {
            line_number: 7,
            offending_text: "bogus".to_string(),
            state: "GLOBAL".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Line 7: invalid command 'bogus' in state GLOBAL"
        );
    }

    #[test]
    fn test_crlf_input() {
        let store = store();
        let errors = run(&store, "hostname r1\r\ninterface Gi0/1\r\n shutdown\r\n");
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }
}
