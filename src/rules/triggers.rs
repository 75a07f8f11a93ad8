use serde::Deserialize;

/// A block-entry command: a line matching `pattern` moves the line automaton
/// into `state`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriggerDef {
    pub pattern: String,
    pub state: String,
}

impl TriggerDef {
    pub fn new(pattern: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            state: state.into(),
        }
    }
}

/// Built-in triggers, evaluated in this order. The first match wins.
pub const BUILTIN_TRIGGERS: &[(&str, &str)] = &[
    (r"^interface\s+.*", "INTERFACE"),
    (r"^aaa\s+group\s+server\s+.*", "AAA_GROUP"),
    (r"^aaa\s+cache\s+profile\s+.*", "AAA_CACHE_PROFILE"),
    (r"^dot11\s+ssid\s+.*", "DOT11_SSID"),
    (r"^archive$", "ARCHIVE_CONFIG"),
    (r"^crypto\s+pki\s+.*", "CRYPTO_PKI"),
    (r"^tacacs\s+server\s+.*", "SERVER_CONFIG"),
    (r"^radius\s+server\s+.*", "SERVER_CONFIG"),
    (r"^ip\s+access-list\s+standard\s+.*", "IP_ACL_STANDARD"),
    (r"^line\s+.*", "LINE"),
    (r"^router\s+.*", "ROUTER"),
    (r"^vlan\s+[0-9]+", "VLAN"),
];

/// The built-in table followed by `extra`, in declaration order.
pub fn trigger_table(extra: &[TriggerDef]) -> Vec<TriggerDef> {
    BUILTIN_TRIGGERS
        .iter()
        .map(|&(pattern, state)| TriggerDef::new(pattern, state))
        .chain(extra.iter().cloned())
        .collect()
}
