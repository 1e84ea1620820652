//! Parse configuration.

/// Which results are cached during a parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemoPolicy {
    /// No caching. Every rule call is evaluated.
    Off,
    /// Cache every rule call by (rule, position). Tokens and anonymous
    /// sub-expressions are cheap to redo and are not cached.
    #[default]
    Rules,
}

/// Runtime limits and caching for a parse.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Maximum ops evaluated over all rounds. `None` is unlimited (default).
    pub(crate) exec_fuel: Option<u32>,
    /// Maximum nesting of evaluated ops (default: 1,024). A rule call nests
    /// at least two levels: the call and its body.
    pub(crate) recursion_limit: u32,
    /// Maximum parse rounds, the strict one included. `None` (default) keeps
    /// going while each round finds a new error point.
    pub(crate) max_recovery_rounds: Option<u32>,
    pub(crate) memo: MemoPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            recursion_limit: 1024,
            max_recovery_rounds: None,
            memo: MemoPolicy::Rules,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// A limit of 1 disables error recovery: leftover input goes straight
    /// into the root's trailing `ERROR` node.
    pub fn max_recovery_rounds(mut self, rounds: Option<u32>) -> Self {
        self.max_recovery_rounds = rounds.map(|r| r.max(1));
        self
    }

    pub fn memo(mut self, policy: MemoPolicy) -> Self {
        self.memo = policy;
        self
    }

    pub fn get_exec_fuel(&self) -> Option<u32> {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
    pub fn get_max_recovery_rounds(&self) -> Option<u32> {
        self.max_recovery_rounds
    }
    pub fn get_memo(&self) -> MemoPolicy {
        self.memo
    }
}
