//! Constants for bounded tool outputs and assistant defaults.

/// Maximum number of goals returned per tool call.
pub const MAX_GOALS: usize = 50;

/// Maximum number of candidate goals listed when a name is ambiguous.
pub const MAX_GOAL_CANDIDATES: usize = 10;

/// Currency symbol used in confirmation messages.
pub const MESSAGE_CURRENCY_SYMBOL: &str = wallet_core::constants::DEFAULT_CURRENCY_SYMBOL;
