//! Gas-cost estimation for ghostract smart-contract functions (spec.md §4.7.2).
//!
//! Smart-contract documents carry no syntax tree, so the estimate is a
//! lexical scan over the function body text rather than a tree walk: each
//! opcode-shaped keyword contributes its fixed per-operation cost.

/// Per-operation gas costs, spec.md §4.7.2.
const STORAGE_WRITE: u64 = 20_000;
const STORAGE_READ: u64 = 200;
const CALL_BASE: u64 = 700;
const TRANSFER: u64 = 9_000;
const HASH: u64 = 30;
const SIGNATURE_VERIFY: u64 = 3_000;
const EVENT_EMIT: u64 = 375;

/// One scan rule: a textual needle and the cost charged per occurrence.
const RULES: &[(&str, u64)] = &[
    ("storage.set", STORAGE_WRITE),
    ("storage.write", STORAGE_WRITE),
    ("storage.get", STORAGE_READ),
    ("storage.read", STORAGE_READ),
    ("call(", CALL_BASE),
    ("transfer(", TRANSFER),
    ("hash(", HASH),
    ("verifySignature(", SIGNATURE_VERIFY),
    ("emit ", EVENT_EMIT),
];

/// Estimate the total gas cost of `body` by counting opcode-shaped
/// substrings and summing their fixed costs. Overlapping/nested
/// expressions are not modeled; this is a coarse estimate, not a VM.
pub fn estimate(body: &str) -> u64 {
    RULES.iter().map(|(needle, cost)| body.matches(needle).count() as u64 * cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_costs_nothing() {
        assert_eq!(estimate(""), 0);
    }

    #[test]
    fn counts_each_occurrence() {
        let body = "storage.set(balance, 1); storage.set(balance, 2);";
        assert_eq!(estimate(body), STORAGE_WRITE * 2);
    }

    #[test]
    fn mixes_operation_kinds() {
        let body = "transfer(to, amount); emit Transferred(to, amount);";
        assert_eq!(estimate(body), TRANSFER + EVENT_EMIT);
    }
}
