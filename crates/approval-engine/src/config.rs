//! Engine configuration
//!
//! The amount threshold and the fixed Operations-Manager identity were
//! compiled-in literals in the upstream system. They are injectable here;
//! `Default` supplies the historical values, so default behavior is
//! unchanged.

use serde_json::Value;

/// The historical amount threshold above which the Operation-Manager stage
/// and notification branch apply (strictly greater than).
pub const DEFAULT_OP_APPROVAL_THRESHOLD: f64 = 500_000.0;

/// The well-known Operations-Manager identity notified for over-threshold
/// approvals. Never derived from the action pool.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationsManagerIdentity {
    pub id: String,
    pub name: String,
}

impl Default for OperationsManagerIdentity {
    fn default() -> Self {
        Self {
            id: "OPS_MGR".to_string(),
            name: "Operations Manager".to_string(),
        }
    }
}

/// Tunable policy for the trail and fan-out engines.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Amounts strictly above this include the Operation-Manager branch
    pub op_approval_threshold: f64,
    pub operations_manager: OperationsManagerIdentity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            op_approval_threshold: DEFAULT_OP_APPROVAL_THRESHOLD,
            operations_manager: OperationsManagerIdentity::default(),
        }
    }
}

impl EngineConfig {
    /// Whether the given raw amount value lands in the Operation-Manager
    /// branch. Non-numeric amounts count as zero, which deterministically
    /// stays below any sane threshold.
    pub fn over_threshold(&self, amount: f64) -> bool {
        amount > self.op_approval_threshold
    }

    /// Convenience for callers holding the raw form payload.
    pub fn over_threshold_value(&self, amount: &Value) -> bool {
        self.over_threshold(amount.as_f64().unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_threshold_is_strict() {
        let config = EngineConfig::default();
        assert!(!config.over_threshold(500_000.0));
        assert!(config.over_threshold(500_001.0));
    }

    #[test]
    fn test_non_numeric_amount_stays_below() {
        let config = EngineConfig::default();
        assert!(!config.over_threshold_value(&json!("N/A")));
        assert!(!config.over_threshold_value(&json!(null)));
    }

    #[test]
    fn test_default_identity() {
        let ops = OperationsManagerIdentity::default();
        assert_eq!(ops.id, "OPS_MGR");
        assert_eq!(ops.name, "Operations Manager");
    }
}
