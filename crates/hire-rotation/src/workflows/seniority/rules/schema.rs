use serde::{Deserialize, Serialize};

/// Per-category values for a single rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleValues {
    pub default: i32,
    pub dump_truck: i32,
}

/// Wire shape of a serialized scoring rule document.
///
/// ```json
/// {
///   "EquipmentScore": { "Default": 50, "DumpTruck": 60 },
///   "BlockSize": { "Default": 10, "DumpTruck": 10 },
///   "TotalBlocks": { "Default": 1, "DumpTruck": 2 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoringRulesDocument {
    pub equipment_score: RuleValues,
    pub block_size: RuleValues,
    pub total_blocks: RuleValues,
}
