mod schema;

pub use schema::{RuleValues, ScoringRulesDocument};

use std::collections::HashMap;

use serde_json::Value;

use super::domain::EquipmentClassification;

const DEFAULT_KEY: &str = "Default";
const DUMP_TRUCK_KEY: &str = "DumpTruck";
const RULES_SECTION: &str = "SeniorityScoringRules";

/// Resolved per-category parameters consumed by the recalculation and
/// block assignment passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringParameters {
    pub equipment_score: i32,
    pub block_size: i32,
    pub total_blocks: i32,
}

/// Registry of category-keyed scoring rules.
///
/// Populated once per invocation from either a serialized JSON document or
/// a structured configuration tree; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeniorityScoringRules {
    equipment_score: HashMap<String, i32>,
    block_size: HashMap<String, i32>,
    total_blocks: HashMap<String, i32>,
}

impl SeniorityScoringRules {
    /// Build the registry from a serialized JSON rule document.
    pub fn from_document(document: &str) -> Result<Self, ScoringRulesError> {
        let parsed: ScoringRulesDocument = serde_json::from_str(document)?;
        Ok(Self::from(parsed))
    }

    /// Build the registry by walking a structured configuration tree.
    ///
    /// The tree is scanned for a `SeniorityScoringRules` section whose
    /// children are rule sections (`EquipmentScore`, `BlockSize`,
    /// `TotalBlocks`), each mapping category names to integer values. An
    /// unrecognized rule-section name is rejected; a tree without the
    /// section yields an empty registry, surfacing later as
    /// `MissingRuleKey` on lookup.
    pub fn from_config_tree(tree: &Value) -> Result<Self, ScoringRulesError> {
        let mut rules = Self {
            equipment_score: HashMap::new(),
            block_size: HashMap::new(),
            total_blocks: HashMap::new(),
        };

        let Some(root) = tree.as_object() else {
            return Err(ScoringRulesError::InvalidRuleSchema {
                section: "<root>".to_string(),
            });
        };

        let section = root
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(RULES_SECTION))
            .map(|(_, value)| value);

        let Some(section) = section else {
            return Ok(rules);
        };

        let Some(rule_sections) = section.as_object() else {
            return Err(ScoringRulesError::InvalidRuleSchema {
                section: RULES_SECTION.to_string(),
            });
        };

        for (section_name, entries) in rule_sections {
            let table = match section_name.as_str() {
                "EquipmentScore" => &mut rules.equipment_score,
                "BlockSize" => &mut rules.block_size,
                "TotalBlocks" => &mut rules.total_blocks,
                _ => {
                    return Err(ScoringRulesError::InvalidRuleSchema {
                        section: section_name.clone(),
                    })
                }
            };

            let Some(entries) = entries.as_object() else {
                return Err(ScoringRulesError::InvalidRuleSchema {
                    section: section_name.clone(),
                });
            };

            for (category, value) in entries {
                let Some(value) = value.as_i64() else {
                    return Err(ScoringRulesError::InvalidRuleSchema {
                        section: section_name.clone(),
                    });
                };
                table.insert(category.clone(), value as i32);
            }
        }

        Ok(rules)
    }

    /// Equipment-score weight for a category; `None` resolves the default.
    pub fn equipment_score(&self, category: Option<&str>) -> Result<i32, ScoringRulesError> {
        Self::lookup(&self.equipment_score, category)
    }

    /// Maximum owners per capped block for a category.
    pub fn block_size(&self, category: Option<&str>) -> Result<i32, ScoringRulesError> {
        Self::lookup(&self.block_size, category)
    }

    /// Count of capped blocks for a category, excluding the trailing open
    /// block.
    pub fn total_blocks(&self, category: Option<&str>) -> Result<i32, ScoringRulesError> {
        Self::lookup(&self.total_blocks, category)
    }

    /// Bundle all three rule values for an equipment classification.
    pub fn parameters(
        &self,
        classification: EquipmentClassification,
    ) -> Result<ScoringParameters, ScoringRulesError> {
        let key = Some(classification.rule_key());
        Ok(ScoringParameters {
            equipment_score: self.equipment_score(key)?,
            block_size: self.block_size(key)?,
            total_blocks: self.total_blocks(key)?,
        })
    }

    fn lookup(table: &HashMap<String, i32>, category: Option<&str>) -> Result<i32, ScoringRulesError> {
        let key = match category {
            Some(key) if !key.is_empty() => key,
            _ => DEFAULT_KEY,
        };

        table
            .get(key)
            .copied()
            .ok_or_else(|| ScoringRulesError::MissingRuleKey {
                key: key.to_string(),
            })
    }
}

impl From<ScoringRulesDocument> for SeniorityScoringRules {
    fn from(document: ScoringRulesDocument) -> Self {
        let table = |values: RuleValues| {
            let mut table = HashMap::new();
            table.insert(DEFAULT_KEY.to_string(), values.default);
            table.insert(DUMP_TRUCK_KEY.to_string(), values.dump_truck);
            table
        };

        Self {
            equipment_score: table(document.equipment_score),
            block_size: table(document.block_size),
            total_blocks: table(document.total_blocks),
        }
    }
}

/// Error enumeration for rule construction and lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum ScoringRulesError {
    #[error("no scoring rule registered for category '{key}'")]
    MissingRuleKey { key: String },
    #[error("unrecognized scoring rule section '{section}'")]
    InvalidRuleSchema { section: String },
    #[error("malformed scoring rule document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
