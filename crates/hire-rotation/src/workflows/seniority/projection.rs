use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::domain::{Equipment, EquipmentId, OwnerId, RotationPointer};
use super::rules::{ScoringRulesError, SeniorityScoringRules};

/// Presentation row for one equipment record on a seniority list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeniorityListEntry {
    pub id: EquipmentId,
    pub equipment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<OwnerId>,
    pub seniority_string: String,
    pub seniority: String,
    pub make: String,
    pub model: String,
    pub size: String,
    pub equipment_code: String,
    pub called_next: bool,
    pub years_registered: String,
    pub ytd_hours: String,
    pub hours_year_minus1: String,
    pub hours_year_minus2: String,
    pub hours_year_minus3: String,
    pub seniority_sort_order: i32,
}

/// Convert a ranked, block-assigned equipment record into its list entry.
///
/// Missing score/block fields render as zero rather than null. The
/// called-next marker is resolved against the rotation pointer: block 1
/// and block 2 entries match their dedicated pointers (block 2 only when
/// the category has more than one block), and the open pointer is checked
/// regardless of block number.
pub fn project(
    equipment: &Equipment,
    rules: &SeniorityScoringRules,
    pointer: Option<&RotationPointer>,
) -> Result<SeniorityListEntry, ScoringRulesError> {
    // capped blocks plus the trailing open block
    let number_of_blocks = rules.total_blocks(Some(equipment.classification.rule_key()))? + 1;

    let seniority = equipment.seniority.unwrap_or(0.0);
    let block_number = equipment.block_number.unwrap_or(0);
    let number_in_block = equipment.number_in_block.unwrap_or(0);

    let mut called_next = false;
    if let Some(pointer) = pointer {
        if block_number == 1 && pointer.ask_next_block1 == Some(equipment.id) {
            called_next = true;
        } else if number_of_blocks > 1
            && block_number == 2
            && pointer.ask_next_block2 == Some(equipment.id)
        {
            called_next = true;
        } else if pointer.ask_next_open == Some(equipment.id) {
            called_next = true;
        }
    }

    Ok(SeniorityListEntry {
        id: equipment.id,
        equipment_type: equipment.district_equipment_name.clone(),
        owner_name: equipment
            .owner
            .as_ref()
            .map(|owner| owner.organization_name.clone()),
        owner_id: equipment.owner_id(),
        seniority_string: format_seniority_string(block_number, number_of_blocks),
        seniority: format_up_to_three(seniority),
        make: equipment.make.clone(),
        model: equipment.model.clone(),
        size: equipment.size.clone(),
        equipment_code: equipment.equipment_code.clone(),
        called_next,
        years_registered: format_up_to_three(equipment.years_of_service),
        ytd_hours: format_up_to_three(equipment.ytd_hours),
        hours_year_minus1: format_up_to_three(equipment.service_hours_last_year),
        hours_year_minus2: format_up_to_three(equipment.service_hours_two_years_ago),
        hours_year_minus3: format_up_to_three(equipment.service_hours_three_years_ago),
        seniority_sort_order: seniority_sort_order(block_number, number_in_block),
    })
}

/// Render a numeric field with up to three fractional digits, trailing
/// zeros trimmed.
pub fn format_up_to_three(value: f32) -> String {
    let mut formatted = format!("{value:.3}");
    if formatted.contains('.') {
        while formatted.ends_with('0') {
            formatted.pop();
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }
    formatted
}

/// "Rank of total" display form for an entry's block placement.
pub fn format_seniority_string(block_number: i32, number_of_blocks: i32) -> String {
    format!("{block_number} of {number_of_blocks}")
}

/// Secondary list ordering key: ascending block, then ascending position.
pub fn seniority_sort_order(block_number: i32, number_in_block: i32) -> i32 {
    block_number * 1000 + number_in_block
}

/// Grouped report payload handed to external document rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SeniorityListReport {
    pub district_equipment_name: String,
    pub year_minus1: String,
    pub year_minus2: String,
    pub year_minus3: String,
    pub entries: Vec<SeniorityListEntry>,
}

impl SeniorityListReport {
    pub fn new(today: NaiveDate, entries: Vec<SeniorityListEntry>) -> Self {
        let year = today.year();
        Self {
            district_equipment_name: entries
                .first()
                .map(|entry| entry.equipment_type.clone())
                .unwrap_or_default(),
            year_minus1: (year - 1).to_string(),
            year_minus2: (year - 2).to_string(),
            year_minus3: (year - 3).to_string(),
            entries,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
