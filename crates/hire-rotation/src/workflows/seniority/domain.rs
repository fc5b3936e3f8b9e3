use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for equipment records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentId(pub i32);

/// Identifier wrapper for equipment owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub i32);

/// Identifier wrapper for local (service) areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalAreaId(pub i32);

/// Identifier wrapper for district equipment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistrictEquipmentTypeId(pub i32);

/// Identifier wrapper for the province-wide equipment type catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentTypeId(pub i32);

/// Registration status tracked for every piece of hired equipment.
///
/// Only `Approved` equipment participates in scoring and block placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Approved,
    Pending,
    Archived,
}

impl EquipmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EquipmentStatus::Approved => "approved",
            EquipmentStatus::Pending => "pending",
            EquipmentStatus::Archived => "archived",
        }
    }
}

/// Rule category an equipment type maps to.
///
/// Dump trucks carry their own scoring weights and block geometry; every
/// other type shares the default rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentClassification {
    Default,
    DumpTruck,
}

impl EquipmentClassification {
    /// Key used to look this category up in the scoring rules registry.
    pub const fn rule_key(self) -> &'static str {
        match self {
            EquipmentClassification::Default => "Default",
            EquipmentClassification::DumpTruck => "DumpTruck",
        }
    }
}

/// Catalogue entry describing a province-wide equipment type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentType {
    pub id: EquipmentTypeId,
    pub name: String,
    pub is_dump_truck: bool,
}

impl EquipmentType {
    pub const fn classification(&self) -> EquipmentClassification {
        if self.is_dump_truck {
            EquipmentClassification::DumpTruck
        } else {
            EquipmentClassification::Default
        }
    }
}

/// Company that owns one or more pieces of hired equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub organization_name: String,
}

/// A piece of hired equipment registered in a local area.
///
/// The seniority fields (`seniority`, `seniority_effective_date`,
/// `block_number`, `number_in_block`) are owned by the seniority workflow;
/// everything else is read-only input maintained by the surrounding
/// application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub local_area_id: LocalAreaId,
    pub district_equipment_type_id: DistrictEquipmentTypeId,
    pub district_equipment_name: String,
    pub equipment_code: String,
    pub make: String,
    pub model: String,
    pub size: String,
    pub status: EquipmentStatus,
    pub classification: EquipmentClassification,
    pub owner: Option<Owner>,
    pub received_date: NaiveDate,
    pub seniority: Option<f32>,
    pub seniority_effective_date: Option<DateTime<Utc>>,
    pub block_number: Option<i32>,
    pub number_in_block: Option<i32>,
    pub years_of_service: f32,
    pub ytd_hours: f32,
    pub service_hours_last_year: f32,
    pub service_hours_two_years_ago: f32,
    pub service_hours_three_years_ago: f32,
}

impl Equipment {
    pub fn owner_id(&self) -> Option<OwnerId> {
        self.owner.as_ref().map(|owner| owner.id)
    }

    /// Drop every seniority-owned field back to the unscored state.
    pub fn clear_seniority(&mut self) {
        self.seniority = None;
        self.block_number = None;
        self.number_in_block = None;
    }
}

/// Per-area record naming the equipment next due to be called within
/// block 1, block 2, and the trailing open block.
///
/// Rotation advancement happens elsewhere; this workflow only reads it
/// while projecting list entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPointer {
    pub local_area_id: LocalAreaId,
    pub ask_next_block1: Option<EquipmentId>,
    pub ask_next_block2: Option<EquipmentId>,
    pub ask_next_open: Option<EquipmentId>,
}
