use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use super::domain::{
    DistrictEquipmentTypeId, Equipment, EquipmentClassification, EquipmentId, EquipmentStatus,
    LocalAreaId, Owner, OwnerId,
};

/// Load an equipment cohort from a CSV roster export.
///
/// Intended for demos and test fixtures; the surrounding application owns
/// real data intake. Every row lands in the given local area and district
/// equipment type with the supplied classification.
pub fn load_cohort<R: Read>(
    reader: R,
    local_area: LocalAreaId,
    district_equipment_type: DistrictEquipmentTypeId,
    district_equipment_name: &str,
    classification: EquipmentClassification,
) -> Result<Vec<Equipment>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut cohort = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        cohort.push(row.into_equipment(
            local_area,
            district_equipment_type,
            district_equipment_name,
            classification,
        )?);
    }

    Ok(cohort)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "EquipmentId")]
    equipment_id: i32,
    #[serde(rename = "EquipmentCode")]
    equipment_code: String,
    #[serde(rename = "Make", default)]
    make: String,
    #[serde(rename = "Model", default)]
    model: String,
    #[serde(rename = "Size", default)]
    size: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "OwnerId", default)]
    owner_id: Option<i32>,
    #[serde(rename = "OwnerName", default)]
    owner_name: Option<String>,
    #[serde(rename = "ReceivedDate")]
    received_date: String,
    #[serde(rename = "YearsOfService", default)]
    years_of_service: f32,
    #[serde(rename = "YtdHours", default)]
    ytd_hours: f32,
    #[serde(rename = "HoursLastYear", default)]
    hours_last_year: f32,
    #[serde(rename = "HoursTwoYearsAgo", default)]
    hours_two_years_ago: f32,
    #[serde(rename = "HoursThreeYearsAgo", default)]
    hours_three_years_ago: f32,
}

impl RosterRow {
    fn into_equipment(
        self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
        district_equipment_name: &str,
        classification: EquipmentClassification,
    ) -> Result<Equipment, RosterImportError> {
        let status = parse_status(&self.status)?;
        let received_date = NaiveDate::parse_from_str(&self.received_date, "%Y-%m-%d")
            .map_err(|_| RosterImportError::InvalidReceivedDate {
                equipment_code: self.equipment_code.clone(),
                value: self.received_date.clone(),
            })?;

        let owner = match (self.owner_id, self.owner_name) {
            (Some(id), Some(name)) => Some(Owner {
                id: OwnerId(id),
                organization_name: name,
            }),
            (Some(id), None) => Some(Owner {
                id: OwnerId(id),
                organization_name: String::new(),
            }),
            _ => None,
        };

        Ok(Equipment {
            id: EquipmentId(self.equipment_id),
            local_area_id: local_area,
            district_equipment_type_id: district_equipment_type,
            district_equipment_name: district_equipment_name.to_string(),
            equipment_code: self.equipment_code,
            make: self.make,
            model: self.model,
            size: self.size,
            status,
            classification,
            owner,
            received_date,
            seniority: None,
            seniority_effective_date: None,
            block_number: None,
            number_in_block: None,
            years_of_service: self.years_of_service,
            ytd_hours: self.ytd_hours,
            service_hours_last_year: self.hours_last_year,
            service_hours_two_years_ago: self.hours_two_years_ago,
            service_hours_three_years_ago: self.hours_three_years_ago,
        })
    }
}

fn parse_status(value: &str) -> Result<EquipmentStatus, RosterImportError> {
    match value.to_ascii_lowercase().as_str() {
        "approved" => Ok(EquipmentStatus::Approved),
        "pending" => Ok(EquipmentStatus::Pending),
        "archived" => Ok(EquipmentStatus::Archived),
        _ => Err(RosterImportError::InvalidStatus {
            value: value.to_string(),
        }),
    }
}

/// Error enumeration for roster CSV loading.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unrecognized equipment status '{value}'")]
    InvalidStatus { value: String },
    #[error("equipment '{equipment_code}' has an unparseable received date '{value}'")]
    InvalidReceivedDate {
        equipment_code: String,
        value: String,
    },
}
