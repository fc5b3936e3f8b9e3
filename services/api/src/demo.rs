use crate::infra::{
    scoring_rules, InMemoryEquipmentRepository, ServiceHoursFormula,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use hire_rotation::config::ScoringConfig;
use hire_rotation::error::AppError;
use hire_rotation::workflows::seniority::domain::{
    DistrictEquipmentTypeId, Equipment, EquipmentClassification, EquipmentId, EquipmentStatus,
    EquipmentType, EquipmentTypeId, LocalAreaId, Owner, OwnerId, RotationPointer,
};
use hire_rotation::workflows::seniority::roster::load_cohort;
use hire_rotation::workflows::seniority::{SeniorityListEntry, SeniorityListService};

pub(crate) const LOCAL_AREA: LocalAreaId = LocalAreaId(1);
pub(crate) const DISTRICT_TYPE: DistrictEquipmentTypeId = DistrictEquipmentTypeId(1);
pub(crate) const EQUIPMENT_TYPE: EquipmentTypeId = EquipmentTypeId(1);
pub(crate) const DUMP_TRUCK_TYPE: EquipmentTypeId = EquipmentTypeId(2);

#[derive(Args, Debug, Default)]
pub(crate) struct SeniorityListArgs {
    /// Optional roster CSV to hydrate the cohort instead of the sample fleet
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Reporting date for the report header (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Emit the full report as JSON instead of a line listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional roster CSV to hydrate the cohort instead of the sample fleet
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Reporting date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the annual rollover portion of the demo
    #[arg(long)]
    pub(crate) skip_rollover: bool,
}

type DemoService =
    SeniorityListService<InMemoryEquipmentRepository, InMemoryEquipmentRepository, ServiceHoursFormula>;

pub(crate) fn run_seniority_list(args: SeniorityListArgs) -> Result<(), AppError> {
    let SeniorityListArgs {
        roster_csv,
        today,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let (service, _repository) = build_service(roster_csv)?;

    service.recalculate(LOCAL_AREA, DISTRICT_TYPE, EQUIPMENT_TYPE)?;

    if json {
        let report = service.seniority_report(LOCAL_AREA, DISTRICT_TYPE, today)?;
        let rendered = report
            .to_json()
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        println!("{rendered}");
    } else {
        let entries = service.seniority_list(LOCAL_AREA, DISTRICT_TYPE)?;
        render_entries(&entries);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster_csv,
        today,
        skip_rollover,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let (service, _repository) = build_service(roster_csv)?;

    println!("Hired equipment rotation demo ({today})");

    let outcome = service.recalculate(LOCAL_AREA, DISTRICT_TYPE, EQUIPMENT_TYPE)?;
    println!(
        "- recalculated cohort: {} rescored | {} cleared | {} placed in blocks",
        outcome.rescored, outcome.cleared, outcome.placed
    );

    let entries = service.seniority_list(LOCAL_AREA, DISTRICT_TYPE)?;
    render_entries(&entries);

    if skip_rollover {
        return Ok(());
    }

    let rolled = service.annual_rollover(LOCAL_AREA, DISTRICT_TYPE, EQUIPMENT_TYPE)?;
    println!(
        "\nAfter annual rollover: {} rescored | {} placed",
        rolled.rescored, rolled.placed
    );
    let entries = service.seniority_list(LOCAL_AREA, DISTRICT_TYPE)?;
    render_entries(&entries);

    Ok(())
}

fn render_entries(entries: &[SeniorityListEntry]) {
    println!("Seniority list ({} entries):", entries.len());
    for entry in entries {
        let owner = entry.owner_name.as_deref().unwrap_or("(no owner)");
        let marker = if entry.called_next { " <- called next" } else { "" };
        println!(
            "  - block {} | {} {} | {} | seniority {} | ytd {}{}",
            entry.seniority_string,
            entry.equipment_code,
            entry.model,
            owner,
            entry.seniority,
            entry.ytd_hours,
            marker
        );
    }
}

fn build_service(
    roster_csv: Option<PathBuf>,
) -> Result<(DemoService, Arc<InMemoryEquipmentRepository>), AppError> {
    let repository = Arc::new(InMemoryEquipmentRepository::default());
    seed_catalogue(&repository);

    match roster_csv {
        Some(path) => {
            let file = File::open(path)?;
            let cohort = load_cohort(
                file,
                LOCAL_AREA,
                DISTRICT_TYPE,
                "Excavators",
                EquipmentClassification::Default,
            )?;
            repository.seed_equipment(cohort);
        }
        None => seed_sample_fleet(&repository),
    }

    let rules = scoring_rules(&ScoringConfig {
        rules_document: None,
    })?;
    let service = SeniorityListService::new(
        repository.clone(),
        repository.clone(),
        Arc::new(ServiceHoursFormula),
        rules,
    );

    Ok((service, repository))
}

pub(crate) fn seed_catalogue(repository: &InMemoryEquipmentRepository) {
    repository.seed_type(EquipmentType {
        id: EQUIPMENT_TYPE,
        name: "Excavator".to_string(),
        is_dump_truck: false,
    });
    repository.seed_type(EquipmentType {
        id: DUMP_TRUCK_TYPE,
        name: "Dump Truck".to_string(),
        is_dump_truck: true,
    });
}

pub(crate) fn seed_sample_fleet(repository: &InMemoryEquipmentRepository) {
    repository.seed_equipment(sample_fleet());
    repository.set_pointer(RotationPointer {
        local_area_id: LOCAL_AREA,
        ask_next_block1: Some(EquipmentId(1)),
        ask_next_block2: None,
        ask_next_open: None,
    });
}

fn sample_fleet() -> Vec<Equipment> {
    let unit = |id: i32,
                owner: Option<(i32, &str)>,
                received: (i32, u32, u32),
                years: f32,
                hours: [f32; 4]| {
        Equipment {
            id: EquipmentId(id),
            local_area_id: LOCAL_AREA,
            district_equipment_type_id: DISTRICT_TYPE,
            district_equipment_name: "Excavators".to_string(),
            equipment_code: format!("EC-{id:03}"),
            make: "Komatsu".to_string(),
            model: "PC210".to_string(),
            size: "20 tonne".to_string(),
            status: EquipmentStatus::Approved,
            classification: EquipmentClassification::Default,
            owner: owner.map(|(id, name)| Owner {
                id: OwnerId(id),
                organization_name: name.to_string(),
            }),
            received_date: NaiveDate::from_ymd_opt(received.0, received.1, received.2)
                .unwrap_or_default(),
            seniority: None,
            seniority_effective_date: None,
            block_number: None,
            number_in_block: None,
            years_of_service: years,
            ytd_hours: hours[0],
            service_hours_last_year: hours[1],
            service_hours_two_years_ago: hours[2],
            service_hours_three_years_ago: hours[3],
        }
    };

    let mut fleet = vec![
        unit(
            1,
            Some((101, "Glacier Creek Aggregates")),
            (2012, 5, 14),
            12.0,
            [310.0, 1040.0, 980.0, 1110.0],
        ),
        unit(
            2,
            Some((102, "North Ridge Contracting")),
            (2015, 3, 2),
            9.0,
            [280.0, 860.0, 910.0, 700.0],
        ),
        // EC-003 and EC-004 share a score profile; the earlier received
        // date wins the tie
        unit(
            3,
            Some((103, "Tamarack Hauling")),
            (2016, 9, 20),
            8.0,
            [150.0, 600.0, 600.0, 600.0],
        ),
        unit(
            4,
            Some((104, "Bighorn Earthworks")),
            (2017, 4, 11),
            8.0,
            [150.0, 600.0, 600.0, 600.0],
        ),
        unit(
            5,
            Some((101, "Glacier Creek Aggregates")),
            (2018, 7, 30),
            6.0,
            [90.0, 450.0, 380.0, 420.0],
        ),
        unit(
            6,
            Some((105, "Cedar Valley Equipment")),
            (2021, 1, 18),
            4.0,
            [60.0, 200.0, 150.0, 0.0],
        ),
        unit(
            7,
            Some((106, "Silvertip Excavating")),
            (2022, 10, 5),
            2.0,
            [20.0, 80.0, 0.0, 0.0],
        ),
        unit(8, None, (2020, 2, 9), 5.0, [0.0, 0.0, 0.0, 0.0]),
    ];

    // one pending unit that recalculation should leave unscored
    fleet[6].status = EquipmentStatus::Pending;
    fleet
}
