use super::domain::{Equipment, OwnerId};

/// Order a cohort by the ranking invariant the placement pass assumes:
/// seniority score descending, ties broken by the older received date.
pub(crate) fn rank(cohort: &mut [Equipment]) {
    cohort.sort_by(|a, b| {
        let score_a = a.seniority.unwrap_or(0.0);
        let score_b = b.seniority.unwrap_or(0.0);
        score_b
            .total_cmp(&score_a)
            .then_with(|| a.received_date.cmp(&b.received_date))
    });
}

/// Distribute a ranked cohort into rotation blocks in a single greedy
/// left-to-right pass.
///
/// `total_blocks` counts only the capped blocks; one uncapped open block
/// is appended for the remainder. A capped block holds at most
/// `block_size` owners and never the same owner twice; the open block
/// always accepts, so every record with an owner is placed. Owner-less
/// records are skipped with their block fields untouched.
///
/// Returns the number of records placed.
pub(crate) fn place(cohort: &mut [Equipment], block_size: i32, total_blocks: i32) -> usize {
    let block_count = (total_blocks.max(0) + 1) as usize;
    let capacity = block_size.max(0) as usize;

    let mut blocks: Vec<Vec<OwnerId>> = vec![Vec::new(); block_count];
    let mut placed = 0;

    for equipment in cohort.iter_mut() {
        let Some(owner_id) = equipment.owner_id() else {
            continue;
        };

        for (index, block) in blocks.iter_mut().enumerate() {
            let capped = index < block_count - 1;
            if capped && (block.len() >= capacity || block.contains(&owner_id)) {
                continue;
            }

            block.push(owner_id);
            equipment.block_number = Some(index as i32 + 1);
            equipment.number_in_block = Some(block.len() as i32);
            placed += 1;
            break;
        }
    }

    placed
}
