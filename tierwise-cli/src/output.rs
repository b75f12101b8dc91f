/// Output formatting: terminal tier table and JSON.
use serde::Serialize;
use tierwise_core::{ItemRecord, TierAssignment};

#[derive(Serialize)]
struct JsonMember {
    name: String,
    wins: u32,
    comparisons: u32,
}

#[derive(Serialize)]
struct JsonTier {
    name: String,
    items: Vec<JsonMember>,
}

#[derive(Serialize)]
struct JsonOutput {
    tiers: Vec<JsonTier>,
    unranked: Vec<String>,
    total_decisions: usize,
}

fn find<'a>(pool: &'a [ItemRecord], id: i64) -> &'a ItemRecord {
    pool.iter().find(|item| item.id == id).expect("assignment covers the pool")
}

/// Print the tier assignment as a formatted terminal table.
pub fn print_table(assignment: &TierAssignment, pool: &[ItemRecord], total_decisions: usize) {
    let label_width = assignment
        .tiers
        .iter()
        .map(|t| t.name.len())
        .chain(std::iter::once("unranked".len()))
        .max()
        .unwrap_or(4);

    for tier in &assignment.tiers {
        let row = tier
            .members
            .iter()
            .map(|&id| {
                let item = find(pool, id);
                format!("{} ({}-{})", item.name_key, item.wins, item.comparisons - item.wins)
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:>label_width$} | {}", tier.name, row);
    }

    if !assignment.unranked.is_empty() {
        let row = assignment
            .unranked
            .iter()
            .map(|&id| find(pool, id).name_key.clone())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:>label_width$} | {}", "unranked", row);
    }

    println!("\n{} items tiered from {} decisions", assignment.len(), total_decisions);
}

/// Print the tier assignment as JSON.
pub fn print_json(assignment: &TierAssignment, pool: &[ItemRecord], total_decisions: usize) {
    let tiers = assignment
        .tiers
        .iter()
        .map(|tier| JsonTier {
            name: tier.name.clone(),
            items: tier
                .members
                .iter()
                .map(|&id| {
                    let item = find(pool, id);
                    JsonMember {
                        name: item.name_key.clone(),
                        wins: item.wins,
                        comparisons: item.comparisons,
                    }
                })
                .collect(),
        })
        .collect();

    let output = JsonOutput {
        tiers,
        unranked: assignment
            .unranked
            .iter()
            .map(|&id| find(pool, id).name_key.clone())
            .collect(),
        total_decisions,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
