#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that compiles the bundled Wildgrove content and
//! dumps the resulting lookup structures for inspection.

use anyhow::{ensure, Context, Result};
use wildgrove_core::{Location, Tier, TimePeriod};
use wildgrove_world::{build, query, session};

/// Entry point for the Wildgrove content dump.
fn main() -> Result<()> {
    let tables = wildgrove_content::tables();
    let world = build(&tables).context("compiling bundled content tables")?;
    ensure!(session::install(world), "a world was already installed");
    let world = session::get().context("session storage is empty")?;

    println!("location distances (depth, route weight):");
    let mut records: Vec<_> = Location::ALL
        .iter()
        .filter_map(|location| query::distance(world, *location).map(|record| (*location, record)))
        .collect();
    records.sort_by_key(|(_, record)| record.depth());
    for (location, record) in records {
        println!(
            "  {:<10} depth {:>2}  weight {}",
            format!("{location:?}"),
            record.depth(),
            record.weight()
        );
    }

    println!("encounter slots per location (wild / trainer):");
    for location in Location::ALL {
        let mut wild = 0;
        let mut trainer = 0;
        for tier in Tier::ALL {
            for period in TimePeriod::ALL_PERIODS {
                wild += query::pool(world, location, tier, period).len();
                trainer += query::trainers(world, location, tier, period).len();
            }
        }
        println!("  {:<10} {wild:>3} / {trainer}", format!("{location:?}"));
    }

    let uncatchable = query::uncatchable(world);
    println!("uncatchable creatures: {}", uncatchable.len());
    for creature in uncatchable {
        println!("  #{}", creature.get());
    }

    Ok(())
}
