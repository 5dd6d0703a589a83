//! `mc planets list`

use anyhow::Result;
use mission_control_core::models::RETAINED_COLUMNS;
use mission_control_core::store::PlanetStore;

pub fn run_list(store: &PlanetStore, json: bool) -> Result<()> {
    let planets = store.get_all_planets();

    if json {
        println!("{}", serde_json::to_string_pretty(planets)?);
        return Ok(());
    }

    println!("{}", RETAINED_COLUMNS.join("\t"));
    for planet in planets {
        let cells: Vec<&str> = planet.columns().iter().map(|(_, v)| *v).collect();
        println!("{}", cells.join("\t"));
    }
    println!("{} habitable planets", planets.len());
    Ok(())
}
