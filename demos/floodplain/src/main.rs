//! floodplain: evacuation routing across a flooded riverside town.
//!
//! Builds a synthetic street grid, vectorizes a synthetic flood raster over
//! it, and plans evacuation routes from neighbourhoods on the west bank to
//! a shelter on the east bank.  Set `RUST_LOG=debug` to watch each stage.

mod network;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fr_core::{RoutingConfig, VectorizeConfig};
use fr_planner::{HazardSource, PlannedRoute, RoutePlanner};

use network::{GRID, build_flood_raster, build_roads, crossing};

// ── Scenario ──────────────────────────────────────────────────────────────────

/// East-bank shelter.
const SHELTER: (usize, usize) = (9, 5);

/// West-bank neighbourhoods, by street crossing.
const NEIGHBOURHOODS: [(&str, (usize, usize)); 4] = [
    ("Riverside", (3, 5)),
    ("Oakleigh", (1, 2)),
    ("Midtown", (2, 8)),
    ("Crichton", (4, 4)),
];

fn print_route(name: &str, route: Option<&PlannedRoute>) {
    match route {
        Some(r) => println!(
            "{:<12} {:>6} {:>10.0} {:>14.0} {:<6}",
            name,
            r.path.len(),
            r.length_m,
            r.cost,
            if r.risk_penalty_applied { "yes" } else { "no" },
        ),
        None => println!("{name:<12} {:>6}", "none"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== floodplain: risk-aware evacuation routing ===");
    println!("Street grid: {GRID} × {GRID} crossings");
    println!();

    // 1. Road graph.
    let roads = build_roads();
    let mut planner = RoutePlanner::new(roads, RoutingConfig::default())?;
    let extent = planner.road_extent().context("road network has no extent")?;
    info!(
        nodes = planner.base_graph().node_count(),
        edges = planner.base_graph().edge_count(),
        "road network ready"
    );

    // 2. Routes before the flood.
    let shelter = crossing(SHELTER.0, SHELTER.1);
    let mut dry = Vec::with_capacity(NEIGHBOURHOODS.len());
    for (_, (col, row)) in NEIGHBOURHOODS {
        dry.push(planner.plan(crossing(col, row), shelter)?);
    }

    // 3. Flood.
    let raster = build_flood_raster()?;
    let t0 = Instant::now();
    let source = planner.refresh_from_raster(&raster, &extent, &VectorizeConfig::default())?;
    info!(?source, elapsed_ms = t0.elapsed().as_millis() as u64, "flood hazards loaded");
    if source == HazardSource::Empty {
        println!("Flood raster produced no hazards; routes below are unchanged.");
    }
    for hazard in planner.hazards().polygons() {
        println!(
            "Hazard: {:.1} ha, risk cost {}",
            hazard.area_m2.unwrap_or(0.0) / 10_000.0,
            hazard.risk_cost
        );
    }
    println!();

    // 4. Routes during the flood.
    println!("{:<12} {:>6} {:>10} {:>14} {:<6}", "From", "Nodes", "Length m", "Cost", "Wet");
    println!("{}", "-".repeat(52));
    for ((name, (col, row)), before) in NEIGHBOURHOODS.into_iter().zip(&dry) {
        let during = planner.plan(crossing(col, row), shelter)?;
        print_route(&format!("{name} (dry)"), before.as_ref());
        print_route(name, during.as_ref());
    }

    Ok(())
}
