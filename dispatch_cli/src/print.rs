use comfy_table::{Table, presets::UTF8_FULL};
use dispatch_optimizer::SolutionReport;

pub fn routes_table(report: &SolutionReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Vehicle", "Stops", "Load", "Distance (m)", "Visits",
    ]);

    for route in &report.routes {
        let visits = route
            .visits
            .iter()
            .map(|visit| {
                format!(
                    "{} [{}-{}]",
                    visit.id, visit.arrival.start, visit.arrival.end
                )
            })
            .collect::<Vec<_>>()
            .join(" -> ");

        table.add_row(vec![
            route.vehicle.to_string(),
            route.visits.len().saturating_sub(2).to_string(),
            format!("{}/{}", route.load, route.capacity),
            route.distance.to_string(),
            visits,
        ]);
    }

    table
}

pub fn unassigned_table(report: &SolutionReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Stop", "Id", "Reason"]);

    for unassigned in &report.unassigned {
        let reason = serde_json::to_value(unassigned.reason)
            .ok()
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default();
        table.add_row(vec![
            unassigned.stop.to_string(),
            unassigned.id.clone(),
            reason,
        ]);
    }

    table
}

pub fn print_report(report: &SolutionReport) {
    println!("{}", routes_table(report));

    if !report.unassigned.is_empty() {
        println!("Unassigned stops");
        println!("{}", unassigned_table(report));
    }

    println!("Total distance: {:.2} km", report.total_distance as f64 / 1000.0);

    if let Some(search) = &report.search {
        println!(
            "Local search: {} iterations, {} moves, {} m saved, stopped: {:?}",
            search.iterations,
            search.accepted_moves,
            search.improvement(),
            search.stop_reason
        );
    }
}
