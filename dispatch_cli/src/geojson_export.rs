use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;

use dispatch_optimizer::report::{SolutionReport, StopVisit};

fn position(visit: &StopVisit) -> Vec<f64> {
    vec![visit.lon, visit.lat]
}

fn feature(geometry: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        id: None,
        geometry: Some(Geometry::new(geometry)),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn properties(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(object) => object,
        _ => JsonObject::new(),
    }
}

/// Stop points and one line per non-empty route, ready to be drawn on a map.
pub fn report_to_geojson(report: &SolutionReport) -> GeoJson {
    let mut features = Vec::new();

    for route in report.non_empty_routes() {
        let line = route.visits.iter().map(position).collect();
        features.push(feature(
            Value::LineString(line),
            properties(json!({
                "vehicle": route.vehicle,
                "distance": route.distance,
                "load": route.load,
            })),
        ));

        let customers = &route.visits[1..route.visits.len() - 1];
        for (sequence, visit) in customers.iter().enumerate() {
            features.push(feature(
                Value::Point(position(visit)),
                properties(json!({
                    "id": visit.id,
                    "vehicle": route.vehicle,
                    "sequence": sequence + 1,
                    "arrival_start": visit.arrival.start,
                    "arrival_end": visit.arrival.end,
                })),
            ));
        }
    }

    if let Some(depot) = report.routes.first().and_then(|route| route.visits.first()) {
        features.push(feature(
            Value::Point(position(depot)),
            properties(json!({ "id": depot.id, "depot": true })),
        ));
    }

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}
