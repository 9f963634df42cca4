//! GeoJSON export of a network and an optional highlighted route.
//!
//! Every link becomes a `LineString` feature carrying its `line`,
//! `distance_km` and `on_route` properties. When a route is supplied its start
//! and goal are added as `Point` features with a `role` property.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;

use crate::geo::Coordinates;
use crate::network::Network;
use crate::path::Route;
use crate::stations::StationId;

/// Build a GeoJSON feature collection for `network`, highlighting `route`.
pub fn network_geojson(network: &Network, route: Option<&Route>) -> GeoJson {
    let mut features = Vec::new();

    for (from, to, link) in network.graph().links() {
        let (Some(a), Some(b)) = (network.station(from), network.station(to)) else {
            continue;
        };
        let mut properties = JsonObject::new();
        properties.insert("from".to_string(), json!(from));
        properties.insert("to".to_string(), json!(to));
        properties.insert("line".to_string(), json!(link.line));
        properties.insert("distance_km".to_string(), json!(link.distance));
        properties.insert(
            "on_route".to_string(),
            json!(route.is_some_and(|route| route.uses_link(from, to))),
        );
        features.push(feature(
            Value::LineString(vec![position(&a.coordinates), position(&b.coordinates)]),
            properties,
        ));
    }

    if let Some(route) = route {
        let endpoints = [("start", route.start()), ("goal", route.goal())];
        for (role, id) in endpoints {
            if let Some(feature) = id.and_then(|id| endpoint_feature(network, id, role)) {
                features.push(feature);
            }
        }
    }

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn endpoint_feature(network: &Network, id: StationId, role: &str) -> Option<Feature> {
    let station = network.station(id)?;
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(id));
    properties.insert("name".to_string(), json!(station.name));
    properties.insert("role".to_string(), json!(role));
    Some(feature(Value::Point(position(&station.coordinates)), properties))
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// GeoJSON positions are `[longitude, latitude]`.
fn position(coordinates: &Coordinates) -> Vec<f64> {
    vec![coordinates.longitude, coordinates.latitude]
}
