use geojson::FeatureCollection;
use serde_json::{Value as JsonValue, json};

use super::{ItineraryStop, RouteItinerary};
use crate::Error;

impl RouteItinerary {
    /// Converts the itinerary to a `GeoJSON` `FeatureCollection`: one
    /// `LineString` for the whole route followed by one `Point` per stop.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let coordinates: Vec<[f64; 2]> = self
            .stops
            .iter()
            .map(|stop| [stop.position.x(), stop.position.y()])
            .collect();

        let route = json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": {
                "kind": "route",
                "from": self.stops.first().map(|s| s.id),
                "to": self.stops.last().map(|s| s.id),
                "total_time": self.total_time(),
            }
        });

        let features: Vec<JsonValue> = std::iter::once(route)
            .chain(self.stops.iter().enumerate().map(stop_feature))
            .collect();

        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": features,
        }))
        .map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn stop_feature((sequence, stop): (usize, &ItineraryStop)) -> JsonValue {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [stop.position.x(), stop.position.y()],
        },
        "properties": {
            "kind": "hop",
            "sequence": sequence,
            "id": stop.id,
            "time": stop.time,
        }
    })
}
