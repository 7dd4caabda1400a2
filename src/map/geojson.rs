//! Exportación de una escena a GeoJSON
//!
//! Permite abrir el resultado en cualquier visor de mapas (geojson.io,
//! QGIS, Leaflet). Las coordenadas GeoJSON van en orden `[lng, lat]`.

use serde_json::{json, Value};

use super::scene::{MapScene, MarkerKind, Viewport};

pub fn scene_to_geojson(scene: &MapScene) -> Value {
    let mut features = Vec::with_capacity(scene.markers.len() + scene.polylines.len());

    for marker in &scene.markers {
        let (kind, stop_id) = match marker.kind {
            MarkerKind::Depot => ("depot", None),
            MarkerKind::Stop { stop_id, .. } => ("stop", Some(stop_id)),
        };

        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [marker.position.lng, marker.position.lat],
            },
            "properties": {
                "kind": kind,
                "stop_id": stop_id,
                "label": marker.label,
                "marker-color": marker.color,
                "title": marker.popup.title,
                "description": marker.popup.lines.join("\n"),
            },
        }));
    }

    for line in &scene.polylines {
        let coordinates: Vec<[f64; 2]> = line.points.iter().map(|p| [p.lng, p.lat]).collect();
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {
                "stroke": line.color,
                "stroke-width": line.weight,
                "stroke-opacity": line.opacity,
                "dash-array": line.dash,
            },
        }));
    }

    let bbox = match &scene.viewport {
        Some(Viewport::Fit { bounds, .. }) => Some(vec![
            bounds.min().x,
            bounds.min().y,
            bounds.max().x,
            bounds.max().y,
        ]),
        _ => None,
    };

    let mut collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    if let Some(bbox) = bbox {
        collection["bbox"] = json!(bbox);
    }
    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::scene::{Marker, Polyline, Popup};
    use crate::models::LatLng;

    #[test]
    fn test_geojson_uses_lng_lat_order() {
        let mut scene = MapScene::new("routeMap");
        scene.markers.push(Marker {
            kind: MarkerKind::Stop { number: 1, stop_id: 11 },
            position: LatLng { lat: 40.0, lng: 32.9 },
            label: "1".to_string(),
            color: "#0d6efd",
            popup: Popup {
                title: "Market".to_string(),
                lines: vec!["Çankaya".to_string()],
            },
        });
        scene.polylines.push(Polyline {
            points: vec![LatLng { lat: 39.9, lng: 32.8 }, LatLng { lat: 40.0, lng: 32.9 }],
            color: "#0d6efd",
            weight: 3,
            opacity: 0.8,
            dash: Some("5, 10"),
        });

        let value = scene_to_geojson(&scene);
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["geometry"]["coordinates"], json!([32.9, 40.0]));
        assert_eq!(features[0]["properties"]["stop_id"], 11);
        assert_eq!(features[1]["geometry"]["type"], "LineString");
        assert!(value.get("bbox").is_none());
    }
}
