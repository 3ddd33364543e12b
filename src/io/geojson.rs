use anyhow::{Context, Result, anyhow};
use geo::{Coord, LineString, Polygon};
use serde_json::{Value, json};

use crate::reef::ReefOutline;
use crate::site::ResultSet;

/// CRS of GeoJSON interchange, per RFC 7946.
pub const GEOJSON_EPSG: u32 = 4326;

/// Read reef outlines from GeoJSON bytes. Polygon and MultiPolygon
/// features are accepted; other geometry types are skipped. Degenerate
/// rings (no interior) are dropped.
pub fn read_reef_outlines(bytes: &[u8]) -> Result<Vec<ReefOutline>> {
    let value: Value =
        serde_json::from_slice(bytes).context("Failed to parse reef outline GeoJSON")?;
    let mut outlines = Vec::new();

    let Some(features) = value["features"].as_array() else {
        return Ok(outlines);
    };
    for feature in features {
        let Some(geometry) = feature["geometry"].as_object() else { continue };
        let Some(coords) = geometry.get("coordinates").and_then(Value::as_array) else { continue };
        match geometry.get("type").and_then(Value::as_str) {
            Some("Polygon") => {
                outlines.extend(ReefOutline::new(parse_polygon_rings(coords)?));
            }
            Some("MultiPolygon") => {
                for rings in coords {
                    let rings = rings
                        .as_array()
                        .ok_or_else(|| anyhow!("Invalid MultiPolygon: expected ring arrays"))?;
                    outlines.extend(ReefOutline::new(parse_polygon_rings(rings)?));
                }
            }
            _ => {}
        }
    }
    Ok(outlines)
}

/// Write surviving sites as a GeoJSON FeatureCollection. Properties carry
/// the stable `score`, `rotation` field contract, in that order.
pub fn write_sites(sites: &ResultSet) -> Result<Vec<u8>> {
    let features: Vec<Value> = sites
        .records()
        .iter()
        .map(|record| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": polygon_rings(&record.geometry),
                },
                "properties": {
                    "score": record.score,
                    "rotation": record.rotation,
                },
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&collection).context("Failed to serialize site GeoJSON")
}

/// Parse GeoJSON polygon rings: the first ring is the exterior, the rest
/// are holes.
fn parse_polygon_rings(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior = rings
        .first()
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))?;
    let interiors = rings[1..]
        .iter()
        .map(|ring| {
            ring.as_array()
                .ok_or_else(|| anyhow!("Invalid Polygon: malformed interior ring"))
                .and_then(|coords| parse_ring_coords(coords))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(parse_ring_coords(exterior)?, interiors))
}

/// Parse one ring of [x, y] positions, re-closing it if needed.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());
    for pair in coords {
        let pair = pair
            .as_array()
            .ok_or_else(|| anyhow!("Invalid coordinate: expected [x, y]"))?;
        let x = pair
            .first()
            .and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
        let y = pair
            .get(1)
            .and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }
    Ok(LineString(points))
}

/// Flatten a polygon into GeoJSON ring arrays, exterior first.
fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Vec<f64>>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors().iter())
        .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect())
        .collect()
}
