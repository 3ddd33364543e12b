// End-to-end runs of the site assessment pipeline over a small synthetic
// region: pixel selection, edge-aligned search, overlap filtering, and
// GeoJSON output.

use std::collections::HashMap;
use std::io::Write;

use geo::Intersects;
use ndarray::Array2;
use reefsite::{
    AssessConfig, CriterionBounds, Engine, GEOJSON_EPSG, ReefOutlineStore, SuitabilityGrid,
    filter_overlaps, read_criteria_grid, read_reef_outlines, write_sites,
};

const RES: f64 = 0.001;
const WEST: f64 = 146.0;
const NORTH: f64 = -18.0;

/// 20x20 criteria grid with a 6x6 suitable depth patch in the middle.
fn region_grid() -> SuitabilityGrid {
    let mut depth = Array2::from_elem((20, 20), -50.0);
    for row in 7..13 {
        for col in 7..13 {
            depth[[row, col]] = -5.0;
        }
    }
    let mut layers = HashMap::new();
    layers.insert("depth".to_string(), depth);
    SuitabilityGrid::new(4326, WEST, NORTH, RES, layers).unwrap()
}

fn region_config() -> AssessConfig {
    AssessConfig {
        criteria: vec![CriterionBounds { name: "depth".into(), lower: -10.0, upper: -2.0 }],
        site_x_m: 40.0,
        site_y_m: 40.0,
        search_radius_m: 20_000.0,
        min_score: 0.33,
        align_to_edges: true,
    }
}

/// A reef outline enclosing the suitable patch.
fn patch_outline_geojson() -> &'static [u8] {
    br#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [146.007, -18.013],
                    [146.013, -18.013],
                    [146.013, -18.007],
                    [146.007, -18.007],
                    [146.007, -18.013]
                ]]
            },
            "properties": {"reef_name": "synthetic"}
        }]
    }"#
}

#[test]
fn assessment_yields_nonoverlapping_scored_sites() {
    let grid = region_grid();
    let store = ReefOutlineStore::new(read_reef_outlines(patch_outline_geojson()).unwrap(), 4326);
    let config = region_config();
    let engine = Engine::new(&grid, &store, &config).unwrap();

    let pixels = engine.suitable_pixels();
    assert_eq!(pixels.len(), 36);

    let candidates = engine.find_sites(&pixels, true);
    assert_eq!(candidates.len(), 36);
    assert!(candidates.sites().iter().all(|site| !site.qc_flag));
    assert!(candidates.sites().iter().all(|site| (0.0..=1.0).contains(&site.score)));
    // Every pixel lies inside the outline, so each pose aligned to one of
    // its axis-parallel edges.
    assert!(candidates
        .sites()
        .iter()
        .all(|site| site.rotation == 0.0 || (site.rotation.abs() - 90.0).abs() < 1e-9));

    let mut sites = filter_overlaps(candidates);
    sites.retain_min_score(config.min_score);
    assert!(!sites.is_empty());
    let surviving = sites.sites();
    for i in 0..surviving.len() {
        assert!(!surviving[i].qc_flag);
        assert!(surviving[i].score >= config.min_score);
        for j in (i + 1)..surviving.len() {
            assert!(!surviving[i].geometry.intersects(&surviving[j].geometry));
        }
    }
}

#[test]
fn filtering_an_already_filtered_set_changes_nothing() {
    let grid = region_grid();
    let store = ReefOutlineStore::new(read_reef_outlines(patch_outline_geojson()).unwrap(), 4326);
    let config = region_config();
    let engine = Engine::new(&grid, &store, &config).unwrap();

    let once = filter_overlaps(engine.find_sites(&engine.suitable_pixels(), true));
    let twice = filter_overlaps(once.clone());
    assert_eq!(once.len(), twice.len());
    for (a, b) in once.sites().iter().zip(twice.sites()) {
        assert_eq!(a.pixel, b.pixel);
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn pixels_beyond_the_search_radius_are_qc_flagged() {
    let grid = region_grid();
    // The only reef outline sits half a degree east: tens of kilometers
    // beyond the 20 km search radius.
    let far = br#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [146.5, -18.01],
                    [146.51, -18.01],
                    [146.51, -18.0],
                    [146.5, -18.0],
                    [146.5, -18.01]
                ]]
            },
            "properties": {}
        }]
    }"#;
    let store = ReefOutlineStore::new(read_reef_outlines(far).unwrap(), 4326);
    let config = region_config();
    let engine = Engine::new(&grid, &store, &config).unwrap();

    let candidates = engine.find_sites(&engine.suitable_pixels(), true);
    assert!(candidates.sites().iter().all(|site| site.qc_flag));
    assert!(filter_overlaps(candidates).is_empty());
}

#[test]
fn no_suitable_pixels_is_a_valid_empty_result() {
    let grid = region_grid();
    let store = ReefOutlineStore::new(read_reef_outlines(patch_outline_geojson()).unwrap(), 4326);
    let mut config = region_config();
    // Bounds no cell satisfies.
    config.criteria[0].lower = -1000.0;
    config.criteria[0].upper = -900.0;
    let engine = Engine::new(&grid, &store, &config).unwrap();

    let pixels = engine.suitable_pixels();
    assert!(pixels.is_empty());

    let sites = filter_overlaps(engine.find_sites(&pixels, true));
    assert!(sites.is_empty());

    let bytes = write_sites(&sites).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["features"].as_array().unwrap().len(), 0);
}

#[test]
fn unknown_criterion_fails_before_any_search() {
    let grid = region_grid();
    let store = ReefOutlineStore::new(Vec::new(), 4326);
    let mut config = region_config();
    config.criteria.push(CriterionBounds { name: "salinity".into(), lower: 0.0, upper: 1.0 });
    assert!(Engine::new(&grid, &store, &config).is_err());
}

#[test]
fn full_pipeline_through_files_round_trips() {
    // Dataset container on disk.
    let mut dataset = tempfile::NamedTempFile::new().unwrap();
    let depth: Vec<f64> = (0..16)
        .map(|i| if [5, 6, 9, 10].contains(&i) { -5.0 } else { -50.0 })
        .collect();
    write!(
        dataset,
        r#"{{"epsg": 4326, "west": {WEST}, "north": {NORTH}, "resolution": {RES},
            "shape": [4, 4], "layers": {{"depth": {depth:?}}}}}"#
    )
    .unwrap();
    let grid = read_criteria_grid(dataset.path()).unwrap();
    assert_eq!(grid.shape(), (4, 4));

    // Config on disk, exercising serde defaults.
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"{{"criteria": [{{"name": "depth", "lower": -10.0, "upper": -2.0}}],
            "site_x_m": 40.0, "site_y_m": 40.0, "align_to_edges": false}}"#
    )
    .unwrap();
    let config = AssessConfig::from_path(config_file.path()).unwrap();
    assert_eq!(config.search_radius_m, 20_000.0);
    assert_eq!(config.min_score, 0.33);

    let store = ReefOutlineStore::new(Vec::new(), GEOJSON_EPSG);
    let engine = Engine::new(&grid, &store, &config).unwrap();
    let pixels = engine.suitable_pixels();
    assert_eq!(pixels.len(), 4);

    let mut sites = filter_overlaps(engine.find_sites(&pixels, false));
    sites.retain_min_score(config.min_score);

    let bytes = write_sites(&sites).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["features"].as_array().unwrap().len(), sites.len());
    for feature in value["features"].as_array().unwrap() {
        assert!(feature["properties"]["score"].as_f64().unwrap() >= config.min_score);
        assert!(feature["properties"]["rotation"].is_number());
        assert_eq!(feature["geometry"]["type"], "Polygon");
    }
}
