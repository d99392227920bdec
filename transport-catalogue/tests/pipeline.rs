//! End-to-end runs of the make-base and process-requests documents.

use std::path::Path;

use serde_json::{Value, json};
use transport_catalogue::requests::{
    MakeBaseRequest, ProcessRequestsRequest, make_base, process_requests, read_json,
    write_json,
};

fn base_document(file: &Path) -> Value {
    json!({
        "base_requests": [
            {"type": "Bus", "name": "14", "stops": ["A", "B", "C"], "is_roundtrip": false},
            {
                "type": "Stop",
                "name": "A",
                "latitude": 55.611087,
                "longitude": 37.20829,
                "road_distances": {"B": 2000}
            },
            {
                "type": "Stop",
                "name": "B",
                "latitude": 55.595884,
                "longitude": 37.209755,
                "road_distances": {"C": 4000}
            },
            {
                "type": "Stop",
                "name": "C",
                "latitude": 55.632761,
                "longitude": 37.333324,
                "road_distances": {"B": 3000}
            },
            {"type": "Stop", "name": "D", "latitude": 55.574371, "longitude": 37.6517},
            {"type": "Bus", "name": "22", "stops": ["B", "C", "B"], "is_roundtrip": true}
        ],
        "routing_settings": {"bus_wait_time": 2, "bus_velocity": 30},
        "render_settings": {"width": 600, "height": 400},
        "serialization_settings": {"file": file}
    })
}

fn run(base: Value, queries: Value) -> Value {
    let request: MakeBaseRequest = serde_json::from_value(base).unwrap();
    make_base(&request).unwrap();

    let text = serde_json::to_vec(&queries).unwrap();
    let request: ProcessRequestsRequest = read_json(text.as_slice()).unwrap();
    let responses = process_requests(&request).unwrap();

    let mut out = Vec::new();
    write_json(&mut out, &responses).unwrap();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn answers_every_query_kind() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("base.db");

    let answers = run(
        base_document(&file),
        json!({
            "serialization_settings": {"file": file},
            "stat_requests": [
                {"id": 1, "type": "Bus", "name": "14"},
                {"id": 2, "type": "Bus", "name": "22"},
                {"id": 3, "type": "Bus", "name": "750"},
                {"id": 4, "type": "Stop", "name": "B"},
                {"id": 5, "type": "Stop", "name": "D"},
                {"id": 6, "type": "Stop", "name": "Z"},
                {"id": 7, "type": "Route", "from": "A", "to": "C"},
                {"id": 8, "type": "Route", "from": "C", "to": "A"},
                {"id": 9, "type": "Route", "from": "A", "to": "D"},
                {"id": 10, "type": "Route", "from": "B", "to": "B"},
                {"id": 11, "type": "Map"}
            ]
        }),
    );
    let answers = answers.as_array().unwrap();
    assert_eq!(answers.len(), 11);

    assert_eq!(answers[0]["request_id"], 1);
    assert_eq!(answers[0]["route_length"], 11000);
    assert_eq!(answers[0]["stop_count"], 5);
    assert_eq!(answers[0]["unique_stop_count"], 3);
    let curvature = answers[0]["curvature"].as_f64().unwrap();
    assert!((0.5..0.55).contains(&curvature), "{curvature}");

    assert_eq!(answers[1]["route_length"], 7000);
    assert_eq!(answers[1]["stop_count"], 3);
    assert_eq!(answers[1]["unique_stop_count"], 2);

    assert_eq!(answers[2], json!({"request_id": 3, "error_message": "not found"}));

    assert_eq!(answers[3], json!({"request_id": 4, "buses": ["14", "22"]}));
    assert_eq!(answers[4], json!({"request_id": 5, "buses": []}));
    assert_eq!(answers[5], json!({"request_id": 6, "error_message": "not found"}));

    assert_eq!(
        answers[6],
        json!({
            "request_id": 7,
            "total_time": 14.0,
            "items": [
                {"type": "Wait", "stop_name": "A", "time": 2.0},
                {"type": "Bus", "bus": "14", "span_count": 2, "time": 12.0}
            ]
        })
    );
    assert_eq!(
        answers[7],
        json!({
            "request_id": 8,
            "total_time": 12.0,
            "items": [
                {"type": "Wait", "stop_name": "C", "time": 2.0},
                {"type": "Bus", "bus": "14", "span_count": 2, "time": 10.0}
            ]
        })
    );
    assert_eq!(answers[8], json!({"request_id": 9, "error_message": "not found"}));
    assert_eq!(
        answers[9],
        json!({"request_id": 10, "total_time": 0.0, "items": []})
    );
    assert_eq!(
        answers[10],
        json!({"request_id": 11, "error_message": "map rendering is not supported"})
    );
}

#[test]
fn base_without_routing_refuses_routes() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("base.db");

    let mut base = base_document(&file);
    base.as_object_mut().unwrap().remove("routing_settings");

    let answers = run(
        base,
        json!({
            "serialization_settings": {"file": file},
            "stat_requests": [
                {"id": 1, "type": "Route", "from": "A", "to": "C"},
                {"id": 2, "type": "Stop", "name": "A"}
            ]
        }),
    );

    assert_eq!(
        answers,
        json!([
            {"request_id": 1, "error_message": "routing is not configured"},
            {"request_id": 2, "buses": ["14"]}
        ])
    );
}

#[test]
fn rebuilding_replaces_the_base() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("base.db");

    let queries = json!({
        "serialization_settings": {"file": file},
        "stat_requests": [{"id": 1, "type": "Bus", "name": "22"}]
    });

    let first = run(base_document(&file), queries.clone());
    assert_eq!(first[0]["stop_count"], 3);

    let mut base = base_document(&file);
    base["base_requests"]
        .as_array_mut()
        .unwrap()
        .retain(|request| request["name"] != "22");
    let second = run(base, queries);
    assert_eq!(
        second,
        json!([{"request_id": 1, "error_message": "not found"}])
    );
}
