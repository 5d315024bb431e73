//! End-to-end tests for loading graphs and stylesheets from disk.

#![cfg(feature = "load")]

use std::fs;

use archgraph::load::load;
use archgraph::{Abstractor, Error, FsLoader, LoaderConfig};
use tempfile::TempDir;

const GRAPH: &str = r#"{"elements": {
    "nodes": [
        {"data": {"id": "A", "labels": ["Structure"], "properties": {"simpleName": "A"}}},
        {"data": {"id": "B", "labels": ["Structure"], "properties": {"simpleName": "B"}}},
        {"data": {"id": "A.run", "labels": ["Operation"], "properties": {}}},
        {"data": {"id": "B.go", "labels": ["Operation"], "properties": {}}}
    ],
    "edges": [
        {"data": {"source": "A", "target": "A.run", "label": "hasScript"}},
        {"data": {"source": "B", "target": "B.go", "label": "hasScript"}},
        {"data": {"source": "A.run", "target": "B.go", "label": "invokes"}}
    ]
}}"#;

const STYLE: &str = "node { label: data(name); }";

fn setup(graph: Option<&str>, style: Option<&str>) -> (TempDir, FsLoader) {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    if let Some(graph) = graph {
        fs::write(data_dir.join("demo.json"), graph).unwrap();
    }
    let stylesheet = dir.path().join("style.cycss");
    if let Some(style) = style {
        fs::write(&stylesheet, style).unwrap();
    }
    let loader = FsLoader::new(LoaderConfig { data_dir, stylesheet });
    (dir, loader)
}

#[tokio::test]
async fn test_load_from_disk() {
    let (_dir, loader) = setup(Some(GRAPH), Some(STYLE));
    let loaded = load(&loader, "demo", &Abstractor::default()).await.unwrap();

    assert_eq!(loaded.stylesheet, STYLE);
    assert_eq!(loaded.graph.original.node_count(), 4);

    let abs = &loaded.graph.abstract_graph;
    assert_eq!(abs.node_count(), 2);
    let calls: Vec<(&str, &str)> = abs
        .edges()
        .filter(|e| e.interaction.as_deref() == Some("calls"))
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(calls, vec![("A", "B")]);
}

#[tokio::test]
async fn test_missing_graph_fails() {
    let (_dir, loader) = setup(None, Some(STYLE));
    let err = load(&loader, "demo", &Abstractor::default()).await.unwrap_err();
    match err {
        Error::ResourceLoad { resource, .. } => assert!(resource.ends_with("demo.json")),
        other => panic!("expected ResourceLoad, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_stylesheet_fails() {
    let (_dir, loader) = setup(Some(GRAPH), None);
    let err = load(&loader, "demo", &Abstractor::default()).await.unwrap_err();
    assert!(matches!(err, Error::ResourceLoad { .. }));
}

#[tokio::test]
async fn test_corrupt_graph_is_parse_error() {
    let (_dir, loader) = setup(Some(r#"{"elements": [1, 2"#), Some(STYLE));
    let err = load(&loader, "demo", &Abstractor::default()).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
