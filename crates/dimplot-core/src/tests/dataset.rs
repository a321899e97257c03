use crate::*;
use serde_json::json;

fn points() -> PointsDataset {
    PointsDataset {
        dimensions: vec!["CD4".to_string(), "CD8".to_string()],
        points: vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]],
    }
}

#[test]
fn document_uses_dimension_column_and_name() {
    let clusters = vec![
        Cluster {
            name: "c0".to_string(),
            indices: vec![0, 2],
            color: Some("#00ff00".to_string()),
        },
        Cluster {
            name: "c1".to_string(),
            indices: vec![1],
            color: None,
        },
    ];
    let doc = document_for_dimension(&points(), 1, &clusters).unwrap();
    assert_eq!(doc.title, "CD8");
    assert_eq!(doc.values, vec![10.0, 20.0, 30.0]);
    assert_eq!(doc.categories[0].indices, vec![0, 2]);
    assert_eq!(doc.color_of(0), "#00ff00");
    assert_eq!(doc.color_of(1), "#ff7f0e");
}

#[test]
fn dimension_out_of_range() {
    let err = document_for_dimension(&points(), 2, &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionOutOfRange {
            dimension: 2,
            count: 2
        }
    ));
}

#[test]
fn ragged_rows_are_malformed() {
    let mut p = points();
    p.points[1].truncate(1);
    assert!(matches!(
        p.column(1),
        Err(Error::MalformedDocument { .. })
    ));
    assert_eq!(p.column(0).unwrap(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn duplicate_cluster_names_are_malformed() {
    let clusters = vec![
        Cluster {
            name: "c".to_string(),
            indices: vec![0],
            color: None,
        },
        Cluster {
            name: "c".to_string(),
            indices: vec![1],
            color: None,
        },
    ];
    assert!(matches!(
        document_for_dimension(&points(), 0, &clusters),
        Err(Error::MalformedDocument { .. })
    ));
}

#[test]
fn bundle_parses_from_json() {
    let text = json!({
        "dimensions": ["a", "b"],
        "points": [[1, 2], [3, 4]],
        "clusters": [{ "name": "k", "indices": [0, 1], "color": "#000" }]
    })
    .to_string();
    let bundle = DatasetBundle::from_json_str(&text).unwrap();
    assert_eq!(bundle.dataset.dimension_index("b"), Some(1));
    let doc = bundle.document(1).unwrap();
    assert_eq!(doc.title, "b");
    assert_eq!(doc.values, vec![2.0, 4.0]);
}
