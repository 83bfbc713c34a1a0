//! End-to-end pipeline tests: validate -> aggregate -> filter -> export

use chrono::Utc;
use costboard_core::{
    filter, Dataset, DocumentParser, ListQuery, SortOrder,
};

const SAMPLE: &str = r#"{"costCenters":[
    {"id":"A","name":"Zeta","state":"active","resources":[{"type":"Org","name":"o1"}]},
    {"id":"B","name":"Alpha","state":"active","resources":[]},
    {"id":"C","name":"Old","state":"deleted","resources":[]}
]}"#;

fn load(input: &str) -> Dataset {
    let centers = DocumentParser::new().parse_str(input).unwrap();
    Dataset::from_cost_centers(centers)
}

#[test]
fn active_and_deleted_partition_the_document() {
    let dataset = load(SAMPLE);
    assert_eq!(
        dataset.active.len() + dataset.deleted.len(),
        dataset.cost_centers.len()
    );
}

#[test]
fn summary_matches_worked_example() {
    let dataset = load(SAMPLE);
    let summary = dataset.summary;

    assert_eq!(summary.total_active, 2);
    assert_eq!(summary.total_deleted, 1);
    assert_eq!(summary.total_organizations, 1);
    assert_eq!(summary.total_repositories, 0);
    assert_eq!(summary.total_members, 0);
}

#[test]
fn summary_totals_equal_per_kind_sums_over_active() {
    let dataset = load(
        r#"[
        {"id":"1","name":"a","state":"active","resources":[
            {"type":"Org","name":"o1"},{"type":"Repo","name":"r1"},{"type":"Repo","name":"r2"}]},
        {"id":"2","name":"b","state":"active","resources":[{"type":"User","name":"u1"}]},
        {"id":"3","name":"c","state":"deleted","resources":[{"type":"Org","name":"hidden"}]}
    ]"#,
    );

    let orgs: usize = dataset
        .active
        .iter()
        .map(|c| c.resource_counts().organizations)
        .sum();
    let repos: usize = dataset
        .active
        .iter()
        .map(|c| c.resource_counts().repositories)
        .sum();
    let members: usize = dataset
        .active
        .iter()
        .map(|c| c.resource_counts().members)
        .sum();

    assert_eq!(dataset.summary.total_organizations, orgs);
    assert_eq!(dataset.summary.total_repositories, repos);
    assert_eq!(dataset.summary.total_members, members);
}

#[test]
fn default_query_returns_full_active_content() {
    let dataset = load(SAMPLE);
    let visible = filter::apply(&dataset.active, &ListQuery::default());

    let mut expected: Vec<String> = dataset.active.iter().map(|c| c.id.clone()).collect();
    let mut got: Vec<String> = visible.iter().map(|c| c.id.clone()).collect();
    expected.sort();
    got.sort();
    assert_eq!(got, expected);
}

#[test]
fn name_sort_yields_worked_example_order() {
    let dataset = load(SAMPLE);
    let visible = filter::apply(
        &dataset.active,
        &ListQuery {
            sort: SortOrder::Name,
            ..ListQuery::default()
        },
    );

    let names: Vec<&str> = visible.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Zeta"]);
}

#[test]
fn search_by_resource_name_matches_owning_center() {
    let dataset = load(SAMPLE);
    let visible = filter::apply(
        &dataset.active,
        &ListQuery {
            search: "o1".to_string(),
            ..ListQuery::default()
        },
    );

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Zeta");
}

#[test]
fn missing_resources_fails_with_index() {
    let err = DocumentParser::new()
        .parse_str(r#"[{"id":"A","name":"Zeta","state":"active"}]"#)
        .unwrap_err();

    assert!(err.to_string().contains("index 0"));
    assert!(err.to_string().contains("resources"));
}

#[test]
fn json_export_roundtrips_through_validator() {
    let dataset = load(SAMPLE);
    let exported = costboard_core::report::render_json(&dataset, Utc::now()).unwrap();

    let reparsed = DocumentParser::new().parse_str(&exported).unwrap();
    let roundtrip = Dataset::from_cost_centers(reparsed);

    let ids = |d: &Dataset| -> Vec<String> {
        d.cost_centers.iter().map(|c| c.id.clone()).collect()
    };
    assert_eq!(ids(&roundtrip), ids(&dataset));
    assert_eq!(roundtrip.summary, dataset.summary);

    for (a, b) in roundtrip.cost_centers.iter().zip(&dataset.cost_centers) {
        assert_eq!(a.resource_counts(), b.resource_counts());
    }
}
