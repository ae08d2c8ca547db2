use ef_project::schema::*;
use ef_project::{load, load_json, load_yaml, save_json, save_yaml, validate_project};
use ef_series::{DecadeRange, ESeries};
use ef_solver::Topology;

fn sample_project() -> SearchProject {
    SearchProject {
        version: LATEST_VERSION,
        name: "Roundtrip".to_string(),
        searches: vec![
            SearchDef {
                id: "pull_up".to_string(),
                description: Some("4k7 from two parts".to_string()),
                target: ValueDef::Text("4k7".to_string()),
                unit: "Ω".to_string(),
                series: ESeries::E12,
                decades: DecadeRange::new(2, 4).unwrap(),
                arity: 2,
                allow_fewer: true,
                topology: Topology::Parallel,
                tolerance: ToleranceDef::Relative { value: 0.02 },
                limit: Some(3),
            },
            SearchDef {
                id: "ratio".to_string(),
                description: None,
                target: ValueDef::Number(0.25),
                unit: String::new(),
                series: ESeries::E96,
                decades: DecadeRange::default(),
                arity: 2,
                allow_fewer: false,
                topology: Topology::Divider,
                tolerance: ToleranceDef::Absolute { value: 0.001 },
                limit: None,
            },
        ],
    }
}

#[test]
fn roundtrip_yaml_empty_project() {
    let project = SearchProject {
        version: LATEST_VERSION,
        name: "Empty".to_string(),
        searches: vec![],
    };
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("ef_project_roundtrip_empty.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml_searches() {
    let project = sample_project();
    let path = std::env::temp_dir().join("ef_project_roundtrip_searches.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_searches() {
    let project = sample_project();
    let path = std::env::temp_dir().join("ef_project_roundtrip_searches.json");

    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(project, loaded);

    let by_extension = load(&path).unwrap();
    assert_eq!(project, by_extension);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = sample_project();
    project.searches[1].id = "pull_up".to_string();

    let path = std::env::temp_dir().join("ef_project_roundtrip_invalid.yaml");
    assert!(save_yaml(&path, &project).is_err());
}
