//! Turning search definitions into solver requests and running them.

use crate::schema::{SearchDef, SearchProject};
use crate::validate::validate_search;
use crate::{ProjectError, ProjectResult};
use ef_series::{ESeries, StandardValues};
use ef_solver::{Candidate, SearchRequest, Tolerance, Topology, search};
use tracing::info;

/// Outcome of one search definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub id: String,
    pub unit: String,
    pub series: ESeries,
    pub topology: Topology,
    pub target: f64,
    pub tolerance: Tolerance,
    pub combinations: u128,
    pub candidates: Vec<Candidate>,
}

impl SearchDef {
    pub fn to_request(&self) -> ProjectResult<SearchRequest> {
        validate_search(self)?;
        let target = self.target.resolve()?;
        let values = StandardValues::new(self.series, self.decades);
        Ok(
            SearchRequest::new(target, self.tolerance.into(), self.arity, &values)
                .symmetric(self.topology.is_symmetric())
                .allow_fewer(self.allow_fewer)
                .limit(self.limit),
        )
    }
}

pub fn run_search(def: &SearchDef) -> ProjectResult<SearchReport> {
    let request = def.to_request()?;
    let topology = def.topology;
    let candidates = search(&request, |v| topology.evaluate(v))?;
    info!(id = %def.id, found = candidates.len(), "search definition done");

    Ok(SearchReport {
        id: def.id.clone(),
        unit: def.unit.clone(),
        series: def.series,
        topology,
        target: request.target,
        tolerance: request.tolerance,
        combinations: request.combinations(),
        candidates,
    })
}

/// Run every search in file order.
pub fn run_project(project: &SearchProject) -> ProjectResult<Vec<SearchReport>> {
    crate::validate_project(project)?;
    project.searches.iter().map(run_search).collect()
}

pub fn find_search<'a>(project: &'a SearchProject, id: &str) -> ProjectResult<&'a SearchDef> {
    project
        .searches
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| ProjectError::NotFound { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LATEST_VERSION, ToleranceDef, ValueDef};
    use ef_series::DecadeRange;

    fn one_kilohm(allow_fewer: bool) -> SearchDef {
        SearchDef {
            id: "r1k".to_string(),
            description: Some("1k from two E24 parts".to_string()),
            target: ValueDef::Text("1k".to_string()),
            unit: "Ω".to_string(),
            series: ESeries::E24,
            decades: DecadeRange::new(1, 3).unwrap(),
            arity: 2,
            allow_fewer,
            topology: Topology::Series,
            tolerance: ToleranceDef::Relative { value: 0.01 },
            limit: Some(5),
        }
    }

    #[test]
    fn request_follows_definition() {
        let request = one_kilohm(true).to_request().unwrap();
        assert_eq!(request.target, 1000.0);
        assert!(request.symmetric);
        assert!(request.allow_fewer);
        assert_eq!(request.limit, Some(5));
        assert_eq!(request.values.len(), 3 * 24);
    }

    #[test]
    fn divider_is_not_symmetric() {
        let mut def = one_kilohm(false);
        def.topology = Topology::Divider;
        def.target = ValueDef::Number(0.5);
        assert!(!def.to_request().unwrap().symmetric);
    }

    #[test]
    fn run_one_kilohm() {
        let report = run_search(&one_kilohm(false)).unwrap();
        assert_eq!(report.candidates[0].values, vec![180.0, 820.0]);
        assert!(report.candidates.len() <= 5);

        let report = run_search(&one_kilohm(true)).unwrap();
        assert_eq!(report.candidates[0].values, vec![1000.0]);
    }

    #[test]
    fn run_project_and_lookup() {
        let project = SearchProject {
            version: LATEST_VERSION,
            name: "p".to_string(),
            searches: vec![one_kilohm(false)],
        };
        let reports = run_project(&project).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "r1k");

        assert!(find_search(&project, "r1k").is_ok());
        assert!(matches!(
            find_search(&project, "missing"),
            Err(ProjectError::NotFound { .. })
        ));
    }
}
