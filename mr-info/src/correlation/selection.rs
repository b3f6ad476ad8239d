//! Project allow-list filtering.

use crate::gitlab::Project;

/// Keeps projects whose id or `path_with_namespace` equals one of `selectors`.
///
/// Matching is exact; the input order is preserved.
#[must_use]
pub fn select_projects(projects: Vec<Project>, selectors: &[String]) -> Vec<Project> {
    projects
        .into_iter()
        .filter(|project| is_selected(project, selectors))
        .collect()
}

fn is_selected(project: &Project, selectors: &[String]) -> bool {
    let id = project.id.to_string();
    selectors
        .iter()
        .any(|selector| *selector == id || *selector == project.path_with_namespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: u64, path: &str) -> Project {
        Project {
            id,
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path_with_namespace: path.to_string(),
        }
    }

    fn catalog() -> Vec<Project> {
        vec![
            project(7, "group/other"),
            project(42, "group/repo"),
            project(420, "group/repo-legacy"),
            project(43, "group/sub/repo"),
        ]
    }

    fn selectors(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selects_by_id() {
        let selected = select_projects(catalog(), &selectors(&["42"]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 42);
    }

    #[test]
    fn selects_by_exact_path() {
        let selected = select_projects(catalog(), &selectors(&["group/repo"]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].path_with_namespace, "group/repo");
    }

    #[test]
    fn keeps_upstream_order() {
        let selected = select_projects(catalog(), &selectors(&["group/sub/repo", "7"]));
        let ids: Vec<_> = selected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 43]);
    }

    #[test]
    fn project_matching_two_selectors_is_listed_once() {
        let selected = select_projects(catalog(), &selectors(&["42", "group/repo"]));
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(select_projects(catalog(), &selectors(&["4", "group"])).is_empty());
        assert!(select_projects(catalog(), &[]).is_empty());
    }
}
