//! Navigation location and path matching.
//!
//! The router hands the toolbar an opaque pathname and query string. The
//! toolbar only ever compares them against literal route paths, optionally
//! under a portal prefix.

/// Route paths used by the toolbar.
pub mod routes {
    pub const HOME: &str = "/";
    pub const SEARCH: &str = "/search";
    pub const PROJECTS: &str = "/projects";
    pub const DOWNLOADS: &str = "/downloads";
    pub const SAVED_PROJECTS: &str = "/saved_projects";
}

/// Current navigation location.
///
/// `search` carries the leading `?` when non-empty, matching what the
/// router reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub search: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    /// Absolute URL of this location under the given application host.
    pub fn href(&self, app_host: &str) -> String {
        format!(
            "{}{}{}",
            app_host.trim_end_matches('/'),
            self.pathname,
            self.search
        )
    }
}

/// True when `pathname` matches any of `paths`, either exactly or mounted
/// under a `/portal/{id}` prefix.
pub fn is_path(pathname: &str, paths: &[&str]) -> bool {
    let bare = strip_portal_prefix(pathname);
    paths.iter().any(|path| bare == *path)
}

fn strip_portal_prefix(pathname: &str) -> &str {
    let Some(rest) = pathname.strip_prefix("/portal/") else {
        return pathname;
    };
    match rest.find('/') {
        Some(idx) if idx > 0 => &rest[idx..],
        _ => pathname,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_path() {
        assert!(is_path("/search", &[routes::SEARCH]));
        assert!(!is_path("/search/granules", &[routes::SEARCH]));
        assert!(!is_path("/projects", &[routes::SEARCH]));
    }

    #[test]
    fn matches_under_portal_prefix() {
        assert!(is_path("/portal/airquality/search", &[routes::SEARCH]));
        assert!(!is_path("/portal/airquality", &[routes::SEARCH]));
        assert!(!is_path("/portal//search", &[routes::SEARCH]));
    }

    #[test]
    fn matches_any_of_several_paths() {
        assert!(is_path("/projects", &[routes::SEARCH, routes::PROJECTS]));
    }

    #[test]
    fn href_joins_host_path_and_query() {
        let location = Location::new("/search", "?p=C1000-PROV");
        assert_eq!(
            location.href("https://search.terrasearch.dev/"),
            "https://search.terrasearch.dev/search?p=C1000-PROV"
        );
    }

    #[test]
    fn href_with_empty_search() {
        let location = Location::new("/projects", "");
        assert_eq!(
            location.href("https://search.terrasearch.dev"),
            "https://search.terrasearch.dev/projects"
        );
    }
}
