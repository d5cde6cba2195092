//! Portal context.
//!
//! Deployments can mount the application under a portal, which prefixes
//! every in-app route with `/portal/{id}`. The default deployment has no
//! prefix.

/// Active portal for this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portal {
    /// Portal identifier, `None` for the default portal.
    pub portal_id: Option<String>,
}

impl Portal {
    /// Create a portal context for the given id.
    pub fn new(portal_id: impl Into<String>) -> Self {
        Self {
            portal_id: Some(portal_id.into()),
        }
    }

    /// URL path prefix for portal-scoped routes.
    ///
    /// Empty for the default portal, `/portal/{id}` otherwise.
    pub fn path_prefix(&self) -> String {
        match &self.portal_id {
            Some(id) => format!("/portal/{}", id),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_portal_has_no_prefix() {
        assert_eq!(Portal::default().path_prefix(), "");
    }

    #[test]
    fn named_portal_prefixes_routes() {
        assert_eq!(Portal::new("airquality").path_prefix(), "/portal/airquality");
    }
}
