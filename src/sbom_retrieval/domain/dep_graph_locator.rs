use crate::shared::error::SbomError;
use crate::shared::Result;

/// Maximum length for an identifier (security limit)
const MAX_IDENTIFIER_LENGTH: usize = 255;

/// DepGraphLocator value object: the two identifiers that name a
/// dependency graph on the SBOM service (organization and project).
///
/// Both identifiers end up as URL path segments, so besides being
/// non-empty they must not be able to change the shape of the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepGraphLocator {
    org_id: String,
    project_id: String,
}

impl DepGraphLocator {
    pub fn new(org_id: &str, project_id: &str) -> Result<Self> {
        validate_identifier("org_id", org_id)?;
        validate_identifier("project_id", project_id)?;

        Ok(Self {
            org_id: org_id.to_string(),
            project_id: project_id.to_string(),
        })
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Percent-encoded `orgs/{org}/projects/{project}/sbom` path
    pub fn sbom_path(&self) -> String {
        format!(
            "orgs/{}/projects/{}/sbom",
            urlencoding::encode(&self.org_id),
            urlencoding::encode(&self.project_id)
        )
    }
}

impl std::fmt::Display for DepGraphLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.org_id, self.project_id)
    }
}

fn validate_identifier(field: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| -> anyhow::Error {
        SbomError::InvalidIdentifier {
            field: field.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    if value.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }

    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Err(invalid(&format!(
            "is too long ({} bytes). Maximum allowed: {} bytes",
            value.len(),
            MAX_IDENTIFIER_LENGTH
        )));
    }

    if value.contains('/') || value.contains('\\') {
        return Err(invalid("contains path separators"));
    }

    if value.contains("..") {
        return Err(invalid("contains '..'"));
    }

    if value.contains('#') || value.contains('?') || value.contains('@') {
        return Err(invalid("contains URL-unsafe characters"));
    }

    if value.chars().any(char::is_control) {
        return Err(invalid("contains control characters"));
    }

    Ok(())
}
