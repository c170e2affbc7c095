use crate::domain::version::SemanticVersion;
use regex::Regex;

/// A version tag ref parsed into its scope and version.
///
/// Valid tag refs look like `refs/tags/v1`, `refs/tags/v1.2`,
/// `refs/tags/v1.2.3` or, for mono-repo sub-projects,
/// `refs/tags/<scope>/v1.2.3`. Missing minor/patch components default to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    /// Full ref name, e.g. "refs/tags/lib_a/v1.2.0"
    pub name: String,
    /// Mono-repo subdirectory the tag belongs to, None for repo-root tags
    pub scope: Option<String>,
    pub version: SemanticVersion,
}

pub(crate) fn tag_regex() -> Regex {
    Regex::new(
        r"^refs/tags/(?:(?P<scope>.+)/)?v(?P<major>\d+)(?:\.(?P<minor>\d+)(?:\.(?P<patch>\d+))?)?$",
    )
    .expect("tag pattern is valid")
}

impl VersionTag {
    /// Parse a full tag ref name. Refs that do not match the version tag
    /// pattern yield None and are simply not version tags.
    pub fn parse(ref_name: &str) -> Option<Self> {
        Self::parse_with(&tag_regex(), ref_name)
    }

    pub(crate) fn parse_with(re: &Regex, ref_name: &str) -> Option<Self> {
        let captures = re.captures(ref_name)?;

        let component = |name: &str| -> u32 {
            captures
                .name(name)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };

        Some(VersionTag {
            name: ref_name.to_string(),
            scope: captures.name("scope").map(|m| m.as_str().to_string()),
            version: SemanticVersion::new(
                component("major"),
                component("minor"),
                component("patch"),
            ),
        })
    }

    /// Whether this tag belongs to the requested scope. Repo-root tags only
    /// satisfy an unscoped request and vice versa.
    pub fn in_scope(&self, scope: Option<&str>) -> bool {
        self.scope.as_deref() == scope
    }
}
