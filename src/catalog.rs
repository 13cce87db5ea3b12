use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Template sets bundled under `templates/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Default,
}

pub const AVAILABLE_TEMPLATES: &[Template] = &[Template::Default];

impl Template {
    /// Directory name of the template set below the templates root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Default => "default",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AVAILABLE_TEMPLATES
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| Error::InvalidTemplate(s.to_string()))
    }
}

/// SPDX identifiers offered to callers filling in a package descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum License {
    Apache2,
    Gpl2,
    Mit,
    Mpl2,
}

pub const AVAILABLE_LICENSES: &[License] =
    &[License::Apache2, License::Gpl2, License::Mit, License::Mpl2];

impl License {
    pub fn as_str(&self) -> &'static str {
        match self {
            License::Apache2 => "Apache-2.0",
            License::Gpl2 => "GPL-2.0",
            License::Mit => "MIT",
            License::Mpl2 => "MPL-2.0",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns a copy of the template catalog.
pub fn available_templates() -> Vec<Template> {
    AVAILABLE_TEMPLATES.to_vec()
}

/// Returns a copy of the license catalog.
pub fn available_licenses() -> Vec<License> {
    AVAILABLE_LICENSES.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_template() {
        assert_eq!("default".parse::<Template>().unwrap(), Template::Default);
    }

    #[test]
    fn test_parse_unknown_template() {
        let err = "nonexistent".parse::<Template>().unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate(ref name) if name == "nonexistent"));
    }

    #[test]
    fn test_license_identifiers() {
        let ids: Vec<&str> = available_licenses().iter().map(License::as_str).collect();
        assert_eq!(ids, vec!["Apache-2.0", "GPL-2.0", "MIT", "MPL-2.0"]);
    }

    #[test]
    fn test_catalog_copies_are_independent() {
        let mut templates = available_templates();
        templates.clear();
        assert_eq!(available_templates(), vec![Template::Default]);
    }
}
