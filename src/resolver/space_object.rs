//! Tracked objects as seen by the resolver.
//!
//! The resolver only needs two facts about an object: its NORAD designator, matched
//! against the H2 header of every candidate, and its preferred CPF provider, used as
//! the file extension filter under [`ProviderOption::Preferred`](super::options::ProviderOption::Preferred).
use serde::{Deserialize, Serialize};

use crate::constants::{ALL_CPF_PROVIDER, NO_TLE_PROVIDER};

/// Minimal view of a tracked space object.
pub trait TrackedObject {
    /// NORAD designator, without leading zeros.
    fn norad(&self) -> &str;

    /// Preferred CPF provider (file extension), or one of the sentinels
    /// [`ALL_CPF_PROVIDER`] / [`NO_TLE_PROVIDER`].
    fn cpf_provider(&self) -> &str;

    /// Extension filter implied by the preferred provider, `None` meaning every file.
    fn preferred_extension(&self) -> Option<&str> {
        let provider = self.cpf_provider();
        if provider.is_empty() || provider == ALL_CPF_PROVIDER || provider == NO_TLE_PROVIDER {
            None
        } else {
            Some(provider)
        }
    }
}

/// Plain tracked object record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceObject {
    pub name: String,
    pub norad: String,
    #[serde(default = "default_provider")]
    pub cpf_provider: String,
}

fn default_provider() -> String {
    ALL_CPF_PROVIDER.to_string()
}

impl SpaceObject {
    /// Build an object, stripping leading zeros from `norad` the way CPF headers do.
    pub fn new(name: impl Into<String>, norad: &str, cpf_provider: impl Into<String>) -> Self {
        SpaceObject {
            name: name.into(),
            norad: norad.trim_start_matches('0').to_string(),
            cpf_provider: cpf_provider.into(),
        }
    }
}

impl TrackedObject for SpaceObject {
    fn norad(&self) -> &str {
        &self.norad
    }

    fn cpf_provider(&self) -> &str {
        &self.cpf_provider
    }
}

#[cfg(test)]
mod space_object_test {
    use super::*;

    #[test]
    fn test_preferred_extension() {
        assert_eq!(
            SpaceObject::new("lageos1", "8820", "sgf").preferred_extension(),
            Some("sgf")
        );
        assert_eq!(
            SpaceObject::new("lageos1", "8820", "All").preferred_extension(),
            None
        );
        assert_eq!(
            SpaceObject::new("lageos1", "8820", "No TLE").preferred_extension(),
            None
        );
    }

    #[test]
    fn test_norad_zeros_stripped() {
        assert_eq!(SpaceObject::new("lageos1", "0008820", "sgf").norad(), "8820");
    }

    #[test]
    fn test_deserialize_default_provider() {
        let object: SpaceObject = toml::from_str("name = \"ajisai\"\nnorad = \"16908\"").unwrap();
        assert_eq!(object.cpf_provider(), "All");
    }
}
