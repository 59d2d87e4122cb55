use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguratorOption {
    pub id: u64,
    pub name: String,
    /// Option is the one the requested variant is configured with.
    pub selected: bool,
}

/// Variant dimension of a configurable product (e.g. "Size" with S/M/L).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguratorGroup {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub options: Vec<ConfiguratorOption>,
}

impl ConfiguratorGroup {
    pub fn selected_option(&self) -> Option<&ConfiguratorOption> {
        self.options.iter().find(|o| o.selected)
    }
}

impl ValueObject for ConfiguratorGroup {}
