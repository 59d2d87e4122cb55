use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub id: u64,
    pub name: String,
    pub filterable: bool,
    pub options: Vec<PropertyOption>,
}

/// Filter properties assigned to a product (e.g. "Color: red, blue").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    pub id: u64,
    pub name: String,
    pub groups: Vec<PropertyGroup>,
}

impl PropertySet {
    pub fn group(&self, name: &str) -> Option<&PropertyGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

impl ValueObject for PropertySet {}
