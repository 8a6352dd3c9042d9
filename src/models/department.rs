//! Fixed set of departments a record may belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Department labels accepted by the personnel forms and filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Department {
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Information Technology")]
    InformationTechnology,
    #[serde(rename = "Accounting")]
    Accounting,
    #[serde(rename = "Marketing")]
    Marketing,
    #[serde(rename = "Sales")]
    Sales,
    #[serde(rename = "Production")]
    Production,
    #[serde(rename = "Quality Control")]
    QualityControl,
    #[serde(rename = "Logistics")]
    Logistics,
}

impl Department {
    /// All departments, in the order they are offered for selection.
    pub const ALL: [Department; 8] = [
        Department::HumanResources,
        Department::InformationTechnology,
        Department::Accounting,
        Department::Marketing,
        Department::Sales,
        Department::Production,
        Department::QualityControl,
        Department::Logistics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::HumanResources => "Human Resources",
            Department::InformationTechnology => "Information Technology",
            Department::Accounting => "Accounting",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Production => "Production",
            Department::QualityControl => "Quality Control",
            Department::Logistics => "Logistics",
        }
    }

    /// Look up a department by its exact label.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
