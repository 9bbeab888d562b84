//! The closed set of transaction categories.
//!
//! Categories are a fixed registry rather than user-defined rows: every
//! transaction must belong to exactly one member of [Category::all].
//! Display labels are in Bahasa Indonesia.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A category for expenses and income.
///
/// `Unknown` is a sentinel for malformed stored keys. It is not a registry
/// member: it does not appear in [Category::all] and cannot be selected in
/// forms, but rows carrying an unrecognised key still render as
/// "Tidak Diketahui" instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Salary,
    Entertainment,
    Shopping,
    Healthcare,
    Education,
    Other,
    #[serde(skip_deserializing)]
    Unknown,
}

/// The registry members in canonical order.
///
/// Aggregations and form selects iterate this slice, so its order defines
/// the display order everywhere.
const REGISTRY: [Category; 9] = [
    Category::Food,
    Category::Transport,
    Category::Utilities,
    Category::Salary,
    Category::Entertainment,
    Category::Shopping,
    Category::Healthcare,
    Category::Education,
    Category::Other,
];

impl Category {
    /// All registry members in canonical order. Does not include `Unknown`.
    pub fn all() -> &'static [Category] {
        &REGISTRY
    }

    /// Parse a stored or submitted key, e.g. "food".
    ///
    /// Returns `None` for anything that is not a registry member.
    pub fn from_key(key: &str) -> Option<Self> {
        REGISTRY.iter().copied().find(|category| category.key() == key)
    }

    /// The stable lowercase key used in the database and in form values.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Salary => "salary",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Other => "other",
            Category::Unknown => "unknown",
        }
    }

    /// The Indonesian display label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Food => "Makanan",
            Category::Transport => "Transportasi",
            Category::Utilities => "Utilitas",
            Category::Salary => "Gaji",
            Category::Entertainment => "Hiburan",
            Category::Shopping => "Belanja",
            Category::Healthcare => "Kesehatan",
            Category::Education => "Pendidikan",
            Category::Other => "Lainnya",
            Category::Unknown => "Tidak Diketahui",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
