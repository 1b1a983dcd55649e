//! Bakery product categories.
//!
//! The backend stores categories as short codes; the storefront displays
//! human-readable labels. Unknown codes pass through unchanged so a new
//! backend category does not break rendering.

use serde::{Deserialize, Serialize};

/// Known bakery categories, keyed by backend code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// TC - layer cakes
    Tc,
    /// TK - kuchen
    Tk,
    /// PF - fine pastry
    Pf,
    /// GL - cookies
    Gl,
    /// PAN - bread
    Pan,
}

impl Category {
    /// All known categories, in display order.
    pub const ALL: [Self; 5] = [Self::Tc, Self::Tk, Self::Pf, Self::Gl, Self::Pan];

    /// The backend code for this category.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tc => "TC",
            Self::Tk => "TK",
            Self::Pf => "PF",
            Self::Gl => "GL",
            Self::Pan => "PAN",
        }
    }

    /// Display label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tc => "Tortas",
            Self::Tk => "Kuchen",
            Self::Pf => "Pastelería fina",
            Self::Gl => "Galletas",
            Self::Pan => "Panes",
        }
    }

    /// Look up a category by its backend code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Display label for a backend code, falling back to the raw code for
    /// categories this client does not know about.
    #[must_use]
    pub fn label_for_code(code: &str) -> &str {
        Self::from_code(code).map_or(code, |c| c.label())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(category.code()), Some(category));
        }
    }

    #[test]
    fn test_label_for_code() {
        assert_eq!(Category::label_for_code("TC"), "Tortas");
        assert_eq!(Category::label_for_code("PAN"), "Panes");
        // Unknown codes pass through
        assert_eq!(Category::label_for_code("XYZ"), "XYZ");
    }
}
