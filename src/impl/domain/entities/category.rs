use std::fmt;

/// Fixed, closed set of labels used to group shopping items.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Default)]
pub enum Category {
    Hortifruti,
    Frutas,
    Carnes,
    Laticinios,
    Padaria,
    Mercearia,
    Bebidas,
    Congelados,
    Limpeza,
    Higiene,
    #[default]
    Outros,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Hortifruti,
        Category::Frutas,
        Category::Carnes,
        Category::Laticinios,
        Category::Padaria,
        Category::Mercearia,
        Category::Bebidas,
        Category::Congelados,
        Category::Limpeza,
        Category::Higiene,
        Category::Outros,
    ];

    /// Label as shown to the user and as persisted.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Hortifruti => "Hortifruti",
            Category::Frutas => "Frutas",
            Category::Carnes => "Carnes",
            Category::Laticinios => "Laticínios",
            Category::Padaria => "Padaria",
            Category::Mercearia => "Mercearia",
            Category::Bebidas => "Bebidas",
            Category::Congelados => "Congelados",
            Category::Limpeza => "Limpeza",
            Category::Higiene => "Higiene",
            Category::Outros => "Outros",
        }
    }

    /// Exact label lookup. Anything outside the closed set is `None`.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == label.trim())
    }

    /// Lookup falling back to `Outros` for absent or unknown labels.
    pub fn from_label_or_default(label: Option<&str>) -> Category {
        label.and_then(Category::from_label).unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
