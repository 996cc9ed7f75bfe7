//! The fixed category catalog offered in the selection menu.
//!
//! Categories with a reliable upstream place type search once by type.
//! Association-style categories have no such type, so they fan out over
//! multi-language (EN/PT/ES) keyword variants instead.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Short menu key, e.g. `"3"`.
    pub key: &'static str,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    /// Upstream place type, e.g. `"real_estate_agency"`.
    pub place_type: Option<&'static str>,
}

impl Category {
    /// Number of nearby-search queries this category issues per point,
    /// not counting continuation pages.
    #[must_use]
    pub fn query_count(&self) -> usize {
        if self.place_type.is_some() {
            1
        } else {
            self.keywords.len()
        }
    }
}

const CATEGORIES: &[Category] = &[
    Category {
        key: "1",
        label: "Real Estate Agencies",
        keywords: &["real estate agency"],
        place_type: Some("real_estate_agency"),
    },
    Category {
        key: "2",
        label: "Land Associations",
        keywords: &[
            "land association",
            "associação de proprietários rurais",
            "asociación de propietarios rurales",
            "associação de proprietários de terra",
            "asociación de propietarios de tierras",
            "associação de terras",
            "asociación de tierras",
        ],
        place_type: None,
    },
    Category {
        key: "3",
        label: "Hunting Associations",
        keywords: &[
            "hunting association",
            "clube de caça",
            "associação de caça",
            "asociación de caza",
            "sociedad de cazadores",
            "federación de caza",
        ],
        place_type: None,
    },
    Category {
        key: "4",
        label: "Farming Associations",
        keywords: &[
            "farming association",
            "associação de agricultores",
            "cooperativa agrícola",
            "asociación de agricultores",
            "cooperativa agraria",
            "sindicato agrícola",
        ],
        place_type: None,
    },
    Category {
        key: "5",
        label: "Fishing Associations",
        keywords: &[
            "fishing association",
            "associação de pesca",
            "clube de pesca",
            "asociación de pesca",
            "sociedad de pescadores",
            "federación de pesca",
        ],
        place_type: None,
    },
    Category {
        key: "6",
        label: "Parish Councils (Juntas de Freguesia)",
        keywords: &[
            "junta de freguesia",
            "união de freguesias",
            "parish council",
            "junta parroquial",
            "concejo parroquial",
        ],
        place_type: None,
    },
    Category {
        key: "7",
        label: "Livestock Associations",
        keywords: &[
            "livestock association",
            "cattle association",
            "beef association",
            "associação de gado",
            "associação de produtores de gado",
            "associação de bovinos",
            "associação pecuária",
            "associação de criadores",
            "asociación de ganaderos",
            "asociación ganadera",
            "asociación de bovinos",
        ],
        place_type: None,
    },
];

/// All categories in menu order.
#[must_use]
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

#[must_use]
pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Resolve a comma-separated menu selection such as `"1, 3,5"`.
///
/// Unknown keys and repeats are dropped; the remaining categories keep the
/// order they were typed in.
#[must_use]
pub fn parse_selection(raw: &str) -> Vec<&'static Category> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter_map(find_category)
        .filter(|c| seen.insert(c.key))
        .collect()
}
