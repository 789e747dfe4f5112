//! Names of the well-known store keys.
//!
//! Older data sets used short names (`doc`, `nomen`). Reads try the canonical
//! key first and then the alias; writes always go to the canonical key.

pub const SETTINGS: &str = "settings";
pub const DOCUMENTS: &str = "documents";
pub const NOMENCLATURE: &str = "nomenclature";

pub const DOCUMENTS_ALIAS: &str = "doc";
pub const NOMENCLATURE_ALIAS: &str = "nomen";

/// Keys to try, in order, when reading `name`.
pub fn read_candidates(name: &str) -> Vec<&str> {
    match name {
        DOCUMENTS | DOCUMENTS_ALIAS => vec![DOCUMENTS, DOCUMENTS_ALIAS],
        NOMENCLATURE | NOMENCLATURE_ALIAS => vec![NOMENCLATURE, NOMENCLATURE_ALIAS],
        other => vec![other],
    }
}

/// Canonical key for a table name.
pub fn canonical(name: &str) -> &str {
    match name {
        DOCUMENTS_ALIAS => DOCUMENTS,
        NOMENCLATURE_ALIAS => NOMENCLATURE,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_both_ways() {
        assert_eq!(read_candidates("doc"), vec!["documents", "doc"]);
        assert_eq!(read_candidates("nomenclature"), vec!["nomenclature", "nomen"]);
        assert_eq!(read_candidates("stor"), vec!["stor"]);
        assert_eq!(canonical("nomen"), "nomenclature");
        assert_eq!(canonical("users"), "users");
    }
}
