use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::field::{Quantity, Scalar};
use crate::lenient;

// ── Documents ───────────────────────────────────────────────────────

/// A production task: one ERP operation with the materials it consumes and
/// the products it yields.
///
/// Remote schemas are owned by the ERP. Fields this client does not know are
/// kept in `extra`, and every field is written back the way it was received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// ERP identifier. Unique by convention only.
    #[serde(rename = "id-erp", default, skip_serializing_if = "Scalar::is_absent")]
    pub id_erp: Scalar,

    /// Display name (task number).
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub number: Scalar,

    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub date: Scalar,

    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub status: Scalar,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption: Option<Vec<LineItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<Vec<LineItem>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of a consumption or production list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Reference into the nomenclature dictionary.
    #[serde(rename = "nomen-id-erp", default, skip_serializing_if = "Scalar::is_absent")]
    pub nomen_ref: Scalar,

    #[serde(rename = "quant_plan", default, skip_serializing_if = "Quantity::is_absent")]
    pub planned: Quantity,

    #[serde(rename = "quant_fact", default, skip_serializing_if = "Quantity::is_absent")]
    pub actual: Quantity,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which line-item list of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Consumption,
    Production,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Consumption => "consumption",
            Section::Production => "production",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "consumption" | "c" => Ok(Section::Consumption),
            "production" | "p" => Ok(Section::Production),
            _ => Err(CoreError::UnknownSection(s.to_string())),
        }
    }
}

impl Document {
    /// Rows of one list; empty when the document has no such list.
    pub fn lines(&self, section: Section) -> &[LineItem] {
        let lines = match section {
            Section::Consumption => &self.consumption,
            Section::Production => &self.production,
        };
        lines.as_deref().unwrap_or_default()
    }

    /// Status to show. Some ERP exports carry the operation `type` instead.
    pub fn status_label(&self) -> String {
        if !self.status.is_empty() {
            return self.status.to_string();
        }
        match self.extra.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Set the actual quantity of one row in place.
    pub fn set_actual(&mut self, section: Section, row: usize, qty: f64) -> Result<(), CoreError> {
        if !qty.is_finite() {
            return Err(CoreError::InvalidQuantity(qty.to_string()));
        }
        let lines = match section {
            Section::Consumption => self.consumption.as_deref_mut(),
            Section::Production => self.production.as_deref_mut(),
        }
        .unwrap_or_default();
        let len = lines.len();
        let line = lines.get_mut(row).ok_or(CoreError::RowOutOfRange {
            section: section.as_str(),
            row,
            len,
        })?;
        line.actual = Quantity::new(qty);
        Ok(())
    }
}

/// Index of the first document with the given ERP identifier.
pub fn find_document(documents: &[Document], id: &str) -> Option<usize> {
    documents.iter().position(|d| d.id_erp == id)
}

/// Identifiers that occur more than once.
///
/// Nothing rejects duplicates; this only reports them.
pub fn duplicate_ids(documents: &[Document]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in documents {
        *counts.entry(doc.id_erp.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}

// ── Nomenclature ────────────────────────────────────────────────────

/// A material or product in the reference dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NomenclatureEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(rename = "id-erp", default, deserialize_with = "lenient::string")]
    pub id_erp: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub barcode: String,

    /// Lot / series, when the item is tracked by batch.
    #[serde(
        default,
        alias = "lot",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub series: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read-only lookups over the nomenclature list. Linear scans; the list is
/// small and loaded once.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    entries: &'a [NomenclatureEntry],
}

impl<'a> Catalog<'a> {
    pub fn new(entries: &'a [NomenclatureEntry]) -> Self {
        Self { entries }
    }

    /// Resolve a line-item reference: ERP id first, then local id.
    pub fn by_ref(&self, reference: &str) -> Option<&'a NomenclatureEntry> {
        if reference.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.id_erp == reference)
            .or_else(|| self.entries.iter().find(|e| e.id == reference))
    }

    /// Name to show for a reference; the raw reference when unknown.
    pub fn display_name(&self, reference: &str) -> String {
        match self.by_ref(reference) {
            Some(entry) if !entry.name.is_empty() => entry.name.clone(),
            _ => reference.to_string(),
        }
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Connection settings. Stored as one record and overwritten wholesale.
///
/// `username` and `token` are only written when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_production_tasks: String,

    #[serde(default)]
    pub api_task_completion: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl Default for Settings {
    /// Placeholder settings used before anything has been saved.
    fn default() -> Self {
        Self {
            api_production_tasks: "https://your-erp.com/api/production-tasks".to_string(),
            api_task_completion: "https://your-erp.com/api/task-completion".to_string(),
            username: "user".to_string(),
            token: "YOUR_TOKEN".to_string(),
        }
    }
}

/// Partial settings edit, as entered on the settings screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub api_production_tasks: Option<String>,
    pub api_task_completion: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.api_production_tasks {
            self.api_production_tasks = v;
        }
        if let Some(v) = patch.api_task_completion {
            self.api_task_completion = v;
        }
        if let Some(v) = patch.username {
            self.username = v;
        }
        if let Some(v) = patch.token {
            self.token = v;
        }
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

// ── Dictionaries ────────────────────────────────────────────────────

/// A named reference table (storage locations, users, ...), loaded on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dictionary {
    pub name: String,
    pub entries: Vec<Value>,
}

impl Dictionary {
    /// Build from a stored value: an array yields its items, `null` nothing,
    /// anything else a single entry.
    pub fn from_value(name: &str, value: Value) -> Self {
        let entries = match value {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        Self {
            name: name.to_string(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> Document {
        serde_json::from_value(json!({
            "id-erp": "D001",
            "number": "Task 1",
            "date": "2024-05-01",
            "status": "new",
            "warehouse": "W1",
            "consumption": [
                {"nomen-id-erp": "N1", "quant_plan": 10, "quant_fact": 0},
                {"nomen-id-erp": "N2", "quant_plan": "2.5", "quant_fact": null}
            ],
            "production": [
                {"nomen-id-erp": "P1", "quant_plan": 5, "unit": "pcs"}
            ]
        }))
        .unwrap()
    }

    // ========================================================================
    // Documents
    // ========================================================================

    #[test]
    fn document_decodes_known_and_unknown_fields() {
        let doc = sample_doc();
        assert_eq!(doc.id_erp, "D001");
        let consumption = doc.lines(Section::Consumption);
        assert_eq!(consumption.len(), 2);
        assert_eq!(consumption[1].planned, 2.5);
        assert_eq!(consumption[1].actual, 0.0);
        assert_eq!(doc.extra["warehouse"], "W1");
        assert_eq!(doc.lines(Section::Production)[0].extra["unit"], "pcs");
    }

    #[test]
    fn unknown_fields_are_written_back() {
        let value = serde_json::to_value(sample_doc()).unwrap();
        assert_eq!(value["warehouse"], "W1");
        assert_eq!(value["production"][0]["unit"], "pcs");
        assert_eq!(value["consumption"][0]["nomen-id-erp"], "N1");
    }

    #[test]
    fn empty_object_is_a_default_document() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Document::default());
        assert!(doc.lines(Section::Production).is_empty());
    }

    #[test]
    fn status_and_type_are_separate_fields() {
        let doc: Document = serde_json::from_value(json!({
            "id-erp": "D9",
            "status": "new",
            "type": "assembly"
        }))
        .unwrap();
        assert_eq!(doc.status, "new");
        assert_eq!(doc.status_label(), "new");
        assert_eq!(doc.extra["type"], "assembly");

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["status"], "new");
        assert_eq!(value["type"], "assembly");
    }

    #[test]
    fn type_labels_a_document_without_status() {
        let doc: Document = serde_json::from_value(json!({"id-erp": 7, "type": "assembly"})).unwrap();
        assert_eq!(doc.id_erp, "7");
        assert!(doc.status.is_empty());
        assert_eq!(doc.status_label(), "assembly");
    }

    #[test]
    fn stored_document_is_written_back_unchanged() {
        let stored = json!({
            "id-erp": 7,
            "consumption": [
                {"nomen-id-erp": 101, "quant_plan": 48, "quant_fact": 0},
                {"nomen-id-erp": "N2", "quant_plan": "2,5", "quant_fact": "2 pcs"}
            ]
        });
        let doc: Document = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(doc.lines(Section::Consumption)[0].nomen_ref, "101");
        assert_eq!(doc.lines(Section::Consumption)[1].actual, 0.0);
        assert_eq!(serde_json::to_value(&doc).unwrap(), stored);
    }

    #[test]
    fn edited_quantity_replaces_only_that_value() {
        let mut doc: Document = serde_json::from_value(json!({
            "id-erp": "D1",
            "production": [{"quant_plan": 48, "quant_fact": "2 pcs"}]
        }))
        .unwrap();
        doc.set_actual(Section::Production, 0, 47.0).unwrap();
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"id-erp": "D1", "production": [{"quant_plan": 48, "quant_fact": 47}]})
        );
    }

    #[test]
    fn set_actual_mutates_in_place() {
        let mut doc = sample_doc();
        doc.set_actual(Section::Consumption, 1, 3.0).unwrap();
        assert_eq!(doc.lines(Section::Consumption)[1].actual, 3.0);
        assert_eq!(doc.lines(Section::Consumption)[0].actual, 0.0);
    }

    #[test]
    fn set_actual_rejects_bad_row_and_nan() {
        let mut doc = sample_doc();
        let err = doc.set_actual(Section::Production, 3, 1.0).unwrap_err();
        assert_eq!(
            err,
            CoreError::RowOutOfRange {
                section: "production",
                row: 3,
                len: 1
            }
        );
        assert!(doc.set_actual(Section::Production, 0, f64::NAN).is_err());

        let mut bare = Document::default();
        assert!(bare.set_actual(Section::Consumption, 0, 1.0).is_err());
        assert!(bare.consumption.is_none());
    }

    #[test]
    fn section_parses_short_and_long_names() {
        assert_eq!("C".parse::<Section>().unwrap(), Section::Consumption);
        assert_eq!("production".parse::<Section>().unwrap(), Section::Production);
        assert!("scrap".parse::<Section>().is_err());
    }

    #[test]
    fn find_and_duplicates() {
        let mut a = sample_doc();
        let mut b = sample_doc();
        b.id_erp = "D002".into();
        let c = sample_doc();
        a.number = "first".into();
        let docs = vec![a, b, c];

        assert_eq!(find_document(&docs, "D002"), Some(1));
        assert_eq!(find_document(&docs, "D001"), Some(0));
        assert_eq!(find_document(&docs, "D404"), None);
        assert_eq!(duplicate_ids(&docs), vec!["D001".to_string()]);
    }

    // ========================================================================
    // Nomenclature
    // ========================================================================

    fn entries() -> Vec<NomenclatureEntry> {
        serde_json::from_value(json!([
            {"id": "1", "id-erp": "N1", "name": "Steel sheet", "barcode": "4600001"},
            {"id": "N2", "id-erp": "X9", "name": "Bolt M8", "barcode": "4600002", "lot": "L-77"}
        ]))
        .unwrap()
    }

    #[test]
    fn catalog_lookups() {
        let entries = entries();
        let catalog = Catalog::new(&entries);
        assert_eq!(catalog.by_ref("N1").unwrap().name, "Steel sheet");
        // Falls back to the local id when no ERP id matches.
        assert_eq!(catalog.by_ref("N2").unwrap().name, "Bolt M8");
        assert_eq!(catalog.by_ref("X9").unwrap().series.as_deref(), Some("L-77"));
        assert!(catalog.by_ref("").is_none());
        assert_eq!(catalog.display_name("ZZ"), "ZZ");
    }

    // ========================================================================
    // Settings
    // ========================================================================

    #[test]
    fn settings_wire_format_is_camel_case() {
        let s = Settings {
            api_production_tasks: "https://erp/tasks".into(),
            api_task_completion: "https://erp/done".into(),
            username: String::new(),
            token: String::new(),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(
            v,
            json!({"apiProductionTasks": "https://erp/tasks", "apiTaskCompletion": "https://erp/done"})
        );
    }

    #[test]
    fn stored_settings_without_token_stay_without_token() {
        let s: Settings = serde_json::from_value(json!({"apiProductionTasks": "a"})).unwrap();
        assert_eq!(s.api_task_completion, "");
        assert_eq!(s.token, "");
    }

    #[test]
    fn apply_patch_and_mask() {
        let mut s = Settings::default();
        s.apply(SettingsPatch {
            token: Some("secret-abcd".into()),
            ..Default::default()
        });
        assert_eq!(s.token, "secret-abcd");
        assert_eq!(s.username, "user");
        assert_eq!(s.masked_token(), "*******abcd");
        assert!(SettingsPatch::default().is_empty());
    }

    // ========================================================================
    // Dictionaries
    // ========================================================================

    #[test]
    fn dictionary_from_value_shapes() {
        assert_eq!(Dictionary::from_value("stor", json!([1, 2])).len(), 2);
        assert_eq!(Dictionary::from_value("users", json!({"a": 1})).len(), 1);
        assert!(Dictionary::from_value("x", Value::Null).is_empty());
    }
}
