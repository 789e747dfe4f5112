use prodtask_core::{Catalog, Document, LineItem};

use crate::error::AppError;

/// One column of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    /// Key passed to [`GridRow::cell`]; matches the JSON field name.
    pub field: &'static str,
    /// Minimum width in characters.
    pub width: Option<usize>,
    /// The user may type into this column.
    pub editable: bool,
    /// The column has a header filter.
    pub filterable: bool,
}

impl Column {
    const fn new(title: &'static str, field: &'static str) -> Self {
        Self {
            title,
            field,
            width: None,
            editable: false,
            filterable: false,
        }
    }

    const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    const fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

/// A type that can be shown as a grid row.
pub trait GridRow {
    const COLUMNS: &'static [Column];

    /// Display text for `field`. Unknown fields render empty.
    fn cell(&self, field: &str) -> String;
}

impl GridRow for Document {
    const COLUMNS: &'static [Column] = &[
        Column::new("ID", "id-erp").width(6),
        Column::new("Name", "number").filterable(),
        Column::new("Date", "date").filterable(),
        Column::new("Status", "status").filterable(),
    ];

    fn cell(&self, field: &str) -> String {
        match field {
            "id-erp" => self.id_erp.to_string(),
            "number" => self.number.to_string(),
            "date" => self.date.to_string(),
            "status" => self.status_label(),
            _ => String::new(),
        }
    }
}

/// A line item joined with its nomenclature name, for the edit grids.
#[derive(Debug, Clone)]
pub struct LineRow<'a> {
    pub row: usize,
    pub line: &'a LineItem,
    pub name: String,
}

impl<'a> LineRow<'a> {
    pub fn build(lines: &'a [LineItem], catalog: Catalog<'_>) -> Vec<Self> {
        lines
            .iter()
            .enumerate()
            .map(|(row, line)| LineRow {
                row,
                line,
                name: catalog.display_name(&line.nomen_ref),
            })
            .collect()
    }
}

impl GridRow for LineRow<'_> {
    const COLUMNS: &'static [Column] = &[
        Column::new("#", "row"),
        Column::new("Item", "nomen-id-erp").width(8),
        Column::new("Name", "name"),
        Column::new("Plan", "quant_plan"),
        Column::new("Actual", "quant_fact").editable(),
    ];

    fn cell(&self, field: &str) -> String {
        match field {
            "row" => self.row.to_string(),
            "nomen-id-erp" => self.line.nomen_ref.to_string(),
            "name" => self.name.clone(),
            "quant_plan" => self.line.planned.to_string(),
            "quant_fact" => self.line.actual.to_string(),
            _ => String::new(),
        }
    }
}

// ── Filtering ───────────────────────────────────────────────────────

/// Header filters for the task grid: case-insensitive substring match per
/// column, all terms must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    terms: Vec<(&'static str, String)>,
}

impl TaskFilter {
    /// Parse `field=text` terms. The field may be a column's field name or
    /// its title, and must be filterable.
    pub fn parse<S: AsRef<str>>(terms: &[S]) -> Result<Self, AppError> {
        let mut filter = TaskFilter::default();
        for term in terms {
            let term = term.as_ref();
            let (field, needle) = term
                .split_once('=')
                .ok_or_else(|| AppError::InvalidFilter(format!("expected field=text, got {term:?}")))?;
            let column = Document::COLUMNS
                .iter()
                .find(|c| c.field == field || c.title.eq_ignore_ascii_case(field))
                .filter(|c| c.filterable)
                .ok_or_else(|| AppError::InvalidFilter(format!("column {field:?} has no filter")))?;
            filter.terms.push((column.field, needle.to_lowercase()));
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches<R: GridRow>(&self, row: &R) -> bool {
        self.terms
            .iter()
            .all(|(field, needle)| row.cell(field).to_lowercase().contains(needle.as_str()))
    }
}

// ── Layout ──────────────────────────────────────────────────────────

/// Lay rows out as a plain-text table with a header line.
pub fn render_table<R: GridRow>(rows: &[R]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| R::COLUMNS.iter().map(|c| r.cell(c.field)).collect())
        .collect();

    let widths: Vec<usize> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let title = col.title.chars().count() + usize::from(col.editable);
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain([title, col.width.unwrap_or(0)])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = R::COLUMNS
        .iter()
        .zip(&widths)
        .map(|(col, w)| {
            let title = if col.editable {
                format!("{}*", col.title)
            } else {
                col.title.to_string()
            };
            pad(&title, *w)
        })
        .collect();
    push_line(&mut out, &header);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule);

    for row in &cells {
        let padded: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        push_line(&mut out, &padded);
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn push_line(out: &mut String, cells: &[String]) {
    out.push_str(cells.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodtask_core::{NomenclatureEntry, Section};
    use serde_json::json;

    fn docs() -> Vec<Document> {
        serde_json::from_value(json!([
            {"id-erp": "D001", "number": "Cutting", "date": "2024-05-13", "status": "new"},
            {"id-erp": "D002", "number": "Assembly", "date": "2024-05-14", "status": "In progress"},
            {"id-erp": "D003", "number": "Painting", "date": "2024-05-15", "status": "new"},
            {"id-erp": 4, "number": "Packing", "date": "2024-05-16", "type": "new"}
        ]))
        .unwrap()
    }

    #[test]
    fn only_actual_column_is_editable() {
        let editable: Vec<&str> = LineRow::COLUMNS
            .iter()
            .filter(|c| c.editable)
            .map(|c| c.field)
            .collect();
        assert_eq!(editable, vec!["quant_fact"]);
        assert!(Document::COLUMNS.iter().all(|c| !c.editable));
    }

    #[test]
    fn filter_by_field_or_title() {
        let docs = docs();
        let filter = TaskFilter::parse(&["status=NEW"]).unwrap();
        let hits: Vec<&str> = docs
            .iter()
            .filter(|d| filter.matches(*d))
            .map(|d| d.id_erp.as_str())
            .collect();
        assert_eq!(hits, vec!["D001", "D003", "4"]);

        let filter = TaskFilter::parse(&["Name=paint", "date=05-15"]).unwrap();
        assert_eq!(docs.iter().filter(|d| filter.matches(*d)).count(), 1);
    }

    #[test]
    fn filter_rejects_unfilterable_and_malformed() {
        assert!(TaskFilter::parse(&["id-erp=D1"]).is_err());
        assert!(TaskFilter::parse(&["status"]).is_err());
        assert!(TaskFilter::parse::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn table_layout() {
        let table = render_table(&docs()[..2]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID      Name"));
        assert!(lines[1].starts_with("------"));
        assert!(lines[3].contains("In progress"));
    }

    #[test]
    fn line_rows_join_nomenclature() {
        let doc: Document = serde_json::from_value(json!({
            "consumption": [
                {"nomen-id-erp": "N1", "quant_plan": 12, "quant_fact": 2.5},
                {"nomen-id-erp": "N9", "quant_plan": 1},
                {"nomen-id-erp": "N1", "quant_plan": 4, "quant_fact": "2 pcs"}
            ]
        }))
        .unwrap();
        let nomen = vec![NomenclatureEntry {
            id_erp: "N1".into(),
            name: "Steel sheet".into(),
            ..Default::default()
        }];

        let rows = LineRow::build(doc.lines(Section::Consumption), Catalog::new(&nomen));
        assert_eq!(rows[0].cell("name"), "Steel sheet");
        assert_eq!(rows[0].cell("quant_plan"), "12");
        assert_eq!(rows[0].cell("quant_fact"), "2.5");
        assert_eq!(rows[1].cell("name"), "N9");
        assert_eq!(rows[1].cell("quant_fact"), "0");
        assert_eq!(rows[2].cell("quant_fact"), "2 pcs");

        let table = render_table(&rows);
        assert!(table.lines().next().unwrap().ends_with("Actual*"));
    }
}
