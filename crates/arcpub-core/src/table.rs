use crate::error::Result;

// ---------------------------------------------------------------------------
// TableKind
// ---------------------------------------------------------------------------

/// ISA flavor of a structured-table payload. All flavors serialize the same
/// way (one worksheet per sheet); the kind is kept for diagnostics and file
/// naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Investigation,
    Study,
    Assay,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Investigation => "isa-investigation",
            TableKind::Study => "isa-study",
            TableKind::Assay => "isa-assay",
        }
    }

    /// Conventional file name for this flavor inside an ARC.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Investigation => "isa.investigation.xlsx",
            TableKind::Study => "isa.study.xlsx",
            TableKind::Assay => "isa.assay.xlsx",
        }
    }
}

// ---------------------------------------------------------------------------
// Sheet / Workbook
// ---------------------------------------------------------------------------

/// One logical table: a named sheet of string cells, row 0 conventionally
/// the header.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }
}

/// In-memory model of a spreadsheet workbook, serialized to xlsx in one
/// shot: either the whole container is written or the error surfaces.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub kind: TableKind,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(kind: TableKind, sheet: Sheet) -> Self {
        Self {
            kind,
            sheets: vec![sheet],
        }
    }

    /// Serialize to xlsx container bytes. A workbook with no sheets gets a
    /// single blank worksheet, since the container format requires one.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut book = rust_xlsxwriter::Workbook::new();
        if self.sheets.is_empty() {
            book.add_worksheet();
        }
        for sheet in &self.sheets {
            let worksheet = book.add_worksheet();
            worksheet.set_name(sheet.name.as_str())?;
            for (row, cells) in sheet.rows.iter().enumerate() {
                for (col, cell) in cells.iter().enumerate() {
                    worksheet.write_string(row as u32, col as u16, cell.as_str())?;
                }
            }
        }
        Ok(book.save_to_buffer()?)
    }
}
