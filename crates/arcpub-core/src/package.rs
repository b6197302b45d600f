use crate::contract::{ContractPath, Payload, WriteContract};
use crate::dataset::DatasetItem;
use crate::error::Result;
use crate::table::{Sheet, TableKind, Workbook};

// ---------------------------------------------------------------------------
// ArcPackage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StudyRecord {
    pub identifier: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct AssayRecord {
    pub identifier: String,
    pub measurement_type: String,
}

/// In-memory model of one Annotated Research Context, built from a dataset
/// item and turned into an ordered write-contract list.
#[derive(Debug, Clone)]
pub struct ArcPackage {
    pub identifier: String,
    pub title: String,
    pub description: String,
    pub studies: Vec<StudyRecord>,
    pub assays: Vec<AssayRecord>,
}

impl ArcPackage {
    /// Standard package for a dataset entry: one study carrying the entry
    /// itself, no assays until measurement data is attached.
    pub fn from_dataset_item(item: &DatasetItem) -> Self {
        let title = item.sanitized_name();
        Self {
            identifier: item.slug(),
            description: format!("ARC generated from dataset entry '{title}'"),
            studies: vec![StudyRecord {
                identifier: item.slug(),
                title: title.clone(),
            }],
            assays: Vec::new(),
            title,
        }
    }

    /// The ordered contract list materializing this package. Directory
    /// contracts precede the files inside them, so the engine can process
    /// the list front to back.
    pub fn write_contracts(&self) -> Result<Vec<WriteContract>> {
        let mut contracts = Vec::new();

        contracts.push(WriteContract::create(
            ContractPath::file(".arc/.gitkeep")?,
            Payload::Empty,
        ));
        for dir in ["assays", "runs", "studies", "workflows"] {
            contracts.push(WriteContract::create(
                ContractPath::directory(dir)?,
                Payload::Empty,
            ));
        }

        contracts.push(WriteContract::create(
            ContractPath::file(TableKind::Investigation.file_name())?,
            Payload::Table(self.investigation_workbook()),
        ));

        for study in &self.studies {
            let base = format!("studies/{}", study.identifier);
            contracts.push(WriteContract::create(
                ContractPath::file(format!("{base}/{}", TableKind::Study.file_name()))?,
                Payload::Table(study_workbook(study)),
            ));
            contracts.push(WriteContract::create(
                ContractPath::directory(format!("{base}/resources"))?,
                Payload::Empty,
            ));
            contracts.push(WriteContract::create(
                ContractPath::directory(format!("{base}/protocols"))?,
                Payload::Empty,
            ));
        }

        for assay in &self.assays {
            let base = format!("assays/{}", assay.identifier);
            contracts.push(WriteContract::create(
                ContractPath::file(format!("{base}/{}", TableKind::Assay.file_name()))?,
                Payload::Table(assay_workbook(assay)),
            ));
            contracts.push(WriteContract::create(
                ContractPath::directory(format!("{base}/dataset"))?,
                Payload::Empty,
            ));
            contracts.push(WriteContract::create(
                ContractPath::directory(format!("{base}/protocols"))?,
                Payload::Empty,
            ));
        }

        contracts.push(WriteContract::create(
            ContractPath::file("README.md")?,
            Payload::PlainText(self.readme()),
        ));

        Ok(contracts)
    }

    fn investigation_workbook(&self) -> Workbook {
        let mut sheet = Sheet::new("isa_investigation");
        sheet.push_row(["INVESTIGATION"]);
        sheet.push_row(["Investigation Identifier", self.identifier.as_str()]);
        sheet.push_row(["Investigation Title", self.title.as_str()]);
        sheet.push_row(["Investigation Description", self.description.as_str()]);
        sheet.push_row(["STUDY"]);
        for study in &self.studies {
            sheet.push_row(["Study Identifier", study.identifier.as_str()]);
            sheet.push_row(["Study Title", study.title.as_str()]);
            sheet.push_row([
                "Study File Name".to_string(),
                format!("studies/{}/{}", study.identifier, TableKind::Study.file_name()),
            ]);
        }
        Workbook::with_sheet(TableKind::Investigation, sheet)
    }

    fn readme(&self) -> String {
        let mut out = format!("# {}\n\n{}\n\n## Studies\n\n", self.title, self.description);
        for study in &self.studies {
            out.push_str(&format!("- `studies/{}` — {}\n", study.identifier, study.title));
        }
        out
    }
}

fn study_workbook(study: &StudyRecord) -> Workbook {
    let mut sheet = Sheet::new("isa_study");
    sheet.push_row(["STUDY"]);
    sheet.push_row(["Study Identifier", study.identifier.as_str()]);
    sheet.push_row(["Study Title", study.title.as_str()]);
    Workbook::with_sheet(TableKind::Study, sheet)
}

fn assay_workbook(assay: &AssayRecord) -> Workbook {
    let mut sheet = Sheet::new("isa_assay");
    sheet.push_row(["ASSAY"]);
    sheet.push_row(["Assay Identifier", assay.identifier.as_str()]);
    sheet.push_row(["Assay Measurement Type", assay.measurement_type.as_str()]);
    Workbook::with_sheet(TableKind::Assay, sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fulfill;
    use tempfile::TempDir;

    fn package() -> ArcPackage {
        ArcPackage::from_dataset_item(&DatasetItem::new("Barley Drought Stress"))
    }

    #[test]
    fn contracts_list_directories_before_their_files() {
        let contracts = package().write_contracts().unwrap();
        let pos = |needle: &str| {
            contracts
                .iter()
                .position(|c| c.path.relative().as_path().to_str() == Some(needle))
                .unwrap_or_else(|| panic!("no contract for {needle}"))
        };
        assert!(pos("studies") < pos("studies/barley-drought-stress/isa.study.xlsx"));
    }

    #[test]
    fn package_with_assay_emits_assay_contracts() {
        let mut package = package();
        package.assays.push(AssayRecord {
            identifier: "leaf-rnaseq".into(),
            measurement_type: "transcription profiling".into(),
        });

        let contracts = package.write_contracts().unwrap();
        assert!(contracts.iter().any(|c| {
            c.path.relative().as_path().to_str() == Some("assays/leaf-rnaseq/isa.assay.xlsx")
        }));
    }

    #[test]
    fn fulfilled_package_has_standard_arc_layout() {
        let dir = TempDir::new().unwrap();
        let contracts = package().write_contracts().unwrap();
        let report = fulfill(dir.path(), &contracts).unwrap();

        assert_eq!(report.skipped, 0);
        assert!(dir.path().join(".arc/.gitkeep").is_file());
        for d in ["assays", "runs", "studies", "workflows"] {
            assert!(dir.path().join(d).is_dir(), "missing {d}/");
        }
        assert!(dir.path().join("isa.investigation.xlsx").is_file());
        assert!(dir
            .path()
            .join("studies/barley-drought-stress/isa.study.xlsx")
            .is_file());
        assert!(dir
            .path()
            .join("studies/barley-drought-stress/protocols")
            .is_dir());
        let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.contains("Barley Drought Stress"));
    }
}
