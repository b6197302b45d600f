use crate::contract::{ContractPath, Operation, Payload, WriteContract};
use crate::error::Result;
use crate::io::{atomic_write, ensure_dir};
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Counts of what a fulfillment run actually did. A run that skipped
/// contracts still completes successfully; callers decide what to report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FulfillReport {
    pub written: usize,
    pub skipped: usize,
}

/// Materialize `contracts` under `base`, strictly in list order.
///
/// Ordering is a correctness requirement: a later contract may write into a
/// directory an earlier contract created. Files are always overwritten in
/// full, so re-running a contract list is idempotent.
///
/// Unrecognized contracts (non-create operations, unknown payload kinds, a
/// content payload aimed at a directory path) are skipped with a warning
/// and never abort the batch. I/O failures are fatal and propagate with no
/// rollback of contracts already on disk.
pub fn fulfill(base: &Path, contracts: &[WriteContract]) -> Result<FulfillReport> {
    let mut report = FulfillReport::default();
    for contract in contracts {
        if contract.operation != Operation::Create {
            warn!(
                path = %contract.path.relative(),
                operation = %contract.operation,
                "skipping contract: only create operations are supported"
            );
            report.skipped += 1;
            continue;
        }
        match &contract.path {
            ContractPath::Directory(rel) => match &contract.payload {
                Payload::Empty => {
                    ensure_dir(&rel.resolve(base))?;
                    report.written += 1;
                }
                other => {
                    warn!(
                        path = %rel,
                        kind = other.kind(),
                        "skipping contract: directory path cannot carry file content"
                    );
                    report.skipped += 1;
                }
            },
            ContractPath::File(rel) => {
                let target = rel.resolve(base);
                match &contract.payload {
                    Payload::Empty => {
                        atomic_write(&target, b"")?;
                        report.written += 1;
                    }
                    Payload::PlainText(text) => {
                        atomic_write(&target, text.as_bytes())?;
                        report.written += 1;
                    }
                    Payload::Table(workbook) => {
                        let bytes = workbook.to_xlsx_bytes()?;
                        atomic_write(&target, &bytes)?;
                        report.written += 1;
                    }
                    Payload::Unrecognized { kind } => {
                        warn!(
                            path = %rel,
                            kind = kind.as_str(),
                            "skipping contract: unrecognized payload kind"
                        );
                        report.skipped += 1;
                    }
                }
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Sheet, TableKind, Workbook};
    use tempfile::TempDir;

    fn create_file(path: &str, payload: Payload) -> WriteContract {
        WriteContract::create(ContractPath::file(path).unwrap(), payload)
    }

    fn create_dir(path: &str) -> WriteContract {
        WriteContract::create(ContractPath::directory(path).unwrap(), Payload::Empty)
    }

    fn study_workbook() -> Workbook {
        let mut sheet = Sheet::new("isa_study");
        sheet.push_row(["STUDY"]);
        sheet.push_row(["Study Identifier", "s1"]);
        Workbook::with_sheet(TableKind::Study, sheet)
    }

    #[test]
    fn empty_payload_creates_exactly_one_empty_file() {
        let dir = TempDir::new().unwrap();
        let report = fulfill(dir.path(), &[create_file("readme.txt", Payload::Empty)]).unwrap();

        assert_eq!(report, FulfillReport { written: 1, skipped: 0 });
        let path = dir.path().join("readme.txt");
        assert!(path.is_file());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn plain_text_is_written_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let text = "# My ARC\n\nGenerated package.\n";
        fulfill(
            dir.path(),
            &[create_file("README.md", Payload::PlainText(text.to_string()))],
        )
        .unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("README.md")).unwrap(),
            text.as_bytes()
        );
    }

    #[test]
    fn second_run_overwrites_rather_than_appends() {
        let dir = TempDir::new().unwrap();
        fulfill(
            dir.path(),
            &[create_file("notes.txt", Payload::PlainText("old".into()))],
        )
        .unwrap();
        fulfill(
            dir.path(),
            &[create_file("notes.txt", Payload::PlainText("new".into()))],
        )
        .unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn table_payload_yields_xlsx_container() {
        let dir = TempDir::new().unwrap();
        fulfill(
            dir.path(),
            &[create_file(
                "studies/s1/isa.study.xlsx",
                Payload::Table(study_workbook()),
            )],
        )
        .unwrap();
        let bytes = std::fs::read(dir.path().join("studies/s1/isa.study.xlsx")).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn unrecognized_contract_is_skipped_without_aborting() {
        let dir = TempDir::new().unwrap();
        let contracts = vec![
            create_file("readme.txt", Payload::Empty),
            create_file(
                "notes.md",
                Payload::Unrecognized {
                    kind: "isa-datamap".into(),
                },
            ),
            create_file("workflows/main.cwl", Payload::PlainText("cwlVersion: v1.2\n".into())),
        ];
        let report = fulfill(dir.path(), &contracts).unwrap();

        assert_eq!(report, FulfillReport { written: 2, skipped: 1 });
        assert!(dir.path().join("readme.txt").is_file());
        assert!(dir.path().join("workflows/main.cwl").is_file());
        assert!(!dir.path().join("notes.md").exists());
    }

    #[test]
    fn non_create_operations_are_rejected_not_written() {
        let dir = TempDir::new().unwrap();
        let contract = WriteContract {
            path: ContractPath::file("stale.txt").unwrap(),
            operation: Operation::Delete,
            payload: Payload::Empty,
        };
        let report = fulfill(dir.path(), &[contract]).unwrap();

        assert_eq!(report, FulfillReport { written: 0, skipped: 1 });
        assert!(!dir.path().join("stale.txt").exists());
    }

    #[test]
    fn content_payload_on_directory_path_is_skipped() {
        let dir = TempDir::new().unwrap();
        let contract = WriteContract::create(
            ContractPath::directory("assays").unwrap(),
            Payload::PlainText("not a file".into()),
        );
        let report = fulfill(dir.path(), &[contract]).unwrap();

        assert_eq!(report, FulfillReport { written: 0, skipped: 1 });
        assert!(!dir.path().join("assays").exists());
    }

    #[test]
    fn later_contract_reuses_directory_from_earlier_one() {
        let dir = TempDir::new().unwrap();
        let contracts = vec![
            create_file("foo/bar.txt", Payload::Empty),
            create_file("foo/baz.txt", Payload::PlainText("z".into())),
        ];
        let report = fulfill(dir.path(), &contracts).unwrap();

        assert_eq!(report.written, 2);
        assert!(dir.path().join("foo/bar.txt").is_file());
        assert!(dir.path().join("foo/baz.txt").is_file());
    }

    #[test]
    fn double_fulfillment_leaves_the_same_tree() {
        let dir = TempDir::new().unwrap();
        let contracts = vec![
            create_dir("runs"),
            create_file(".arc/.gitkeep", Payload::Empty),
            create_file("isa.investigation.xlsx", Payload::Table(study_workbook())),
        ];
        let first = fulfill(dir.path(), &contracts).unwrap();
        let second = fulfill(dir.path(), &contracts).unwrap();

        assert_eq!(first, second);
        assert!(dir.path().join("runs").is_dir());
        assert!(dir.path().join(".arc/.gitkeep").is_file());
        assert!(dir.path().join("isa.investigation.xlsx").is_file());
    }

    #[test]
    fn end_to_end_mixed_contract_list() {
        let dir = TempDir::new().unwrap();
        let contracts = vec![
            create_file("readme.txt", Payload::Empty),
            create_file("studies/s1.xlsx", Payload::Table(study_workbook())),
            create_file(
                "notes.md",
                Payload::Unrecognized {
                    kind: "unknown".into(),
                },
            ),
        ];
        let report = fulfill(dir.path(), &contracts).unwrap();

        assert_eq!(report, FulfillReport { written: 2, skipped: 1 });
        assert_eq!(std::fs::metadata(dir.path().join("readme.txt")).unwrap().len(), 0);
        assert!(std::fs::read(dir.path().join("studies/s1.xlsx"))
            .unwrap()
            .starts_with(b"PK\x03\x04"));
        assert!(!dir.path().join("notes.md").exists());
    }
}
