use crate::output;
use arcpub_core::dataset::DatasetItem;
use arcpub_core::engine;
use arcpub_core::package::ArcPackage;
use std::path::Path;

pub fn run(name: &str, out: &Path, json: bool) -> anyhow::Result<()> {
    let item = DatasetItem::new(name);
    let package = ArcPackage::from_dataset_item(&item);
    let contracts = package.write_contracts()?;

    std::fs::create_dir_all(out)?;
    let report = engine::fulfill(out, &contracts)?;

    if json {
        output::print_json(&serde_json::json!({
            "identifier": package.identifier,
            "out": out,
            "written": report.written,
            "skipped": report.skipped,
        }))?;
    } else {
        println!(
            "materialized ARC '{}' into {} ({} entries, {} skipped)",
            package.identifier,
            out.display(),
            report.written,
            report.skipped
        );
    }
    Ok(())
}
