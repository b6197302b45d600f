use crate::output;
use anyhow::Context;
use arcpub_core::config::Config;
use arcpub_core::pipeline::Pipeline;
use std::path::Path;

pub fn run(config_path: &Path, take: Option<usize>, workdir: &Path, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if take.is_some() {
        config.dataset.take = take;
    }

    let pipeline = Pipeline::new(config);
    let published = pipeline.run(workdir)?;

    if json {
        output::print_json(&published)?;
    } else {
        for arc in &published {
            println!(
                "published: {} -> {} ({} entries, {} skipped)",
                arc.name, arc.web_url, arc.report.written, arc.report.skipped
            );
        }
        println!("{} ARC(s) published", published.len());
    }
    Ok(())
}
