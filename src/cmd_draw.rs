//! `draw` subcommand handler.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use autolabel_config::{Config, ConfigValidator};
use autolabel_core::{DrawReport, LabelSource, Labeler};
use autolabel_dom::{MemoryDocument, PageSnapshot};

use crate::cli::OutputFormat;

/// Label a snapshot and print the outcome.
pub(crate) fn handle_draw(
    config: &Config,
    snapshot: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    remove: bool,
) -> anyhow::Result<()> {
    for warning in ConfigValidator::validate(config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    let page = PageSnapshot::load(snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;
    let mut doc = MemoryDocument::from_snapshot(&page)?;

    let mut labeler = Labeler::new(config)?;
    let report = labeler.draw_labels(&mut doc)?;
    if remove {
        labeler.remove_labels(&mut doc)?;
    }

    println!("{}", render_report(&report, format)?);

    if let Some(path) = output {
        doc.to_snapshot()
            .save(path)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        info!("Wrote annotated snapshot to {}", path.display());
    }

    Ok(())
}

fn render_report(report: &DrawReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str(&format!(
                "{:<6} {:<8} {:<32} {:<13} {}\n",
                "INDEX", "NODE", "LABEL", "SOURCE", "MARKER"
            ));
            out.push_str(&"-".repeat(70));
            out.push('\n');
            for element in &report.labeled {
                out.push_str(&format!(
                    "{:<6} {:<8} {:<32} {:<13} {}\n",
                    element.index,
                    element.node.to_string(),
                    element.label,
                    source_name(element.source),
                    if element.overlay { "yes" } else { "no" }
                ));
            }
            out.push_str(&format!(
                "\n{} candidates, {} labeled, {} skipped",
                report.candidates,
                report.labeled.len(),
                report.skipped.len()
            ));
            Ok(out)
        }
    }
}

fn source_name(source: LabelSource) -> &'static str {
    match source {
        LabelSource::Value => "value",
        LabelSource::Placeholder => "placeholder",
        LabelSource::VisibleText => "visible-text",
        LabelSource::AriaLabel => "aria-label",
        LabelSource::Fallback => "fallback",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autolabel_protocols::Document;

    const PAGE: &str = r#"{
        "root": {
            "tag": "html",
            "children": [
                { "tag": "head", "style": { "display": "none" } },
                {
                    "tag": "body",
                    "rect": { "x": 0, "y": 0, "width": 1280, "height": 720 },
                    "children": [
                        {
                            "tag": "button",
                            "attributes": { "id": "save" },
                            "rect": { "x": 10, "y": 10, "width": 80, "height": 24 },
                            "children": [ { "text": "Save" } ]
                        },
                        {
                            "tag": "input",
                            "attributes": { "placeholder": "Name" },
                            "rect": { "x": 10, "y": 50, "width": 200, "height": 24 }
                        }
                    ]
                }
            ]
        }
    }"#;

    fn draw(remove: bool) -> MemoryDocument {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.json");
        let output = dir.path().join("labeled.json");
        std::fs::write(&input, PAGE).unwrap();

        handle_draw(&Config::default(), &input, OutputFormat::Table, Some(&output), remove).unwrap();

        let saved = PageSnapshot::load(&output).unwrap();
        MemoryDocument::from_snapshot(&saved).unwrap()
    }

    #[test]
    fn test_draw_writes_labels_and_overlay() {
        let doc = draw(false);
        let save = doc.element_by_id("save").unwrap();
        assert_eq!(doc.attribute(save, "data-autolabel"), Some("Save"));
        assert_eq!(doc.attribute(save, "data-autolabel-text"), Some("Save"));

        let body = doc.body().unwrap();
        let wrapper = *doc.children(body).last().unwrap();
        assert_eq!(doc.attribute(wrapper, "class"), Some("autolabel-overlay"));
        assert_eq!(doc.children(wrapper).len(), 1);
    }

    #[test]
    fn test_draw_with_remove_drops_overlay() {
        let doc = draw(true);
        let body = doc.body().unwrap();
        assert_eq!(doc.children(body).len(), 2);
        let save = doc.element_by_id("save").unwrap();
        assert_eq!(doc.attribute(save, "data-autolabel"), Some("Save"));
    }

    #[test]
    fn test_missing_snapshot() {
        let err = handle_draw(
            &Config::default(),
            Path::new("/nonexistent/page.json"),
            OutputFormat::Json,
            None,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to load snapshot"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.visibility.min_opacity = 2.0;
        let err = handle_draw(&config, Path::new("unused.json"), OutputFormat::Json, None, false).unwrap_err();
        assert!(err.to_string().contains("min_opacity"));
    }

    #[test]
    fn test_table_report() {
        let page = PageSnapshot::from_json(PAGE).unwrap();
        let mut doc = MemoryDocument::from_snapshot(&page).unwrap();
        let report = Labeler::new(&Config::default())
            .unwrap()
            .draw_labels(&mut doc)
            .unwrap();

        let table = render_report(&report, OutputFormat::Table).unwrap();
        assert!(table.starts_with("INDEX"));
        assert!(table.contains("visible-text"));
        assert!(table.contains("placeholder"));
        assert!(table.ends_with("2 candidates, 2 labeled, 0 skipped"));
    }

    #[test]
    fn test_json_report() {
        let page = PageSnapshot::from_json(PAGE).unwrap();
        let mut doc = MemoryDocument::from_snapshot(&page).unwrap();
        let report = Labeler::new(&Config::default())
            .unwrap()
            .draw_labels(&mut doc)
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&render_report(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["labeled"][0]["label"], "Save");
        assert_eq!(json["labeled"][1]["source"], "placeholder");
    }
}
