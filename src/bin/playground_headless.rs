use std::path::PathBuf;
use std::sync::Arc;

use chart_playground::api::{IntentOutcome, PlaygroundConfig, WorkflowController, WorkflowOptions};
use chart_playground::core::{ConfigField, SelectedFile};
use chart_playground::export::DirectoryExporter;

const USAGE: &str = "usage: playground_headless --file <csv> [--x <column>] [--y <column>] \
[--type <bar|line|scatter|pie|histogram|heatmap>] [--title <text>] [--color <scheme>] \
[--width <px>] [--height <px>] [--out <dir>] [--api <base-url>]";

#[derive(Debug)]
struct CliArgs {
    file: PathBuf,
    out_dir: PathBuf,
    api_base_url: Option<String>,
    // Applied in command-line order after the upload resets the columns.
    edits: Vec<(ConfigField, String)>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = chart_playground::telemetry::init_default_tracing();

    let mut config = PlaygroundConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(url) = args.api_base_url {
        config = config.with_api_base_url(url);
    }
    let exporter = Arc::new(DirectoryExporter::new(&args.out_dir));
    let controller = WorkflowController::from_config(&config, exporter, WorkflowOptions::default())
        .map_err(|err| err.to_string())?;
    let file = SelectedFile::from_path(&args.file).map_err(|err| err.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("failed to start runtime: {err}"))?;

    runtime.block_on(async {
        expect_completed("upload", controller.on_file_selected(Some(file)).await)?;
        for (field, value) in &args.edits {
            expect_completed(field.as_str(), controller.on_config_field_changed(*field, value))?;
        }
        expect_completed("generate", controller.generate().await)
    })?;
    expect_completed("export", controller.export_chart())?;

    let snapshot = controller
        .snapshot_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;
    println!("{snapshot}");
    eprintln!("chart written under `{}`", args.out_dir.display());
    Ok(())
}

fn expect_completed(step: &str, outcome: IntentOutcome) -> Result<(), String> {
    match outcome {
        IntentOutcome::Completed => Ok(()),
        IntentOutcome::Skipped => Err(format!("{step}: nothing to do")),
        IntentOutcome::Failed(err) | IntentOutcome::Rejected(err) => {
            Err(format!("{step}: {err}"))
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut file = None::<PathBuf>;
    let mut out_dir = PathBuf::from(".");
    let mut api_base_url = None::<String>;
    let mut edits = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let field = match flag.as_str() {
            "--x" => Some(ConfigField::XColumn),
            "--y" => Some(ConfigField::YColumn),
            "--type" => Some(ConfigField::ChartType),
            "--title" => Some(ConfigField::Title),
            "--color" => Some(ConfigField::ColorScheme),
            "--width" => Some(ConfigField::Width),
            "--height" => Some(ConfigField::Height),
            "--file" | "--out" | "--api" => None,
            "-h" | "--help" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        };
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;

        match (field, flag.as_str()) {
            (Some(field), _) => edits.push((field, value)),
            (None, "--file") => file = Some(PathBuf::from(value)),
            (None, "--out") => out_dir = PathBuf::from(value),
            (None, _) => api_base_url = Some(value),
        }
    }

    let file = file.ok_or_else(|| format!("missing required --file\n{USAGE}"))?;
    Ok(CliArgs {
        file,
        out_dir,
        api_base_url,
        edits,
    })
}
