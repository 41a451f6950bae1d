use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hemalyze::evaluation::{CurveFormat, Measurement};
use hemalyze::pipeline::{FitReport, PipelineConfig, fit_pipeline};
use hemalyze::predictor::DiseasePredictor;
use hemalyze::ui::cli::drivers::InquireDriver;
use hemalyze::ui::cli::form::run_prediction_form;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hemalyze")]
#[command(about = "Blood-panel disease classifier", long_about = None)]
struct Cli {
    /// JSON configuration file; missing fields take their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the training and test CSV files
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a model and print its evaluation report
    Train {
        /// Write the learning curve to this file
        #[arg(long, value_name = "FILE")]
        curve_out: Option<PathBuf>,

        /// Learning curve format: csv, tsv or json
        #[arg(long, default_value = "csv")]
        curve_format: CurveFormat,
    },
    /// Predict the disease of one blood panel
    Predict {
        /// JSON object of feature values, or a JSON array in schema order
        payload: Option<String>,

        /// Fill the panel in an interactive form
        #[arg(short, long, conflicts_with = "payload")]
        interactive: bool,
    },
    /// Fit (or fall back) and print the model statistics as JSON
    Stats,
    /// Print the JSON schema of the configuration file
    ConfigSchema,
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    config.validate()?;
    Ok(config)
}

fn measurement(ms: &[Measurement], name: &str) -> f64 {
    Measurement::find(ms, name).unwrap_or(f64::NAN)
}

fn print_report(report: &FitReport) {
    println!("\nLearning curve:");
    for snapshot in report.curve.entries() {
        println!("  {snapshot}");
    }
    if let Some(stage) = report.stopped_at_stage {
        println!("  stopped early at stage {stage}");
    }
    println!(
        "\nRows: {} train{}, {} validation, {} test",
        report.train_rows,
        if report.oversampled { " (oversampled)" } else { "" },
        report.validation_rows,
        report.test_rows
    );
    println!("Test accuracy: {:.4}", report.test_accuracy);

    let ms = &report.test_measurements;
    if !ms.is_empty() {
        println!("\n{:>12} {:>10} {:>10} {:>10} {:>8}", "", "precision", "recall", "f1", "support");
        for (c, label) in report.bundle.vocabulary.values().iter().enumerate() {
            println!(
                "{label:>12} {:>10.2} {:>10.2} {:>10.2} {:>8.0}",
                measurement(ms, &format!("precision_class_{c}")),
                measurement(ms, &format!("recall_class_{c}")),
                measurement(ms, &format!("f1_class_{c}")),
                measurement(ms, &format!("support_class_{c}")),
            );
        }
        println!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2}",
            "macro avg",
            measurement(ms, "precision"),
            measurement(ms, "recall"),
            measurement(ms, "f1"),
        );
    }

    if !report.test_samples.is_empty() {
        println!("\nSample predictions:");
        for s in &report.test_samples {
            println!("  actual {:<12} predicted {}", s.actual, s.predicted);
        }
    }

    println!("\nTop features:");
    for (name, importance) in report.top_features(10) {
        println!("  {name:<45} {importance:.4}");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::ConfigSchema => {
            println!("{}", serde_json::to_string_pretty(&PipelineConfig::schema())?);
        }
        Commands::Train {
            curve_out,
            curve_format,
        } => {
            let config = load_config(&cli)?;
            let report = fit_pipeline(&config).into_result()?;
            print_report(&report);
            if let Some(path) = curve_out {
                report
                    .curve
                    .export(path, *curve_format)
                    .with_context(|| format!("writing learning curve to {}", path.display()))?;
                println!("\nLearning curve written to {}", path.display());
            }
        }
        Commands::Predict {
            payload,
            interactive,
        } => {
            let predictor = DiseasePredictor::new(load_config(&cli)?);
            if *interactive {
                run_prediction_form(&InquireDriver, &predictor)?;
            } else {
                let Some(payload) = payload else {
                    bail!("pass a JSON payload or --interactive");
                };
                println!("{}", predictor.predict_json(payload)?);
            }
        }
        Commands::Stats => {
            let predictor = DiseasePredictor::new(load_config(&cli)?);
            predictor.fit();
            println!("{}", serde_json::to_string_pretty(&predictor.stats())?);
        }
    }
    Ok(())
}
