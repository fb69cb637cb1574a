use std::{fmt::Write as _, fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_backend_url},
    BackendApi, BackendStatus, TryOnClient,
};
use shared::{domain::MeasurementSummary, protocol::ProcessImagesResponse, upload::SelectedImage};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tryon", about = "Headless client for the virtual try-on backend")]
struct Args {
    /// Backend base URL; overrides tryon.toml and the environment.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe the backend once and print its status.
    Health,
    /// Submit a photo and a clothing image, then print the size report.
    Process {
        #[arg(long)]
        user: PathBuf,
        #[arg(long)]
        clothing: PathBuf,
        /// Where to save the composite result image.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(backend_url) = args.backend_url.as_deref() {
        settings.backend_url = normalize_backend_url(backend_url)?;
    }
    let client = TryOnClient::from_settings(&settings).context("failed to build backend client")?;

    match args.command {
        Command::Health => health(&client).await,
        Command::Process {
            user,
            clothing,
            output,
        } => process(&client, user, clothing, output).await,
    }
}

async fn health(client: &TryOnClient) -> Result<()> {
    match client.health().await {
        Ok(body) => {
            println!("Backend Status: {}", BackendStatus::Connected.label());
            println!("  url: {}", client.base_url());
            if let Some(service) = body.service.as_deref() {
                println!("  service: {service} {}", body.version.as_deref().unwrap_or(""));
            }
            Ok(())
        }
        Err(err) => {
            println!("Backend Status: {}", BackendStatus::Offline.label());
            println!("  url: {}", client.base_url());
            bail!(err.user_message())
        }
    }
}

async fn process(
    client: &TryOnClient,
    user: PathBuf,
    clothing: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    let user_image = SelectedImage::from_path(&user)?;
    let clothing_image = SelectedImage::from_path(&clothing)?;
    tracing::info!(
        user_image = %user_image.file_name,
        clothing_image = %clothing_image.file_name,
        "submitting images"
    );

    let response = match client.process_images(&user_image, &clothing_image).await {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!("process_images failed: {err}");
            bail!(err.user_message())
        }
    };
    print!("{}", render_report(&response));

    if let Some(output) = output {
        let bytes = client
            .fetch_result_image(&response.result_url)
            .await
            .map_err(|err| anyhow::anyhow!(err.user_message()))
            .context("failed to download result image")?;
        fs::write(&output, bytes)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Saved result image to {}", output.display());
    } else {
        println!("Result image: {}", client.resolve(&response.result_url)?);
    }
    Ok(())
}

fn render_report(response: &ProcessImagesResponse) -> String {
    let summary = match MeasurementSummary::from_measurements(response.measurements) {
        Ok(summary) => summary,
        Err(err) => return format!("{err}\n"),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Recommended Size: {}", summary.size);
    let _ = writeln!(out, "Body Type: {}", summary.body_type);
    let _ = writeln!(out, "\nDetailed Measurements");
    for (label, value) in summary.detail_rows() {
        let _ = writeln!(out, "  {label:<22}{value}");
    }
    let _ = writeln!(out, "\nFit Tips");
    for tip in summary.fit_tips() {
        let _ = writeln!(out, "  - {tip}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::protocol::Measurements;

    fn response(measurements: Measurements) -> ProcessImagesResponse {
        ProcessImagesResponse {
            status: "success".to_string(),
            measurements,
            result_url: "/static/result.jpg".to_string(),
        }
    }

    #[test]
    fn report_lists_labels_rows_and_tips() {
        let report = render_report(&response(Measurements {
            shoulder_width: Some(405.0),
            torso_height: Some(430.0),
            chest_width: Some(360.0),
            shoulder_to_chest_ratio: Some(1.1),
            torso_aspect_ratio: Some(1.0),
        }));

        assert!(report.starts_with("Recommended Size: M\nBody Type: Athletic\n"));
        assert!(report.contains("  Shoulder Width        405.0 px\n"));
        assert!(report.contains("  Shoulder/Chest Ratio  1.10\n"));
        assert!(report.contains("Look for styles with room in shoulders"));
        assert!(report.contains("Consider regular fit length"));
    }

    #[test]
    fn report_flags_invalid_measurements() {
        let report = render_report(&response(Measurements {
            shoulder_width: Some(f64::NAN),
            torso_height: Some(430.0),
            chest_width: Some(360.0),
            shoulder_to_chest_ratio: Some(1.0),
            torso_aspect_ratio: Some(1.0),
        }));
        assert_eq!(report, "Error: Invalid measurement data\n");

        let report = render_report(&response(Measurements::default()));
        assert_eq!(report, "Error: Invalid measurement data\n");
    }

    #[test]
    fn cli_parses_process_flags() {
        let args = Args::try_parse_from([
            "tryon",
            "--backend-url",
            "http://gpu-box:8000",
            "process",
            "--user",
            "me.jpg",
            "--clothing",
            "shirt.png",
        ])
        .expect("valid args");
        assert_eq!(args.backend_url.as_deref(), Some("http://gpu-box:8000"));
        match args.command {
            Command::Process { user, clothing, output } => {
                assert_eq!(user, PathBuf::from("me.jpg"));
                assert_eq!(clothing, PathBuf::from("shirt.png"));
                assert!(output.is_none());
            }
            Command::Health => panic!("expected process"),
        }
    }
}
