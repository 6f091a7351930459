//! linkviz-render - render both linked views of a dataset to PNG and SVG.
//!
//! Usage: `linkviz-render <data.csv> [--out-dir DIR] [--config linkviz.yaml]`

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkviz::config::Config;
use linkviz::coordinator::LinkedViews;
use linkviz::loader;
use linkviz::output::PngEncoder;

/// Render the scatterplot and heatmap of a bike-rental CSV.
#[derive(Parser, Debug)]
#[command(name = "linkviz-render")]
#[command(version)]
#[command(about = "Render linked scatterplot and heatmap views to PNG and SVG")]
#[command(long_about = None)]
struct Args {
    /// CSV dataset
    data: PathBuf,

    /// Directory the images are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = args.config
        .as_deref()
        .map_or_else(Config::default, Config::load_or_default);

    let mut views = LinkedViews::new(config);
    views.load(loader::load_csv(&args.data)?);

    let out_dir = &args.out_dir;
    std::fs::create_dir_all(out_dir)?;
    PngEncoder::write_to_file(
        &views.scatter().to_framebuffer()?,
        out_dir.join("scatterplot.png"),
    )?;
    PngEncoder::write_to_file(
        &views.heatmap().to_framebuffer()?,
        out_dir.join("heatmap.png"),
    )?;
    views
        .scatter()
        .to_svg()
        .write_to_file(out_dir.join("scatterplot.svg"))?;
    views
        .heatmap()
        .to_svg()
        .write_to_file(out_dir.join("heatmap.svg"))?;

    info!(
        records = views.snapshot().records().len(),
        out_dir = %out_dir.display(),
        "views rendered"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["linkviz-render", "bikes.csv"]).unwrap();
        assert_eq!(args.data, PathBuf::from("bikes.csv"));
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_out_dir_and_config() {
        let args = Args::try_parse_from([
            "linkviz-render",
            "bikes.csv",
            "-o",
            "out",
            "--config",
            "linkviz.yaml",
        ])
        .unwrap();
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.config, Some(PathBuf::from("linkviz.yaml")));
    }

    #[test]
    fn test_args_require_data() {
        assert!(Args::try_parse_from(["linkviz-render"]).is_err());
    }
}
