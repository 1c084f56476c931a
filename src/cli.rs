use std::path::PathBuf;

use clap::Parser;

use lumen_core::Adjustment;
use lumen_core::mapper::{CONTROL_MAX, CONTROL_MIN};

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(version, about = "Apply photo adjustments and report the tone histogram")]
#[command(long_about = "
Applies the fourteen adjustment controls to an image and writes the result.
Controls take slider positions from 0 to 100; 50 is neutral for tonal and
color controls, 0 for grain, vignette and sharpness.

Examples:
  lumen in.jpg -o out.png --set exposure=65 --set saturation=40
  lumen in.png -o out.png --params look.json --histogram
")]
pub struct Cli {
    /// Image to adjust (JPEG, PNG or TIFF)
    pub input: PathBuf,

    /// Where to write the result; format follows the extension
    #[arg(short, long)]
    pub output: PathBuf,

    /// Control position, e.g. `contrast=70`. Repeatable; later wins.
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE", value_parser = parse_control)]
    pub controls: Vec<(Adjustment, i32)>,

    /// JSON file with adjustment parameters, applied before any --set
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// JSON session config (quiescence_ms, trigger_policy, grain_seed)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the histogram of the result as JSON
    #[arg(long)]
    pub histogram: bool,

    /// Print run statistics as JSON
    #[arg(long)]
    pub stats: bool,
}

fn parse_control(s: &str) -> Result<(Adjustment, i32), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let adjustment: Adjustment = name.parse().map_err(|e| format!("{e}"))?;
    let value: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a whole number"))?;
    if !(CONTROL_MIN..=CONTROL_MAX).contains(&value) {
        return Err(format!(
            "{adjustment} must be between {CONTROL_MIN} and {CONTROL_MAX}, got {value}"
        ));
    }
    Ok((adjustment, value))
}
