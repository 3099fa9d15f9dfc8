use std::path::PathBuf;

use clap::Parser;
use renderer::{DEFAULT_SHADER_FILE, DEFAULT_WINDOW_TITLE};

#[derive(Parser, Debug)]
#[command(
    name = "birthdaycard",
    author,
    version,
    about = "Renders an animated greeting shader in a desktop window"
)]
pub struct Cli {
    /// Fragment shader to render.
    #[arg(value_name = "SHADER", default_value = DEFAULT_SHADER_FILE)]
    pub shader: PathBuf,

    /// Override the window size (e.g. `800x600`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Window title.
    #[arg(long, value_name = "TITLE", default_value = DEFAULT_WINDOW_TITLE)]
    pub title: String,

    /// Start with vsync disabled.
    #[arg(long)]
    pub no_vsync: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses a `WIDTHxHEIGHT` window size.
pub fn parse_window_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width in window size".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height in window size".to_string())?;
    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_window_size_variants() {
        assert_eq!(parse_window_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_window_size("1920X1080").unwrap(), (1920, 1080));
        assert_eq!(parse_window_size(" 640 x 480 ").unwrap(), (640, 480));
        assert!(parse_window_size("800").is_err());
        assert!(parse_window_size("0x600").is_err());
        assert!(parse_window_size("wide x tall").is_err());
    }

    #[test]
    fn defaults_match_the_classic_invocation() {
        let cli = Cli::try_parse_from(["birthdaycard"]).unwrap();
        assert_eq!(cli.shader, PathBuf::from(DEFAULT_SHADER_FILE));
        assert_eq!(cli.title, DEFAULT_WINDOW_TITLE);
        assert!(cli.size.is_none());
        assert!(!cli.no_vsync);
    }

    #[test]
    fn accepts_an_explicit_shader_path() {
        let cli = Cli::try_parse_from(["birthdaycard", "demo.shader", "--no-vsync"]).unwrap();
        assert_eq!(cli.shader, PathBuf::from("demo.shader"));
        assert!(cli.no_vsync);
    }
}
