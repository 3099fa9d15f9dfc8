use anyhow::{anyhow, Result};
use renderer::{
    Renderer, RendererConfig, ShaderSource, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};
use tracing_subscriber::EnvFilter;

use crate::cli::{parse_window_size, Cli};

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let window_size = cli
        .size
        .as_deref()
        .map(|value| {
            parse_window_size(value).map_err(|err| anyhow!("invalid --size '{value}': {err}"))
        })
        .transpose()?
        .unwrap_or((DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));

    let config = RendererConfig {
        window_size,
        window_title: cli.title.clone(),
        shader: ShaderSource::File(cli.shader.clone()),
        vsync: !cli.no_vsync,
    };

    tracing::debug!(
        shader = %cli.shader.display(),
        width = window_size.0,
        height = window_size.1,
        vsync = !cli.no_vsync,
        "starting greeting renderer"
    );

    print_key_help(&cli.title);

    let mut renderer = Renderer::new(config);
    renderer.run()
}

/// Prints the keyboard controls to stdout before the window opens.
fn print_key_help(title: &str) {
    println!();
    println!("{title}");
    println!("---------------------------------------");
    println!("Press: ( Q )     to quit");
    println!("       ( Space ) to replay the animation");
    println!("       ( F )     to toggle full window size");
    println!("       ( S )     to show/hide frames per second");
    println!("       ( V )     to toggle vsync on/off");
    println!("       ( R )     to reset everything back to default settings");
}
