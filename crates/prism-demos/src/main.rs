mod config;
mod demos;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::render::AnimationStep;
use prism_engine::window::Runtime;

use config::{clear_color, DemoConfig};
use demos::{run_compute, RenderDemo, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// Per-face colored cube tumbling about (1, 1, 0).
    Cube,
    /// Lit, alpha-blended UV sphere.
    Sphere,
    /// Anti-aliased disc blended over a transparent clear.
    Circle,
    /// Headless compute pass that doubles a buffer and reads it back.
    Compute,
}

#[derive(Parser, Debug)]
#[command(name = "prism-demos", about = "Immediate-mode wgpu mesh rendering demos")]
struct Cli {
    /// Which demo to run.
    #[arg(value_enum)]
    demo: Demo,

    /// TOML file overriding demo defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter in `env_logger` syntax (e.g. "debug", "prism_engine=trace").
    #[arg(long)]
    log: Option<String>,

    /// Exit after rendering N frames.
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    init_logging(LoggingConfig {
        env_filter: cli.log.clone().or_else(|| config.logging.filter.clone()),
        ..LoggingConfig::default()
    });

    let gpu_init = config.gpu.gpu_init(cli.demo == Demo::Circle);

    let demo = match cli.demo {
        Demo::Compute => {
            run_compute(&gpu_init, &config.compute.values)?;
            return Ok(());
        }
        Demo::Cube => RenderDemo::new(
            Scene::Cube,
            config.animation.cube(),
            clear_color(config.cube.clear),
        )?,
        Demo::Sphere => RenderDemo::new(
            Scene::Sphere(config.sphere.params()),
            config.animation.sphere(),
            clear_color(config.sphere.clear),
        )?,
        Demo::Circle => RenderDemo::new(
            Scene::Circle(config.circle.params()),
            AnimationStep::PerFrame(0.0),
            clear_color(config.circle.clear),
        )?,
    };

    let runtime_config = config.window.runtime_config(demo_name(cli.demo));
    Runtime::run(runtime_config, gpu_init, demo.with_max_frames(cli.max_frames))
}

fn demo_name(demo: Demo) -> &'static str {
    match demo {
        Demo::Cube => "cube",
        Demo::Sphere => "sphere",
        Demo::Circle => "circle",
        Demo::Compute => "compute",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_demo_and_flags() {
        let cli = Cli::try_parse_from([
            "prism-demos",
            "sphere",
            "--config",
            "demo.toml",
            "--log",
            "debug",
            "--max-frames",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.demo, Demo::Sphere);
        assert_eq!(cli.config, Some(PathBuf::from("demo.toml")));
        assert_eq!(cli.log.as_deref(), Some("debug"));
        assert_eq!(cli.max_frames, Some(10));
    }

    #[test]
    fn cli_rejects_unknown_demo() {
        assert!(Cli::try_parse_from(["prism-demos", "teapot"]).is_err());
    }

    #[test]
    fn cli_requires_a_demo() {
        assert!(Cli::try_parse_from(["prism-demos"]).is_err());
    }
}
