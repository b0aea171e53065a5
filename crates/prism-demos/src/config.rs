//! Demo configuration loaded from TOML.
//!
//! Every section uses `#[serde(default)]`, so a file only needs the keys it
//! overrides.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use winit::dpi::LogicalSize;

use prism_engine::device::GpuInit;
use prism_engine::geometry::SphereParams;
use prism_engine::render::{AnimationStep, CircleParams};
use prism_engine::window::RuntimeConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub gpu: GpuConfig,
    pub cube: CubeConfig,
    pub sphere: SphereConfig,
    pub circle: CircleConfig,
    pub compute: ComputeConfig,
    pub animation: AnimationConfig,
    pub logging: LogConfig,
}

impl DemoConfig {
    /// Load a config file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Rejects values TOML accepts but the demos cannot use.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("animation.cube_step", self.animation.cube_step),
            ("animation.sphere_step", self.animation.sphere_step),
        ] {
            anyhow::ensure!(value.is_finite(), "{key} must be finite, got {value}");
        }
        Ok(())
    }
}

// ── Window / GPU ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

impl WindowConfig {
    pub fn runtime_config(&self, demo: &str) -> RuntimeConfig {
        RuntimeConfig {
            title: format!("{} · {demo}", self.title),
            initial_size: LogicalSize::new(self.width.max(1.0), self.height.max(1.0)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GpuConfig {
    /// FIFO presentation when on; immediate-ish (`AutoNoVsync`) when off.
    pub vsync: bool,
    pub prefer_srgb: bool,
    pub depth: bool,
    pub low_power: bool,
    /// Compositing mode; falls back to a supported one.
    pub alpha_mode: Option<AlphaMode>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlphaMode {
    Auto,
    Opaque,
    PreMultiplied,
    PostMultiplied,
    Inherit,
}

impl From<AlphaMode> for wgpu::CompositeAlphaMode {
    fn from(mode: AlphaMode) -> Self {
        match mode {
            AlphaMode::Auto => wgpu::CompositeAlphaMode::Auto,
            AlphaMode::Opaque => wgpu::CompositeAlphaMode::Opaque,
            AlphaMode::PreMultiplied => wgpu::CompositeAlphaMode::PreMultiplied,
            AlphaMode::PostMultiplied => wgpu::CompositeAlphaMode::PostMultiplied,
            AlphaMode::Inherit => wgpu::CompositeAlphaMode::Inherit,
        }
    }
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            prefer_srgb: true,
            depth: true,
            low_power: false,
            alpha_mode: None,
        }
    }
}

impl GpuConfig {
    /// `transparent` asks for a premultiplied surface unless `alpha_mode`
    /// is set explicitly.
    pub fn gpu_init(&self, transparent: bool) -> GpuInit {
        let alpha_mode = self
            .alpha_mode
            .or(transparent.then_some(AlphaMode::PreMultiplied));

        GpuInit {
            alpha_mode: alpha_mode.map(Into::into),
            prefer_srgb: self.prefer_srgb,
            present_mode: if self.vsync {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            depth_format: self.depth.then_some(wgpu::TextureFormat::Depth32Float),
            power_preference: if self.low_power {
                wgpu::PowerPreference::LowPower
            } else {
                wgpu::PowerPreference::HighPerformance
            },
            ..GpuInit::default()
        }
    }
}

// ── Scenes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CubeConfig {
    pub clear: [f64; 4],
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            clear: [0.1, 0.1, 0.1, 1.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub rings: u32,
    pub sectors: u32,
    pub clear: [f64; 4],
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            rings: 60,
            sectors: 60,
            clear: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl SphereConfig {
    pub fn params(&self) -> SphereParams {
        SphereParams {
            radius: self.radius,
            rings: self.rings,
            sectors: self.sectors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CircleConfig {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
    pub clear: [f64; 4],
}

impl Default for CircleConfig {
    fn default() -> Self {
        let params = CircleParams::default();
        Self {
            center: params.center,
            radius: params.radius,
            color: params.color,
            clear: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl CircleConfig {
    pub fn params(&self) -> CircleParams {
        CircleParams {
            center: self.center,
            radius: self.radius,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComputeConfig {
    pub values: Vec<f32>,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            values: vec![1.0, 2.0, 3.0, 4.0, 5.0],
        }
    }
}

// ── Animation / logging ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Steps are radians per drawn frame.
    #[default]
    PerFrame,
    /// Steps are radians per second.
    PerSecond,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub mode: StepMode,
    pub cube_step: f32,
    pub sphere_step: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            mode: StepMode::PerFrame,
            cube_step: 0.005,
            sphere_step: 0.0,
        }
    }
}

impl AnimationConfig {
    fn step(&self, value: f32) -> AnimationStep {
        match self.mode {
            StepMode::PerFrame => AnimationStep::PerFrame(value),
            StepMode::PerSecond => AnimationStep::PerSecond(value),
        }
    }

    pub fn cube(&self) -> AnimationStep {
        self.step(self.cube_step)
    }

    pub fn sphere(&self) -> AnimationStep {
        self.step(self.sphere_step)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter string; `--log` on the command line wins.
    pub filter: Option<String>,
}

pub fn clear_color([r, g, b, a]: [f64; 4]) -> wgpu::Color {
    wgpu::Color { r, g, b, a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: DemoConfig = toml::from_str("").unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: DemoConfig = toml::from_str(
            r#"
[sphere]
rings = 12

[animation]
mode = "per_second"
cube_step = 0.3
"#,
        )
        .unwrap();

        assert_eq!(config.sphere.rings, 12);
        assert_eq!(config.sphere.sectors, 60);
        assert_eq!(config.sphere.radius, 0.3);
        assert_eq!(config.animation.cube(), AnimationStep::PerSecond(0.3));
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn unknown_step_mode_is_rejected() {
        let parsed: Result<DemoConfig, _> = toml::from_str("[animation]\nmode = \"sometimes\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn default_animation_matches_demos() {
        let animation = AnimationConfig::default();
        assert_eq!(animation.cube(), AnimationStep::PerFrame(0.005));
        assert_eq!(animation.sphere(), AnimationStep::PerFrame(0.0));
    }

    #[test]
    fn gpu_section_maps_to_init() {
        let gpu = GpuConfig {
            vsync: false,
            depth: false,
            ..GpuConfig::default()
        };
        let init = gpu.gpu_init(false);
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(init.depth_format, None);

        let init = GpuConfig::default().gpu_init(false);
        assert_eq!(init.depth_format, Some(wgpu::TextureFormat::Depth32Float));
        assert_eq!(init.alpha_mode, None);
    }

    #[test]
    fn transparent_demo_prefers_premultiplied_surface() {
        let init = GpuConfig::default().gpu_init(true);
        assert_eq!(init.alpha_mode, Some(wgpu::CompositeAlphaMode::PreMultiplied));
    }

    #[test]
    fn explicit_alpha_mode_wins() {
        let config: DemoConfig = toml::from_str("[gpu]\nalpha_mode = \"opaque\"").unwrap();
        let init = config.gpu.gpu_init(true);
        assert_eq!(init.alpha_mode, Some(wgpu::CompositeAlphaMode::Opaque));
    }

    #[test]
    fn non_finite_animation_steps_are_rejected() {
        for text in ["[animation]\ncube_step = nan", "[animation]\nsphere_step = -inf"] {
            let config: DemoConfig = toml::from_str(text).unwrap();
            assert!(config.validate().is_err(), "{text}");
        }
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn sphere_section_maps_to_params() {
        let params = SphereConfig::default().params();
        assert_eq!((params.rings, params.sectors), (60, 60));
    }

    #[test]
    fn logging_filter_is_optional() {
        let config: DemoConfig = toml::from_str("[logging]\nfilter = \"debug\"").unwrap();
        assert_eq!(config.logging.filter.as_deref(), Some("debug"));
    }
}
