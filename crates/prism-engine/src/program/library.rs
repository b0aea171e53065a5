use std::borrow::Cow;
use std::collections::HashMap;

use super::{CompiledProgram, ProgramError, ProgramProvider, ProgramStage};

/// Names of the programs registered by [`WgslLibrary::builtin`].
pub mod names {
    pub const CUBE_VERTEX: &str = "cube_vertex";
    pub const CUBE_FRAGMENT: &str = "cube_fragment";
    pub const SPHERE_VERTEX: &str = "sphere_vertex";
    pub const SPHERE_FRAGMENT: &str = "sphere_fragment";
    pub const CIRCLE_VERTEX: &str = "circle_vertex";
    pub const CIRCLE_FRAGMENT: &str = "circle_fragment";
    pub const MULTIPLY_BY_TWO: &str = "multiply_by_two";

    pub const ALL: [&str; 7] = [
        CUBE_VERTEX,
        CUBE_FRAGMENT,
        SPHERE_VERTEX,
        SPHERE_FRAGMENT,
        CIRCLE_VERTEX,
        CIRCLE_FRAGMENT,
        MULTIPLY_BY_TWO,
    ];
}

const CUBE_WGSL: &str = include_str!("../shaders/cube.wgsl");
const SPHERE_WGSL: &str = include_str!("../shaders/sphere.wgsl");
const CIRCLE_WGSL: &str = include_str!("../shaders/circle.wgsl");
const MULTIPLY_WGSL: &str = include_str!("../shaders/multiply.wgsl");

/// WGSL source for one named program.
#[derive(Debug, Clone)]
pub struct ProgramSource {
    pub source: Cow<'static, str>,
    pub entry_point: String,
    pub stage: ProgramStage,
}

/// Name → WGSL program registry.
///
/// Several programs may share one source string (vertex and fragment entry
/// points in the same file).
#[derive(Debug, Clone, Default)]
pub struct WgslLibrary {
    programs: HashMap<String, ProgramSource>,
}

impl WgslLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with every program the stock renderers use.
    pub fn builtin() -> Self {
        use names::*;

        let mut lib = Self::new();
        lib.register_static(CUBE_VERTEX, CUBE_WGSL, ProgramStage::Vertex)
            .register_static(CUBE_FRAGMENT, CUBE_WGSL, ProgramStage::Fragment)
            .register_static(SPHERE_VERTEX, SPHERE_WGSL, ProgramStage::Vertex)
            .register_static(SPHERE_FRAGMENT, SPHERE_WGSL, ProgramStage::Fragment)
            .register_static(CIRCLE_VERTEX, CIRCLE_WGSL, ProgramStage::Vertex)
            .register_static(CIRCLE_FRAGMENT, CIRCLE_WGSL, ProgramStage::Fragment)
            .register_static(MULTIPLY_BY_TWO, MULTIPLY_WGSL, ProgramStage::Compute);
        lib
    }

    /// Registers a program whose entry point has the same name as the program.
    fn register_static(
        &mut self,
        name: &'static str,
        source: &'static str,
        stage: ProgramStage,
    ) -> &mut Self {
        self.register(
            name,
            ProgramSource {
                source: Cow::Borrowed(source),
                entry_point: name.to_string(),
                stage,
            },
        )
    }

    /// Registers (or replaces) a program.
    pub fn register(&mut self, name: impl Into<String>, source: ProgramSource) -> &mut Self {
        self.programs.insert(name.into(), source);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    /// Parses and validates a program without touching a device.
    pub fn validate(&self, name: &str) -> Result<&ProgramSource, ProgramError> {
        let program = self
            .programs
            .get(name)
            .ok_or_else(|| ProgramError::Unknown(name.to_string()))?;

        let module = naga::front::wgsl::parse_str(&program.source).map_err(|e| {
            ProgramError::Parse {
                name: name.to_string(),
                message: e.emit_to_string(&program.source),
            }
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .map_err(|e| ProgramError::Validation {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let stage = program.stage.to_naga();
        let has_entry = module
            .entry_points
            .iter()
            .any(|ep| ep.name == program.entry_point && ep.stage == stage);

        if !has_entry {
            return Err(ProgramError::MissingEntryPoint {
                name: name.to_string(),
                entry_point: program.entry_point.clone(),
                stage: program.stage,
            });
        }

        Ok(program)
    }
}

impl ProgramProvider for WgslLibrary {
    fn resolve(&self, device: &wgpu::Device, name: &str) -> Result<CompiledProgram, ProgramError> {
        let program = self.validate(name)?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(program.source.clone()),
        });

        log::debug!("resolved program `{name}` ({:?})", program.stage);

        Ok(CompiledProgram {
            name: name.to_string(),
            module,
            entry_point: program.entry_point.clone(),
            stage: program.stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(source: &'static str, entry: &str, stage: ProgramStage) -> WgslLibrary {
        let mut lib = WgslLibrary::new();
        lib.register(
            "custom",
            ProgramSource {
                source: Cow::Borrowed(source),
                entry_point: entry.to_string(),
                stage,
            },
        );
        lib
    }

    #[test]
    fn every_builtin_program_validates() {
        let lib = WgslLibrary::builtin();
        for name in names::ALL {
            if let Err(e) = lib.validate(name) {
                panic!("{e}");
            }
        }
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = WgslLibrary::builtin().validate("nope").unwrap_err();
        assert_eq!(err, ProgramError::Unknown("nope".to_string()));
    }

    #[test]
    fn parse_error_is_reported() {
        let lib = custom("fn broken( {", "broken", ProgramStage::Vertex);
        assert!(matches!(lib.validate("custom"), Err(ProgramError::Parse { .. })));
    }

    #[test]
    fn type_error_fails_validation_or_parse() {
        // Returning a float from a function declared to return a vector.
        let lib = custom(
            "@fragment fn fs() -> @location(0) vec4<f32> { return 1.0; }",
            "fs",
            ProgramStage::Fragment,
        );
        assert!(matches!(
            lib.validate("custom"),
            Err(ProgramError::Parse { .. } | ProgramError::Validation { .. })
        ));
    }

    #[test]
    fn missing_entry_point_is_reported() {
        let lib = custom(
            "@fragment fn fs() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
            "main",
            ProgramStage::Fragment,
        );
        assert!(matches!(
            lib.validate("custom"),
            Err(ProgramError::MissingEntryPoint { .. })
        ));
    }

    #[test]
    fn wrong_stage_is_a_missing_entry_point() {
        let lib = custom(
            "@fragment fn fs() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
            "fs",
            ProgramStage::Vertex,
        );
        assert!(matches!(
            lib.validate("custom"),
            Err(ProgramError::MissingEntryPoint { stage: ProgramStage::Vertex, .. })
        ));
    }

    #[test]
    fn register_replaces_existing_program() {
        let mut lib = WgslLibrary::builtin();
        lib.register(
            names::CUBE_VERTEX,
            ProgramSource {
                source: Cow::Borrowed("fn broken( {"),
                entry_point: "cube_vertex".to_string(),
                stage: ProgramStage::Vertex,
            },
        );
        assert!(lib.validate(names::CUBE_VERTEX).is_err());
    }
}
