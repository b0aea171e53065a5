use super::ProgramError;

/// Pipeline stage a program runs in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ProgramStage {
    Vertex,
    Fragment,
    Compute,
}

impl ProgramStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ProgramStage::Vertex => naga::ShaderStage::Vertex,
            ProgramStage::Fragment => naga::ShaderStage::Fragment,
            ProgramStage::Compute => naga::ShaderStage::Compute,
        }
    }
}

/// A compiled shader module and the entry point to invoke in it.
#[derive(Debug)]
pub struct CompiledProgram {
    pub name: String,
    pub module: wgpu::ShaderModule,
    pub entry_point: String,
    pub stage: ProgramStage,
}

impl CompiledProgram {
    #[inline]
    pub fn entry_point(&self) -> Option<&str> {
        Some(&self.entry_point)
    }
}

/// Resolves program names to compiled programs.
///
/// Implementations decide where source comes from and which shading language
/// it is in; callers only know names.
pub trait ProgramProvider {
    fn resolve(&self, device: &wgpu::Device, name: &str) -> Result<CompiledProgram, ProgramError>;
}
