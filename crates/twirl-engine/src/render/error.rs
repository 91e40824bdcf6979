use std::fmt;

/// Shader module rejected by the compiler.
///
/// Carries the full compiler log so setup can fail with it attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderCompileError {
    pub label: String,
    /// One entry per compiler message, prefixed with `line:col` when known.
    pub log: Vec<String>,
}

impl ShaderCompileError {
    pub(crate) fn from_info(label: &str, info: &wgpu::CompilationInfo) -> Option<Self> {
        let has_error = info
            .messages
            .iter()
            .any(|m| m.message_type == wgpu::CompilationMessageType::Error);
        if !has_error {
            return None;
        }

        let log = info
            .messages
            .iter()
            .map(|m| match &m.location {
                Some(loc) => format!(
                    "{:?} {}:{}: {}",
                    m.message_type, loc.line_number, loc.line_position, m.message
                ),
                None => format!("{:?}: {}", m.message_type, m.message),
            })
            .collect();

        Some(Self {
            label: label.to_string(),
            log,
        })
    }
}

impl fmt::Display for ShaderCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader `{}` failed to compile", self.label)?;
        for line in &self.log {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ShaderCompileError {}
