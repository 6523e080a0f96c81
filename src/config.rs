use winit::dpi::PhysicalSize;

/// Context profile requested when the device is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContextProfile {
    /// Modern core-profile limits.
    Core,
    /// Downlevel limits, for the fixed-function era programs.
    Legacy,
}

impl ContextProfile {
    pub fn limits(self) -> wgpu::Limits {
        match self {
            ContextProfile::Core => wgpu::Limits::default(),
            ContextProfile::Legacy => wgpu::Limits::downlevel_webgl2_defaults(),
        }
    }
}

/// Window parameters. Every program fixes these at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub profile: ContextProfile,
}

impl WindowConfig {
    pub const fn new(title: &'static str, profile: ContextProfile) -> Self {
        Self {
            title,
            width: 800,
            height: 600,
            profile,
        }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }
}
