/// Which triangles survive the winding test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// Keep triangles whose edge functions are all positive (clockwise on screen).
    Back,
    /// Keep triangles whose edge functions are all negative.
    Front,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    ObservedArea,
    Diffuse,
    Specular,
    Combined,
}

/// What gets written to the color buffer for a visible pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visualization {
    Default,
    BoundingBoxes,
    DepthBuffer,
}

/// Snapshot of the rendering configuration, fixed for the duration of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub cull_mode: CullMode,
    pub shading_mode: ShadingMode,
    pub visualization: Visualization,
    pub use_normal_map: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        return Self {
            cull_mode: CullMode::Back,
            shading_mode: ShadingMode::Combined,
            visualization: Visualization::Default,
            use_normal_map: true,
        };
    }
}

impl CullMode {
    pub fn next(self) -> Self {
        return match self {
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
            CullMode::None => CullMode::Back,
        };
    }
}

impl ShadingMode {
    pub fn next(self) -> Self {
        return match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        };
    }
}
