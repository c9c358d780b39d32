use log::info;
use nalgebra::Vector3;

use crate::scene::config::{CullMode, RenderConfig, ShadingMode, Visualization};

/// Background of the software renderer.
pub const SOFTWARE_CLEAR_COLOR: f32 = 0.39;
/// Background used while the uniform clear color is enabled.
pub const UNIFORM_CLEAR_COLOR: f32 = 0.1;

fn on_off(value: bool) -> &'static str {
    return match value {
        true => "ON",
        false => "OFF",
    };
}

/// Toggles flipped by the viewer between frames. Every change is logged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub cull_mode: CullMode,
    pub shading_mode: ShadingMode,
    pub use_normal_map: bool,
    pub visualize_depth: bool,
    pub visualize_bounding_boxes: bool,
    pub rotate: bool,
    pub uniform_clear_color: bool,
    pub print_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        return Self {
            cull_mode: CullMode::Back,
            shading_mode: ShadingMode::Combined,
            use_normal_map: true,
            visualize_depth: false,
            visualize_bounding_boxes: false,
            rotate: true,
            uniform_clear_color: false,
            print_fps: true,
        };
    }
}

impl Settings {
    pub fn toggle_rotation(&mut self) {
        self.rotate = !self.rotate;
        info!("Vehicle rotation = {}", on_off(self.rotate));
    }

    pub fn cycle_shading_mode(&mut self) {
        self.shading_mode = self.shading_mode.next();
        info!("Shading mode = {:?}", self.shading_mode);
    }

    pub fn toggle_normal_map(&mut self) {
        self.use_normal_map = !self.use_normal_map;
        info!("Normal map = {}", on_off(self.use_normal_map));
    }

    /// Depth and bounding box visualizations exclude each other.
    pub fn toggle_depth_visualization(&mut self) {
        self.visualize_depth = !self.visualize_depth;
        if self.visualize_depth {
            self.visualize_bounding_boxes = false;
        }
        info!("Depth buffer visualization = {}", on_off(self.visualize_depth));
    }

    pub fn toggle_bounding_box_visualization(&mut self) {
        self.visualize_bounding_boxes = !self.visualize_bounding_boxes;
        if self.visualize_bounding_boxes {
            self.visualize_depth = false;
        }
        info!("Bounding box visualization = {}", on_off(self.visualize_bounding_boxes));
    }

    pub fn cycle_cull_mode(&mut self) {
        self.cull_mode = self.cull_mode.next();
        info!("Cull mode = {:?}", self.cull_mode);
    }

    pub fn toggle_uniform_clear_color(&mut self) {
        self.uniform_clear_color = !self.uniform_clear_color;
        info!("Uniform clear color = {}", on_off(self.uniform_clear_color));
    }

    pub fn toggle_print_fps(&mut self) {
        self.print_fps = !self.print_fps;
        info!("Print FPS = {}", on_off(self.print_fps));
    }

    pub fn visualization(&self) -> Visualization {
        if self.visualize_bounding_boxes {
            return Visualization::BoundingBoxes;
        }
        if self.visualize_depth {
            return Visualization::DepthBuffer;
        }
        return Visualization::Default;
    }

    /// Snapshot handed to one frame.
    pub fn render_config(&self) -> RenderConfig {
        return RenderConfig {
            cull_mode: self.cull_mode,
            shading_mode: self.shading_mode,
            visualization: self.visualization(),
            use_normal_map: self.use_normal_map,
        };
    }

    pub fn clear_color(&self) -> Vector3<f32> {
        return match self.uniform_clear_color {
            true => Vector3::repeat(UNIFORM_CLEAR_COLOR),
            false => Vector3::repeat(SOFTWARE_CLEAR_COLOR),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_render_config_defaults() {
        assert_eq!(Settings::default().render_config(), RenderConfig::default());
    }

    #[test]
    fn visualizations_exclude_each_other() {
        let mut settings = Settings::default();
        settings.toggle_depth_visualization();
        assert_eq!(settings.visualization(), Visualization::DepthBuffer);
        settings.toggle_bounding_box_visualization();
        assert_eq!(settings.visualization(), Visualization::BoundingBoxes);
        assert!(!settings.visualize_depth);
        settings.toggle_bounding_box_visualization();
        assert_eq!(settings.visualization(), Visualization::Default);
    }

    #[test]
    fn cycles_wrap_around() {
        let mut settings = Settings::default();
        for _ in 0..3 {
            settings.cycle_cull_mode();
        }
        assert_eq!(settings.cull_mode, CullMode::Back);
        settings.cycle_shading_mode();
        assert_eq!(settings.shading_mode, ShadingMode::ObservedArea);
    }

    #[test]
    fn clear_color_follows_toggle() {
        let mut settings = Settings::default();
        assert_eq!(settings.clear_color(), Vector3::repeat(SOFTWARE_CLEAR_COLOR));
        settings.toggle_uniform_clear_color();
        assert_eq!(settings.clear_color(), Vector3::repeat(UNIFORM_CLEAR_COLOR));
    }
}
