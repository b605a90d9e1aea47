pub mod bloom;
pub mod blur;
pub mod displacement;
pub mod dot_screen;
pub mod fxaa;
pub mod gamma;
pub mod glitch;
pub mod normal_displacement;
pub mod params;
pub mod pass;
pub mod rgb_shift;
pub mod scene_pass;
pub mod tint;
