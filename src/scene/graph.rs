//! A closed scene graph. Code that adjusts nodes implements [`SceneVisitor`] and matches on
//! concrete variants rather than inspecting types at runtime.

use crate::foundation::core::Rgba;

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Group(Group),
    Mesh(Mesh),
    DirectionalLight(DirectionalLight),
    Camera(Camera),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub name: String,
    pub scale: f64,
    pub rotation_y: f64,
    pub children: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub shape: Shape,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { center: [f64; 3], radius: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Standard(StandardMaterial),
    Basic(BasicMaterial),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    pub base_color: Rgba,
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    pub needs_update: bool,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            base_color: Rgba::gray(0.8),
            roughness: 0.5,
            metalness: 0.0,
            env_map_intensity: 1.0,
            needs_update: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BasicMaterial {
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgba,
    pub intensity: f32,
    pub position: [f64; 3],
    pub cast_shadow: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub fov_deg: f64,
    pub position: [f64; 3],
    pub near: f64,
    pub far: f64,
}

pub trait SceneVisitor {
    fn visit_group(&mut self, _group: &mut Group) {}
    fn visit_mesh(&mut self, _mesh: &mut Mesh) {}
    fn visit_light(&mut self, _light: &mut DirectionalLight) {}
    fn visit_camera(&mut self, _camera: &mut Camera) {}
}

impl SceneNode {
    /// Pre-order traversal: a group is visited before its children.
    pub fn walk_mut<V: SceneVisitor + ?Sized>(&mut self, visitor: &mut V) {
        match self {
            Self::Group(g) => {
                visitor.visit_group(g);
                for child in &mut g.children {
                    child.walk_mut(visitor);
                }
            }
            Self::Mesh(m) => visitor.visit_mesh(m),
            Self::DirectionalLight(l) => visitor.visit_light(l),
            Self::Camera(c) => visitor.visit_camera(c),
        }
    }
}

/// Raises environment reflections and turns on shadows for every mesh with a standard material.
#[derive(Clone, Debug)]
pub struct MaterialTuner {
    pub env_map_intensity: f32,
    pub touched: usize,
}

impl Default for MaterialTuner {
    fn default() -> Self {
        Self {
            env_map_intensity: 2.5,
            touched: 0,
        }
    }
}

impl SceneVisitor for MaterialTuner {
    fn visit_mesh(&mut self, mesh: &mut Mesh) {
        let Material::Standard(material) = &mut mesh.material else {
            return;
        };
        material.env_map_intensity = self.env_map_intensity;
        material.needs_update = true;
        mesh.cast_shadow = true;
        mesh.receive_shadow = true;
        self.touched += 1;
    }
}

/// The demo scene: a helmet-sized standard-material sphere, a white key light, and a camera.
pub fn demo_scene() -> SceneNode {
    let helmet = Mesh {
        name: "helmet".to_string(),
        shape: Shape::Sphere {
            center: [0.0, 0.0, 0.0],
            radius: 0.5,
        },
        material: Material::Standard(StandardMaterial {
            base_color: Rgba::opaque(0.55, 0.5, 0.45),
            roughness: 0.35,
            metalness: 0.6,
            ..StandardMaterial::default()
        }),
        cast_shadow: false,
        receive_shadow: false,
    };

    SceneNode::Group(Group {
        name: "root".to_string(),
        scale: 1.0,
        rotation_y: 0.0,
        children: vec![
            SceneNode::Group(Group {
                name: "DamagedHelmet".to_string(),
                scale: 2.0,
                rotation_y: std::f64::consts::FRAC_PI_2,
                children: vec![SceneNode::Mesh(helmet)],
            }),
            SceneNode::DirectionalLight(DirectionalLight {
                color: Rgba::gray(1.0),
                intensity: 3.0,
                position: [0.25, 3.0, -2.25],
                cast_shadow: true,
            }),
            SceneNode::Camera(Camera {
                fov_deg: 75.0,
                position: [4.0, 1.0, -4.0],
                near: 0.1,
                far: 100.0,
            }),
        ],
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
