use crate::{
    effects::pass::{FrameContext, shade_pixels},
    foundation::core::Rgba,
    render::frame::LinearFrame,
    scene::{
        SceneRenderer,
        graph::{DirectionalLight, Material, MaterialTuner, SceneNode, Shape, demo_scene},
    },
};

const VIEW_HALF_HEIGHT: f64 = 1.5;
const SKY_ZENITH: Rgba = Rgba::opaque(0.22, 0.40, 0.78);
const SKY_HORIZON: Rgba = Rgba::opaque(0.85, 0.80, 0.72);
const GROUND: Rgba = Rgba::opaque(0.18, 0.16, 0.14);

/// Gradient environment standing in for a cube map: `y` is the up component of a direction.
pub fn environment(y: f64) -> Rgba {
    let y = y.clamp(-1.0, 1.0) as f32;
    if y >= 0.0 {
        SKY_HORIZON.lerp(SKY_ZENITH, y)
    } else {
        SKY_HORIZON.lerp(GROUND, -y)
    }
}

/// Reinhard operator with exposure.
pub fn reinhard(c: f32, exposure: f32) -> f32 {
    let v = c.max(0.0) * exposure;
    v / (1.0 + v)
}

#[derive(Clone, Debug)]
struct Sphere {
    center: [f64; 2],
    radius: f64,
    albedo: Rgba,
    env_intensity: f32,
    spin: f64,
}

#[derive(Clone, Debug)]
struct Light {
    dir: [f64; 3],
    radiance: Rgba,
}

/// Built-in stand-in for a rasterized model: spheres lit by the scene's directional lights and
/// the gradient environment, orthographic view down +z, tone mapped.
pub struct ProceduralScene {
    graph: SceneNode,
    exposure: f32,
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
}

impl ProceduralScene {
    pub fn new(mut graph: SceneNode, exposure: f32) -> Self {
        let mut tuner = MaterialTuner::default();
        graph.walk_mut(&mut tuner);
        tracing::debug!(meshes = tuner.touched, "tuned scene materials");

        let mut spheres = Vec::new();
        let mut lights = Vec::new();
        collect(&graph, 1.0, 0.0, &mut spheres, &mut lights);
        Self {
            graph,
            exposure,
            spheres,
            lights,
        }
    }

    pub fn demo() -> Self {
        Self::new(demo_scene(), 1.5)
    }

    pub fn graph(&self) -> &SceneNode {
        &self.graph
    }

    fn shade(&self, wx: f64, wy: f64, v: f64, elapsed: f64) -> Rgba {
        for s in &self.spheres {
            let dx = wx - s.center[0];
            let dy = wy - s.center[1];
            let d2 = dx * dx + dy * dy;
            let r2 = s.radius * s.radius;
            if d2 >= r2 {
                continue;
            }
            let n = [dx / s.radius, dy / s.radius, -(r2 - d2).sqrt() / s.radius];

            let longitude = n[0].atan2(-n[2]);
            let band = (0.85 + 0.15 * (longitude * 10.0 + s.spin + elapsed).sin()) as f32;
            let albedo = s.albedo.map_rgb(|c| c * band);

            let mut light = environment(n[1]) * s.env_intensity * 0.25;
            for l in &self.lights {
                let ndotl = (n[0] * l.dir[0] + n[1] * l.dir[1] + n[2] * l.dir[2]).max(0.0) as f32;
                light = light + l.radiance * ndotl;
            }
            let lit = Rgba::opaque(albedo.r * light.r, albedo.g * light.g, albedo.b * light.b);
            return lit.map_rgb(|c| reinhard(c, self.exposure));
        }
        environment(v * 2.0 - 1.0).map_rgb(|c| reinhard(c, self.exposure))
    }
}

fn collect(
    node: &SceneNode,
    scale: f64,
    rotation_y: f64,
    spheres: &mut Vec<Sphere>,
    lights: &mut Vec<Light>,
) {
    match node {
        SceneNode::Group(g) => {
            for child in &g.children {
                collect(child, scale * g.scale, rotation_y + g.rotation_y, spheres, lights);
            }
        }
        SceneNode::Mesh(m) => {
            let Shape::Sphere { center, radius } = m.shape;
            let (albedo, env_intensity) = match &m.material {
                Material::Standard(s) => (s.base_color, s.env_map_intensity),
                Material::Basic(b) => (b.color, 0.0),
            };
            let (sin, cos) = rotation_y.sin_cos();
            let x = center[0] * cos + center[2] * sin;
            spheres.push(Sphere {
                center: [x * scale, center[1] * scale],
                radius: radius * scale,
                albedo,
                env_intensity,
                spin: rotation_y,
            });
        }
        SceneNode::DirectionalLight(l) => lights.push(light_from(l)),
        SceneNode::Camera(_) => {}
    }
}

fn light_from(l: &DirectionalLight) -> Light {
    let [x, y, z] = l.position;
    let len = (x * x + y * y + z * z).sqrt().max(f64::EPSILON);
    Light {
        dir: [x / len, y / len, z / len],
        radiance: l.color.map_rgb(|c| c * l.intensity),
    }
}

impl SceneRenderer for ProceduralScene {
    fn render(&mut self, ctx: &FrameContext, target: &mut LinearFrame) {
        let (w, h) = target.dimensions();
        if w == 0 || h == 0 {
            return;
        }
        let aspect = f64::from(w) / f64::from(h);
        let elapsed = ctx.elapsed;
        let this = &*self;
        shade_pixels(target, |_, _, uv| {
            let wx = (uv.x * 2.0 - 1.0) * VIEW_HALF_HEIGHT * aspect;
            let wy = (uv.y * 2.0 - 1.0) * VIEW_HALF_HEIGHT;
            this.shade(wx, wy, uv.y, elapsed)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/procedural.rs"]
mod tests;
