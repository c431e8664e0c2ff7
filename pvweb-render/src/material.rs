//! Materials and the factory the assembler asks for them.

use std::collections::BTreeMap;
use std::fmt::Debug;

/// Render bin for opaque objects.
pub const DEFAULT_BIN: i32 = 100;
/// Render bin for transparent objects; drawn after every opaque bin.
pub const TRANSPARENT_BIN: i32 = 1000;

/// Name of the scalar uniform carrying per-object opacity.
pub const OPACITY_UNIFORM: &str = "opacity";

/// Shading model requested by the assembler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Unlit, per-vertex colored. Used for points and lines.
    Geometry,
    /// Lit with Phong shading. Used for meshes.
    Phong,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

/// What the assembler needs from a material: named uniforms and a bin.
pub trait Material: Debug {
    fn kind(&self) -> MaterialKind;
    fn uniform(&self, name: &str) -> Option<&UniformValue>;
    fn uniform_mut(&mut self, name: &str) -> Option<&mut UniformValue>;
    fn bin_number(&self) -> i32;
    fn set_bin_number(&mut self, bin: i32);

    fn is_transparent(&self) -> bool {
        self.bin_number() >= TRANSPARENT_BIN
    }
}

/// Source of materials for assembled objects.
pub trait MaterialFactory {
    fn create_material(&mut self, kind: MaterialKind) -> Box<dyn Material>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct BasicMaterial {
    kind: MaterialKind,
    bin_number: i32,
    uniforms: BTreeMap<String, UniformValue>,
}

impl BasicMaterial {
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            kind,
            bin_number: DEFAULT_BIN,
            uniforms: BTreeMap::new(),
        }
    }

    pub fn with_uniform(mut self, name: &str, value: UniformValue) -> Self {
        self.uniforms.insert(name.to_string(), value);
        self
    }

    pub fn uniforms(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.uniforms.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Material for BasicMaterial {
    fn kind(&self) -> MaterialKind {
        self.kind
    }

    fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    fn uniform_mut(&mut self, name: &str) -> Option<&mut UniformValue> {
        self.uniforms.get_mut(name)
    }

    fn bin_number(&self) -> i32 {
        self.bin_number
    }

    fn set_bin_number(&mut self, bin: i32) {
        self.bin_number = bin;
    }
}

/// Materials with the uniforms the stock geometry and Phong shaders expose.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicMaterialFactory;

impl MaterialFactory for BasicMaterialFactory {
    fn create_material(&mut self, kind: MaterialKind) -> Box<dyn Material> {
        let material = BasicMaterial::new(kind).with_uniform(OPACITY_UNIFORM, UniformValue::Float(1.0));
        let material = match kind {
            MaterialKind::Geometry => material,
            MaterialKind::Phong => material
                .with_uniform("shininess", UniformValue::Float(30.0))
                .with_uniform("lightDirection", UniformValue::Vec3([0.0, 0.0, 1.0])),
        };
        Box::new(material)
    }
}
