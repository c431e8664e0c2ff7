//! Turns decoded records into drawable actors or legends.

use glam::{Mat4, Vec2};
use pvweb_format::{ColorMapDescriptor, DecodedGeometry, Record, RecordKind};

use crate::geometry::GeometryData;
use crate::legend::{BasicLegendFactory, LegendFactory, LegendLayout, LegendWidget, LookupTable, LEGEND_HEIGHT};
use crate::material::{
    BasicMaterialFactory, Material, MaterialFactory, MaterialKind, UniformValue, OPACITY_UNIFORM, TRANSPARENT_BIN,
};
use crate::uniforms::PerObjectUniforms;

/// A drawable object: geometry, its material and the model transform.
#[derive(Debug)]
pub struct Actor {
    pub kind: RecordKind,
    pub geometry: GeometryData,
    pub material: Box<dyn Material>,
    /// Applied model matrix (already transposed from the wire layout).
    pub matrix: Mat4,
}

impl Actor {
    pub fn opacity(&self) -> f32 {
        match self.material.uniform(OPACITY_UNIFORM) {
            Some(UniformValue::Float(v)) => *v,
            _ => 1.0,
        }
    }

    pub fn uniforms(&self) -> PerObjectUniforms {
        PerObjectUniforms::new(self.matrix, self.opacity())
    }
}

/// What one record assembles into.
#[derive(Debug)]
pub enum Assembled {
    Actor(Actor),
    Legend(LegendWidget),
}

/// Display flags carried next to a record in the scene description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectStyle {
    pub has_transparency: bool,
    pub opacity: f32,
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self {
            has_transparency: false,
            opacity: 1.0,
        }
    }
}

/// Applied model matrix for a wire matrix.
///
/// The wire floats read column-major give the transpose of the intended
/// transform, so the result is transposed back.
pub fn applied_matrix(geometry: &DecodedGeometry) -> Mat4 {
    Mat4::from_cols_array(geometry.matrix.as_array()).transpose()
}

pub struct ObjectAssembler<M = BasicMaterialFactory, L = BasicLegendFactory> {
    materials: M,
    legends: L,
    legend_height: f32,
    transparent_bin: i32,
}

impl Default for ObjectAssembler {
    fn default() -> Self {
        Self::new(BasicMaterialFactory, BasicLegendFactory)
    }
}

impl<M: MaterialFactory, L: LegendFactory> ObjectAssembler<M, L> {
    pub fn new(materials: M, legends: L) -> Self {
        Self {
            materials,
            legends,
            legend_height: LEGEND_HEIGHT,
            transparent_bin: TRANSPARENT_BIN,
        }
    }

    pub fn with_legend_height(mut self, height: f32) -> Self {
        self.legend_height = height;
        self
    }

    pub fn with_transparent_bin(mut self, bin: i32) -> Self {
        self.transparent_bin = bin;
        self
    }

    /// Build the actor or legend for `record`. `viewport` is the window size
    /// in pixels and only matters for colormaps.
    pub fn assemble(&mut self, record: Record, style: ObjectStyle, viewport: Vec2) -> Assembled {
        match record {
            Record::Lines(g) => Assembled::Actor(self.actor(RecordKind::Lines, g, MaterialKind::Geometry, style)),
            Record::Mesh(g) => Assembled::Actor(self.actor(RecordKind::Mesh, g, MaterialKind::Phong, style)),
            Record::Points(g) => Assembled::Actor(self.actor(RecordKind::Points, g, MaterialKind::Geometry, style)),
            Record::ColorMap(cm) => Assembled::Legend(self.legend(&cm, viewport)),
        }
    }

    fn actor(&mut self, kind: RecordKind, decoded: DecodedGeometry, shading: MaterialKind, style: ObjectStyle) -> Actor {
        let matrix = applied_matrix(&decoded);
        let mut material = self.materials.create_material(shading);
        if style.has_transparency {
            match material.uniform_mut(OPACITY_UNIFORM) {
                Some(slot) => *slot = UniformValue::Float(style.opacity),
                None => log::warn!("{:?} material has no {} uniform", shading, OPACITY_UNIFORM),
            }
            material.set_bin_number(self.transparent_bin);
        }
        let name = char::from(kind.tag()).to_string();
        Actor {
            kind,
            geometry: GeometryData::from_buffer(name, decoded.geometry),
            material,
            matrix,
        }
    }

    fn legend(&mut self, colormap: &ColorMapDescriptor, viewport: Vec2) -> LegendWidget {
        let layout = LegendLayout::from_colormap(colormap, viewport, self.legend_height);
        self.legends
            .create_color_legend(&colormap.title, LookupTable::from_colormap(colormap), layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvweb_format::{ColorStop, GeometryBuffer, PrimitiveKind, WireMatrix};

    fn points(matrix: WireMatrix) -> DecodedGeometry {
        DecodedGeometry {
            geometry: GeometryBuffer {
                positions: vec![[0.0; 3], [1.0; 3]],
                normals: None,
                colors: vec![[1.0, 0.502, 0.0]; 2],
                indices: vec![0, 1],
                primitive: PrimitiveKind::Points,
            },
            matrix,
        }
    }

    fn assembler() -> ObjectAssembler {
        ObjectAssembler::default()
    }

    fn actor_of(assembled: Assembled) -> Actor {
        match assembled {
            Assembled::Actor(a) => a,
            other => panic!("expected actor, got {other:?}"),
        }
    }

    #[test]
    fn test_identity_matrix_stays_identity() {
        let a = actor_of(assembler().assemble(
            Record::Points(points(WireMatrix::IDENTITY)),
            ObjectStyle::default(),
            Vec2::ZERO,
        ));
        assert_eq!(a.matrix, Mat4::IDENTITY);
    }

    #[test]
    fn test_translation_is_transposed() {
        // Row-major translation on the wire; the applied matrix carries it in column 3.
        let wire = WireMatrix([
            1.0, 0.0, 0.0, 5.0, //
            0.0, 1.0, 0.0, 6.0, //
            0.0, 0.0, 1.0, 7.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let a = actor_of(assembler().assemble(
            Record::Lines(points(wire)),
            ObjectStyle::default(),
            Vec2::ZERO,
        ));
        assert_eq!(a.matrix.w_axis.to_array(), [5.0, 6.0, 7.0, 1.0]);
        assert_eq!(a.matrix.transform_point3(glam::Vec3::ZERO), glam::Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(a.matrix.to_cols_array(), wire.transposed());
    }

    #[test]
    fn test_material_per_kind() {
        let mut asm = assembler();
        let mesh = asm.assemble(Record::Mesh(points(WireMatrix::IDENTITY)), ObjectStyle::default(), Vec2::ZERO);
        assert_eq!(actor_of(mesh).material.kind(), MaterialKind::Phong);
        let lines = asm.assemble(Record::Lines(points(WireMatrix::IDENTITY)), ObjectStyle::default(), Vec2::ZERO);
        let lines = actor_of(lines);
        assert_eq!(lines.material.kind(), MaterialKind::Geometry);
        assert_eq!(lines.geometry.name(), "L");
        assert_eq!(lines.kind, RecordKind::Lines);
    }

    #[test]
    fn test_transparency_sets_opacity_and_bin() {
        let style = ObjectStyle {
            has_transparency: true,
            opacity: 0.4,
        };
        let a = actor_of(assembler().assemble(
            Record::Points(points(WireMatrix::IDENTITY)),
            style,
            Vec2::ZERO,
        ));
        assert_eq!(a.material.uniform(OPACITY_UNIFORM), Some(&UniformValue::Float(0.4)));
        assert_eq!(a.material.bin_number(), TRANSPARENT_BIN);
        assert_eq!(a.uniforms().opacity[0], 0.4);
    }

    #[test]
    fn test_opaque_object_ignores_opacity_value() {
        let style = ObjectStyle {
            has_transparency: false,
            opacity: 0.4,
        };
        let a = actor_of(assembler().assemble(
            Record::Points(points(WireMatrix::IDENTITY)),
            style,
            Vec2::ZERO,
        ));
        assert_eq!(a.opacity(), 1.0);
        assert!(!a.material.is_transparent());
    }

    #[test]
    fn test_colormap_becomes_legend() {
        let cm = ColorMapDescriptor {
            position: [0.5, 0.25],
            size: [0.25, 0.1],
            colors: vec![
                ColorStop { value: 0.0, rgb: [255, 128, 0] },
                ColorStop { value: 2.0, rgb: [0, 0, 0] },
            ],
            orientation: 0,
            label_count: 3,
            title: "T".into(),
        };
        let mut asm = assembler().with_legend_height(20.0);
        let legend = match asm.assemble(Record::ColorMap(cm), ObjectStyle::default(), Vec2::new(400.0, 200.0)) {
            Assembled::Legend(l) => l,
            other => panic!("expected legend, got {other:?}"),
        };
        assert_eq!(legend.layout.position, [200.0, 130.0, 0.0]);
        assert_eq!(legend.layout.width, 100.0);
        assert_eq!(legend.layout.height, 20.0);
        assert_eq!(legend.lookup_table.entries[0][3], 0.0);
        assert!((legend.lookup_table.entries[0][1] - 0.502).abs() < 1e-3);
    }
}
