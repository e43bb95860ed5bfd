use crate::api::types::{ModelHandle, TextureId};

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// UV sphere centered on the entity.
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus lying in the entity's XZ plane.
    Ring { inner: f32, outer: f32, segments: u32 },
    /// Host-loaded detailed object, drawn at the entity's uniform scale.
    Model { handle: ModelHandle },
}

impl Shape {
    /// Wire discriminant.
    pub fn kind(&self) -> u32 {
        match self {
            Shape::Sphere { .. } => 0,
            Shape::Ring { .. } => 1,
            Shape::Model { .. } => 2,
        }
    }
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub texture: Option<TextureId>,
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    /// Affected by scene lights (Lambert/standard) vs. flat shaded.
    pub lit: bool,
    pub double_sided: bool,
    pub transparent: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            texture: None,
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            lit: true,
            double_sided: false,
            transparent: false,
        }
    }
}

impl Material {
    pub const FLAG_LIT: u32 = 1;
    pub const FLAG_DOUBLE_SIDED: u32 = 2;
    pub const FLAG_TRANSPARENT: u32 = 4;

    pub fn textured(texture: TextureId) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    /// Packed flag bits for the wire format.
    pub fn flags(&self) -> u32 {
        let mut bits = 0;
        if self.lit {
            bits |= Self::FLAG_LIT;
        }
        if self.double_sided {
            bits |= Self::FLAG_DOUBLE_SIDED;
        }
        if self.transparent {
            bits |= Self::FLAG_TRANSPARENT;
        }
        bits
    }
}

/// Drawable geometry + material for an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::new(Shape::Sphere { radius, segments }, Material::default())
    }

    pub fn ring(inner: f32, outer: f32, segments: u32) -> Self {
        Self::new(Shape::Ring { inner, outer, segments }, Material::default())
    }

    pub fn model(handle: ModelHandle) -> Self {
        Self::new(Shape::Model { handle }, Material::default())
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.material.texture = Some(texture);
        self
    }

    pub fn with_emissive(mut self, color: Color, intensity: f32) -> Self {
        self.material.emissive = color;
        self.material.emissive_intensity = intensity;
        self
    }

    pub fn unlit(mut self) -> Self {
        self.material.lit = false;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.material.double_sided = true;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.material.transparent = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_unpacks_channels() {
        let c = Color::from_hex(0xffe9b1);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 233.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 177.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn ring_material_flags() {
        let ring = MeshComponent::ring(1.0, 2.0, 32).unlit().double_sided().transparent();
        assert_eq!(
            ring.material.flags(),
            Material::FLAG_DOUBLE_SIDED | Material::FLAG_TRANSPARENT
        );
        assert_eq!(MeshComponent::sphere(1.0, 32).material.flags(), Material::FLAG_LIT);
    }
}
