use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A packed `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);
    pub const BLACK: Color = Color(0x000000);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn to_rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Channels in `0.0..=1.0`.
    pub fn to_vec3(self) -> Vec3 {
        let [r, g, b] = self.to_rgb();
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Basic,
    Lambert,
    Phong,
    Normal,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Plain description of a material. Parameter defaults only ever hold
/// descriptors; every build turns them into fresh [`Material`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescriptor {
    pub kind: MaterialKind,
    pub color: Color,
    pub wireframe: bool,
    pub side: Side,
    pub opacity: f32,
    pub shininess: f32,
    pub texture: Option<String>,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Basic,
            color: Color::WHITE,
            wireframe: false,
            side: Side::Front,
            opacity: 1.0,
            shininess: 30.0,
            texture: None,
        }
    }
}

impl MaterialDescriptor {
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn phong(color: Color, shininess: f32) -> Self {
        Self {
            kind: MaterialKind::Phong,
            color,
            shininess,
            ..Default::default()
        }
    }

    pub fn normal() -> Self {
        Self {
            kind: MaterialKind::Normal,
            ..Default::default()
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn instantiate(&self) -> Material {
        Material {
            descriptor: self.clone(),
            texture: self.texture.as_deref().map(TextureRef::new),
        }
    }
}

/// Opaque handle to a texture owned by the asset collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef(Arc<str>);

impl TextureRef {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A material instance owned by exactly one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub descriptor: MaterialDescriptor,
    pub texture: Option<TextureRef>,
}

impl Material {
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.descriptor.wireframe = wireframe;
    }

    /// Hands over a texture once the asset collaborator has it ready.
    pub fn set_texture(&mut self, texture: TextureRef) {
        self.descriptor.texture = Some(texture.name().to_string());
        self.texture = Some(texture);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialSlot {
    Single(Material),
    /// Indexed by [`crate::geometry::FaceGroup::material_index`].
    Grouped(Vec<Material>),
}

impl MaterialSlot {
    pub fn single(descriptor: &MaterialDescriptor) -> Self {
        MaterialSlot::Single(descriptor.instantiate())
    }

    pub fn grouped<'a>(descriptors: impl IntoIterator<Item = &'a MaterialDescriptor>) -> Self {
        MaterialSlot::Grouped(
            descriptors
                .into_iter()
                .map(MaterialDescriptor::instantiate)
                .collect(),
        )
    }

    /// Material used for a face group. A single material covers every group.
    pub fn for_group(&self, material_index: usize) -> Option<&Material> {
        match self {
            MaterialSlot::Single(material) => Some(material),
            MaterialSlot::Grouped(materials) => materials.get(material_index),
        }
    }

    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        match self {
            MaterialSlot::Single(material) => std::slice::from_mut(material).iter_mut(),
            MaterialSlot::Grouped(materials) => materials.iter_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channels_unpack() {
        let orange = Color(0xff8c00);
        assert_eq!(orange.to_rgb(), [0xff, 0x8c, 0x00]);
        assert_eq!(Color::from_rgb(0xff, 0x8c, 0x00), orange);
        assert_eq!(Color::WHITE.to_vec3(), Vec3::ONE);
    }

    #[test]
    fn instances_do_not_share_state() {
        let descriptor = MaterialDescriptor::basic(Color(0xd08050));
        let mut first = MaterialSlot::single(&descriptor);
        let second = MaterialSlot::single(&descriptor);

        for material in first.materials_mut() {
            material.set_wireframe(true);
        }

        assert!(first.for_group(0).unwrap().descriptor.wireframe);
        assert!(!second.for_group(0).unwrap().descriptor.wireframe);
        assert!(!descriptor.wireframe);
    }

    #[test]
    fn grouped_slot_indexes_by_group() {
        let red = MaterialDescriptor::basic(Color(0xff0000));
        let blue = MaterialDescriptor::basic(Color(0x0000ff));
        let slot = MaterialSlot::grouped([&red, &blue]);

        assert_eq!(slot.for_group(1).unwrap().descriptor.color, Color(0x0000ff));
        assert!(slot.for_group(2).is_none());
    }

    #[test]
    fn textures_arrive_after_build() {
        let mut material = MaterialDescriptor::basic(Color::WHITE).instantiate();
        assert!(material.texture.is_none());

        material.set_texture(TextureRef::new("flowers.jpg"));
        assert_eq!(material.texture.as_ref().map(TextureRef::name), Some("flowers.jpg"));
    }
}
