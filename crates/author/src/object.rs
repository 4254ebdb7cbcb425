use std::str::FromStr;

use gesturespace_common::{ObjectId, Transform};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Primitive shapes the creative mode can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Box,
    Sphere,
    Cylinder,
    Cone,
    /// A box stretched along X.
    Rectangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        Self::Box,
        Self::Sphere,
        Self::Cylinder,
        Self::Cone,
        Self::Rectangle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Rectangle => "rectangle",
        }
    }

    /// Scale a freshly created object starts with.
    pub fn base_scale(&self) -> Vec3 {
        match self {
            Self::Rectangle => Vec3::new(1.5, 0.75, 0.75),
            _ => Vec3::ONE,
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    #[default]
    Plastic,
    Metal,
    Rubber,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Metal => "metal",
            Self::Rubber => "rubber",
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit sRGB colour, written `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([0xff, 0xff, 0xff]);

    /// Recolor palette used by the thumb-up action.
    pub const PALETTE: [Color; 6] = [
        Color([0xff, 0x00, 0x00]),
        Color([0x00, 0xff, 0x00]),
        Color([0x00, 0x00, 0xff]),
        Color([0xff, 0xff, 0x00]),
        Color([0xff, 0xff, 0xff]),
        Color([0xff, 0x00, 0xff]),
    ];

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid colour {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let mut rgb = [0u8; 3];
        for (i, byte) in rgb.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| err())?;
        }
        Ok(Self(rgb))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// What the next created object looks like. Owned by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationSettings {
    pub shape: ShapeKind,
    pub color: Color,
    pub material: MaterialKind,
}

/// One object in the creative scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub shape: ShapeKind,
    pub transform: Transform,
    pub color: Color,
    pub material: MaterialKind,
}

impl SceneObject {
    /// A new object at the origin, unrotated, at its shape's base scale.
    pub fn from_settings(settings: &CreationSettings) -> Self {
        Self {
            id: ObjectId::new(),
            shape: settings.shape,
            transform: Transform::scaled(settings.shape.base_scale()),
            color: settings.color,
            material: settings.material,
        }
    }

    /// Apply a patch in place. Unset fields are left alone.
    pub fn apply(&mut self, patch: &ObjectPatch) {
        if let Some(position) = patch.position {
            self.transform.position = position;
        }
        if let Some(rotation) = patch.rotation {
            self.transform.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            self.transform.scale = scale;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(material) = patch.material {
            self.material = material;
        }
    }
}

/// Partial update of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectPatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
    pub color: Option<Color>,
    pub material: Option<MaterialKind>,
}

impl ObjectPatch {
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn rotation(rotation: Quat) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    pub fn scale(scale: Vec3) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_parse_and_format() {
        let c: Color = "#ff00aa".parse().unwrap();
        assert_eq!(c, Color([0xff, 0x00, 0xaa]));
        assert_eq!(c.to_hex(), "#ff00aa");
        assert_eq!("#FFFFFF".parse::<Color>().unwrap(), Color::WHITE);
    }

    #[test]
    fn color_rejects_malformed() {
        for bad in ["ff00aa", "#ff00a", "#ff00aaa", "#gg0000", "#ff00é"] {
            assert!(bad.parse::<Color>().is_err(), "{bad} parsed");
        }
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color([0, 0x80, 0xff])).unwrap();
        assert_eq!(json, "\"#0080ff\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color([0, 0x80, 0xff]));
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn palette_has_six_distinct_entries() {
        let mut hex: Vec<String> = Color::PALETTE.iter().map(Color::to_hex).collect();
        hex.sort();
        hex.dedup();
        assert_eq!(hex.len(), 6);
    }

    #[test]
    fn default_settings() {
        let s = CreationSettings::default();
        assert_eq!(s.shape, ShapeKind::Box);
        assert_eq!(s.color, Color::WHITE);
        assert_eq!(s.material, MaterialKind::Plastic);
    }

    #[test]
    fn settings_partial_json() {
        let s: CreationSettings =
            serde_json::from_str(r##"{"shape":"cone","color":"#00ff00"}"##).unwrap();
        assert_eq!(s.shape, ShapeKind::Cone);
        assert_eq!(s.color, Color([0, 0xff, 0]));
        assert_eq!(s.material, MaterialKind::Plastic);
    }

    #[test]
    fn rectangle_starts_stretched() {
        let obj = SceneObject::from_settings(&CreationSettings {
            shape: ShapeKind::Rectangle,
            ..CreationSettings::default()
        });
        assert_eq!(obj.transform.scale, Vec3::new(1.5, 0.75, 0.75));
        assert_eq!(obj.transform.position, Vec3::ZERO);
        assert_eq!(obj.transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn patch_touches_only_set_fields() {
        let mut obj = SceneObject::from_settings(&CreationSettings::default());
        let before = obj.clone();
        obj.apply(&ObjectPatch::color(Color::PALETTE[0]));
        assert_eq!(obj.color, Color::PALETTE[0]);
        assert_eq!(obj.transform, before.transform);
        assert_eq!(obj.material, before.material);

        obj.apply(&ObjectPatch::position(Vec3::new(1.0, 2.0, 0.0)));
        assert_eq!(obj.transform.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(obj.transform.scale, Vec3::ONE);
        assert!(ObjectPatch::default().is_empty());
    }
}
