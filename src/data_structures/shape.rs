//! The basic shapes a scene is built from.
//!
//! A [`MeshKind`] names one of the prepared meshes. A [`Shape`] names what a
//! single draw call renders, which can be the whole mesh or only some of its
//! parts (the top of a cylinder, one side of a box, the upper half of a
//! sphere...). [`MeshPart`] is the unit the generated geometry is split into.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Box,
    Cylinder,
    Cone,
    Sphere,
    Torus,
    Prism,
}

/// A mesh to prepare before the first frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeshLoad {
    Plane,
    Box,
    Cylinder,
    Cone,
    Sphere,
    /// Tube radius relative to a ring radius of 1.
    Torus { thickness: f32 },
    Prism,
}

impl MeshLoad {
    pub fn kind(&self) -> MeshKind {
        match self {
            MeshLoad::Plane => MeshKind::Plane,
            MeshLoad::Box => MeshKind::Box,
            MeshLoad::Cylinder => MeshKind::Cylinder,
            MeshLoad::Cone => MeshKind::Cone,
            MeshLoad::Sphere => MeshKind::Sphere,
            MeshLoad::Torus { .. } => MeshKind::Torus,
            MeshLoad::Prism => MeshKind::Prism,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxSide {
    Back,
    Bottom,
    Left,
    Right,
    Top,
    Front,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshPart {
    Whole,
    /// Upper half of a sphere, or the half ring of a torus with `y >= 0`.
    UpperHalf,
    Face(BoxSide),
    Top,
    Bottom,
    Sides,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Plane,
    Box,
    BoxSide(BoxSide),
    Cylinder { top: bool, bottom: bool, sides: bool },
    Cone { bottom: bool, sides: bool },
    Sphere,
    HalfSphere,
    Torus,
    HalfTorus,
    Prism,
}

impl Shape {
    pub const CYLINDER: Shape = Shape::Cylinder {
        top: true,
        bottom: true,
        sides: true,
    };
    pub const CONE: Shape = Shape::Cone {
        bottom: true,
        sides: true,
    };

    /// The prepared mesh this shape is cut from.
    pub fn mesh(&self) -> MeshKind {
        match self {
            Shape::Plane => MeshKind::Plane,
            Shape::Box | Shape::BoxSide(_) => MeshKind::Box,
            Shape::Cylinder { .. } => MeshKind::Cylinder,
            Shape::Cone { .. } => MeshKind::Cone,
            Shape::Sphere | Shape::HalfSphere => MeshKind::Sphere,
            Shape::Torus | Shape::HalfTorus => MeshKind::Torus,
            Shape::Prism => MeshKind::Prism,
        }
    }

    /// Parts of the mesh this shape draws, in draw order. Empty when every
    /// part of a cylinder or cone is switched off.
    pub fn parts(&self) -> Vec<MeshPart> {
        match *self {
            Shape::BoxSide(side) => vec![MeshPart::Face(side)],
            Shape::Cylinder { top, bottom, sides } => [
                (top, MeshPart::Top),
                (bottom, MeshPart::Bottom),
                (sides, MeshPart::Sides),
            ]
            .into_iter()
            .filter_map(|(enabled, part)| enabled.then_some(part))
            .collect(),
            Shape::Cone { bottom, sides } => [(bottom, MeshPart::Bottom), (sides, MeshPart::Sides)]
                .into_iter()
                .filter_map(|(enabled, part)| enabled.then_some(part))
                .collect(),
            Shape::HalfSphere | Shape::HalfTorus => vec![MeshPart::UpperHalf],
            Shape::Plane | Shape::Box | Shape::Sphere | Shape::Torus | Shape::Prism => vec![MeshPart::Whole],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::BoxSide(side) => write!(f, "box side {side:?}"),
            Shape::Cylinder { top, bottom, sides } => {
                write!(f, "cylinder (top: {top}, bottom: {bottom}, sides: {sides})")
            }
            Shape::Cone { bottom, sides } => write!(f, "cone (bottom: {bottom}, sides: {sides})"),
            other => write!(f, "{}", format!("{other:?}").to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_shapes_select_their_parts() {
        let top_only = Shape::Cylinder {
            top: true,
            bottom: false,
            sides: false,
        };
        assert_eq!(top_only.parts(), vec![MeshPart::Top]);
        assert_eq!(Shape::CYLINDER.parts(), vec![MeshPart::Top, MeshPart::Bottom, MeshPart::Sides]);
        assert_eq!(Shape::BoxSide(BoxSide::Top).parts(), vec![MeshPart::Face(BoxSide::Top)]);
        assert_eq!(Shape::HalfTorus.mesh(), MeshKind::Torus);
    }

    #[test]
    fn torus_load_maps_to_torus_kind() {
        assert_eq!(MeshLoad::Torus { thickness: 0.1 }.kind(), MeshKind::Torus);
    }

    #[test]
    fn shapes_display_readably() {
        assert_eq!(Shape::HalfSphere.to_string(), "halfsphere");
        assert_eq!(Shape::BoxSide(BoxSide::Front).to_string(), "box side Front");
    }
}
