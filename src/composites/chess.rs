use std::f32::consts::FRAC_PI_2;

use crate::assembly::{Anchor, CompositeBuilder, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::{Color, MaterialDescriptor, Side};
use crate::params::{ParameterRecord, ResolvedParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Rook,
    Bishop,
    Knight,
}

impl PieceKind {
    pub const ALL: [PieceKind; 4] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
        }
    }
}

/// A chess piece standing on its base. Every piece has a `base` and a
/// `body`; the rest depends on the kind.
pub struct ChessPiece {
    pub kind: PieceKind,
}

impl ChessPiece {
    pub fn new(kind: PieceKind) -> Self {
        Self { kind }
    }
}

const BASE_HEIGHT: f32 = 0.5;

impl CompositeBuilder for ChessPiece {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn anchor(&self) -> Anchor {
        Anchor::Base
    }

    fn defaults(&self) -> ParameterRecord {
        let record = ParameterRecord::new()
            .flag("white", true)
            .material("white_material", MaterialDescriptor::phong(Color(0xeeeeee), 60.0))
            .material("black_material", MaterialDescriptor::phong(Color(0x222222), 60.0))
            .int("detail", 32);

        match self.kind {
            PieceKind::Pawn => record
                .float("base_radius", 1.0)
                .float("body_height", 1.5)
                .float("head_radius", 0.4),
            PieceKind::Rook => record
                .float("base_radius", 1.0)
                .float("body_height", 1.8)
                .float("tower_radius", 0.8),
            PieceKind::Bishop => record
                .float("base_radius", 0.8)
                .float("body_height", 1.5)
                .float("head_radius", 0.4)
                .float("mitre_height", 0.7),
            PieceKind::Knight => record
                .float("base_radius", 1.0)
                .float("body_height", 1.5)
                .degrees("lean", -10.0),
        }
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let detail = p.detail("detail")?;
        let material = if p.flag("white")? {
            p.material("white_material")?
        } else {
            p.material("black_material")?
        };
        let base_radius = p.float("base_radius")?;
        let body_height = p.float("body_height")?;
        let shoulders = BASE_HEIGHT + body_height;

        let (base_top, body_top, body_bottom) = match self.kind {
            PieceKind::Pawn => (0.8, 0.2, 0.6),
            PieceKind::Rook => (0.9, 0.6, 0.6),
            PieceKind::Bishop => (0.7, 0.3, 0.5),
            PieceKind::Knight => (0.8, 0.0, 0.0),
        };

        let mut piece = Part::group(self.kind.name()).child(
            Part::mesh(
                Primitive::cylinder(base_radius * base_top, base_radius, BASE_HEIGHT, detail),
                material,
            )
            .named("base")
            .at(0.0, BASE_HEIGHT / 2.0, 0.0),
        );

        if self.kind != PieceKind::Knight {
            piece = piece.child(
                Part::mesh(
                    Primitive::cylinder(body_top, body_bottom, body_height, detail),
                    material,
                )
                .named("body")
                .at(0.0, BASE_HEIGHT + body_height / 2.0, 0.0),
            );
        }

        let piece = match self.kind {
            PieceKind::Pawn => {
                let head = p.float("head_radius")?;
                piece.child(
                    Part::mesh(Primitive::sphere(head, detail, detail), material)
                        .named("head")
                        .at(0.0, shoulders + head / 2.0, 0.0),
                )
            }
            PieceKind::Rook => {
                let tower = p.float("tower_radius")?;
                piece.child(
                    Part::mesh(Primitive::cylinder(tower, tower, 0.5, detail), material)
                        .named("head")
                        .at(0.0, shoulders + 0.25, 0.0),
                )
            }
            PieceKind::Bishop => {
                let head = p.float("head_radius")?;
                let mitre = p.float("mitre_height")?;
                piece
                    .child(
                        Part::mesh(Primitive::sphere(head, detail, detail), material)
                            .named("head")
                            .at(0.0, shoulders + head / 2.0, 0.0)
                            .scaled(glam::Vec3::new(1.0, 1.6, 1.0)),
                    )
                    .child(
                        Part::mesh(Primitive::cone(head, mitre, detail), material)
                            .named("top")
                            .at(0.0, shoulders + head + mitre / 2.0, 0.0),
                    )
            }
            PieceKind::Knight => self.knight(piece, material, p.float("lean")?, body_height, detail),
        };
        Ok(piece)
    }
}

impl ChessPiece {
    fn knight(
        &self,
        piece: Part,
        material: &MaterialDescriptor,
        lean: f32,
        body_height: f32,
        detail: u32,
    ) -> Part {
        let shoulders = BASE_HEIGHT + body_height;
        let ear = Primitive::cone(0.2, 0.5, detail);
        let ear_y = shoulders + 0.7;

        piece
            .child(
                Part::mesh(Primitive::cuboid(0.7, body_height, 0.8), material)
                    .named("body")
                    .at(0.0, BASE_HEIGHT + body_height / 2.0, 0.2)
                    .rotated_x(lean),
            )
            .child(
                Part::mesh(Primitive::cuboid(0.9, 0.8, 1.4), material)
                    .named("head")
                    .at(0.0, shoulders + 0.2, 0.0)
                    .rotated_x(lean),
            )
            .child(
                Part::mesh(ear, material)
                    .named("left ear")
                    .at(-0.2, ear_y, 0.3)
                    .rotated_x(3.0 * lean),
            )
            .child(
                Part::mesh(ear, material)
                    .named("right ear")
                    .at(0.2, ear_y, 0.3)
                    .rotated_x(3.0 * lean),
            )
    }
}

/// An 8x8 board of double-sided squares in the XZ plane, centered on the
/// origin. Squares are named `a1`..`h8`, files along +X and ranks along +Z.
pub struct ChessBoard;

impl CompositeBuilder for ChessBoard {
    fn name(&self) -> &'static str {
        "chessboard"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Center
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .float("square_size", 3.0)
            .color("light_color", Color::WHITE)
            .color("dark_color", Color(0x013220))
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let size = p.float("square_size")?;
        let light = MaterialDescriptor::basic(p.color("light_color")?).with_side(Side::Double);
        let dark = MaterialDescriptor::basic(p.color("dark_color")?).with_side(Side::Double);
        let square = Primitive::plane(size, size);
        let offset = size * 3.5;

        let squares = itertools::iproduct!(0..8u8, 0..8u8).map(|(file, rank)| {
            // a1 is dark
            let material = if (file + rank) % 2 == 0 { &dark } else { &light };
            Part::mesh(square, material)
                .named(format!("{}{}", char::from(b'a' + file), rank + 1))
                .at(f32::from(file) * size - offset, 0.0, f32::from(rank) * size - offset)
                .rotated_x(-FRAC_PI_2)
        });

        Ok(Part::group("chessboard").children(squares))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pieces_stand_on_the_board() {
        for kind in PieceKind::ALL {
            let piece = ChessPiece::new(kind).build_from(&ParameterRecord::new()).unwrap();
            let bounds = piece.world_bounds().unwrap();
            assert!(bounds.min.y.abs() < 1e-4, "{}", kind.name());
            assert!(piece.find_by_name("base").is_some());
            assert!(piece.find_by_name("body").is_some());
        }
    }

    #[test]
    fn color_flag_picks_the_material() {
        let piece = ChessPiece::new(PieceKind::Rook)
            .build_from(&ParameterRecord::new().flag("white", false))
            .unwrap();
        let base = piece.get_object_by_name("base").unwrap();
        let material = base.material.as_ref().unwrap().for_group(0).unwrap();
        assert_eq!(material.descriptor.color, Color(0x222222));
    }

    #[test]
    fn board_has_sixty_four_named_squares() {
        let board = ChessBoard.build_from(&ParameterRecord::new()).unwrap();
        assert_eq!(board.mesh_count(), 64);
        assert!(board.find_by_name("a1").is_some());
        assert!(board.find_by_name("h8").is_some());

        let bounds = board.world_bounds().unwrap();
        assert!(bounds.center().abs_diff_eq(glam::Vec3::ZERO, 1e-4));
        assert!((bounds.size().x - 24.0).abs() < 1e-4);
    }
}
