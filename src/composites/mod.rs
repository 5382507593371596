//! The builder catalogue. Every builder registered here can be looked up
//! by the name it labels its trees with.

pub mod chess;
pub mod clown;
pub mod fence;
pub mod figure;
pub mod lamp;
pub mod leg;
pub mod limb;
pub mod mobile;
pub mod snake;
pub mod snowperson;
pub mod teddy_bear;

pub use chess::{ChessBoard, ChessPiece, PieceKind};
pub use clown::Clown;
pub use fence::Fence;
pub use figure::Figure;
pub use lamp::Lamp;
pub use leg::Leg;
pub use limb::Limb;
pub use mobile::Mobile;
pub use snake::Snake;
pub use snowperson::SnowPerson;
pub use teddy_bear::TeddyBear;

use crate::assembly::CompositeBuilder;

pub fn catalogue() -> Vec<Box<dyn CompositeBuilder>> {
    let mut builders: Vec<Box<dyn CompositeBuilder>> = vec![
        Box::new(Lamp),
        Box::new(Leg),
        Box::new(Snake),
        Box::new(Fence),
        Box::new(SnowPerson),
        Box::new(Limb),
        Box::new(TeddyBear),
        Box::new(Mobile),
        Box::new(ChessBoard),
        Box::new(Clown),
        Box::new(Figure),
    ];
    builders.extend(
        PieceKind::ALL
            .into_iter()
            .map(|kind| Box::new(ChessPiece::new(kind)) as Box<dyn CompositeBuilder>),
    );
    builders
}

pub fn builder_by_name(name: &str) -> Option<Box<dyn CompositeBuilder>> {
    catalogue().into_iter().find(|builder| builder.name() == name)
}
