use anyhow::Context;
use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

use armature::assembly::CompositeBuilder;
use armature::composites::{
    ChessBoard, ChessPiece, Clown, Fence, Figure, Lamp, Leg, Mobile, PieceKind, Snake, SnowPerson, TeddyBear,
};
use armature::params::{ParameterRecord, PresetFile};
use armature::scene_graph::{LiveComposite, Stage, TransformPatch, UpdatePath};

use crate::config::DemoConfig;

const TICK_SECONDS: f32 = 1.0 / 60.0;
const SQUARE_SIZE: f32 = 3.0;

pub struct DemoState {
    pub config: DemoConfig,
    pub stage: Stage,
    pub tick: u32,
    pub rebuilds: u32,
    pub patched_nodes: usize,
    preset: PresetFile,
    lamp: LiveComposite,
    junior: LiveComposite,
    leg: LiveComposite,
    snake: LiveComposite,
    mobile: LiveComposite,
    clown: LiveComposite,
    fence: LiveComposite,
    figure: LiveComposite,
    statics: Vec<LiveComposite>,
}

impl DemoState {
    pub fn new(config: DemoConfig, preset: PresetFile) -> anyhow::Result<Self> {
        let mut stage = Stage::new();

        let lamp = Self::spawn(&mut stage, &preset, Box::new(Lamp), Vec3::ZERO)?;
        let junior = LiveComposite::spawn_placed(
            &mut stage,
            Box::new(Lamp),
            &preset.partial_for("lamp"),
            TransformPatch::default()
                .translation(Vec3::new(12.0, 0.0, 0.0))
                .rotation(Vec3::new(0.0, std::f32::consts::PI, 0.0))
                .scale(Vec3::splat(0.5)),
        )
        .context("Failed to spawn the junior lamp")?;

        let leg = Self::spawn(&mut stage, &preset, Box::new(Leg), Vec3::new(-40.0, 60.0, 0.0))?;
        let snake = Self::spawn(&mut stage, &preset, Box::new(Snake), Vec3::new(-20.0, 20.0, 0.0))?;
        let mobile = Self::spawn(&mut stage, &preset, Box::new(Mobile), Vec3::new(0.0, 40.0, 0.0))?;
        let clown = Self::spawn(&mut stage, &preset, Box::new(Clown), Vec3::new(24.0, 0.0, 0.0))?;
        let fence = Self::spawn(&mut stage, &preset, Box::new(Fence), Vec3::new(-20.0, 0.0, -30.0))?;
        let figure = Self::spawn(&mut stage, &preset, Box::new(Figure), Vec3::new(36.0, 0.0, 0.0))?;

        let mut statics = vec![Self::spawn(
            &mut stage,
            &preset,
            Box::new(TeddyBear),
            Vec3::new(-30.0, 14.0, 0.0),
        )?];
        statics.extend(Self::spawn_town(&mut stage, &preset, &config)?);
        statics.extend(Self::spawn_chess_set(&mut stage, &preset)?);

        log::info!("Spawned {} composites", stage.len());

        Ok(Self {
            config,
            stage,
            tick: 0,
            rebuilds: 0,
            patched_nodes: 0,
            preset,
            lamp,
            junior,
            leg,
            snake,
            mobile,
            clown,
            fence,
            figure,
            statics,
        })
    }

    fn spawn(
        stage: &mut Stage,
        preset: &PresetFile,
        builder: Box<dyn CompositeBuilder>,
        at: Vec3,
    ) -> anyhow::Result<LiveComposite> {
        let name = builder.name();
        LiveComposite::spawn_placed(
            stage,
            builder,
            &preset.partial_for(name),
            TransformPatch::default().translation(at),
        )
        .with_context(|| format!("Failed to spawn {name}"))
    }

    fn spawn_town(
        stage: &mut Stage,
        preset: &PresetFile,
        config: &DemoConfig,
    ) -> anyhow::Result<Vec<LiveComposite>> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut town = Vec::with_capacity(config.town_size);

        for _ in 0..config.town_size {
            let bottom: f32 = rng.gen_range(2.0..4.0);
            let middle = bottom * rng.gen_range(0.6..0.8);
            let top = middle * rng.gen_range(0.5..0.7);

            let mut partial = preset.partial_for("snowperson");
            partial.insert("bot_size", bottom);
            partial.insert("mid_size", middle);
            partial.insert("top_size", top);

            let at = Vec3::new(rng.gen_range(40.0..100.0), 0.0, rng.gen_range(-30.0..30.0));
            let snowperson = LiveComposite::spawn_placed(
                stage,
                Box::new(SnowPerson),
                &partial,
                TransformPatch::default()
                    .translation(at)
                    .rotation(Vec3::new(0.0, rng.gen_range(0.0..std::f32::consts::TAU), 0.0)),
            )
            .context("Failed to spawn a snowperson")?;
            town.push(snowperson);
        }

        Ok(town)
    }

    fn spawn_chess_set(stage: &mut Stage, preset: &PresetFile) -> anyhow::Result<Vec<LiveComposite>> {
        let origin = Vec3::new(0.0, 0.0, 40.0);
        let mut set = vec![Self::spawn(stage, preset, Box::new(ChessBoard), origin)?];

        let square = |file: usize, rank: usize| {
            let offset = SQUARE_SIZE * 3.5;
            origin + Vec3::new(file as f32 * SQUARE_SIZE - offset, 0.0, rank as f32 * SQUARE_SIZE - offset)
        };
        // no queens or kings in the set
        let back_rank = [
            Some(PieceKind::Rook),
            Some(PieceKind::Knight),
            Some(PieceKind::Bishop),
            None,
            None,
            Some(PieceKind::Bishop),
            Some(PieceKind::Knight),
            Some(PieceKind::Rook),
        ];

        for (white, pawns, back) in [(true, 1, 0), (false, 6, 7)] {
            for file in 0..8 {
                let pieces = [(Some(PieceKind::Pawn), pawns), (back_rank[file], back)];
                for (kind, rank) in pieces.into_iter().filter_map(|(kind, rank)| Some((kind?, rank))) {
                    let builder = ChessPiece::new(kind);
                    let mut partial = preset.partial_for(builder.name());
                    partial.insert("white", white);
                    let piece = LiveComposite::spawn_placed(
                        stage,
                        Box::new(builder),
                        &partial,
                        TransformPatch::default().translation(square(file, rank)),
                    )
                    .with_context(|| format!("Failed to spawn {}", kind.name()))?;
                    set.push(piece);
                }
            }
        }

        Ok(set)
    }

    pub fn update(&mut self) -> anyhow::Result<()> {
        self.tick += 1;
        let time = self.tick as f32 * TICK_SECONDS;

        self.patched_nodes += self
            .lamp
            .patch(&mut self.stage, "elbow_angle", -90.0 + 30.0 * time.sin())?;
        self.patched_nodes += self
            .junior
            .patch(&mut self.stage, "shade_angle", 45.0 + 20.0 * (time * 2.0).sin())?;
        self.patched_nodes += self
            .leg
            .patch(&mut self.stage, "knee_rotation", -0.5 + 0.4 * (time * 3.0).sin())?;
        self.patched_nodes += self.mobile.patch(&mut self.stage, "top_angle", time * 0.5)?;
        self.patched_nodes += self
            .clown
            .patch(&mut self.stage, "shoulder_angle", 2.0 + 0.6 * (time * 4.0).sin())?;
        self.patched_nodes += self
            .figure
            .patch(&mut self.stage, "hat_angle", 0.3 * (time * 1.5).sin())?;

        let segments = self.snake.params().count("num_segments")?;
        let wave = (0..segments).map(|index| 0.3 * (time * 2.0 + index as f32 * 0.6).sin());
        let path = self
            .snake
            .apply(&mut self.stage, &ParameterRecord::new().list("joint_angles", wave))?;
        self.record(path);

        if self.tick == self.config.tick_count / 2 {
            // a structural change goes through a rebuild
            let grown = ParameterRecord::new().int("num_segments", segments as i64 + 5);
            let path = self.snake.apply(&mut self.stage, &grown)?;
            self.record(path);

            let path = self.fence.apply(
                &mut self.stage,
                &ParameterRecord::new().float("picket_turn", 0.05),
            )?;
            self.record(path);
        }

        Ok(())
    }

    fn record(&mut self, path: UpdatePath) {
        match path {
            UpdatePath::Patched(nodes) => self.patched_nodes += nodes,
            UpdatePath::Rebuilt => self.rebuilds += 1,
        }
    }

    pub fn summary(&self) {
        let nodes: usize = self.stage.iter().map(|(_, composite)| composite.len()).sum();
        log::info!(
            "{} ticks: {} composites, {} nodes, {} patched node updates, {} rebuilds",
            self.tick,
            self.stage.len(),
            nodes,
            self.patched_nodes,
            self.rebuilds
        );
        log::info!(
            "Live composites: {}, preset tables: {}",
            8 + self.statics.len(),
            self.preset.builders().count()
        );
        if let Some(bounds) = self.stage.bounds() {
            log::info!("Scene bounds: {:?} .. {:?}", bounds.min, bounds.max);
        }
        if let Some((_, elbow)) = self.stage.find("elbow") {
            log::debug!("first elbow node: {:?}", elbow);
        }
    }
}
