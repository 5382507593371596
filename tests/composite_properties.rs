use armature::composites::{builder_by_name, catalogue, Lamp, Snake};
use armature::geometry::{make_primitive, Primitive, Topology};
use armature::math::evaluate_bezier;
use armature::params::{ParameterRecord, PresetFile};
use armature::scene_graph::{Composite, LiveComposite, Stage, UpdatePath};
use armature::{assembly::CompositeBuilder, Error};
use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn structure(composite: &Composite) -> (Vec<String>, usize) {
    let mut names: Vec<String> = composite.names().map(str::to_string).collect();
    names.sort();
    (names, composite.edges().len())
}

#[test]
fn empty_partial_resolves_to_defaults() {
    for builder in catalogue() {
        let resolved = builder.resolve(&ParameterRecord::new()).unwrap();
        assert_eq!(resolved.record(), &builder.defaults(), "{}", builder.name());
    }
}

#[test]
fn every_builder_builds_with_defaults() {
    for builder in catalogue() {
        let composite = builder.build_from(&ParameterRecord::new()).unwrap();
        assert_eq!(composite.label(), builder.name());
        assert!(composite.mesh_count() > 0, "{}", builder.name());
        assert!(composite.world_bounds().is_some(), "{}", builder.name());
    }
}

#[test]
fn overriding_one_key_changes_only_that_key() {
    let defaults = Lamp.defaults();
    let resolved = Lamp
        .resolve(&ParameterRecord::new().float("arm_length", 9.0))
        .unwrap();

    for (key, value) in resolved.record().iter() {
        if key == "arm_length" {
            assert_eq!(resolved.float(key).unwrap(), 9.0);
        } else {
            assert_eq!(Some(value), defaults.get(key), "{key}");
        }
    }
}

#[test]
fn unknown_keys_are_rejected_everywhere() {
    for builder in catalogue() {
        let err = builder
            .build_from(&ParameterRecord::new().float("no_such_key", 1.0))
            .unwrap_err();
        assert!(
            matches!(err, Error::UnknownParameter { ref key, .. } if key == "no_such_key"),
            "{}",
            builder.name()
        );
    }
}

#[test]
fn patching_keeps_names_and_edges() {
    let mut rng = StdRng::seed_from_u64(7);
    for name in ["lamp", "leg", "teddy_bear", "mobile", "clown", "fence", "figure"] {
        let builder = builder_by_name(name).unwrap();
        let mut composite = builder.build_from(&ParameterRecord::new()).unwrap();
        let before = structure(&composite);

        for joint in builder.joints() {
            let value = rng.gen_range(-1.0f32..1.0);
            joint.apply(&mut composite, &value.into()).unwrap();
        }

        assert_eq!(structure(&composite), before, "{name}");
    }
}

#[test]
fn face_groups_partition_every_mesh() {
    for builder in catalogue() {
        let composite = builder.build_from(&ParameterRecord::new()).unwrap();
        for (_, object) in composite.objects() {
            if let Some(geometry) = &object.geometry {
                assert!(geometry.groups_partition_indices(), "{}", geometry.label());
            }
        }
    }
}

#[test]
fn box_faces_wind_counter_clockwise_outward() {
    let geometry = make_primitive(&Primitive::cuboid(2.0, 3.0, 4.0)).unwrap();
    assert_eq!(geometry.topology(), Topology::Triangles);
    assert_eq!(geometry.groups().len(), 6);

    for [a, b, c] in geometry.triangles() {
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid) > 0.0, "{a} {b} {c}");
    }
}

#[test]
fn snake_chains_nest_exactly() {
    for count in [0i64, 1, 10] {
        let snake = Snake
            .build_from(&ParameterRecord::new().int("num_segments", count))
            .unwrap();

        let mut parent = snake.root();
        for index in 0..count {
            let segment = snake.find_by_name(&format!("segment{index}")).unwrap();
            assert_eq!(snake.parent(segment), Some(parent));
            parent = segment;
        }
        assert!(snake.find_by_name(&format!("segment{count}")).is_none());
    }
}

#[test]
fn bezier_samples_hit_both_endpoints() {
    let control = [
        Vec3::new(-3.0, 0.0, 0.0),
        Vec3::new(-1.0, 4.0, 1.0),
        Vec3::new(1.0, -4.0, 2.0),
        Vec3::new(3.0, 0.0, 0.0),
    ];
    let points = evaluate_bezier(control, 16).unwrap();
    assert_eq!(points.len(), 17);
    assert_eq!(points[0], control[0]);
    assert_eq!(points[16], control[3]);
}

#[test]
fn negative_counts_attach_nothing() {
    let mut stage = Stage::new();
    let result = LiveComposite::spawn(
        &mut stage,
        Box::new(Snake),
        &ParameterRecord::new().int("num_segments", -3),
    );

    assert!(matches!(result, Err(Error::InvalidStructure { .. })));
    assert!(stage.is_empty());
}

#[test]
fn patching_the_elbow_moves_only_the_elbow() {
    let mut stage = Stage::new();
    let mut lamp = LiveComposite::spawn(&mut stage, Box::new(Lamp), &ParameterRecord::new()).unwrap();

    let handle = lamp.handle();
    let snapshot = |stage: &Stage, name: &str| {
        let composite = stage.get(handle).unwrap();
        let id = composite.find_by_name(name).unwrap();
        composite.get_object_transform(id).unwrap().clone()
    };
    let base = snapshot(&stage, "base");
    let shade = snapshot(&stage, "shade");
    let elbow = snapshot(&stage, "elbow").rotation().z;

    let delta = 25.0f32;
    let elbow_angle = lamp.params().float("elbow_angle").unwrap() + delta;
    let path = lamp
        .apply(&mut stage, &ParameterRecord::new().float("elbow_angle", elbow_angle))
        .unwrap();

    assert_eq!(path, UpdatePath::Patched(1));
    assert_eq!(snapshot(&stage, "base"), base);
    assert_eq!(snapshot(&stage, "shade"), shade);
    let moved = snapshot(&stage, "elbow").rotation().z;
    assert!((moved - elbow - delta.to_radians()).abs() < 1e-5);
}

#[test]
fn restating_a_default_as_an_integer_patches_nothing() {
    let mut stage = Stage::new();
    let mut lamp = LiveComposite::spawn(&mut stage, Box::new(Lamp), &ParameterRecord::new()).unwrap();
    let handle = lamp.handle();
    assert_eq!(lamp.params().float("arm_length").unwrap(), 6.0);

    let path = lamp
        .apply(&mut stage, &ParameterRecord::new().int("arm_length", 6))
        .unwrap();

    assert_eq!(path, UpdatePath::Patched(0));
    assert_eq!(lamp.handle(), handle);
}

#[test]
fn presets_resolve_like_partials() {
    let preset = PresetFile::parse(
        r#"
        [teddy_bear]
        wireframe = true
        ears = false

        [snowperson]
        bot_size = 4
        "#,
    )
    .unwrap();

    let bear = builder_by_name("teddy_bear").unwrap();
    let composite = bear.build_from(&preset.partial_for("teddy_bear")).unwrap();
    assert!(composite.find_by_name("right ear").is_none());

    let snow = builder_by_name("snowperson").unwrap();
    let params = snow.resolve(&preset.partial_for("snowperson")).unwrap();
    assert_eq!(params.float("bot_size").unwrap(), 4.0);

    let typo = PresetFile::parse("[lamp]\nelbow_angel = 10.0\n").unwrap();
    assert!(matches!(
        Lamp.resolve(&typo.partial_for("lamp")),
        Err(Error::UnknownParameter { .. })
    ));
}
