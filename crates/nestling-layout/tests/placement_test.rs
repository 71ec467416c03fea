use nestling_core::geom::{
    Rect, SizeExt, point, rect_center, rect_contains, rects_overlap, size,
};
use nestling_core::{
    AuditIssueKind, AuditSeverity, ComputeOptions, Error, LayoutInput, LayoutKind, LayoutSnapshot,
    LimitKind, Limits, Mode, NodeConfig, Plan, Tuning,
};
use nestling_layout::strategy::content_rect;
use nestling_layout::{
    Engine, GridStrategy, LayoutStrategy, PlacementContext, RadialStrategy, StrategyRegistry,
    fit_scale, place_tree,
};
use std::f64::consts::TAU;

fn leaves(prefix: &str, n: usize) -> Vec<NodeConfig> {
    (0..n).map(|i| NodeConfig::new(format!("{prefix}{i}"))).collect()
}

fn compute(root: NodeConfig) -> LayoutSnapshot {
    Engine::new()
        .compute(&LayoutInput::tree(root), &ComputeOptions::default())
        .unwrap()
}

fn inner_rect(snapshot: &LayoutSnapshot, id: &str) -> Rect {
    let b = snapshot.node(id).unwrap();
    content_rect(b.position, b.size, 10.0, &Tuning::default())
}

#[test]
fn grid_graph_places_a_two_by_two_block_below_the_root() {
    let root = NodeConfig::new("root").at(0.0, 0.0).with_children(leaves("c", 4));
    let snap = compute(root);

    assert_eq!(snap.boxes.len(), 5);
    assert_eq!(snap.wires.len(), 4);
    for (i, w) in snap.wires.iter().enumerate() {
        assert_eq!(w.source, "root");
        assert_eq!(w.target, format!("c{i}"));
    }

    let centers: Vec<_> = (0..4)
        .map(|i| snap.node(&format!("c{i}")).unwrap().center())
        .collect();
    assert_eq!(
        centers,
        vec![
            point(-5.0, 93.0),
            point(105.0, 93.0),
            point(-5.0, 153.0),
            point(105.0, 153.0),
        ]
    );

    let root_box = snap.node("root").unwrap();
    let block_mid_x = (centers[0].x + centers[1].x) / 2.0;
    assert_eq!(block_mid_x, root_box.center().x);
    assert!(centers.iter().all(|c| c.y > root_box.rect().max_y()));

    for i in 0..4 {
        let b = snap.node(&format!("c{i}")).unwrap();
        assert_eq!(b.size, size(100.0, 50.0));
        assert_eq!(b.parent_id, None);
        assert_eq!(b.depth, 1);
    }
}

#[test]
fn grid_nested_cells_tile_the_autosized_parent_exactly() {
    let tuning = Tuning::default();
    let spacing = 8.0;
    let parent_size = GridStrategy.autosize_parent(4, size(40.0, 40.0), spacing, &tuning);
    let ids = ["a", "b", "c", "d"];
    let frames = GridStrategy.nested_frames(&ids, parent_size, spacing, &tuning);
    let inner = content_rect(point(0.0, 0.0), parent_size, spacing, &tuning);

    assert_eq!(frames.len(), 4);
    let area: f64 = frames.cells().iter().map(|c| c.size.area()).sum();
    assert_eq!(area, inner.size.area());

    let cells = frames.cells();
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            assert!(!rects_overlap(a, b));
        }
    }
    // Adjacent cells share an edge with no gap.
    assert_eq!(cells[0].max_x(), cells[1].min_x());
    assert_eq!(cells[0].max_y(), cells[2].min_y());
}

#[test]
fn grid_nested_tiles_any_child_count() {
    for n in 1..=11 {
        let root = NodeConfig::new("root")
            .nested(LayoutKind::Grid)
            .with_children(leaves("c", n));
        let snap = compute(root);
        let inner = inner_rect(&snap, "root");
        let frames =
            GridStrategy.nested_frames(
                &(0..n).map(|_| "x").collect::<Vec<_>>(),
                snap.node("root").unwrap().size,
                10.0,
                &Tuning::default(),
            );
        let area: f64 = frames.cells().iter().map(|c| c.size.area()).sum();
        assert!((area - inner.size.area()).abs() < 1e-6, "n = {n}");
        assert_eq!(snap.children_of("root").count(), n);
    }
}

#[test]
fn radial_nested_children_sit_evenly_on_one_ring() {
    let root = NodeConfig::new("root")
        .nested(LayoutKind::Radial)
        .with_children(leaves("c", 6));
    let snap = compute(root);
    let tuning = Tuning::default();
    let center = rect_center(&inner_rect(&snap, "root"));

    let dists: Vec<f64> = (0..6)
        .map(|i| snap.node(&format!("c{i}")).unwrap().center().distance_to(center))
        .collect();
    for d in &dists {
        assert!((d - dists[0]).abs() <= 1.0);
    }

    for i in 0..6 {
        let c = snap.node(&format!("c{i}")).unwrap().center();
        let actual = (c.y - center.y).atan2(c.x - center.x);
        let expected = tuning.start_angle() + tuning.direction() * (i as f64 / 6.0) * TAU;
        let diff = (actual - expected).rem_euclid(TAU);
        assert!(diff < 1e-6 || TAU - diff < 1e-6, "child {i}: {actual} vs {expected}");
    }
}

#[test]
fn radial_graph_ring_grows_with_level() {
    let tuning = Tuning::default();
    let node = size(100.0, 50.0);
    assert!(tuning.radial_ring_radius(node, 10.0, 1) > tuning.radial_ring_radius(node, 10.0, 0));

    let root = NodeConfig::new("root")
        .with_layout(LayoutKind::Radial)
        .with_children(leaves("c", 5));
    let snap = compute(root);
    let center = snap.node("root").unwrap().center();
    let expected = tuning.radial_ring_radius(node, 10.0, 0);
    for i in 0..5 {
        let d = snap.node(&format!("c{i}")).unwrap().center().distance_to(center);
        assert!((d - expected).abs() < 1e-9);
    }
    assert_eq!(snap.wires.len(), 5);
}

fn mixed_tree() -> NodeConfig {
    NodeConfig::new("root")
        .nested(LayoutKind::Radial)
        .with_child(
            NodeConfig::new("grid")
                .nested(LayoutKind::Grid)
                .with_children(leaves("g", 4)),
        )
        .with_child(
            NodeConfig::new("ring")
                .nested(LayoutKind::Radial)
                .with_children(leaves("r", 3)),
        )
        .with_child(NodeConfig::new("l0"))
        .with_child(NodeConfig::new("l1"))
        .with_child(NodeConfig::new("plain").with_children(leaves("p", 2)))
}

#[test]
fn nested_children_stay_inside_their_parent_content() {
    let snap = compute(mixed_tree());
    let tuning = Tuning::default();

    let mut checked = 0;
    for b in snap.boxes.values() {
        let Some(parent_id) = b.parent_id.as_deref() else {
            continue;
        };
        let inner = inner_rect(&snap, parent_id);
        assert!(
            rect_contains(&inner, &b.rect(), tuning.containment_tolerance),
            "`{}` escapes `{parent_id}`",
            b.id
        );
        checked += 1;
    }
    assert_eq!(checked, 12);

    let meta = snap.meta.as_ref().unwrap();
    assert!(
        meta.audit
            .iter()
            .all(|i| i.kind != AuditIssueKind::OutsideParent
                && i.kind != AuditIssueKind::OversizedChild),
        "{:?}",
        meta.audit
    );
}

#[test]
fn graph_children_of_nested_nodes_get_no_parent_id() {
    let snap = compute(mixed_tree());
    assert_eq!(snap.node("plain").unwrap().parent_id.as_deref(), Some("root"));
    assert_eq!(snap.node("p0").unwrap().parent_id, None);
    assert_eq!(snap.node("p1").unwrap().parent_id, None);

    // Only Graph-mode edges produce wires.
    let wired: Vec<_> = snap.wires.iter().map(|w| w.target.as_str()).collect();
    assert_eq!(wired, vec!["p0", "p1"]);
}

#[test]
fn depth_matches_tree_distance_from_root() {
    let tree = mixed_tree();
    let snap = compute(tree.clone());
    let mut expected = Vec::new();
    tree.visit(&mut |n, d| expected.push((n.id.clone(), d)));

    assert_eq!(snap.boxes.len(), expected.len());
    for (id, depth) in expected {
        assert_eq!(snap.node(&id).unwrap().depth, depth, "{id}");
    }
    assert_eq!(snap.stats.max_depth, 2);
}

#[test]
fn identical_inputs_give_identical_layouts() {
    let engine = Engine::new();
    let input = LayoutInput::tree(mixed_tree());
    let options = ComputeOptions::default().with_overlaps();
    let a = engine.compute(&input, &options).unwrap();
    let b = engine.compute(&input, &options).unwrap();

    assert!(a.same_layout(&b));
    assert_ne!(a.version, b.version);
    assert!(b.version > a.version);
}

#[test]
fn root_honors_explicit_position_and_nested_size() {
    let root = NodeConfig::new("root")
        .at(40.0, -20.0)
        .nested(LayoutKind::Grid)
        .with_children(leaves("c", 2));
    let snap = compute(root);
    let b = snap.node("root").unwrap();
    assert_eq!(b.position, point(40.0, -20.0));

    let tuning = Tuning::default();
    let expected = GridStrategy.preferred_size(
        2,
        tuning.nested_unit_size(size(100.0, 50.0), 1),
        10.0,
        Mode::Nested,
        &tuning,
    );
    assert_eq!(b.size, expected);
}

#[test]
fn nested_unit_size_shrinks_with_depth_down_to_the_floor() {
    let tuning = Tuning::default();
    let base = size(100.0, 50.0);
    let l1 = tuning.nested_unit_size(base, 1);
    let l2 = tuning.nested_unit_size(base, 2);
    assert!(l2.width < l1.width && l1.width < base.width);
    let floor = tuning.nested_unit_size(base, 200);
    assert_eq!(floor, base.scale(tuning.nested_scale_floor));
}

#[test]
fn radial_fit_scale_shrinks_oversized_children() {
    // A radial container holding a much larger nested grid sibling.
    let root = NodeConfig::new("root")
        .nested(LayoutKind::Radial)
        .with_children(leaves("c", 3))
        .with_child(
            NodeConfig::new("big")
                .nested(LayoutKind::Grid)
                .with_children(leaves("b", 16)),
        );
    let snap = compute(root);
    let inner = inner_rect(&snap, "root");
    let big = snap.node("big").unwrap();
    assert!(big.size.max_side() <= Tuning::default().nested_child_max_fraction * inner.size.min_side() + 1e-9);
    assert!(rect_contains(&inner, &big.rect(), 1.0));

    let radial_issues: Vec<_> = snap
        .meta
        .as_ref()
        .unwrap()
        .audit
        .iter()
        .filter(|i| i.severity == AuditSeverity::Violation && i.parent_id == "root")
        .collect();
    assert!(radial_issues.is_empty(), "{radial_issues:?}");
}

#[test]
fn radial_preferred_size_is_square() {
    let tuning = Tuning::default();
    let s = RadialStrategy.preferred_size(8, size(40.0, 20.0), 10.0, Mode::Nested, &tuning);
    assert_eq!(s.width, s.height);
    assert_eq!(
        RadialStrategy.preferred_size(8, size(40.0, 20.0), 10.0, Mode::Graph, &tuning),
        size(40.0, 20.0)
    );
    assert!(RadialStrategy.nested_frames(&["a"], s, 10.0, &tuning).is_empty());
}

#[test]
fn radial_nested_siblings_never_overlap() {
    for n in 2..=12 {
        let root = NodeConfig::new("root")
            .nested(LayoutKind::Radial)
            .with_children(leaves("c", n));
        let snap = compute(root);
        let kids: Vec<_> = snap.children_of("root").collect();
        assert_eq!(kids.len(), n);
        for (i, a) in kids.iter().enumerate() {
            for b in &kids[i + 1..] {
                assert!(
                    !rects_overlap(&a.rect(), &b.rect()),
                    "n={n}: `{}` overlaps `{}`",
                    a.id,
                    b.id
                );
            }
        }
    }
}

#[test]
fn radial_packing_radius_spans_the_padded_diagonal() {
    let r = RadialStrategy::packing_radius(4, size(30.0, 40.0), 10.0);
    let chord = 2.0 * r * (std::f64::consts::PI / 4.0).sin();
    assert!((chord - 40.0_f64.hypot(50.0)).abs() < 1e-9);
    assert_eq!(RadialStrategy::packing_radius(1, size(30.0, 40.0), 10.0), 0.0);
}

fn deep_chain(levels: usize) -> NodeConfig {
    let mut node = NodeConfig::new(format!("n{levels}"));
    for i in (0..levels).rev() {
        node = NodeConfig::new(format!("n{i}")).with_child(node);
    }
    node
}

#[test]
fn placement_rejects_trees_deeper_than_the_limit() {
    let tuning = Tuning::default();
    let limits = Limits {
        max_depth: 2,
        ..Limits::default()
    };
    let plan = Plan::default();
    let strategies = StrategyRegistry::with_defaults();
    let cx = PlacementContext {
        tuning: &tuning,
        limits: &limits,
        strategies: &strategies,
        plan: &plan,
        node_size: size(100.0, 50.0),
        spacing: 10.0,
        origin: point(0.0, 0.0),
    };

    let err = place_tree(&deep_chain(3), &cx).unwrap_err();
    assert!(
        matches!(
            err,
            Error::LimitExceeded {
                limit: LimitKind::Depth,
                actual: 3,
                max: 2
            }
        ),
        "{err:?}"
    );
    assert!(place_tree(&deep_chain(2), &cx).is_ok());
}

#[test]
fn fit_scale_falls_back_to_the_floor_when_the_ring_is_too_tight() {
    let tuning = Tuning::default();
    // Ring radius no larger than the padding leaves no room at all.
    let k = fit_scale(3, 5.0, 5.0, size(10.0, 10.0), 50.0, &tuning);
    assert_eq!(k, tuning.fit_scale_floor);
    let k = fit_scale(3, 2.0, 5.0, size(10.0, 10.0), 50.0, &tuning);
    assert_eq!(k, tuning.fit_scale_floor);
}
