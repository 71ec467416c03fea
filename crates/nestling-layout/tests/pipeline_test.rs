use nestling_core::geom::point;
use nestling_core::{
    ComputeOptions, Error, ErrorCategory, GraphEdge, GraphNode, LayoutInput, LayoutKind,
    LimitKind, LimitPolicy, LimitsOverride, NodeConfig, TuningOverride, ValidationIssueKind,
    ValidationPolicy,
};
use nestling_layout::pipeline::place::enforce_tree_limits;
use nestling_layout::{Engine, GridStrategy, StrategyRegistry};
use serde_json::json;
use std::sync::Arc;

fn chain(depth: usize) -> NodeConfig {
    let mut node = NodeConfig::new(format!("n{depth}"));
    for d in (0..depth).rev() {
        node = NodeConfig::new(format!("n{d}")).with_child(node);
    }
    node
}

fn fan(n: usize) -> NodeConfig {
    NodeConfig::new("root").with_children((0..n).map(|i| NodeConfig::new(format!("c{i}"))).collect())
}

fn limits(policy: LimitPolicy) -> LimitsOverride {
    LimitsOverride {
        policy: Some(policy),
        ..Default::default()
    }
}

#[test]
fn depth_limit_throws_by_default() {
    let options = ComputeOptions::default().with_limits(LimitsOverride {
        max_depth: Some(2),
        ..Default::default()
    });
    let err = Engine::new()
        .compute(&LayoutInput::tree(chain(4)), &options)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::LimitExceeded {
            limit: LimitKind::Depth,
            actual: 4,
            max: 2
        }
    ));
    assert_eq!(err.category(), ErrorCategory::Limit);
}

#[test]
fn depth_limit_truncates_or_warns_into_a_partial_snapshot() {
    for policy in [LimitPolicy::Truncate, LimitPolicy::Warn] {
        let options = ComputeOptions::default().with_limits(LimitsOverride {
            max_depth: Some(2),
            ..limits(policy)
        });
        let snap = Engine::new()
            .compute(&LayoutInput::tree(chain(4)), &options)
            .unwrap();

        assert_eq!(snap.stats.max_depth, 2);
        assert_eq!(snap.boxes.keys().collect::<Vec<_>>(), vec!["n0", "n1", "n2"]);
        assert_eq!(snap.wires.len(), 2);
        let notices = &snap.meta.as_ref().unwrap().notices;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].limit, LimitKind::Depth);
        assert_eq!((notices[0].actual, notices[0].max), (4, 2));
    }
}

#[test]
fn child_lists_are_capped_before_placement() {
    let options = ComputeOptions::default().with_limits(LimitsOverride {
        max_children_per_node: Some(3),
        ..limits(LimitPolicy::Truncate)
    });
    let snap = Engine::new()
        .compute(&LayoutInput::tree(fan(5)), &options)
        .unwrap();
    assert_eq!(snap.boxes.len(), 4);
    assert_eq!(snap.wires.len(), 3);
    assert!(snap.node("c3").is_none());

    let notice = &snap.meta.as_ref().unwrap().notices[0];
    assert_eq!(notice.limit, LimitKind::ChildrenPerNode);
    assert_eq!(notice.node_id.as_deref(), Some("root"));
}

#[test]
fn node_limit_keeps_the_first_nodes_in_pre_order() {
    let tree = NodeConfig::new("r")
        .with_child(NodeConfig::new("a").with_child(NodeConfig::new("a0")))
        .with_child(NodeConfig::new("b"))
        .with_child(NodeConfig::new("c"));
    let lim = nestling_core::Limits {
        max_nodes: 3,
        policy: LimitPolicy::Truncate,
        ..Default::default()
    };
    let (pruned, notices) = enforce_tree_limits(&tree, &lim).unwrap();

    let mut ids = Vec::new();
    pruned.visit(&mut |n, _| ids.push(n.id.clone()));
    assert_eq!(ids, vec!["r", "a", "a0"]);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].limit, LimitKind::Nodes);
    // Input is left untouched.
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn edge_limit_bounds_routing() {
    let truncate = ComputeOptions::default().with_limits(LimitsOverride {
        max_edges: Some(2),
        ..limits(LimitPolicy::Truncate)
    });
    let snap = Engine::new()
        .compute(&LayoutInput::tree(fan(4)), &truncate)
        .unwrap();
    assert_eq!(snap.wires.len(), 4);
    assert_eq!(snap.stats.edge_count, 4);
    let routed: Vec<bool> = snap.wires.iter().map(|w| w.points.is_some()).collect();
    assert_eq!(routed, vec![true, true, false, false]);
    let notices = &snap.meta.as_ref().unwrap().notices;
    assert_eq!(notices.last().map(|n| n.limit), Some(LimitKind::Edges));

    let throw = ComputeOptions::default().with_limits(LimitsOverride {
        max_edges: Some(2),
        ..Default::default()
    });
    let err = Engine::new()
        .compute(&LayoutInput::tree(fan(4)), &throw)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::LimitExceeded {
            limit: LimitKind::Edges,
            ..
        }
    ));
}

fn broken_graph() -> LayoutInput {
    LayoutInput::graph(
        vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("a")],
        vec![GraphEdge::new("a", "a"), GraphEdge::new("a", "zz")],
    )
}

#[test]
fn validation_policy_decides_whether_issues_abort() {
    let engine = Engine::new();

    let snap = engine
        .compute(&broken_graph(), &ComputeOptions::default())
        .unwrap();
    let kinds: Vec<_> = snap
        .meta
        .as_ref()
        .unwrap()
        .validation
        .iter()
        .map(|i| i.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ValidationIssueKind::DuplicateId,
            ValidationIssueKind::SelfLoop,
            ValidationIssueKind::MissingEndpoint,
        ]
    );
    assert_eq!(snap.boxes.len(), 2);
    assert!(snap.wires.is_empty());

    let ignored = engine
        .compute(
            &broken_graph(),
            &ComputeOptions::default().with_validation_policy(ValidationPolicy::Ignore),
        )
        .unwrap();
    assert_eq!(ignored.meta.unwrap().validation.len(), 3);

    let err = engine
        .compute(
            &broken_graph(),
            &ComputeOptions::default().with_validation_policy(ValidationPolicy::Error),
        )
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    match err {
        Error::InvalidInput { issues } => assert_eq!(issues.len(), 3),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn graph_input_is_stacked_vertically() {
    let input = LayoutInput::graph(
        vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("c")],
        vec![GraphEdge::new("a", "b"), GraphEdge::new("b", "c")],
    );
    let snap = Engine::new()
        .compute(&input, &ComputeOptions::default())
        .unwrap();

    let tops: Vec<_> = snap.boxes.values().map(|b| b.position).collect();
    assert_eq!(
        tops,
        vec![point(0.0, 0.0), point(0.0, 60.0), point(0.0, 120.0)]
    );
    let depths: Vec<_> = snap.boxes.values().map(|b| b.depth).collect();
    assert_eq!(depths, vec![0, 1, 2]);

    assert_eq!(snap.wires.len(), 2);
    assert_eq!(snap.wires[0].id, "a->b");
    assert_eq!(
        snap.wires[0].points,
        Some(vec![point(50.0, 25.0), point(50.0, 85.0)])
    );
}

#[test]
fn unknown_keys_are_configuration_errors() {
    let mut engine = Engine::new();
    let input = LayoutInput::tree(fan(2).with_layout(LayoutKind::Radial));

    let err = engine
        .compute(&input, &ComputeOptions::default().with_router("bezier"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownRouter { ref name } if name == "bezier"));
    assert_eq!(err.category(), ErrorCategory::Configuration);

    let err = engine
        .compute_json("yaml", &json!({}), &ComputeOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownInput { .. }));

    *engine.strategies_mut() = StrategyRegistry::new(Arc::new(GridStrategy));
    let err = engine
        .compute(&input, &ComputeOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownStrategy { ref kind } if kind == "radial"));
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn registries_list_their_defaults() {
    let engine = Engine::new();
    assert_eq!(
        engine.strategies().list(),
        vec![LayoutKind::Grid, LayoutKind::Radial]
    );
    assert_eq!(engine.strategies().fallback_kind(), LayoutKind::Grid);
    assert_eq!(
        engine.routers().list(),
        vec!["line", "line-perimeter", "ortho"]
    );
    assert_eq!(engine.inputs().list(), vec!["graph", "tree"]);
}

#[test]
fn json_payloads_go_through_input_adapters() {
    let engine = Engine::new();
    let options = ComputeOptions::default();

    let wrapped = json!({
        "root": {
            "id": "r",
            "layout": "radial",
            "mode": "nested",
            "children": [{ "id": "a" }, { "id": "b" }, { "id": "c" }]
        }
    });
    let a = engine.compute_json("tree", &wrapped, &options).unwrap();
    let bare = engine
        .compute_json("tree", &wrapped["root"], &options)
        .unwrap();
    assert!(a.same_layout(&bare));
    assert_eq!(a.children_of("r").count(), 3);

    let graph = json!({
        "nodes": [{ "id": "x" }, { "id": "y", "label": "Why" }],
        "edges": [{ "source": "x", "target": "y" }]
    });
    let snap = engine.compute_json("graph", &graph, &options).unwrap();
    assert_eq!(snap.node("y").unwrap().label.as_deref(), Some("Why"));
    assert_eq!(snap.wires.len(), 1);

    let err = engine
        .compute_json("graph", &json!({ "nodes": 3 }), &options)
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn tagged_input_and_options_deserialize_from_json() {
    let input: LayoutInput = serde_json::from_value(json!({
        "kind": "tree",
        "root": { "id": "r", "children": [{ "id": "a" }] }
    }))
    .unwrap();
    let options: ComputeOptions = serde_json::from_value(json!({
        "nodeSize": [40.0, 20.0],
        "spacing": 4.0,
        "routerName": "ortho",
        "collectOverlaps": true,
        "limitsOverride": { "maxDepth": 3 },
        "tuningOverride": { "itemPadRatio": 1.0 }
    }))
    .unwrap();
    let snap = Engine::new().compute(&input, &options).unwrap();

    assert_eq!(snap.node("a").unwrap().size.width, 40.0);
    assert_eq!(
        snap.meta.as_ref().unwrap().router.as_deref(),
        Some("ortho")
    );
    assert!(snap.stats.overlaps.is_some());
}

#[test]
fn overrides_apply_to_one_call_only() {
    let engine = Engine::new();
    let input = LayoutInput::tree(fan(4));
    let before = engine.compute(&input, &ComputeOptions::default()).unwrap();

    let tuned = ComputeOptions::default().with_tuning(TuningOverride {
        item_pad_ratio: Some(3.0),
        ..Default::default()
    });
    let during = engine.compute(&input, &tuned).unwrap();
    let after = engine.compute(&input, &ComputeOptions::default()).unwrap();

    assert!(!before.same_layout(&during));
    assert!(before.same_layout(&after));
    assert_eq!(engine.tuning(), &nestling_core::Tuning::default());
}

#[test]
fn snapshot_metadata_carries_plan_and_router() {
    let root = NodeConfig::new("root")
        .nested(LayoutKind::Radial)
        .with_child(NodeConfig::new("a"));
    let snap = Engine::new()
        .compute(&LayoutInput::tree(root), &ComputeOptions::default())
        .unwrap();
    let meta = snap.meta.unwrap();
    assert_eq!(meta.router.as_deref(), Some("line"));
    assert_eq!(meta.plan.len(), 2);
    assert_eq!(meta.plan.resolve("root").layout, LayoutKind::Radial);
    assert_eq!(meta.plan.resolve("a").layout, LayoutKind::Grid);
    assert!(snap.version > 0);
}

#[test]
fn cache_key_tracks_inputs_and_options() {
    let engine = Engine::new();
    let input = LayoutInput::tree(fan(3));
    let options = ComputeOptions::default();

    let k = engine.cache_key(&input, &options);
    assert_eq!(k, engine.cache_key(&input.clone(), &options.clone()));
    assert_ne!(k, engine.cache_key(&input, &options.clone().with_spacing(12.0)));
    assert_ne!(k, engine.cache_key(&LayoutInput::tree(fan(4)), &options));
}

#[test]
fn one_engine_serves_concurrent_calls() {
    let engine = Engine::new();
    let input = LayoutInput::tree(fan(6).nested(LayoutKind::Radial));
    let reference = engine.compute(&input, &ComputeOptions::default()).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = &engine;
                let input = &input;
                s.spawn(move || {
                    let options = ComputeOptions::default().with_spacing(10.0 + i as f64);
                    engine.compute(input, &options).unwrap()
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let snap = h.join().unwrap();
            assert_eq!(snap.same_layout(&reference), i == 0);
        }
    });
}
