use nestling::{ComputeOptions, LayoutInput, LayoutKind, NodeConfig};

fn input() -> LayoutInput {
    LayoutInput::tree(
        NodeConfig::new("root")
            .with_layout(LayoutKind::Radial)
            .with_children(vec![NodeConfig::new("a"), NodeConfig::new("b")]),
    )
}

#[test]
fn compute_uses_default_engine() {
    let snap = nestling::compute(&input(), &ComputeOptions::default()).unwrap();
    assert_eq!(snap.stats.node_count, 3);
    assert_eq!(snap.wires.len(), 2);
    assert!(
        snap.same_layout(
            &nestling::Engine::new()
                .compute(&input(), &ComputeOptions::default())
                .unwrap()
        )
    );
}

#[test]
fn compute_surfaces_configuration_errors() {
    let err = nestling::compute(&input(), &ComputeOptions::default().with_router("spline"))
        .unwrap_err();
    assert_eq!(err.category(), nestling::ErrorCategory::Configuration);
}

#[cfg(feature = "render")]
#[test]
fn render_helpers_wrap_layout_and_export() {
    use nestling::render::{HeadlessError, SvgRenderOptions, render_flow_json, render_svg};

    let svg = render_svg(&input(), &ComputeOptions::default(), &SvgRenderOptions::default()).unwrap();
    assert_eq!(svg.matches("<rect ").count(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&render_flow_json(&input(), &ComputeOptions::default()).unwrap())
            .unwrap();
    assert_eq!(json["nodes"].as_array().map(Vec::len), Some(3));

    let err = render_svg(
        &input(),
        &ComputeOptions::default().with_router("spline"),
        &SvgRenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, HeadlessError::Layout(_)));
}
