//! Rendering tests over the built-in sample and edge-case inputs.

use chartsense::charts::{ChartConfig, ChartKind, ChartRenderer, SvgChartRenderer};
use chartsense::data::{parse, Dataset, Delimiter};
use chartsense::view::{derive_view, ChartWorkspace};

const PLACEHOLDER: &str = "No data to display";

#[test]
fn test_every_kind_renders_svg() {
    let mut workspace = ChartWorkspace::new();
    let renderer = SvgChartRenderer::default();

    for kind in ChartKind::ALL {
        workspace.set_chart_kind(kind);
        let svg = renderer
            .render(workspace.dataset(), workspace.config())
            .unwrap_or_else(|e| panic!("{kind} failed: {e}"));

        assert!(svg.contains("<svg"), "{kind} produced no svg");
        assert!(!svg.contains(PLACEHOLDER), "{kind} rendered a placeholder");
    }
}

#[test]
fn test_cartesian_and_polar_kinds_draw_differently() {
    let mut workspace = ChartWorkspace::new();
    let renderer = SvgChartRenderer::default();

    workspace.set_chart_kind(ChartKind::Bar);
    let bar = renderer.render(workspace.dataset(), workspace.config()).unwrap();
    workspace.set_chart_kind(ChartKind::Pie);
    let pie = renderer.render(workspace.dataset(), workspace.config()).unwrap();
    workspace.set_chart_kind(ChartKind::Doughnut);
    let doughnut = renderer.render(workspace.dataset(), workspace.config()).unwrap();

    assert_ne!(bar, pie);
    assert_ne!(pie, doughnut);
    // Pie labels carry percentage shares.
    assert!(pie.contains("Ocak: "));
    assert!(pie.contains('%'));
}

#[test]
fn test_empty_dataset_renders_placeholder() {
    let renderer = SvgChartRenderer::new(400, 300);
    let config = ChartConfig::new(Delimiter::Comma);

    let svg = renderer.render(&Dataset::default(), &config).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains(PLACEHOLDER));
}

#[test]
fn test_text_only_column_renders_placeholder() {
    let view = derive_view("Name,City\nAli,Ankara\nAyşe,İzmir", Delimiter::Comma, &ChartConfig::default());
    assert!(view.config.y_axis.is_empty());

    let svg = SvgChartRenderer::default()
        .render(&view.dataset, &view.config)
        .unwrap();
    assert!(svg.contains(PLACEHOLDER));
}

#[test]
fn test_title_override() {
    let dataset = parse("Fruit,Count\nApple,3\nPear,5", Delimiter::Comma);
    let config = ChartConfig {
        x_axis: "Fruit".to_string(),
        y_axis: "Count".to_string(),
        chart_kind: ChartKind::Bar,
        ..ChartConfig::default()
    };

    let svg = SvgChartRenderer::default()
        .with_title("Fruit stock")
        .render(&dataset, &config)
        .unwrap();
    assert!(svg.contains("Fruit stock"));
}

#[test]
fn test_negative_values_render() {
    let dataset = parse("Month,Profit\nJan,-5\nFeb,3\nMar,-1.5", Delimiter::Comma);
    let renderer = SvgChartRenderer::default();

    for kind in ChartKind::ALL {
        let config = ChartConfig {
            x_axis: "Month".to_string(),
            y_axis: "Profit".to_string(),
            chart_kind: kind,
            ..ChartConfig::default()
        };
        let svg = renderer.render(&dataset, &config).unwrap();
        assert!(svg.contains("<svg"), "{kind} produced no svg");
    }
}
