//! Edge and face color integration tests
//!
//! Every test runs once per color channel.

mod common;

use ndarray::Array2;
use rstest::rstest;

use common::fixtures::{cycled_labels, cycled_values, scattered_points};
use implore_layers::{
    Color, ColorMode, ColorSpec, ColorTarget, LayerWarning, PointsConfig, PointsLayer,
    PropertyColumn, PropertyRow, PropertyValue,
};

fn red() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}

fn blue() -> Color {
    Color::rgb(0.0, 0.0, 1.0)
}

fn default_color(target: ColorTarget) -> Color {
    match target {
        ColorTarget::Edge => Color::rgb(0.0, 0.0, 0.0),
        ColorTarget::Face => Color::rgb(1.0, 1.0, 1.0),
    }
}

fn cycle_layer(target: ColorTarget, n: usize) -> PointsLayer {
    let config = PointsConfig::new()
        .with_property("point_type", cycled_labels(&["A", "B"], n))
        .with_color(target, "point_type")
        .with_color_cycle(target, ["red", "blue"]);
    PointsLayer::with_config(scattered_points(n, 2, 20.0), config).unwrap()
}

// === Direct ===

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_color_direct(#[case] target: ColorTarget) {
    let mut layer = PointsLayer::new(scattered_points(10, 2, 20.0)).unwrap();
    assert_eq!(layer.color_mode(target), ColorMode::Direct);
    assert!(layer.color(target).iter().all(|&c| c == default_color(target)));

    layer.set_selected_data([0]).unwrap();
    layer.set_current_color(target, "blue").unwrap();
    assert_eq!(layer.color(target)[0], blue());
    assert_eq!(layer.color(target)[1], default_color(target));

    layer.add_point(&[18.0, 18.0]).unwrap();
    assert_eq!(layer.color(target).len(), 11);
    assert_eq!(layer.color(target)[10], blue());

    layer.set_color(target, "red").unwrap();
    assert!(layer.color(target).iter().all(|&c| c == red()));

    let mut colors = vec![red(); 11];
    colors[3] = blue();
    layer.set_color(target, colors).unwrap();
    assert_eq!(layer.current_color(target), red());

    layer.set_selected_data([0, 2]).unwrap();
    layer.remove_selected();
    assert_eq!(layer.color(target).len(), 9);
    assert_eq!(layer.color(target)[1], blue());

    let err = layer.set_color(target, vec![red(); 3]).unwrap_err();
    assert!(err.is_value_error());
    assert_eq!(layer.color(target).len(), 9);

    assert!(layer.set_color(target, "not_a_color").unwrap_err().is_value_error());
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_color_from_components(#[case] target: ColorTarget) {
    let mut layer = PointsLayer::new(scattered_points(3, 2, 20.0)).unwrap();
    layer.set_color(target, [0.0, 0.0, 1.0]).unwrap();
    assert!(layer.color(target).iter().all(|&c| c == blue()));

    layer.set_color(target, "#ff0000").unwrap();
    assert_eq!(layer.current_color(target), red());
}

// === Cycle ===

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_color_cycle(#[case] target: ColorTarget) {
    let mut layer = cycle_layer(target, 10);
    assert_eq!(layer.color_mode(target), ColorMode::Cycle);
    assert_eq!(layer.color_property(target), Some("point_type"));
    let expected: Vec<Color> = (0..10).map(|i| if i % 2 == 0 { red() } else { blue() }).collect();
    assert_eq!(layer.color(target), expected.as_slice());

    layer.set_selected_data([0]).unwrap();
    layer.add_point(&[18.0, 18.0]).unwrap();
    assert_eq!(layer.color(target).len(), 11);
    assert_eq!(layer.color(target)[10], red());

    layer.set_selected_data([0, 2]).unwrap();
    layer.remove_selected();
    assert_eq!(layer.color(target).len(), 9);
    assert_eq!(layer.color(target)[0], blue());
    assert_eq!(layer.color(target)[8], red());
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_set_color_cycle(#[case] target: ColorTarget) {
    let mut layer = cycle_layer(target, 4);

    let green = Color::rgb(0.0, 128.0 / 255.0, 0.0);
    layer.set_color_cycle(target, ["green", "red"]).unwrap();
    assert_eq!(layer.color_cycle(target), &[green, red()]);
    assert_eq!(layer.color(target), &[green, red(), green, red()]);

    let err = layer
        .set_color_cycle(target, Vec::<ColorSpec>::new())
        .unwrap_err();
    assert!(err.is_value_error());
    assert_eq!(layer.color_cycle(target).len(), 2);
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_adding_value_color_cycle(#[case] target: ColorTarget) {
    let mut layer = cycle_layer(target, 10);
    layer.set_property_value("point_type", 0, "C").unwrap();
    layer.refresh_colors(false);

    let mapped: Vec<&PropertyValue> = layer.cycle_map(target).iter().map(|(v, _)| v).collect();
    assert!(mapped.contains(&&PropertyValue::from("C")));
    assert_eq!(layer.cycle_map(target).len(), 3);
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_add_color_cycle_to_empty_layer(#[case] target: ColorTarget) {
    let config = PointsConfig::new()
        .with_property("point_type", vec!["A"])
        .with_color(target, "point_type")
        .with_color_cycle(target, ["red", "blue"]);
    let mut layer = PointsLayer::with_config(Array2::zeros((0, 2)), config).unwrap();
    assert_eq!(layer.current_color(target), red());

    layer.add_point(&[10.0, 10.0]).unwrap();
    assert_eq!(layer.color(target), &[red()]);

    layer.set_selected_data([]).unwrap();
    let row: PropertyRow = [("point_type", "B")].into_iter().collect();
    layer.set_current_properties(row).unwrap();
    layer.add_point(&[12.0, 12.0]).unwrap();

    assert_eq!(layer.color(target), &[red(), blue()]);
    assert_eq!(
        layer.properties().column("point_type"),
        Some(&PropertyColumn::from(vec!["A", "B"]))
    );
}

// === Colormap ===

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_color_colormap(#[case] target: ColorTarget) {
    let config = PointsConfig::new()
        .with_property("point_type", cycled_values(&[0.0, 1.5], 10))
        .with_color(target, "point_type")
        .with_colormap(target, "gray");
    let mut layer = PointsLayer::with_config(scattered_points(10, 2, 20.0), config).unwrap();

    let black = Color::rgb(0.0, 0.0, 0.0);
    let white = Color::rgb(1.0, 1.0, 1.0);
    assert_eq!(layer.color_mode(target), ColorMode::Colormap);
    assert_eq!(layer.contrast_limits(target), Some((0.0, 1.5)));
    for (i, color) in layer.color(target).iter().enumerate() {
        let expected = if i % 2 == 0 { black } else { white };
        assert!(color.approx_eq(&expected, 1e-6));
    }

    layer.set_color_cycle(target, ["red", "blue"]).unwrap();
    assert!(layer.color(target)[1].approx_eq(&white, 1e-6));

    layer.set_selected_data([0]).unwrap();
    layer.add_point(&[18.0, 18.0]).unwrap();
    assert!(layer.color(target)[10].approx_eq(&black, 1e-6));

    layer.set_selected_data([0, 2]).unwrap();
    layer.remove_selected();
    assert_eq!(layer.color(target).len(), 9);

    layer.set_contrast_limits(target, 0.0, 3.0).unwrap();
    let gray = Color::rgb(0.5, 0.5, 0.5);
    assert!(layer.color(target)[7].approx_eq(&gray, 1e-6));

    assert!(layer
        .set_contrast_limits(target, 3.0, 0.0)
        .unwrap_err()
        .is_value_error());

    layer.set_colormap_name(target, "viridis").unwrap();
    assert_eq!(layer.colormap(target).name, "viridis");
    assert!(layer.set_colormap_name(target, "not_a_colormap").is_err());
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_empty_layer_with_colormap(#[case] target: ColorTarget) {
    let config = PointsConfig::new()
        .with_property("point_type", vec![1.5])
        .with_color(target, "point_type")
        .with_colormap(target, "grays");
    let mut layer = PointsLayer::with_config(Array2::zeros((0, 2)), config).unwrap();

    assert_eq!(layer.color_mode(target), ColorMode::Colormap);
    let white = Color::rgb(1.0, 1.0, 1.0);
    assert!(layer.current_color(target).approx_eq(&white, 1e-6));

    layer.add_point(&[10.0, 10.0]).unwrap();
    assert!(layer.color(target)[0].approx_eq(&white, 1e-6));
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_colormap_without_properties(#[case] target: ColorTarget) {
    let mut layer = PointsLayer::new(scattered_points(10, 2, 20.0)).unwrap();
    let err = layer.set_color_mode(target, ColorMode::Colormap).unwrap_err();
    assert!(err.is_value_error());
    let err = layer.set_color_mode(target, ColorMode::Cycle).unwrap_err();
    assert!(err.is_value_error());
    assert_eq!(layer.color_mode(target), ColorMode::Direct);
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_colormap_with_categorical_properties(#[case] target: ColorTarget) {
    let mut layer = cycle_layer(target, 10);
    let err = layer.set_color_mode(target, ColorMode::Colormap).unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(layer.color_mode(target), ColorMode::Cycle);
}

// === Mode switching ===

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_switch_color_mode(#[case] target: ColorTarget) {
    let config = PointsConfig::new()
        .with_property("point_truthiness", cycled_values(&[0.0, 1.0], 10))
        .with_property("point_type", cycled_labels(&["A", "B"], 10))
        .with_color(target, "red");
    let mut layer = PointsLayer::with_config(scattered_points(10, 2, 20.0), config).unwrap();
    assert!(layer.color(target).iter().all(|&c| c == red()));

    let warnings = layer.set_color_mode(target, ColorMode::Colormap).unwrap();
    assert_eq!(
        warnings,
        vec![LayerWarning::ColorPropertyAutoSelected {
            target,
            property: "point_truthiness".to_string(),
        }]
    );
    assert_eq!(layer.color_property(target), Some("point_truthiness"));
    let low = layer.colormap(target).sample(0.0);
    let high = layer.colormap(target).sample(1.0);
    assert!(layer.color(target)[0].approx_eq(&low, 1e-6));
    assert!(layer.color(target)[1].approx_eq(&high, 1e-6));

    let warnings = layer.set_color_mode_str(target, "cycle").unwrap();
    assert!(warnings.is_empty());
    let cycle = layer.color_cycle(target).to_vec();
    assert_eq!(layer.color(target)[0], cycle[0]);
    assert_eq!(layer.color(target)[1], cycle[1]);

    let before = layer.color(target).to_vec();
    layer.set_color_mode(target, ColorMode::Direct).unwrap();
    assert_eq!(layer.color(target), before.as_slice());

    assert!(layer.set_color_mode_str(target, "not_a_mode").is_err());
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_set_color_property(#[case] target: ColorTarget) {
    let config = PointsConfig::new()
        .with_property("value", cycled_values(&[0.0, 1.0], 4))
        .with_property("point_type", cycled_labels(&["A", "B"], 4))
        .with_color(target, "value");
    let mut layer = PointsLayer::with_config(scattered_points(4, 2, 20.0), config).unwrap();
    assert_eq!(layer.color_mode(target), ColorMode::Colormap);

    let err = layer.set_color_property(target, "point_type").unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(layer.color_property(target), Some("value"));

    assert!(layer.set_color_property(target, "missing").unwrap_err().is_value_error());
}

// === Properties and colors ===

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_dropping_color_property(#[case] target: ColorTarget) {
    let mut layer = cycle_layer(target, 10);
    let colors = layer.color(target).to_vec();

    let warnings = layer
        .set_properties([("not_point_type", cycled_labels(&["A", "B"], 10))])
        .unwrap();
    assert_eq!(
        warnings,
        vec![LayerWarning::ColorPropertyDropped {
            target,
            property: "point_type".to_string(),
        }]
    );
    assert_eq!(layer.color_mode(target), ColorMode::Direct);
    assert_eq!(layer.color_property(target), None);
    assert_eq!(layer.color(target), colors.as_slice());
}

#[rstest]
#[case(ColorTarget::Edge)]
#[case(ColorTarget::Face)]
fn test_categorical_properties_under_colormap(#[case] target: ColorTarget) {
    let config = PointsConfig::new()
        .with_property("value", cycled_values(&[0.0, 1.0], 4))
        .with_color(target, "value");
    let mut layer = PointsLayer::with_config(scattered_points(4, 2, 20.0), config).unwrap();

    let err = layer
        .set_properties([("value", cycled_labels(&["A", "B"], 4))])
        .unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(
        layer.properties().column("value"),
        Some(&cycled_values(&[0.0, 1.0], 4))
    );
}

#[test]
fn test_is_color_mapped() {
    let config = PointsConfig::new().with_property("point_type", cycled_labels(&["A", "B"], 3));
    let layer = PointsLayer::with_config(scattered_points(3, 2, 20.0), config).unwrap();

    assert!(layer.is_color_mapped("point_type").unwrap());
    assert!(!layer.is_color_mapped("red").unwrap());
    assert!(!layer.is_color_mapped(vec![red(), blue(), red()]).unwrap());
    assert!(layer.is_color_mapped("not_a_color").is_err());
}
