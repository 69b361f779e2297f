//! One color channel (edge or face) of a point layer

use std::collections::BTreeSet;

use super::{default_color_cycle, transform_color, ColorMode, ColorSpec, ColorTarget};
use crate::array::remove_items;
use crate::colormap::{Color, Colormap};
use crate::error::{LayerResult, LayerWarning, TypeError, ValueError};
use crate::properties::{PropertyKind, PropertyRow, PropertyTable, PropertyValue};

/// Per-point colors plus the state used to derive them from properties.
///
/// `values` always has one entry per point; the owning layer keeps it in step
/// with the point set through the `on_points_*` hooks.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorChannel {
    target: ColorTarget,
    mode: ColorMode,
    property: Option<String>,
    values: Vec<Color>,
    current: Color,
    cycle: Vec<Color>,
    cycle_map: Vec<(PropertyValue, Color)>,
    colormap: Colormap,
    contrast_limits: Option<(f64, f64)>,
}

impl ColorChannel {
    /// A direct-mode channel with `n` points of color `current`
    pub fn new(target: ColorTarget, current: Color, n: usize) -> Self {
        Self {
            target,
            mode: ColorMode::Direct,
            property: None,
            values: vec![current; n],
            current,
            cycle: default_color_cycle(),
            cycle_map: Vec::new(),
            colormap: Colormap::default(),
            contrast_limits: None,
        }
    }

    pub fn target(&self) -> ColorTarget {
        self.target
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Property column driving the colors in cycle and colormap mode
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Per-point colors
    pub fn values(&self) -> &[Color] {
        &self.values
    }

    /// Color given to the next added point
    pub fn current(&self) -> Color {
        self.current
    }

    pub fn cycle(&self) -> &[Color] {
        &self.cycle
    }

    /// Categorical values seen so far and their assigned colors, in order of
    /// first encounter
    pub fn cycle_map(&self) -> &[(PropertyValue, Color)] {
        &self.cycle_map
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    pub fn contrast_limits(&self) -> Option<(f64, f64)> {
        self.contrast_limits
    }

    /// Whether `spec` names a property column rather than a color
    pub fn is_color_mapped(spec: &ColorSpec, properties: &PropertyTable) -> LayerResult<bool> {
        match spec {
            ColorSpec::Name(name) if properties.contains(name) => Ok(true),
            ColorSpec::Name(name) => {
                transform_color(name)?;
                Ok(false)
            }
            other => {
                other.to_colors()?;
                Ok(false)
            }
        }
    }

    /// Set colors from a spec for a layer of `n` points
    pub(crate) fn set_color(
        &mut self,
        spec: &ColorSpec,
        n: usize,
        properties: &PropertyTable,
    ) -> LayerResult<()> {
        match spec {
            ColorSpec::Name(name) if properties.contains(name) => {
                let kind = properties
                    .column(name)
                    .map(|c| c.kind())
                    .unwrap_or(PropertyKind::Continuous);
                self.property = Some(name.clone());
                self.mode = match kind {
                    PropertyKind::Categorical => ColorMode::Cycle,
                    PropertyKind::Continuous => ColorMode::Colormap,
                };
                self.refresh(properties, true);
            }
            ColorSpec::Array(_) => {
                let colors = spec.to_colors()?;
                let last = colors.last().copied();
                let values = match colors.as_slice() {
                    [single] => vec![*single; n],
                    _ if colors.len() == n => colors,
                    _ => {
                        return Err(ValueError::ColorArrayLength {
                            expected: n,
                            actual: colors.len(),
                        }
                        .into())
                    }
                };
                if let Some(last) = last {
                    self.current = last;
                }
                self.values = values;
                self.mode = ColorMode::Direct;
            }
            single => {
                let color = single.to_color()?;
                self.values = vec![color; n];
                self.current = color;
                self.mode = ColorMode::Direct;
            }
        }
        tracing::debug!("{} color set in {} mode", self.target, self.mode);
        Ok(())
    }

    /// Switch color mode. Returns a warning when the driving property had to
    /// be chosen automatically.
    pub(crate) fn set_mode(
        &mut self,
        mode: ColorMode,
        properties: &PropertyTable,
    ) -> LayerResult<Option<LayerWarning>> {
        if mode == ColorMode::Direct {
            self.mode = mode;
            return Ok(None);
        }

        let Some(first) = properties.first_name() else {
            return Err(ValueError::NoProperties {
                mode: mode.name().to_string(),
            }
            .into());
        };

        let (property, warning) = match self.property.as_deref() {
            Some(name) if properties.contains(name) => (name.to_string(), None),
            _ => (
                first.to_string(),
                Some(LayerWarning::ColorPropertyAutoSelected {
                    target: self.target,
                    property: first.to_string(),
                }),
            ),
        };

        let categorical = properties
            .column(&property)
            .is_some_and(|c| c.kind() == PropertyKind::Categorical);
        if mode == ColorMode::Colormap && categorical {
            return Err(TypeError::CategoricalColormap { property }.into());
        }

        self.property = Some(property);
        self.mode = mode;
        self.refresh(properties, true);
        tracing::debug!("{} color mode changed to {}", self.target, mode);
        Ok(warning.map(LayerWarning::emit))
    }

    /// Choose the property column that drives this channel
    pub(crate) fn set_property(
        &mut self,
        name: &str,
        properties: &PropertyTable,
    ) -> LayerResult<()> {
        let column = properties
            .column(name)
            .ok_or_else(|| ValueError::UnknownProperty {
                name: name.to_string(),
            })?;
        if self.mode == ColorMode::Colormap && column.kind() == PropertyKind::Categorical {
            return Err(TypeError::CategoricalColormap {
                property: name.to_string(),
            }
            .into());
        }
        self.property = Some(name.to_string());
        self.refresh(properties, true);
        Ok(())
    }

    /// Forget the driving property and fall back to direct colors
    pub(crate) fn drop_property(&mut self) -> Option<LayerWarning> {
        let property = self.property.take()?;
        self.mode = ColorMode::Direct;
        Some(
            LayerWarning::ColorPropertyDropped {
                target: self.target,
                property,
            }
            .emit(),
        )
    }

    /// Recompute colors from the property table.
    ///
    /// With `update_mapping` the cycle map is rebuilt from scratch and the
    /// contrast limits are refit to the column range.
    pub(crate) fn refresh(&mut self, properties: &PropertyTable, update_mapping: bool) {
        let Some(name) = self.property.clone() else {
            return;
        };
        let Some(column) = properties.column(&name) else {
            return;
        };

        match self.mode {
            ColorMode::Direct => {}
            ColorMode::Cycle => {
                if update_mapping {
                    self.cycle_map.clear();
                }
                let values = column.values();
                self.values = values.iter().map(|v| self.cycle_color(v)).collect();
            }
            ColorMode::Colormap => {
                let Some(values) = column.as_continuous() else {
                    return;
                };
                if update_mapping || self.contrast_limits.is_none() {
                    self.contrast_limits = column.range().or_else(|| {
                        properties
                            .default_value(&name)
                            .and_then(PropertyValue::as_f64)
                            .map(|v| (v, v))
                    });
                }
                self.values = values.iter().map(|&v| self.map_value(v)).collect();
            }
        }

        let current_row = properties.current().clone();
        self.current = self.color_for_row(&current_row);
    }

    /// Replace the cycle palette
    pub(crate) fn set_cycle(
        &mut self,
        cycle: Vec<Color>,
        properties: &PropertyTable,
    ) -> LayerResult<()> {
        if cycle.is_empty() {
            return Err(ValueError::EmptyColorCycle.into());
        }
        self.cycle = cycle;
        if self.mode == ColorMode::Cycle {
            self.refresh(properties, true);
        }
        Ok(())
    }

    pub(crate) fn set_colormap(&mut self, colormap: Colormap, properties: &PropertyTable) {
        self.colormap = colormap;
        if self.mode == ColorMode::Colormap {
            self.refresh(properties, false);
        }
    }

    pub(crate) fn set_contrast_limits(
        &mut self,
        low: f64,
        high: f64,
        properties: &PropertyTable,
    ) -> LayerResult<()> {
        if low > high || low.is_nan() || high.is_nan() {
            return Err(ValueError::ContrastLimits { low, high }.into());
        }
        self.contrast_limits = Some((low, high));
        if self.mode == ColorMode::Colormap {
            self.refresh(properties, false);
        }
        Ok(())
    }

    /// Set the color of future points; in direct mode also recolor the selection
    pub(crate) fn set_current(&mut self, color: Color, selected: &BTreeSet<usize>) {
        self.current = color;
        if self.mode == ColorMode::Direct {
            for &index in selected {
                if let Some(value) = self.values.get_mut(index) {
                    *value = color;
                }
            }
        }
    }

    /// Take the current color from point `index`
    pub(crate) fn select(&mut self, index: usize) {
        if let Some(color) = self.values.get(index) {
            self.current = *color;
        }
    }

    /// Append `n` colors derived from the current property row
    pub(crate) fn on_points_added(&mut self, n: usize, current_row: &PropertyRow) {
        let color = self.color_for_row(current_row);
        self.values.extend(std::iter::repeat(color).take(n));
    }

    /// Append explicit colors (paste)
    pub(crate) fn append(&mut self, colors: &[Color]) {
        self.values.extend_from_slice(colors);
    }

    pub(crate) fn on_points_removed(&mut self, removed: &BTreeSet<usize>) {
        remove_items(&mut self.values, removed);
    }

    pub(crate) fn truncate(&mut self, n: usize) {
        self.values.truncate(n);
    }

    fn color_for_row(&mut self, row: &PropertyRow) -> Color {
        let value = self
            .property
            .as_deref()
            .and_then(|name| row.get(name))
            .cloned();

        match (self.mode, value) {
            (ColorMode::Cycle, Some(value)) => self.cycle_color(&value),
            (ColorMode::Colormap, Some(PropertyValue::Continuous(v))) => self.map_value(v),
            _ => self.current,
        }
    }

    /// Color assigned to a categorical value, assigning the next cycle color
    /// on first encounter
    fn cycle_color(&mut self, value: &PropertyValue) -> Color {
        if let Some((_, color)) = self.cycle_map.iter().find(|(v, _)| same_key(v, value)) {
            return *color;
        }
        let color = self
            .cycle
            .get(self.cycle_map.len() % self.cycle.len().max(1))
            .copied()
            .unwrap_or(self.current);
        self.cycle_map.push((value.clone(), color));
        color
    }

    fn map_value(&self, value: f64) -> Color {
        let (low, high) = self.contrast_limits.unwrap_or((value, value));
        let t = if high > low {
            ((value - low) / (high - low)).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.colormap.sample(t as f32)
    }
}

/// Cycle map key equality; NaN matches NaN
fn same_key(a: &PropertyValue, b: &PropertyValue) -> bool {
    match (a, b) {
        (PropertyValue::Continuous(x), PropertyValue::Continuous(y)) => {
            x == y || (x.is_nan() && y.is_nan())
        }
        _ => a == b,
    }
}
