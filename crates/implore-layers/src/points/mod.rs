//! Point layer
//!
//! A [`PointsLayer`] owns an N×D coordinate array and every per-point array
//! derived from it: properties, sizes, and edge and face colors. All of them
//! are kept at N rows by routing every insertion and removal through the
//! layer, which fans the change out to each component.
//!
//! Editing operations validate their input before touching any array, so a
//! failed call leaves the layer unchanged.

mod clipboard;
mod interaction;
mod mode;
mod thumbnail;

pub use clipboard::Clipboard;
pub use interaction::InteractionBox;
pub use mode::{Blending, Mode, Symbol};
pub use thumbnail::{MAX_POINTS_THUMBNAIL, THUMBNAIL_SHAPE};

use std::collections::BTreeSet;

use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::array::remove_rows;
use crate::color::{ColorChannel, ColorMode, ColorSpec, ColorTarget};
use crate::colormap::{get_colormap, Color, Colormap};
use crate::config::PointsConfig;
use crate::dims::Dims;
use crate::error::{LayerResult, LayerWarning, TypeError, ValueError};
use crate::properties::{PropertyColumn, PropertyKind, PropertyRow, PropertyTable, PropertyValue};
use crate::size::{SizeModel, SizeSpec, DEFAULT_SIZE};
use crate::slice::{project, SliceView};

/// An editable set of n-dimensional points
#[derive(Clone, Debug)]
pub struct PointsLayer {
    name: String,
    data: Array2<f64>,
    dims: Dims,
    properties: PropertyTable,
    size: SizeModel,
    edge: ColorChannel,
    face: ColorChannel,
    selected: BTreeSet<usize>,
    mode: Mode,
    symbol: Symbol,
    blending: Blending,
    opacity: f64,
    visible: bool,
    edge_width: f64,
    n_dimensional: bool,
    coordinates: Vec<f64>,
    drag_start: Option<Vec<f64>>,
    clipboard: Option<Clipboard>,
    thumbnail: Array3<f32>,
}

impl PointsLayer {
    /// Create a layer with default options
    pub fn new(data: Array2<f64>) -> LayerResult<Self> {
        Self::with_config(data, PointsConfig::default())
    }

    /// Create a layer with no points
    pub fn empty(ndim: usize) -> LayerResult<Self> {
        Self::new(Array2::zeros((0, ndim)))
    }

    /// Create a layer from coordinates and options
    pub fn with_config(data: Array2<f64>, config: PointsConfig) -> LayerResult<Self> {
        let (n, ndim) = data.dim();
        if ndim < 2 {
            return Err(ValueError::DataDims { ndim }.into());
        }
        validate_opacity(config.opacity)?;

        let properties = PropertyTable::from_columns(config.properties.clone(), n)?;
        let sizes = config.size.resolve(n, ndim)?;
        let mut dims = Dims::new(ndim);
        dims.set_ndisplay(config.ndisplay)?;
        dims.update_range(&data);
        let edge = build_channel(ColorTarget::Edge, &config, n, &properties)?;
        let face = build_channel(ColorTarget::Face, &config, n, &properties)?;

        let mut layer = Self {
            name: config.name,
            data,
            dims,
            properties,
            size: SizeModel::new(sizes, DEFAULT_SIZE),
            edge,
            face,
            selected: BTreeSet::new(),
            mode: Mode::default(),
            symbol: config.symbol,
            blending: config.blending,
            opacity: config.opacity,
            visible: config.visible,
            edge_width: config.edge_width,
            n_dimensional: config.n_dimensional,
            coordinates: vec![0.0; ndim],
            drag_start: None,
            clipboard: None,
            thumbnail: Array3::zeros(THUMBNAIL_SHAPE),
        };
        layer.update_thumbnail();
        tracing::debug!("Created points layer '{}' with {} points", layer.name, n);
        Ok(layer)
    }

    // MARK: - Data

    /// N×D coordinates
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of dimensions of every point
    pub fn ndim(&self) -> usize {
        self.data.ncols()
    }

    /// Replace all coordinates.
    ///
    /// Per-point arrays are truncated or extended to the new number of points;
    /// extra points get the current properties, colors and size. A change in
    /// dimensionality resets the sizes and dims.
    pub fn set_data(&mut self, data: Array2<f64>) -> LayerResult<()> {
        let (n, ndim) = data.dim();
        if ndim < 2 {
            return Err(ValueError::DataDims { ndim }.into());
        }
        let old_n = self.len();

        if ndim != self.ndim() {
            self.dims.reset(ndim);
            self.size.reset(n, ndim);
            self.coordinates = vec![0.0; ndim];
            self.drag_start = None;
        } else if n < old_n {
            self.size.truncate(n);
        } else if n > old_n {
            self.size.on_points_added(n - old_n, &self.dims.displayed())?;
        }

        if n < old_n {
            self.properties.truncate(n);
            self.edge.truncate(n);
            self.face.truncate(n);
        } else if n > old_n {
            let added = n - old_n;
            self.properties.on_points_added(added);
            self.edge.on_points_added(added, self.properties.current());
            self.face.on_points_added(added, self.properties.current());
        }

        self.data = data;
        self.selected.retain(|&i| i < n);
        self.dims.update_range(&self.data);
        self.update_thumbnail();
        Ok(())
    }

    /// Append points, one per row of `coords`. The new points become the
    /// selection.
    pub fn add(&mut self, coords: ArrayView2<f64>) -> LayerResult<()> {
        if coords.ncols() != self.ndim() {
            return Err(ValueError::CoordinateDims {
                expected: self.ndim(),
                actual: coords.ncols(),
            }
            .into());
        }
        let added = coords.nrows();
        if added == 0 {
            return Ok(());
        }

        let start = self.len();
        self.data.append(Axis(0), coords)?;
        self.size.on_points_added(added, &self.dims.displayed())?;
        self.properties.on_points_added(added);
        self.edge.on_points_added(added, self.properties.current());
        self.face.on_points_added(added, self.properties.current());
        self.selected = (start..start + added).collect();

        self.dims.update_range(&self.data);
        self.update_thumbnail();
        tracing::debug!("Added {} points, {} total", added, self.len());
        Ok(())
    }

    /// Append a single point
    pub fn add_point(&mut self, coord: &[f64]) -> LayerResult<()> {
        let coords = ArrayView2::from_shape((1, coord.len()), coord)?;
        self.add(coords)
    }

    /// Delete the selected points and clear the selection
    pub fn remove_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let removed = std::mem::take(&mut self.selected);

        self.data = remove_rows(&self.data, &removed);
        self.size.on_points_removed(&removed);
        self.properties.on_points_removed(&removed);
        self.edge.on_points_removed(&removed);
        self.face.on_points_removed(&removed);

        self.dims.update_range(&self.data);
        self.update_thumbnail();
        tracing::debug!("Removed {} points, {} remaining", removed.len(), self.len());
    }

    /// Drag points so that they follow `coord`.
    ///
    /// The first call of a drag records the offset between `coord` and the
    /// center of the points; later calls translate the points on the displayed
    /// axes to keep that offset. Repeated indices move a point once. Call
    /// [`end_drag`](Self::end_drag) on release.
    pub fn move_points(&mut self, indices: &[usize], coord: &[f64]) -> LayerResult<()> {
        if indices.is_empty() {
            return Ok(());
        }
        if coord.len() != self.ndim() {
            return Err(ValueError::CoordinateDims {
                expected: self.ndim(),
                actual: coord.len(),
            }
            .into());
        }
        let indices: BTreeSet<usize> = indices.iter().copied().collect();
        self.check_indices(indices.iter().copied())?;

        let displayed = self.dims.displayed();
        let count = indices.len() as f64;
        let center: Vec<f64> = displayed
            .iter()
            .map(|&d| indices.iter().map(|&i| self.data[[i, d]]).sum::<f64>() / count)
            .collect();
        let offset = self
            .drag_start
            .get_or_insert_with(|| {
                displayed
                    .iter()
                    .zip(&center)
                    .map(|(&d, c)| coord[d] - c)
                    .collect()
            })
            .clone();

        for (k, &d) in displayed.iter().enumerate() {
            let shift = coord[d] - center[k] - offset[k];
            for &i in &indices {
                self.data[[i, d]] += shift;
            }
        }

        self.dims.update_range(&self.data);
        self.update_thumbnail();
        Ok(())
    }

    /// Finish a drag started by [`move_points`](Self::move_points)
    pub fn end_drag(&mut self) {
        self.drag_start = None;
    }

    // MARK: - Selection

    pub fn selected_data(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    /// Replace the selection.
    ///
    /// The current properties and colors are taken from the highest selected
    /// index; the current size is taken from the selection when all selected
    /// points share one displayed size.
    pub fn set_selected_data(
        &mut self,
        indices: impl IntoIterator<Item = usize>,
    ) -> LayerResult<()> {
        let selected: BTreeSet<usize> = indices.into_iter().collect();
        self.check_indices(selected.iter().copied())?;
        self.selected = selected;

        if let Some(&last) = self.selected.last() {
            self.properties.select_current(last);
            self.edge.select(last);
            self.face.select(last);
            self.size.select(&self.selected, &self.dims.displayed());
        }
        Ok(())
    }

    fn check_indices(&self, indices: impl IntoIterator<Item = usize>) -> LayerResult<()> {
        let len = self.len();
        match indices.into_iter().find(|&i| i >= len) {
            Some(index) => Err(ValueError::SelectionOutOfRange { index, len }.into()),
            None => Ok(()),
        }
    }

    // MARK: - Mode

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Change the interaction mode. Entering [`Mode::Add`] clears the selection.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Add {
            self.selected.clear();
        }
        tracing::debug!("Points layer '{}' mode {} -> {}", self.name, self.mode, mode);
        self.mode = mode;
    }

    /// Change the interaction mode by name
    pub fn set_mode_str(&mut self, mode: &str) -> LayerResult<()> {
        self.set_mode(mode.parse()?);
        Ok(())
    }

    /// Whether mouse events should go to the camera
    pub fn interactive(&self) -> bool {
        self.mode == Mode::PanZoom
    }

    // MARK: - Colors

    /// Color channel state
    pub fn channel(&self, target: ColorTarget) -> &ColorChannel {
        match target {
            ColorTarget::Edge => &self.edge,
            ColorTarget::Face => &self.face,
        }
    }

    fn channel_mut(&mut self, target: ColorTarget) -> (&mut ColorChannel, &PropertyTable) {
        let channel = match target {
            ColorTarget::Edge => &mut self.edge,
            ColorTarget::Face => &mut self.face,
        };
        (channel, &self.properties)
    }

    /// Per-point colors of a channel
    pub fn color(&self, target: ColorTarget) -> &[Color] {
        self.channel(target).values()
    }

    pub fn edge_color(&self) -> &[Color] {
        self.edge.values()
    }

    pub fn face_color(&self) -> &[Color] {
        self.face.values()
    }

    /// Set a channel's colors from a color, a per-point array or a property name
    pub fn set_color(
        &mut self,
        target: ColorTarget,
        color: impl Into<ColorSpec>,
    ) -> LayerResult<()> {
        let spec = color.into();
        let n = self.len();
        let (channel, properties) = self.channel_mut(target);
        channel.set_color(&spec, n, properties)?;
        self.update_thumbnail();
        Ok(())
    }

    pub fn color_mode(&self, target: ColorTarget) -> ColorMode {
        self.channel(target).mode()
    }

    /// Switch a channel's color mode
    pub fn set_color_mode(
        &mut self,
        target: ColorTarget,
        mode: ColorMode,
    ) -> LayerResult<Vec<LayerWarning>> {
        let (channel, properties) = self.channel_mut(target);
        let warning = channel.set_mode(mode, properties)?;
        self.update_thumbnail();
        Ok(warning.into_iter().collect())
    }

    /// Switch a channel's color mode by name
    pub fn set_color_mode_str(
        &mut self,
        target: ColorTarget,
        mode: &str,
    ) -> LayerResult<Vec<LayerWarning>> {
        self.set_color_mode(target, mode.parse()?)
    }

    /// Color given to the next added point
    pub fn current_color(&self, target: ColorTarget) -> Color {
        self.channel(target).current()
    }

    /// Set the color of future points; in direct mode the selected points are
    /// recolored too
    pub fn set_current_color(
        &mut self,
        target: ColorTarget,
        color: impl Into<ColorSpec>,
    ) -> LayerResult<()> {
        let color = color.into().to_color()?;
        match target {
            ColorTarget::Edge => self.edge.set_current(color, &self.selected),
            ColorTarget::Face => self.face.set_current(color, &self.selected),
        }
        self.update_thumbnail();
        Ok(())
    }

    pub fn color_property(&self, target: ColorTarget) -> Option<&str> {
        self.channel(target).property()
    }

    /// Choose the property that drives a channel in cycle and colormap mode
    pub fn set_color_property(&mut self, target: ColorTarget, name: &str) -> LayerResult<()> {
        let (channel, properties) = self.channel_mut(target);
        channel.set_property(name, properties)?;
        self.update_thumbnail();
        Ok(())
    }

    pub fn color_cycle(&self, target: ColorTarget) -> &[Color] {
        self.channel(target).cycle()
    }

    /// Replace a channel's categorical palette
    pub fn set_color_cycle<C: Into<ColorSpec>>(
        &mut self,
        target: ColorTarget,
        cycle: impl IntoIterator<Item = C>,
    ) -> LayerResult<()> {
        let cycle = resolve_cycle(cycle.into_iter().map(Into::into))?;
        let (channel, properties) = self.channel_mut(target);
        channel.set_cycle(cycle, properties)?;
        self.update_thumbnail();
        Ok(())
    }

    pub fn cycle_map(&self, target: ColorTarget) -> &[(PropertyValue, Color)] {
        self.channel(target).cycle_map()
    }

    pub fn colormap(&self, target: ColorTarget) -> &Colormap {
        self.channel(target).colormap()
    }

    pub fn set_colormap(&mut self, target: ColorTarget, colormap: Colormap) {
        let (channel, properties) = self.channel_mut(target);
        channel.set_colormap(colormap, properties);
        self.update_thumbnail();
    }

    /// Set a channel's colormap by name
    pub fn set_colormap_name(&mut self, target: ColorTarget, name: &str) -> LayerResult<()> {
        let colormap = lookup_colormap(name)?;
        self.set_colormap(target, colormap);
        Ok(())
    }

    pub fn contrast_limits(&self, target: ColorTarget) -> Option<(f64, f64)> {
        self.channel(target).contrast_limits()
    }

    pub fn set_contrast_limits(
        &mut self,
        target: ColorTarget,
        low: f64,
        high: f64,
    ) -> LayerResult<()> {
        let (channel, properties) = self.channel_mut(target);
        channel.set_contrast_limits(low, high, properties)?;
        self.update_thumbnail();
        Ok(())
    }

    /// Whether `color` names a property of this layer rather than a color
    pub fn is_color_mapped(&self, color: impl Into<ColorSpec>) -> LayerResult<bool> {
        ColorChannel::is_color_mapped(&color.into(), &self.properties)
    }

    /// Recompute both channels from the properties. With
    /// `update_color_mapping` the cycle maps are rebuilt and the contrast
    /// limits refit.
    pub fn refresh_colors(&mut self, update_color_mapping: bool) {
        self.edge.refresh(&self.properties, update_color_mapping);
        self.face.refresh(&self.properties, update_color_mapping);
        self.update_thumbnail();
    }

    // MARK: - Properties

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    /// Replace every property column.
    ///
    /// A channel whose driving property is missing from the new columns falls
    /// back to direct mode and a warning is returned.
    pub fn set_properties<S, C>(
        &mut self,
        columns: impl IntoIterator<Item = (S, C)>,
    ) -> LayerResult<Vec<LayerWarning>>
    where
        S: Into<String>,
        C: Into<PropertyColumn>,
    {
        let columns = columns
            .into_iter()
            .map(|(name, column)| (name.into(), column.into()))
            .collect();
        let table = PropertyTable::from_columns(columns, self.len())?;

        for channel in [&self.edge, &self.face] {
            if channel.mode() != ColorMode::Colormap {
                continue;
            }
            if let Some(property) = channel.property() {
                let categorical = table
                    .column(property)
                    .is_some_and(|c| c.kind() == PropertyKind::Categorical);
                if categorical {
                    return Err(TypeError::CategoricalColormap {
                        property: property.to_string(),
                    }
                    .into());
                }
            }
        }

        self.properties = table;
        let mut warnings = Vec::new();
        for channel in [&mut self.edge, &mut self.face] {
            let missing = channel
                .property()
                .is_some_and(|p| !self.properties.contains(p));
            if missing {
                warnings.extend(channel.drop_property());
            } else {
                channel.refresh(&self.properties, false);
            }
        }
        self.update_thumbnail();
        Ok(warnings)
    }

    /// Property values given to the next added point
    pub fn current_properties(&self) -> &PropertyRow {
        self.properties.current()
    }

    /// Update the current properties; selected points receive the new values
    pub fn set_current_properties(&mut self, row: PropertyRow) -> LayerResult<()> {
        self.properties.set_current(row, &self.selected)?;
        self.refresh_colors(false);
        Ok(())
    }

    /// Edit a single property value. Colors are not recomputed until
    /// [`refresh_colors`](Self::refresh_colors).
    pub fn set_property_value(
        &mut self,
        name: &str,
        index: usize,
        value: impl Into<PropertyValue>,
    ) -> LayerResult<()> {
        self.properties.set_value(name, index, value.into())
    }

    // MARK: - Size

    /// N×D sizes
    pub fn size(&self) -> &Array2<f64> {
        self.size.sizes()
    }

    pub fn set_size(&mut self, size: impl Into<SizeSpec>) -> LayerResult<()> {
        let sizes = size.into().resolve(self.len(), self.ndim())?;
        self.size.set_sizes(sizes);
        Ok(())
    }

    /// Size given to the displayed dimensions of new points
    pub fn current_size(&self) -> f64 {
        self.size.current()
    }

    /// Set the current size; selected points are resized too
    pub fn set_current_size(&mut self, size: f64) {
        self.size.set_current(size, &self.selected);
    }

    // MARK: - Attributes

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) -> LayerResult<()> {
        validate_opacity(opacity)?;
        self.opacity = opacity;
        self.update_thumbnail();
        Ok(())
    }

    pub fn blending(&self) -> Blending {
        self.blending
    }

    pub fn set_blending(&mut self, blending: Blending) {
        self.blending = blending;
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
    }

    pub fn edge_width(&self) -> f64 {
        self.edge_width
    }

    pub fn set_edge_width(&mut self, width: f64) {
        self.edge_width = width;
    }

    pub fn n_dimensional(&self) -> bool {
        self.n_dimensional
    }

    pub fn set_n_dimensional(&mut self, n_dimensional: bool) {
        self.n_dimensional = n_dimensional;
        self.update_thumbnail();
    }

    /// Cursor position in data coordinates
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn set_coordinates(&mut self, coordinates: Vec<f64>) -> LayerResult<()> {
        if coordinates.len() != self.ndim() {
            return Err(ValueError::CoordinateDims {
                expected: self.ndim(),
                actual: coordinates.len(),
            }
            .into());
        }
        self.coordinates = coordinates;
        Ok(())
    }

    // MARK: - Dims

    pub fn dims(&self) -> &Dims {
        &self.dims
    }

    pub fn set_ndisplay(&mut self, ndisplay: usize) -> LayerResult<()> {
        self.dims.set_ndisplay(ndisplay)?;
        self.update_thumbnail();
        Ok(())
    }

    /// Move the slice along `axis`
    pub fn set_point(&mut self, axis: usize, value: f64) -> LayerResult<()> {
        self.dims.set_point(axis, value)?;
        self.update_thumbnail();
        Ok(())
    }

    pub fn set_order(&mut self, order: Vec<usize>) -> LayerResult<()> {
        self.dims.set_order(order)?;
        self.update_thumbnail();
        Ok(())
    }

    // MARK: - View

    /// The points in the current slice
    pub fn view(&self) -> SliceView {
        project(
            &self.data,
            self.size.sizes(),
            self.edge.values(),
            self.face.values(),
            &self.dims,
            self.n_dimensional,
        )
    }

    /// Indices of the points in the current slice
    pub fn view_indices(&self) -> Vec<usize> {
        self.view().indices
    }

    /// Displayed coordinates of the points in the current slice
    pub fn view_data(&self) -> Array2<f64> {
        self.view().data
    }

    /// Displayed sizes of the points in the current slice
    pub fn view_size(&self) -> Array2<f64> {
        self.view().size
    }

    pub fn view_edge_color(&self) -> Vec<Color> {
        self.view().edge_color
    }

    pub fn view_face_color(&self) -> Vec<Color> {
        self.view().face_color
    }
}

fn validate_opacity(opacity: f64) -> LayerResult<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(ValueError::Opacity { value: opacity }.into());
    }
    Ok(())
}

fn lookup_colormap(name: &str) -> LayerResult<Colormap> {
    get_colormap(name).ok_or_else(|| {
        ValueError::UnknownColormap {
            name: name.to_string(),
        }
        .into()
    })
}

fn resolve_cycle(cycle: impl IntoIterator<Item = ColorSpec>) -> LayerResult<Vec<Color>> {
    cycle.into_iter().map(|spec| spec.to_color()).collect()
}

fn build_channel(
    target: ColorTarget,
    config: &PointsConfig,
    n: usize,
    properties: &PropertyTable,
) -> LayerResult<ColorChannel> {
    let mut channel = ColorChannel::new(target, Color::default(), n);
    if let Some(cycle) = config.color_cycle(target) {
        channel.set_cycle(resolve_cycle(cycle.iter().cloned())?, properties)?;
    }
    channel.set_colormap(lookup_colormap(config.colormap(target))?, properties);
    channel.set_color(config.color(target), n, properties)?;
    if let Some((low, high)) = config.contrast_limits(target) {
        channel.set_contrast_limits(low, high, properties)?;
    }
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn layer() -> PointsLayer {
        PointsLayer::new(array![[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]]).unwrap()
    }

    #[test]
    fn test_empty_layer() {
        let layer = PointsLayer::empty(2).unwrap();
        assert_eq!(layer.data().dim(), (0, 2));
        assert!(layer.is_empty());
        assert_eq!(layer.name(), "Points");
        assert_eq!(layer.view_data().dim(), (0, 2));
    }

    #[test]
    fn test_rejects_one_dimensional_points() {
        let err = PointsLayer::new(Array2::zeros((3, 1))).unwrap_err();
        assert!(err.is_value_error());
    }

    #[test]
    fn test_add_selects_new_points() {
        let mut layer = layer();
        layer.add_point(&[1.0, 2.0]).unwrap();
        assert_eq!(layer.len(), 4);
        assert_eq!(layer.selected_data(), &BTreeSet::from([3]));
        assert_eq!(layer.size().nrows(), 4);
        assert_eq!(layer.face_color().len(), 4);

        assert!(layer.add_point(&[1.0, 2.0, 3.0]).is_err());
        assert_eq!(layer.len(), 4);
    }

    #[test]
    fn test_selection_out_of_range() {
        let mut layer = layer();
        let err = layer.set_selected_data([0, 3]).unwrap_err();
        assert!(err.is_value_error());
        assert!(layer.selected_data().is_empty());
    }

    #[test]
    fn test_add_mode_clears_selection() {
        let mut layer = layer();
        layer.set_selected_data([0, 1]).unwrap();
        layer.set_mode(Mode::Select);
        assert_eq!(layer.selected_data().len(), 2);
        layer.set_mode(Mode::PanZoom);
        assert_eq!(layer.selected_data().len(), 2);
        layer.set_mode(Mode::Add);
        assert!(layer.selected_data().is_empty());
        assert!(!layer.interactive());
    }

    #[test]
    fn test_set_data_truncates_and_extends() {
        let mut layer = layer();
        layer.set_selected_data([2]).unwrap();

        layer.set_data(array![[0.0, 0.0], [1.0, 1.0]]).unwrap();
        assert_eq!(layer.size().nrows(), 2);
        assert_eq!(layer.edge_color().len(), 2);
        assert!(layer.selected_data().is_empty());

        layer
            .set_data(array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]])
            .unwrap();
        assert_eq!(layer.size().nrows(), 4);
        assert_eq!(layer.face_color().len(), 4);
    }

    #[test]
    fn test_set_data_changes_dimensionality() {
        let mut layer = layer();
        layer.set_data(Array2::zeros((2, 3))).unwrap();
        assert_eq!(layer.size().dim(), (2, 3));
        assert_eq!(layer.dims().ndim(), 3);
        assert_eq!(layer.coordinates().len(), 3);
    }

    #[test]
    fn test_opacity_validated() {
        let mut layer = layer();
        layer.set_opacity(0.5).unwrap();
        assert_eq!(layer.opacity(), 0.5);
        assert!(layer.set_opacity(1.5).is_err());
        assert_eq!(layer.opacity(), 0.5);

        let config = PointsConfig::new().with_opacity(-0.1);
        assert!(PointsLayer::with_config(Array2::zeros((1, 2)), config).is_err());
    }

    #[test]
    fn test_unknown_colormap_name() {
        let mut layer = layer();
        assert!(layer.set_colormap_name(ColorTarget::Face, "rainbow").is_err());
        layer.set_colormap_name(ColorTarget::Face, "magma").unwrap();
        assert_eq!(layer.colormap(ColorTarget::Face).name, "magma");
    }
}
