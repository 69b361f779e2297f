//! SVG export of the current slice
//!
//! Each visible point becomes one `circle` element. Elements are kept as
//! plain tag/attribute lists so callers can merge them into a larger
//! document, and serialize through `quick-xml`.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::colormap::Color;
use crate::error::{LayerError, LayerResult};
use crate::points::PointsLayer;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A childless SVG element
#[derive(Clone, Debug, PartialEq)]
pub struct SvgElement {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl SvgElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((name.into(), value.to_string()));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    fn start(&self) -> BytesStart<'_> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }
        start
    }

    /// Serialize as an empty element, e.g. `<circle cx="1" .../>`
    pub fn to_xml_string(&self) -> LayerResult<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Empty(self.start())).map_err(xml_error)?;
        into_string(writer)
    }
}

fn xml_error(e: impl std::fmt::Display) -> LayerError {
    LayerError::Xml {
        message: e.to_string(),
    }
}

fn into_string(writer: Writer<Vec<u8>>) -> LayerResult<String> {
    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn svg_rgb(color: &Color) -> String {
    let [r, g, b] = color.to_rgb8();
    format!("rgb({}, {}, {})", r, g, b)
}

impl PointsLayer {
    /// One `circle` per point of the current slice.
    ///
    /// `cx` is the last displayed axis and `cy` the one before it; `r` is
    /// half the mean displayed size.
    pub fn to_xml_list(&self) -> Vec<SvgElement> {
        let view = self.view();
        let columns = view.data.ncols();
        if columns < 2 {
            return Vec::new();
        }
        let sizes = view.mean_size();

        (0..view.len())
            .map(|k| {
                SvgElement::new("circle")
                    .with_attribute("cx", view.data[[k, columns - 1]])
                    .with_attribute("cy", view.data[[k, columns - 2]])
                    .with_attribute("r", sizes[k] / 2.0)
                    .with_attribute("fill", svg_rgb(&view.face_color[k]))
                    .with_attribute("stroke", svg_rgb(&view.edge_color[k]))
                    .with_attribute("stroke-width", self.edge_width())
                    .with_attribute("opacity", self.opacity())
            })
            .collect()
    }

    /// Standalone SVG document containing [`to_xml_list`](Self::to_xml_list)
    pub fn to_svg(&self) -> LayerResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NAMESPACE));
        writer.write_event(Event::Start(root)).map_err(xml_error)?;
        for element in self.to_xml_list() {
            writer
                .write_event(Event::Empty(element.start()))
                .map_err(xml_error)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(xml_error)?;
        into_string(writer)
    }
}
