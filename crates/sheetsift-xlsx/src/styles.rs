//! Style sheet (`xl/styles.xml`) parsing and per-cell style resolution
//!
//! Records are kept with their declared [`Color`]s; colors are only turned
//! into `#RRGGBB` strings when a cell's style is resolved, because that is
//! when the theme palette is known.

use sheetsift_core::style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, CellStyle, Color, FillStyle, FillType,
    FontStyle, HorizontalAlignment, ThemePalette, VerticalAlignment, DEFAULT_FILL_COLOR,
    DEFAULT_FONT_COLOR,
};

use crate::error::XmlResult;
use crate::xml::{NodeId, XmlDocument};

#[derive(Debug, Clone, PartialEq)]
struct FontRecord {
    bold: bool,
    italic: bool,
    underline: bool,
    size: f64,
    name: String,
    color: Color,
}

impl Default for FontRecord {
    fn default() -> Self {
        let font = FontStyle::default();
        Self {
            bold: font.bold,
            italic: font.italic,
            underline: font.underline,
            size: font.size,
            name: font.name,
            color: Color::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct FillRecord {
    fill_type: FillType,
    color: Color,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct BorderRecord {
    top: (BorderLineStyle, Color),
    right: (BorderLineStyle, Color),
    bottom: (BorderLineStyle, Color),
    left: (BorderLineStyle, Color),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct XfRecord {
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    alignment: Alignment,
}

/// Parsed font, fill, border and cell format tables
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet {
    fonts: Vec<FontRecord>,
    fills: Vec<FillRecord>,
    borders: Vec<BorderRecord>,
    cell_xfs: Vec<XfRecord>,
}

impl StyleSheet {
    /// An empty sheet; every lookup yields the default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `fonts`, `fills`, `borders` and `cellXfs` from a styles document
    pub fn parse(doc: &XmlDocument) -> Self {
        let root = doc.root();
        let children = |container: &str, item: &'static str| -> Vec<NodeId> {
            doc.first_descendant(root, container)
                .map(|c| doc.child_elements(c, item).collect())
                .unwrap_or_default()
        };

        let fonts = children("fonts", "font")
            .into_iter()
            .map(|n| parse_font(doc, n))
            .collect();
        let fills = children("fills", "fill")
            .into_iter()
            .map(|n| parse_fill(doc, n))
            .collect();
        let borders = children("borders", "border")
            .into_iter()
            .map(|n| parse_border(doc, n))
            .collect();
        let cell_xfs = children("cellXfs", "xf")
            .into_iter()
            .map(|n| parse_xf(doc, n))
            .collect();

        Self {
            fonts,
            fills,
            borders,
            cell_xfs,
        }
    }

    /// Parse from the raw part
    pub fn from_bytes(bytes: &[u8]) -> XmlResult<Self> {
        Ok(Self::parse(&XmlDocument::parse_bytes(bytes)?))
    }

    /// Number of cell formats
    pub fn len(&self) -> usize {
        self.cell_xfs.len()
    }

    /// Check if there are no cell formats
    pub fn is_empty(&self) -> bool {
        self.cell_xfs.is_empty()
    }

    /// Style of a `<c>` element, present only when it carries an `s` attribute
    pub fn resolve_cell(
        &self,
        doc: &XmlDocument,
        cell: NodeId,
        theme: Option<&ThemePalette>,
    ) -> Option<CellStyle> {
        let s = doc.attribute(cell, "s")?;
        Some(match s.trim().parse::<usize>() {
            Ok(index) => self.resolve_index(index, theme),
            Err(_) => CellStyle::default(),
        })
    }

    /// Resolve the cell format at `index`; a missing format gives the default style
    pub fn resolve_index(&self, index: usize, theme: Option<&ThemePalette>) -> CellStyle {
        let Some(xf) = self.cell_xfs.get(index) else {
            return CellStyle::default();
        };

        let font = self.fonts.get(xf.font_id).cloned().unwrap_or_default();
        let fill = self.fills.get(xf.fill_id).cloned().unwrap_or_default();
        let border = self.borders.get(xf.border_id).cloned().unwrap_or_default();

        let edge = |(style, color): (BorderLineStyle, Color)| {
            BorderEdge::new(style, color.resolve(theme, DEFAULT_FONT_COLOR))
        };

        CellStyle {
            font: FontStyle {
                bold: font.bold,
                italic: font.italic,
                underline: font.underline,
                size: font.size,
                color: font.color.resolve(theme, DEFAULT_FONT_COLOR),
                name: font.name,
            },
            fill: FillStyle {
                fill_type: fill.fill_type,
                color: fill.color.resolve(theme, DEFAULT_FILL_COLOR),
            },
            border: BorderStyle {
                top: edge(border.top),
                right: edge(border.right),
                bottom: edge(border.bottom),
                left: edge(border.left),
            },
            alignment: xf.alignment.clone(),
        }
    }
}

fn parse_font(doc: &XmlDocument, font: NodeId) -> FontRecord {
    let mut record = FontRecord::default();

    for child in doc.node(font).children.iter().copied() {
        let Some(tag) = doc.local_tag(child) else {
            continue;
        };
        let val = doc.attribute(child, "val");
        match tag {
            "b" => record.bold = flag(val),
            "i" => record.italic = flag(val),
            "u" => record.underline = val != Some("none"),
            "sz" => {
                if let Some(size) = val.and_then(|v| v.trim().parse::<f64>().ok()) {
                    record.size = size;
                }
            }
            "name" => {
                if let Some(name) = val {
                    record.name = name.to_string();
                }
            }
            "color" => record.color = parse_color(doc, child),
            _ => {}
        }
    }

    record
}

fn parse_fill(doc: &XmlDocument, fill: NodeId) -> FillRecord {
    if let Some(pattern) = doc.first_child(fill, "patternFill") {
        let fill_type = doc
            .attribute(pattern, "patternType")
            .map_or(FillType::None, str_to_fill_type);
        let color = doc
            .first_child(pattern, "fgColor")
            .map_or(Color::Auto, |c| parse_color(doc, c));
        return FillRecord { fill_type, color };
    }

    if let Some(gradient) = doc.first_child(fill, "gradientFill") {
        let color = doc
            .first_descendant(gradient, "color")
            .map_or(Color::Auto, |c| parse_color(doc, c));
        return FillRecord {
            fill_type: FillType::Gradient,
            color,
        };
    }

    FillRecord::default()
}

fn parse_border(doc: &XmlDocument, border: NodeId) -> BorderRecord {
    let side = |names: &[&str]| -> (BorderLineStyle, Color) {
        let Some(node) = names.iter().find_map(|name| doc.first_child(border, name)) else {
            return (BorderLineStyle::None, Color::Auto);
        };
        let style = doc
            .attribute(node, "style")
            .and_then(str_to_border_style)
            .unwrap_or_default();
        let color = doc
            .first_child(node, "color")
            .map_or(Color::Auto, |c| parse_color(doc, c));
        (style, color)
    };

    BorderRecord {
        top: side(&["top"]),
        right: side(&["right", "end"]),
        bottom: side(&["bottom"]),
        left: side(&["left", "start"]),
    }
}

fn parse_xf(doc: &XmlDocument, xf: NodeId) -> XfRecord {
    let id = |name: &str| {
        doc.attribute(xf, name)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0)
    };

    let mut alignment = Alignment::default();
    if let Some(node) = doc.first_child(xf, "alignment") {
        if let Some(h) = doc.attribute(node, "horizontal").and_then(str_to_horizontal) {
            alignment.horizontal = h;
        }
        if let Some(v) = doc.attribute(node, "vertical").and_then(str_to_vertical) {
            alignment.vertical = v;
        }
        alignment.wrap_text = doc
            .attribute(node, "wrapText")
            .is_some_and(|v| v == "1" || v == "true");
    }

    XfRecord {
        font_id: id("fontId"),
        fill_id: id("fillId"),
        border_id: id("borderId"),
        alignment,
    }
}

/// Element flags such as `<b/>` are on unless `val` says otherwise
fn flag(val: Option<&str>) -> bool {
    !matches!(val, Some("0") | Some("false"))
}

fn parse_color(doc: &XmlDocument, node: NodeId) -> Color {
    // Priority: rgb > theme > auto
    if let Some(color) = doc.attribute(node, "rgb").and_then(Color::from_hex) {
        return color;
    }

    if let Some(index) = doc
        .attribute(node, "theme")
        .and_then(|s| s.trim().parse::<u32>().ok())
    {
        return Color::theme(index);
    }

    Color::Auto
}

fn str_to_fill_type(s: &str) -> FillType {
    match s {
        "none" | "gray125" => FillType::None,
        "solid" => FillType::Solid,
        _ => FillType::Pattern,
    }
}

fn str_to_border_style(s: &str) -> Option<BorderLineStyle> {
    Some(match s {
        "none" => BorderLineStyle::None,
        "thin" => BorderLineStyle::Thin,
        "medium" => BorderLineStyle::Medium,
        "thick" => BorderLineStyle::Thick,
        "dashed" => BorderLineStyle::Dashed,
        "dotted" => BorderLineStyle::Dotted,
        "double" => BorderLineStyle::Double,
        "hair" => BorderLineStyle::Hair,
        "mediumDashed" => BorderLineStyle::MediumDashed,
        "dashDot" => BorderLineStyle::DashDot,
        "mediumDashDot" => BorderLineStyle::MediumDashDot,
        "dashDotDot" => BorderLineStyle::DashDotDot,
        "mediumDashDotDot" => BorderLineStyle::MediumDashDotDot,
        "slantDashDot" => BorderLineStyle::SlantDashDot,
        _ => return None,
    })
}

fn str_to_horizontal(s: &str) -> Option<HorizontalAlignment> {
    Some(match s {
        "general" => HorizontalAlignment::General,
        "left" => HorizontalAlignment::Left,
        "center" => HorizontalAlignment::Center,
        "right" => HorizontalAlignment::Right,
        "fill" => HorizontalAlignment::Fill,
        "justify" => HorizontalAlignment::Justify,
        "centerContinuous" => HorizontalAlignment::CenterContinuous,
        "distributed" => HorizontalAlignment::Distributed,
        _ => return None,
    })
}

fn str_to_vertical(s: &str) -> Option<VerticalAlignment> {
    Some(match s {
        "top" => VerticalAlignment::Top,
        "center" => VerticalAlignment::Center,
        "bottom" => VerticalAlignment::Bottom,
        "justify" => VerticalAlignment::Justify,
        "distributed" => VerticalAlignment::Distributed,
        _ => return None,
    })
}
