//! Common utilities for E2E tests: an in-memory XLSX package builder.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One `<c>` element
#[derive(Debug, Clone)]
pub struct CellXml {
    reference: String,
    cell_type: Option<&'static str>,
    style: Option<u32>,
    inner: String,
}

#[allow(dead_code)]
impl CellXml {
    fn new(reference: &str, cell_type: Option<&'static str>, inner: String) -> Self {
        Self {
            reference: reference.to_string(),
            cell_type,
            style: None,
            inner,
        }
    }

    /// Shared string reference
    pub fn shared(reference: &str, index: u32) -> Self {
        Self::new(reference, Some("s"), format!("<v>{}</v>", index))
    }

    /// Numeric cell
    pub fn number(reference: &str, value: f64) -> Self {
        Self::new(reference, None, format!("<v>{}</v>", value))
    }

    /// Raw `<v>` text with no type attribute
    pub fn raw(reference: &str, value: &str) -> Self {
        Self::new(reference, None, format!("<v>{}</v>", value))
    }

    /// Boolean cell
    pub fn boolean(reference: &str, value: bool) -> Self {
        Self::new(reference, Some("b"), format!("<v>{}</v>", u8::from(value)))
    }

    /// Inline string cell
    pub fn inline(reference: &str, text: &str) -> Self {
        Self::new(reference, Some("inlineStr"), format!("<is><t>{}</t></is>", text))
    }

    /// Cell with no value
    pub fn blank(reference: &str) -> Self {
        Self::new(reference, None, String::new())
    }

    /// Attach a cell format index
    pub fn with_style(mut self, index: u32) -> Self {
        self.style = Some(index);
        self
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(r#"<c r="{}""#, self.reference);
        if let Some(t) = self.cell_type {
            xml.push_str(&format!(r#" t="{}""#, t));
        }
        if let Some(s) = self.style {
            xml.push_str(&format!(r#" s="{}""#, s));
        }
        if self.inner.is_empty() {
            xml.push_str("/>");
        } else {
            xml.push('>');
            xml.push_str(&self.inner);
            xml.push_str("</c>");
        }
        xml
    }
}

/// A worksheet made of numbered rows
#[derive(Debug, Clone, Default)]
pub struct SheetXml {
    rows: Vec<(u32, Vec<CellXml>)>,
}

impl SheetXml {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row (1-based number as written in the file)
    pub fn row(mut self, number: u32, cells: Vec<CellXml>) -> Self {
        self.rows.push((number, cells));
        self
    }

    pub fn build_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheetData>"#,
        );
        for (number, cells) in &self.rows {
            xml.push_str(&format!(r#"<row r="{}">"#, number));
            for cell in cells {
                xml.push_str(&cell.to_xml());
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }
}

/// Builds a complete XLSX package in memory
#[derive(Debug, Clone)]
pub struct XlsxBuilder {
    sheets: Vec<(String, SheetXml)>,
    shared_strings: Vec<String>,
    styles: Option<String>,
    theme: Option<String>,
    include_workbook: bool,
    include_workbook_rels: bool,
    compression: CompressionMethod,
}

impl Default for XlsxBuilder {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            shared_strings: Vec::new(),
            styles: None,
            theme: None,
            include_workbook: true,
            include_workbook_rels: true,
            compression: CompressionMethod::Deflated,
        }
    }
}

#[allow(dead_code)]
impl XlsxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet; sheets are listed in workbook order
    pub fn sheet(mut self, name: &str, sheet: SheetXml) -> Self {
        self.sheets.push((name.to_string(), sheet));
        self
    }

    pub fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(xml.to_string());
        self
    }

    pub fn theme(mut self, xml: &str) -> Self {
        self.theme = Some(xml.to_string());
        self
    }

    pub fn without_workbook(mut self) -> Self {
        self.include_workbook = false;
        self
    }

    pub fn without_workbook_rels(mut self) -> Self {
        self.include_workbook_rels = false;
        self
    }

    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    /// Build the package. Sheet `i` in workbook order is stored as
    /// `sheet{n-i}.xml` so that file names never imply order.
    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(self.compression);
        let count = self.sheets.len();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(CONTENT_TYPES_XML.as_bytes()).unwrap();

        if self.include_workbook {
            let mut workbook = String::from(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
            );
            for (i, (name, _)) in self.sheets.iter().enumerate() {
                workbook.push_str(&format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    name,
                    i + 1,
                    i + 1
                ));
            }
            workbook.push_str("</sheets></workbook>");
            zip.start_file("xl/workbook.xml", options).unwrap();
            zip.write_all(workbook.as_bytes()).unwrap();
        }

        if self.include_workbook_rels {
            let mut rels = String::from(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            );
            for i in 0..count {
                rels.push_str(&format!(
                    r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                    i + 1,
                    count - i
                ));
            }
            rels.push_str("</Relationships>");
            zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
            zip.write_all(rels.as_bytes()).unwrap();
        }

        for (i, (_, sheet)) in self.sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", count - i), options)
                .unwrap();
            zip.write_all(sheet.build_xml().as_bytes()).unwrap();
        }

        if !self.shared_strings.is_empty() {
            let mut sst = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
                self.shared_strings.len()
            );
            for s in &self.shared_strings {
                sst.push_str(&format!("<si><t>{}</t></si>", s));
            }
            sst.push_str("</sst>");
            zip.start_file("xl/sharedStrings.xml", options).unwrap();
            zip.write_all(sst.as_bytes()).unwrap();
        }

        if let Some(styles) = &self.styles {
            zip.start_file("xl/styles.xml", options).unwrap();
            zip.write_all(styles.as_bytes()).unwrap();
        }

        if let Some(theme) = &self.theme {
            zip.start_file("xl/theme/theme1.xml", options).unwrap();
            zip.write_all(theme.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

/// Styles with: 0 default, 1 bold red on yellow with thin borders and
/// centered wrapped text, 2 theme-colored font and fill
pub const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="3">
    <font><sz val="11"/><color theme="1"/><name val="Calibri"/></font>
    <font><b/><sz val="12"/><color rgb="FFC00000"/><name val="Arial"/></font>
    <font><i/><u val="double"/><sz val="10"/><color theme="4"/><name val="等线"/></font>
  </fonts>
  <fills count="4">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
    <fill><patternFill patternType="solid"><fgColor rgb="FFFFFF00"/><bgColor indexed="64"/></patternFill></fill>
    <fill><patternFill patternType="solid"><fgColor theme="0"/><bgColor indexed="64"/></patternFill></fill>
  </fills>
  <borders count="2">
    <border><left/><right/><top/><bottom/><diagonal/></border>
    <border><left style="thin"><color rgb="FF000080"/></left><right style="thin"><color indexed="64"/></right><top style="thick"><color theme="2"/></top><bottom style="double"/><diagonal/></border>
  </borders>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center" wrapText="1"/></xf>
    <xf numFmtId="0" fontId="2" fillId="3" borderId="0" xfId="0"/>
  </cellXfs>
</styleSheet>"#;

/// The default Office color scheme
pub const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
  </a:themeElements>
</a:theme>"#;
