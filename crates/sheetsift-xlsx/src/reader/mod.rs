//! XLSX reader
//!
//! Opens the package, loads the optional shared strings, styles and theme
//! parts, locates the first worksheet and decodes it into a [`SheetGrid`].

mod sheet;

use log::debug;
use sheetsift_core::{SheetGrid, ThemePalette};

use crate::container::ZipContainer;
use crate::error::{XlsxError, XlsxResult};
use crate::shared_strings::SharedStrings;
use crate::styles::StyleSheet;
use crate::theme::parse_theme;
use crate::xml::XmlDocument;

pub use sheet::build_grid;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const STYLES_PART: &str = "xl/styles.xml";
const THEME_PART: &str = "xl/theme/theme1.xml";
const DEFAULT_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Decode the first worksheet of an XLSX package held in memory
    pub fn read_first_sheet(bytes: &[u8]) -> XlsxResult<SheetGrid> {
        let archive = ZipContainer::parse(bytes)?;

        if !archive.contains(WORKBOOK_PART) {
            return Err(XlsxError::MissingRequiredEntry(WORKBOOK_PART.into()));
        }

        let shared_strings = match archive.read_optional(SHARED_STRINGS_PART)? {
            Some(data) => SharedStrings::from_bytes(&data)
                .map_err(|e| XlsxError::malformed(SHARED_STRINGS_PART, e))?,
            None => SharedStrings::new(),
        };

        let styles = match archive.read_optional(STYLES_PART)? {
            Some(data) => StyleSheet::from_bytes(&data)
                .map_err(|e| XlsxError::malformed(STYLES_PART, e))?,
            None => StyleSheet::new(),
        };

        let theme = Self::read_theme(&archive)?;

        let sheet_path = Self::first_sheet_path(&archive)?;
        debug!("reading first worksheet from '{}'", sheet_path);

        if !archive.contains(&sheet_path) {
            return Err(XlsxError::MissingRequiredEntry(sheet_path));
        }
        let data = archive.read_entry(&sheet_path)?;
        let doc = XmlDocument::parse_bytes(&data)
            .map_err(|e| XlsxError::malformed(sheet_path.as_str(), e))?;

        Ok(build_grid(&doc, &shared_strings, &styles, theme.as_ref()))
    }

    fn read_theme(archive: &ZipContainer<'_>) -> XlsxResult<Option<ThemePalette>> {
        let Some(data) = archive.read_optional(THEME_PART)? else {
            return Ok(None);
        };
        let doc =
            XmlDocument::parse_bytes(&data).map_err(|e| XlsxError::malformed(THEME_PART, e))?;
        Ok(Some(parse_theme(&doc)))
    }

    /// Path of the first `<sheet>` in workbook order, via its relationship
    ///
    /// Falls back to `xl/worksheets/sheet1.xml` when the relationship chain
    /// is incomplete.
    fn first_sheet_path(archive: &ZipContainer<'_>) -> XlsxResult<String> {
        let workbook = archive.read_entry(WORKBOOK_PART)?;
        let workbook = XmlDocument::parse_bytes(&workbook)
            .map_err(|e| XlsxError::malformed(WORKBOOK_PART, e))?;

        let Some(r_id) = workbook
            .first_descendant(workbook.root(), "sheet")
            .and_then(|sheet| workbook.attribute(sheet, "r:id"))
        else {
            debug!("workbook lists no sheet relationship, using default sheet path");
            return Ok(DEFAULT_SHEET_PART.into());
        };

        let Some(rels) = archive.read_optional(WORKBOOK_RELS_PART)? else {
            debug!("no workbook relationships, using default sheet path");
            return Ok(DEFAULT_SHEET_PART.into());
        };
        let rels = XmlDocument::parse_bytes(&rels)
            .map_err(|e| XlsxError::malformed(WORKBOOK_RELS_PART, e))?;

        let target = rels
            .find_by_attribute(rels.root(), "Id", r_id)
            .and_then(|rel| rels.attribute(rel, "Target"));

        Ok(match target {
            Some(target) => resolve_target(target),
            None => {
                debug!("relationship '{}' not found, using default sheet path", r_id);
                DEFAULT_SHEET_PART.into()
            }
        })
    }
}

/// Resolve a relationship target against the `xl/` folder
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = vec!["xl"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}
