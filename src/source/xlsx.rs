//! XLSX workbook source.
//!
//! Reads the workbook relationships, sheet list and shared strings up front,
//! then streams `<row>` elements of one worksheet at a time.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

use super::numfmt;
use super::{Result, RowIter, SourceError, TabularSource};

/// Largest column count a worksheet can address (`XFD`).
const MAX_COLUMNS: usize = 16_384;

/// Worksheet name and its part path inside the archive.
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    path: String,
}

/// Paths collected from `xl/_rels/workbook.xml.rels`.
#[derive(Debug, Default)]
struct Relationships {
    /// rId -> part path, e.g. "rId1" -> "xl/worksheets/sheet1.xml"
    worksheets: HashMap<String, String>,
    shared_strings: Option<String>,
    styles: Option<String>,
}

/// Number format code of every cell style, indexed like `cellXfs`.
///
/// `None` marks a `General` style whose values are shown as stored.
#[derive(Debug, Default)]
struct CellFormats {
    codes: Vec<Option<String>>,
    date1904: bool,
}

impl CellFormats {
    /// Display text of a numeric cell with style index `style`.
    fn display(&self, style: Option<usize>, raw: String) -> String {
        let Some(code) = style
            .and_then(|idx| self.codes.get(idx))
            .and_then(Option::as_deref)
        else {
            return raw;
        };
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => numfmt::format_number(value, code, self.date1904),
            _ => raw,
        }
    }
}

/// A source reading an Office Open XML workbook from disk.
#[derive(Debug)]
pub struct XlsxSource {
    archive: ZipArchive<File>,
    description: String,
    names: Vec<String>,
    sheets: Vec<SheetEntry>,
    shared_strings: Vec<String>,
    formats: CellFormats,
}

impl XlsxSource {
    /// Open a workbook and read its sheet list, shared strings and cell styles.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let relationships = read_relationships(&mut archive)?;
        let (sheets, date1904) = read_sheet_list(&mut archive, &relationships.worksheets)?;
        let shared_strings =
            read_shared_strings(&mut archive, relationships.shared_strings.as_deref())?;
        let mut formats = read_cell_formats(&mut archive, relationships.styles.as_deref())?;
        formats.date1904 = date1904;

        tracing::debug!(
            path = %path.display(),
            sheets = sheets.len(),
            shared_strings = shared_strings.len(),
            styles = formats.codes.len(),
            date1904,
            "Opened workbook"
        );

        Ok(Self {
            archive,
            description: path.display().to_string(),
            names: sheets.iter().map(|s| s.name.clone()).collect(),
            sheets,
            shared_strings,
            formats,
        })
    }
}

impl TabularSource for XlsxSource {
    fn sheet_names(&self) -> &[String] {
        &self.names
    }

    fn rows(&mut self, sheet: &str) -> Result<RowIter<'_>> {
        let entry = self
            .sheets
            .iter()
            .find(|entry| entry.name == sheet)
            .ok_or_else(|| SourceError::UnknownSheet(sheet.to_string()))?;

        let file = self.archive.by_name(&entry.path)?;
        let mut xml = Reader::from_reader(BufReader::new(file));
        xml.trim_text(false);

        Ok(Box::new(WorksheetRows {
            xml,
            shared_strings: &self.shared_strings,
            formats: &self.formats,
            buf: Vec::new(),
            cell_buf: Vec::new(),
            next_row: 1,
            pending: None,
            done: false,
        }))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Open an optional part, treating a missing entry as absent.
fn optional_part<'a, R: Read + Seek>(
    archive: &'a mut ZipArchive<R>,
    path: &str,
) -> Result<Option<ZipFile<'a>>> {
    match archive.by_name(path) {
        Ok(file) => Ok(Some(file)),
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve a relationship target relative to `xl/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => format!("xl/{target}"),
    }
}

fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| std::str::from_utf8(&a.value).ok().map(str::to_string))
}

fn read_relationships<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Relationships> {
    let mut rels = Relationships::default();

    let Some(file) = optional_part(archive, "xl/_rels/workbook.xml.rels")? else {
        return Ok(rels);
    };

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attr(e, b"Id").unwrap_or_default();
                let target = attr(e, b"Target").unwrap_or_default();
                let rel_type = attr(e, b"Type").unwrap_or_default();

                if rel_type.ends_with("/worksheet") && !id.is_empty() && !target.is_empty() {
                    rels.worksheets.insert(id, resolve_target(&target));
                } else if rel_type.ends_with("/sharedStrings") {
                    rels.shared_strings = Some(resolve_target(&target));
                } else if rel_type.ends_with("/styles") {
                    rels.styles = Some(resolve_target(&target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Read the sheet list and whether the workbook uses the 1904 date system.
fn read_sheet_list<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    worksheets: &HashMap<String, String>,
) -> Result<(Vec<SheetEntry>, bool)> {
    let file = archive.by_name("xl/workbook.xml")?;

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(true);
    let mut sheets = Vec::new();
    let mut date1904 = false;
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e)
                if e.local_name().as_ref() == b"workbookPr" =>
            {
                date1904 = matches!(attr(e, b"date1904").as_deref(), Some("1" | "true"));
            }
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = String::new();
                let mut r_id = String::new();

                for a in e.attributes().flatten() {
                    match a.key.as_ref() {
                        b"name" => name = a.unescape_value()?.into_owned(),
                        // r:id is namespace prefixed
                        key if key.ends_with(b":id") => {
                            r_id = std::str::from_utf8(&a.value).unwrap_or("").to_string();
                        }
                        _ => {}
                    }
                }

                if name.is_empty() {
                    return Err(SourceError::Malformed("sheet without a name".to_string()));
                }
                let path = worksheets
                    .get(&r_id)
                    .cloned()
                    .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", sheets.len() + 1));
                sheets.push(SheetEntry { name, path });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((sheets, date1904))
}

/// Read `numFmts` and `cellXfs` from the styles part.
fn read_cell_formats<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: Option<&str>,
) -> Result<CellFormats> {
    let Some(file) = optional_part(archive, path.unwrap_or("xl/styles.xml"))? else {
        return Ok(CellFormats::default());
    };

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(true);

    let mut custom: HashMap<u32, String> = HashMap::new();
    let mut xf_ids: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) => match e.local_name().as_ref() {
                b"numFmt" => {
                    let id = attr(e, b"numFmtId").and_then(|v| v.parse().ok());
                    let code = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.as_ref() == b"formatCode")
                        .map(|a| a.unescape_value().map(|v| v.into_owned()))
                        .transpose()?;
                    if let (Some(id), Some(code)) = (id, code) {
                        custom.insert(id, code);
                    }
                }
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => {
                    xf_ids.push(attr(e, b"numFmtId").and_then(|v| v.parse().ok()).unwrap_or(0));
                }
                _ => {}
            },
            Event::End(ref e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let codes = xf_ids
        .into_iter()
        .map(|id| {
            custom
                .get(&id)
                .map(String::as_str)
                .or_else(|| numfmt::builtin_format(id))
                .filter(|code| !numfmt::is_general(code))
                .map(str::to_string)
        })
        .collect();

    Ok(CellFormats {
        codes,
        date1904: false,
    })
}

fn read_shared_strings<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: Option<&str>,
) -> Result<Vec<String>> {
    let Some(file) = optional_part(archive, path.unwrap_or("xl/sharedStrings.xml"))? else {
        return Ok(Vec::new());
    };

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    // Phonetic guide runs (`<rPh>`) are not part of the displayed text.
    let mut in_phonetic = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" | b"phoneticPr" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(ref e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(ref e) if in_t => current.push_str(&e.unescape()?),
            Event::End(ref e) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"t" => in_t = false,
                b"rPh" | b"phoneticPr" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// Cell type from the `t` attribute of a `<c>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Shared,
    Bool,
    /// No `t` attribute, or `t="n"`.
    Number,
    /// Inline and formula strings, errors, ISO dates.
    Text,
}

impl CellKind {
    fn from_attr(value: &[u8]) -> Self {
        match value {
            b"s" => CellKind::Shared,
            b"b" => CellKind::Bool,
            b"n" => CellKind::Number,
            _ => CellKind::Text,
        }
    }

    fn resolve(
        self,
        raw: Option<String>,
        style: Option<usize>,
        shared_strings: &[String],
        formats: &CellFormats,
    ) -> String {
        let Some(raw) = raw else {
            return String::new();
        };
        match self {
            CellKind::Shared => raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| shared_strings.get(idx))
                .cloned()
                .unwrap_or_default(),
            CellKind::Bool => {
                if raw.trim() == "1" {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            CellKind::Number => formats.display(style, raw),
            CellKind::Text => raw,
        }
    }
}

/// Parse the column part of a cell reference like "C7" into a 0-based index.
fn column_index(reference: &[u8]) -> Option<usize> {
    let mut col: usize = 0;
    let mut saw_col = false;

    for &b in reference {
        if b == b'$' {
            continue;
        }
        if !b.is_ascii_alphabetic() {
            break;
        }
        let digit = usize::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col.saturating_mul(26).saturating_add(digit);
        saw_col = true;
    }

    saw_col.then(|| col - 1)
}

/// Parse a row number attribute.
fn row_number(value: &[u8]) -> Option<u32> {
    std::str::from_utf8(value).ok()?.trim().parse().ok()
}

/// Streaming iterator over the rows of one worksheet.
struct WorksheetRows<'a> {
    xml: Reader<BufReader<ZipFile<'a>>>,
    shared_strings: &'a [String],
    formats: &'a CellFormats,
    buf: Vec<u8>,
    cell_buf: Vec<u8>,
    /// 1-based number of the next row to emit.
    next_row: u32,
    /// A parsed row waiting for the gap before it to be filled.
    pending: Option<(u32, Vec<String>)>,
    done: bool,
}

impl WorksheetRows<'_> {
    /// Read the next `<row>` element, returning its number and cells.
    fn read_row(&mut self) -> Result<Option<(u32, Vec<String>)>> {
        loop {
            self.buf.clear();
            let found = match self.xml.read_event_into(&mut self.buf)? {
                Event::Start(ref e) if e.local_name().as_ref() == b"row" => {
                    Some((row_attribute(e), true))
                }
                Event::Empty(ref e) if e.local_name().as_ref() == b"row" => {
                    Some((row_attribute(e), false))
                }
                Event::Eof => return Ok(None),
                _ => None,
            };
            let Some((number, has_cells)) = found else {
                continue;
            };

            let number = number.unwrap_or(self.next_row);
            let cells = if has_cells { self.read_cells()? } else { Vec::new() };
            return Ok(Some((number, cells)));
        }
    }

    /// Read `<c>` children until the closing `</row>`.
    fn read_cells(&mut self) -> Result<Vec<String>> {
        let mut cells: Vec<String> = Vec::new();

        loop {
            self.buf.clear();
            let (has_body, cell) = match self.xml.read_event_into(&mut self.buf)? {
                Event::Start(ref e) if e.local_name().as_ref() == b"c" => (true, cell_attributes(e)),
                Event::Empty(ref e) if e.local_name().as_ref() == b"c" => {
                    (false, cell_attributes(e))
                }
                Event::End(ref e) if e.local_name().as_ref() == b"row" => break,
                Event::Eof => {
                    return Err(SourceError::Malformed(
                        "worksheet ended inside a row".to_string(),
                    ))
                }
                _ => continue,
            };

            let raw = if has_body { self.read_cell_text()? } else { None };
            let value = cell
                .kind
                .resolve(raw, cell.style, self.shared_strings, self.formats);

            let col = cell.position.unwrap_or(cells.len());
            if col >= MAX_COLUMNS {
                continue;
            }
            if col >= cells.len() {
                cells.resize(col + 1, String::new());
            }
            cells[col] = value;
        }

        while cells.last().is_some_and(String::is_empty) {
            cells.pop();
        }
        Ok(cells)
    }

    /// Collect the text of `<v>` or `<is><t>` inside a cell, up to `</c>`.
    fn read_cell_text(&mut self) -> Result<Option<String>> {
        let mut value: Option<String> = None;
        let mut in_text = false;
        let mut in_phonetic = false;

        loop {
            self.cell_buf.clear();
            match self.xml.read_event_into(&mut self.cell_buf)? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"v" | b"t" if !in_phonetic => in_text = true,
                    b"rPh" | b"phoneticPr" => in_phonetic = true,
                    _ => {}
                },
                Event::Text(ref t) if in_text => {
                    value.get_or_insert_with(String::new).push_str(&t.unescape()?);
                }
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"v" | b"t" => in_text = false,
                    b"rPh" | b"phoneticPr" => in_phonetic = false,
                    b"c" => break,
                    _ => {}
                },
                Event::Eof => {
                    return Err(SourceError::Malformed(
                        "worksheet ended inside a cell".to_string(),
                    ))
                }
                _ => {}
            }
        }

        Ok(value)
    }
}

impl Iterator for WorksheetRows<'_> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((number, cells)) = self.pending.take() {
                // Rows absent from the sheet are emitted as empty rows.
                if number > self.next_row {
                    self.next_row += 1;
                    self.pending = Some((number, cells));
                    return Some(Ok(Vec::new()));
                }
                self.next_row = self.next_row.max(number).saturating_add(1);
                return Some(Ok(cells));
            }

            if self.done {
                return None;
            }

            match self.read_row() {
                Ok(Some(row)) => self.pending = Some(row),
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn row_attribute(e: &BytesStart) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"r")
        .and_then(|a| row_number(&a.value))
}

/// Attributes of a `<c>` element.
struct CellAttributes {
    /// 0-based column from the `r` reference.
    position: Option<usize>,
    kind: CellKind,
    /// Index into `cellXfs` from the `s` attribute.
    style: Option<usize>,
}

fn cell_attributes(e: &BytesStart) -> CellAttributes {
    let mut cell = CellAttributes {
        position: None,
        kind: CellKind::Number,
        style: None,
    };
    for a in e.attributes().flatten() {
        match a.key.as_ref() {
            b"r" => cell.position = column_index(&a.value),
            b"t" => cell.kind = CellKind::from_attr(&a.value),
            b"s" => {
                cell.style = std::str::from_utf8(&a.value)
                    .ok()
                    .and_then(|v| v.trim().parse().ok());
            }
            _ => {}
        }
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="People" sheetId="1" r:id="rId1"/>
    <sheet name="Q&amp;A" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#;

    const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
  <si><t>Name</t></si>
  <si><t>Age</t></si>
  <si><r><t>An</t></r><r><t xml:space="preserve">n </t></r></si>
</sst>"#;

    const SHEET1: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
    <row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>9</v></c></row>
    <row r="4"><c r="A4" t="inlineStr"><is><t>Bo &amp; Co</t></is></c><c r="C4" t="b"><v>1</v></c><c r="D4"/></row>
  </sheetData>
</worksheet>"#;

    const SHEET2: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData/>
</worksheet>"#;

    fn write_workbook(parts: &[(&str, &str)]) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        let mut zip = ZipWriter::new(file.reopen().unwrap());
        for (name, content) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        file
    }

    fn sample_workbook() -> NamedTempFile {
        write_workbook(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            ("xl/sharedStrings.xml", SHARED_STRINGS),
            ("xl/worksheets/sheet1.xml", SHEET1),
            ("xl/worksheets/sheet2.xml", SHEET2),
        ])
    }

    #[test]
    fn test_xlsx_source_lists_sheets_in_order() {
        let file = sample_workbook();
        let source = XlsxSource::open(file.path()).unwrap();
        assert_eq!(source.sheet_names(), ["People".to_string(), "Q&A".to_string()]);
        assert_eq!(source.description(), file.path().display().to_string());
    }

    #[test]
    fn test_xlsx_source_streams_rows() {
        let file = sample_workbook();
        let mut source = XlsxSource::open(file.path()).unwrap();

        let rows: Vec<Vec<String>> = source.rows("People").unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(
            rows,
            vec![
                vec!["Name", "Age"],
                vec!["Ann ", "9"],
                vec![],
                vec!["Bo & Co", "", "TRUE"],
            ]
        );
    }

    #[test]
    fn test_xlsx_source_empty_sheet() {
        let file = sample_workbook();
        let mut source = XlsxSource::open(file.path()).unwrap();
        assert_eq!(source.rows("Q&A").unwrap().count(), 0);
    }

    #[test]
    fn test_xlsx_source_unknown_sheet() {
        let file = sample_workbook();
        let mut source = XlsxSource::open(file.path()).unwrap();
        assert!(matches!(source.rows("Nope").err(), Some(SourceError::UnknownSheet(_))));
    }

    #[test]
    fn test_xlsx_source_without_shared_strings_or_rels() {
        let file = write_workbook(&[
            (
                "xl/workbook.xml",
                r#"<workbook><sheets><sheet name="Only" sheetId="1" r:id="rId9"/></sheets></workbook>"#,
            ),
            (
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetData><row><c><v>1</v></c><c><v>2</v></c></row></sheetData></worksheet>"#,
            ),
        ]);
        let mut source = XlsxSource::open(file.path()).unwrap();
        let rows: Vec<Vec<String>> = source.rows("Only").unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_xlsx_source_truncated_sheet_is_an_error() {
        let file = write_workbook(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            (
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c>"#,
            ),
        ]);
        let mut source = XlsxSource::open(file.path()).unwrap();
        let results: Vec<_> = source.rows("People").unwrap().collect();
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn test_xlsx_source_missing_file() {
        let err = XlsxSource::open("/nonexistent/book.xlsx").unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_xlsx_source_not_a_zip() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not a workbook").unwrap();
        let err = XlsxSource::open(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Zip(_)));
    }

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1"><numFmt numFmtId="164" formatCode="&quot;$&quot;#,##0.00"/></numFmts>
  <cellStyleXfs count="1"><xf numFmtId="0"/></cellStyleXfs>
  <cellXfs count="4">
    <xf numFmtId="0" xfId="0"/>
    <xf numFmtId="14" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="10" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="164" xfId="0" applyNumberFormat="1"/>
  </cellXfs>
</styleSheet>"#;

    fn styled_workbook(workbook: &str, sheet: &str) -> NamedTempFile {
        write_workbook(&[
            ("xl/workbook.xml", workbook),
            ("xl/styles.xml", STYLES),
            ("xl/worksheets/sheet1.xml", sheet),
        ])
    }

    #[test]
    fn test_xlsx_source_formats_numbers_by_style() {
        let file = styled_workbook(
            r#"<workbook><sheets><sheet name="Only" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            r#"<worksheet><sheetData><row r="1">
                <c r="A1" s="1"><v>45123</v></c>
                <c r="B1" s="2"><v>0.256</v></c>
                <c r="C1" s="3"><v>1234.5</v></c>
                <c r="D1" s="0"><v>0.1</v></c>
                <c r="E1"><v>45123</v></c>
                <c r="F1" s="1" t="str"><v>45123</v></c>
            </row></sheetData></worksheet>"#,
        );
        let mut source = XlsxSource::open(file.path()).unwrap();
        let rows: Vec<Vec<String>> = source.rows("Only").unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(
            rows,
            vec![vec!["07-16-23", "25.60%", "$1,234.50", "0.1", "45123", "45123"]]
        );
    }

    #[test]
    fn test_xlsx_source_uses_1904_date_system() {
        let file = styled_workbook(
            r#"<workbook><workbookPr date1904="1"/><sheets><sheet name="Only" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            r#"<worksheet><sheetData><row r="1"><c r="A1" s="1"><v>0</v></c></row></sheetData></worksheet>"#,
        );
        let mut source = XlsxSource::open(file.path()).unwrap();
        let rows: Vec<Vec<String>> = source.rows("Only").unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec![vec!["01-01-04"]]);
    }

    #[test]
    fn test_xlsx_source_skips_phonetic_runs() {
        let file = write_workbook(&[
            (
                "xl/workbook.xml",
                r#"<workbook><sheets><sheet name="Only" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            ),
            (
                "xl/sharedStrings.xml",
                r#"<sst><si><t>東京</t><rPh sb="0" eb="2"><t>トウキョウ</t></rPh><phoneticPr fontId="1"/></si></sst>"#,
            ),
            (
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetData><row r="1">
                    <c r="A1" t="s"><v>0</v></c>
                    <c r="B1" t="inlineStr"><is><t>大阪</t><rPh sb="0" eb="2"><t>オオサカ</t></rPh></is></c>
                </row></sheetData></worksheet>"#,
            ),
        ]);
        let mut source = XlsxSource::open(file.path()).unwrap();
        let rows: Vec<Vec<String>> = source.rows("Only").unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec![vec!["東京", "大阪"]]);
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index(b"A1"), Some(0));
        assert_eq!(column_index(b"$C$7"), Some(2));
        assert_eq!(column_index(b"AA10"), Some(26));
        assert_eq!(column_index(b"12"), None);
    }
}
