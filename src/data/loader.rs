//! Sheet loader: turns streamed rows into [`SheetTable`]s.

use anyhow::{bail, Context, Result};

use super::table::{display_width, Column, Row, SheetTable};
use crate::source::{self, TabularSource};

/// Options controlling how much work the loader does per cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip per-cell width growth; widths come from the header only.
    pub performance: bool,
}

/// A named sheet with its loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub table: SheetTable,
}

/// Every sheet of one file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    /// Where the data came from, e.g. the file path.
    pub name: String,
    pub sheets: Vec<Sheet>,
}

/// Build a table from a sheet's rows (header first).
///
/// Each data row is prefixed with its zero-based index, and an untitled
/// index column is prepended once all rows are read. Any read error aborts
/// the whole sheet.
pub fn load_sheet<I>(rows: I, options: &LoadOptions) -> source::Result<SheetTable>
where
    I: IntoIterator<Item = source::Result<Vec<String>>>,
{
    let mut rows = rows.into_iter();

    let mut columns: Vec<Column> = match rows.next().transpose()? {
        Some(header) => header.into_iter().map(Column::from_title).collect(),
        None => Vec::new(),
    };

    let mut table_rows: Vec<Row> = Vec::new();
    for row in rows {
        let mut row = row?;
        row.truncate(columns.len());

        if !options.performance {
            for (column, value) in columns.iter_mut().zip(&row) {
                column.fit(value);
            }
        }

        let mut indexed = Vec::with_capacity(row.len() + 1);
        indexed.push(table_rows.len().to_string());
        indexed.extend(row);
        table_rows.push(indexed);
    }

    let amount = table_rows.len().to_string();
    columns.insert(
        0,
        Column {
            title: String::new(),
            width: display_width(&amount),
        },
    );

    Ok(SheetTable {
        columns,
        rows: table_rows,
    })
}

/// Load every sheet of a source, in order.
///
/// Fails if the source has no sheets or any sheet cannot be read.
pub fn load_workbook(source: &mut dyn TabularSource, options: &LoadOptions) -> Result<Workbook> {
    let names = source.sheet_names().to_vec();
    tracing::debug!(sheets = ?names, "Read file sheets");

    if names.is_empty() {
        bail!("No sheets found in the file");
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let rows = source
            .rows(&name)
            .with_context(|| format!("Failed to open sheet {name:?}"))?;
        let table =
            load_sheet(rows, options).with_context(|| format!("Failed to read sheet {name:?}"))?;

        tracing::debug!(
            sheet = %name,
            columns = table.column_count(),
            rows = table.row_count(),
            "Loaded sheet"
        );
        sheets.push(Sheet { name, table });
    }

    Ok(Workbook {
        name: source.description().to_string(),
        sheets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::MAX_COLUMN_WIDTH;
    use crate::source::{MemorySource, SourceError};

    fn ok_rows(rows: Vec<Vec<&str>>) -> Vec<source::Result<Vec<String>>> {
        rows.into_iter()
            .map(|r| Ok(r.into_iter().map(String::from).collect()))
            .collect()
    }

    fn widths(table: &SheetTable) -> Vec<usize> {
        table.columns.iter().map(|c| c.width).collect()
    }

    #[test]
    fn test_load_sheet_name_age() {
        let table = load_sheet(
            ok_rows(vec![vec!["Name", "Age"], vec!["Ann", "9"]]),
            &LoadOptions::default(),
        )
        .unwrap();

        let titles: Vec<&str> = table.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["", "Name", "Age"]);
        assert_eq!(widths(&table), vec![1, 4, 3]);
        assert_eq!(table.rows, vec![vec!["0", "Ann", "9"]]);
    }

    #[test]
    fn test_load_sheet_grows_widths() {
        let table = load_sheet(
            ok_rows(vec![
                vec!["A", "B"],
                vec!["short", "x"],
                vec!["much longer value", "yy"],
            ]),
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(widths(&table), vec![1, 17, 2]);
    }

    #[test]
    fn test_load_sheet_performance_mode_keeps_header_widths() {
        let table = load_sheet(
            ok_rows(vec![vec!["A", "Bee"], vec!["a very long value", "z"]]),
            &LoadOptions { performance: true },
        )
        .unwrap();

        assert_eq!(widths(&table), vec![1, 1, 3]);
        assert_eq!(table.rows[0], vec!["0", "a very long value", "z"]);
    }

    #[test]
    fn test_load_sheet_caps_widths() {
        let huge = "w".repeat(MAX_COLUMN_WIDTH + 500);
        let table = load_sheet(
            ok_rows(vec![vec![huge.as_str()], vec![huge.as_str()]]),
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(table.columns[1].width, MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_load_sheet_widths_are_monotonic_and_bounded() {
        let header = vec!["id", "description", "x"];
        let data = vec![
            vec!["1", "a", "xxxxxxxxxxxxxxxx"],
            vec!["22", "", "x"],
            vec!["333"],
        ];
        let mut input = vec![header.clone()];
        input.extend(data);
        let table = load_sheet(ok_rows(input), &LoadOptions::default()).unwrap();

        for (column, title) in table.columns.iter().skip(1).zip(&header) {
            assert!(column.width >= display_width(title));
            assert!(column.width <= MAX_COLUMN_WIDTH);
        }
    }

    #[test]
    fn test_load_sheet_indexes_ragged_rows() {
        let table = load_sheet(
            ok_rows(vec![
                vec!["A", "B", "C"],
                vec!["1"],
                vec![],
                vec!["1", "2", "3", "overflow"],
            ]),
            &LoadOptions::default(),
        )
        .unwrap();

        for (n, row) in table.rows.iter().enumerate() {
            assert_eq!(row[0], n.to_string());
            assert!(row.len() <= table.column_count());
        }
        assert_eq!(table.rows[1], vec!["1"]);
        assert_eq!(table.rows[2], vec!["2", "1", "2", "3"]);
    }

    #[test]
    fn test_load_sheet_index_column_width_tracks_row_count() {
        let mut input = vec![vec!["H".to_string()]];
        input.extend((0..120).map(|i| vec![i.to_string()]));
        let table = load_sheet(input.into_iter().map(Ok), &LoadOptions::default()).unwrap();

        assert_eq!(table.columns[0].width, 3);
        assert_eq!(table.rows[119][0], "119");
    }

    #[test]
    fn test_load_sheet_empty_sheet() {
        let table = load_sheet(Vec::new(), &LoadOptions::default()).unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.columns[0].width, 1);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_load_sheet_read_error_is_fatal() {
        let rows: Vec<source::Result<Vec<String>>> = vec![
            Ok(vec!["A".to_string()]),
            Ok(vec!["1".to_string()]),
            Err(SourceError::Malformed("broken row".to_string())),
            Ok(vec!["2".to_string()]),
        ];
        assert!(load_sheet(rows, &LoadOptions::default()).is_err());
    }

    #[test]
    fn test_load_workbook_keeps_sheet_order() {
        let mut source = MemorySource::new("book.xlsx")
            .with_sheet("First", vec![vec!["A"], vec!["1"]])
            .with_sheet("Second", vec![vec!["B"]]);

        let workbook = load_workbook(&mut source, &LoadOptions::default()).unwrap();
        assert_eq!(workbook.name, "book.xlsx");
        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(workbook.sheets[1].table.row_count(), 0);
    }

    #[test]
    fn test_load_workbook_without_sheets_fails() {
        let mut source = MemorySource::new("empty.xlsx");
        let err = load_workbook(&mut source, &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("No sheets"));
    }
}
