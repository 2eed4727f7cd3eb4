//! Boundary Tests for casa-precos
//!
//! Row windows, sheet aliases, malformed cells and other edge cases of the
//! workbook reader and the two classification modes.

use casa_precos::{
    Category, Diagnostic, ExtractionReport, ExtractorBuilder, Location, PriceWorkbook, Surface,
};
use rust_xlsxwriter::*;
use std::io::Cursor;

// Helper module for generating boundary test fixtures
mod fixtures {
    use super::*;

    /// Workbook with one sheet per `(name, cells)` entry.
    /// Cells are `(row0, col0, value)` with 0-based coordinates.
    pub fn generate(sheets: &[(&str, Vec<(u32, u16, Cell)>)]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        for (name, cells) in sheets {
            let sheet = workbook.add_worksheet();
            sheet.set_name(*name)?;
            for (row, col, value) in cells {
                match value {
                    Cell::Text(s) => sheet.write_string(*row, *col, *s)?,
                    Cell::Number(n) => sheet.write_number(*row, *col, *n)?,
                    Cell::Bool(b) => sheet.write_boolean(*row, *col, *b)?,
                };
            }
        }
        Ok(workbook.save_to_buffer()?)
    }

    pub enum Cell {
        Text(&'static str),
        Number(f64),
        Bool(bool),
    }

    /// Label in column B and price in column H of a 1-based row
    pub fn row(number: u32, label: &'static str, price: Cell) -> Vec<(u32, u16, Cell)> {
        vec![(number - 1, 1, Cell::Text(label)), (number - 1, 7, price)]
    }
}

use fixtures::Cell;

fn extract(buffer: Vec<u8>) -> ExtractionReport {
    let mut workbook = PriceWorkbook::from_reader(Cursor::new(buffer)).unwrap();
    ExtractorBuilder::new()
        .build()
        .unwrap()
        .extract(&mut workbook)
        .unwrap()
}

#[test]
fn test_rows_outside_window_are_ignored() {
    let mut cells = Vec::new();
    cells.extend(fixtures::row(6, "3.1.1", Cell::Number(10.0)));
    cells.extend(fixtures::row(7, "3.1.2", Cell::Number(11.0)));
    cells.extend(fixtures::row(150, "3.1.3", Cell::Number(12.0)));
    cells.extend(fixtures::row(151, "3.1.4", Cell::Number(13.0)));

    let buffer = fixtures::generate(&[("ORÇAMENTO - CASA", cells)]).unwrap();
    let report = extract(buffer);
    let catalog = &report.materials.extraction.catalog;
    let loc = Location::flat(Category::MovimentoTerra);

    assert_eq!(catalog.get(loc, "escavacaoValasBaldrame"), None);
    assert_eq!(catalog.get(loc, "escavacaoFundacao60x60"), Some(11.0));
    assert_eq!(catalog.get(loc, "reterroCompactacao"), Some(12.0));
    assert_eq!(catalog.get(loc, "espalhamentoBase"), None);
}

#[test]
fn test_labor_window_ends_at_row_120() {
    let mut cells = Vec::new();
    cells.extend(fixtures::row(120, "Reterro manual de valas", Cell::Number(9.0)));
    cells.extend(fixtures::row(121, "Apiloamento de fundo de vala", Cell::Number(4.0)));

    let buffer = fixtures::generate(&[("MÃO DE OBRA - CASA", cells)]).unwrap();
    let report = extract(buffer);
    let catalog = &report.labor.extraction.catalog;
    let loc = Location::flat(Category::MovimentoTerra);

    assert_eq!(catalog.get(loc, "reterroCompactacao"), Some(9.0));
    assert_eq!(catalog.get(loc, "apiloamentoFundoVala"), None);
}

#[test]
fn test_unaccented_sheet_names_are_accepted() {
    let materials = fixtures::row(7, "3.11.4", Cell::Number(12.5));
    let labor = fixtures::row(7, "Emassamento duas demãos em massa acrílica", Cell::Number(18.0));

    let buffer = fixtures::generate(&[
        ("ORCAMENTO - CASA", materials),
        ("MAO DE OBRA - CASA", labor),
    ])
    .unwrap();
    let report = extract(buffer);
    let pintura = Location::flat(Category::Pintura);

    assert_eq!(report.materials.sheet_name.as_deref(), Some("ORCAMENTO - CASA"));
    assert_eq!(report.labor.sheet_name.as_deref(), Some("MAO DE OBRA - CASA"));
    assert_eq!(report.materials.extraction.catalog.get(pintura, "emassamento"), Some(12.5));
    assert_eq!(report.labor.extraction.catalog.get(pintura, "emassamento"), Some(18.0));
}

#[test]
fn test_accented_sheet_name_wins_over_alias() {
    let buffer = fixtures::generate(&[
        ("ORCAMENTO - CASA", fixtures::row(7, "3.11.4", Cell::Number(1.0))),
        ("ORÇAMENTO - CASA", fixtures::row(7, "3.11.4", Cell::Number(2.0))),
    ])
    .unwrap();
    let report = extract(buffer);

    assert_eq!(report.materials.sheet_name.as_deref(), Some("ORÇAMENTO - CASA"));
    assert_eq!(
        report
            .materials
            .extraction
            .catalog
            .get(Location::flat(Category::Pintura), "emassamento"),
        Some(2.0)
    );
}

#[test]
fn test_workbook_without_price_sheets() {
    let buffer = fixtures::generate(&[("Sheet1", Vec::new())]).unwrap();
    let report = extract(buffer);

    assert_eq!(report.materials.sheet_name, None);
    assert_eq!(report.labor.sheet_name, None);
    assert!(report.materials.extraction.catalog.is_empty());
    assert!(report.labor.extraction.catalog.is_empty());
}

#[test]
fn test_empty_price_sheet() {
    let buffer = fixtures::generate(&[("ORÇAMENTO - CASA", Vec::new())]).unwrap();
    let report = extract(buffer);

    assert_eq!(report.materials.sheet_name.as_deref(), Some("ORÇAMENTO - CASA"));
    assert_eq!(report.materials.item_count(), 0);
    assert!(report.materials.extraction.diagnostics.is_empty());
}

#[test]
fn test_malformed_price_cells() {
    let mut cells = Vec::new();
    cells.extend(fixtures::row(7, "3.1.1", Cell::Text("abc")));
    cells.extend(fixtures::row(8, "3.1.2", Cell::Text(" 25.5 ")));
    cells.extend(fixtures::row(9, "3.1.3", Cell::Number(-4.0)));
    cells.extend(fixtures::row(10, "3.1.4", Cell::Bool(false)));

    let buffer = fixtures::generate(&[("ORÇAMENTO - CASA", cells)]).unwrap();
    let report = extract(buffer);
    let catalog = &report.materials.extraction.catalog;
    let loc = Location::flat(Category::MovimentoTerra);

    assert_eq!(catalog.get(loc, "escavacaoValasBaldrame"), None);
    assert_eq!(catalog.get(loc, "escavacaoFundacao60x60"), Some(25.5));
    assert_eq!(catalog.get(loc, "reterroCompactacao"), None);
    assert_eq!(catalog.get(loc, "espalhamentoBase"), None);
    assert_eq!(catalog.len(), 1);

    assert_eq!(
        report.materials.extraction.diagnostics,
        vec![Diagnostic::UnparseablePrice {
            row: 7,
            raw: "abc".to_string()
        }]
    );
}

#[test]
fn test_code_with_surrounding_whitespace() {
    let buffer = fixtures::generate(&[(
        "ORÇAMENTO - CASA",
        fixtures::row(7, "  3.6.3.3  ", Cell::Number(52.0)),
    )])
    .unwrap();
    let report = extract(buffer);

    assert_eq!(
        report
            .materials
            .extraction
            .catalog
            .get(Location::surface(Surface::Pisos), "revestimentoCeramico"),
        Some(52.0)
    );
}

#[test]
fn test_sentinel_without_price_keeps_previous_surface() {
    let mut cells = Vec::new();
    cells.extend(fixtures::row(7, "PAREDE", Cell::Number(1.0)));
    cells.extend(fixtures::row(8, "TETO", Cell::Number(0.0)));
    cells.extend(fixtures::row(9, "Revestimento Cerâmico", Cell::Number(30.0)));

    let buffer = fixtures::generate(&[("MÃO DE OBRA - CASA", cells)]).unwrap();
    let report = extract(buffer);
    let catalog = &report.labor.extraction.catalog;

    assert_eq!(
        catalog.get(Location::surface(Surface::Parede), "revestimentoCeramico"),
        Some(30.0)
    );
    assert_eq!(
        catalog.get(Location::surface(Surface::Teto), "revestimentoCeramico"),
        None
    );
}

#[test]
fn test_ceramic_before_any_sentinel_is_dropped() {
    let buffer = fixtures::generate(&[(
        "MÃO DE OBRA - CASA",
        fixtures::row(7, "Revestimento cerâmico", Cell::Number(30.0)),
    )])
    .unwrap();
    let report = extract(buffer);

    assert!(report.labor.extraction.catalog.is_empty());
}
