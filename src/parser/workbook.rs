//! Workbook Reader
//!
//! calamineのラッパーとして、シートの選択と行範囲の読み込みを提供します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::api::SheetSpec;
use crate::error::{PriceExtractError, Result};
use crate::types::{CellValue, Row};

/// 価格ワークブック
///
/// XLSX / XLS / ODS のいずれも読み込めます（calamineの自動判定）。
pub struct PriceWorkbook<RS: Read + Seek> {
    sheets: Sheets<RS>,
}

impl PriceWorkbook<Cursor<Vec<u8>>> {
    /// ファイルパスからワークブックを開く
    ///
    /// ファイル全体をメモリに読み込んでから解析します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(PriceWorkbook)` - 読み込みに成功した場合
    /// * `Err(PriceExtractError::MissingInputFile)` - ファイルが存在しない場合
    /// * `Err(PriceExtractError::Parse)` - ワークブックとして解析できない場合
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PriceExtractError::MissingInputFile(path.to_path_buf()));
        }

        let buffer = std::fs::read(path)?;
        Self::from_reader(Cursor::new(buffer))
    }
}

impl<RS: Read + Seek + Clone> PriceWorkbook<RS> {
    /// リーダーからワークブックを開く
    pub fn from_reader(reader: RS) -> Result<Self> {
        let sheets = open_workbook_auto_from_rs(reader).map_err(PriceExtractError::Parse)?;
        Ok(Self { sheets })
    }
}

impl<RS: Read + Seek> PriceWorkbook<RS> {
    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// シート指定の候補名から、実在する最初のシート名を返す
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 見つかったシート名
    /// * `Err(PriceExtractError::SheetNotFound)` - どの候補も存在しない場合
    pub fn resolve_sheet(&self, spec: &SheetSpec) -> Result<String> {
        let names = self.sheet_names();
        spec.aliases()
            .iter()
            .find(|alias| names.contains(*alias))
            .cloned()
            .ok_or_else(|| PriceExtractError::SheetNotFound(spec.aliases().join(" / ")))
    }

    /// シートの行範囲を読み込む
    ///
    /// # 引数
    ///
    /// * `sheet_name` - 読み込むシート名（完全一致）
    /// * `spec` - 行範囲（1始まり、両端を含む）
    /// * `label_column` - ラベル列（1始まり、B列 = 2）
    /// * `price_column` - 価格列（1始まり、H列 = 8）
    ///
    /// 範囲外・未入力のセルは空セルとして扱います。
    pub fn read_rows(
        &mut self,
        sheet_name: &str,
        spec: &SheetSpec,
        label_column: u32,
        price_column: u32,
    ) -> Result<Vec<Row>> {
        let range = self
            .sheets
            .worksheet_range(sheet_name)
            .map_err(PriceExtractError::Parse)?;

        let rows = (spec.first_row()..=spec.last_row())
            .map(|number| Row {
                number,
                label: cell_at(&range, number, label_column),
                price: cell_at(&range, number, price_column),
            })
            .collect();

        Ok(rows)
    }

    /// シートを選択して行範囲を読み込む
    ///
    /// 戻り値の文字列は実際に使用したシート名です。
    pub fn read_sheet(
        &mut self,
        spec: &SheetSpec,
        label_column: u32,
        price_column: u32,
    ) -> Result<(String, Vec<Row>)> {
        let sheet_name = self.resolve_sheet(spec)?;
        let rows = self.read_rows(&sheet_name, spec, label_column, price_column)?;
        Ok((sheet_name, rows))
    }
}

/// 1始まりの行・列番号でセルを取得
fn cell_at(range: &Range<Data>, row: u32, column: u32) -> CellValue {
    if row == 0 || column == 0 {
        return CellValue::Empty;
    }
    range
        .get_value((row - 1, column - 1))
        .map(CellValue::from)
        .unwrap_or(CellValue::Empty)
}
