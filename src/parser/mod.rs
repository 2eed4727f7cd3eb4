//! Parser Module
//!
//! calamineを使用したワークブック読み込みの実装。
//! シート名の解決と、固定の行範囲・列からの行データ抽出を行います。

mod workbook;

pub use workbook::PriceWorkbook;
