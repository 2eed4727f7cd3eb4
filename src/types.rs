//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use calamine::Data;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// ラベルとして読む（前後の空白を除去、空セルは空文字列）
    ///
    /// 整数値の数値セルは小数点なしで表記します（`3.0` → `"3"`）。
    pub fn as_label(&self) -> String {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.trim().to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }

    /// 価格として解釈を試みる
    ///
    /// 解釈できない場合は`None`を返します。空セルも`None`です。
    /// `inf`や`NaN`のような有限でない値も解釈できない値として扱います。
    pub fn parse_price(&self) -> Option<f64> {
        let price = match self {
            CellValue::Number(n) => Some(*n),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Error(_) | CellValue::Empty => None,
        };
        price.filter(|p| p.is_finite())
    }

    /// 価格として読む（解釈できない値は0.0）
    ///
    /// 不正なセルはエラーにせず0.0に置き換えます。0.0は後段で
    /// 「正の価格ではない」として除外されます。
    pub fn as_price(&self) -> f64 {
        self.parse_price().unwrap_or(0.0)
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::String(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(e) => CellValue::Error(format!("{:?}", e)),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
            _ => CellValue::Empty,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// シートの1行分（分類に使用する2セルのみ）
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// シート上の行番号（1始まり）
    pub number: u32,

    /// ラベルセル（コードまたは説明文）
    pub label: CellValue,

    /// 価格セル
    pub price: CellValue,
}

impl Row {
    /// 新しい行を生成
    pub fn new(number: u32, label: impl Into<CellValue>, price: impl Into<CellValue>) -> Self {
        Self {
            number,
            label: label.into(),
            price: price.into(),
        }
    }

    /// `(ラベル, 価格)`の組から行番号を振って行のリストを生成
    ///
    /// 行番号は`first_number`から連番になります。
    pub fn numbered<L, P>(first_number: u32, pairs: impl IntoIterator<Item = (L, P)>) -> Vec<Row>
    where
        L: Into<CellValue>,
        P: Into<CellValue>,
    {
        pairs
            .into_iter()
            .zip(first_number..)
            .map(|((label, price), number)| Row::new(number, label, price))
            .collect()
    }
}
