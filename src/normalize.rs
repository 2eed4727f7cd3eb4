//! Label Normalization Module
//!
//! 説明文ラベルをキーワード照合用に正規化するモジュール。
//! 小文字化した後、ポルトガル語のアクセント付き文字を固定の対応表で置き換えます。

/// アクセント付き文字の置換表（小文字化後に適用）
const ACCENT_SUBSTITUTIONS: &[(char, char)] = &[
    ('ã', 'a'),
    ('á', 'a'),
    ('â', 'a'),
    ('é', 'e'),
    ('ê', 'e'),
    ('í', 'i'),
    ('ó', 'o'),
    ('ô', 'o'),
    ('ú', 'u'),
    ('ç', 'c'),
];

/// ラベルを正規化する
///
/// 置換表にない文字（例: `à`, `õ`）はそのまま残ります。
/// 正規化は冪等です: `normalize_label(&normalize_label(s)) == normalize_label(s)`。
///
/// # 使用例
///
/// ```rust
/// use casa_precos::normalize_label;
///
/// assert_eq!(normalize_label("Escavação Manual de Valas"), "escavacao manual de valas");
/// ```
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| {
            ACCENT_SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}
