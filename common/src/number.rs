//! 表示用の数値フォーマットと寛容な数値読み取り

/// 小数点以下1桁の表示文字列にする
///
/// 丸めは入力値そのものに最も近い値を取り、ちょうど中間の場合は0から遠い方へ
/// 丸める（`0.25` → `0.3`）。`-0.0` は `0.0` に揃える。
/// 非有限値は呼び出し側で弾いておくこと。
///
/// # Examples
/// ```
/// use seasoning_common::format_one_decimal;
///
/// assert_eq!(format_one_decimal(16.0), "16.0");
/// assert_eq!(format_one_decimal(2.449), "2.4");
/// assert_eq!(format_one_decimal(1.25), "1.3");
/// assert_eq!(format_one_decimal(-0.01), "0.0");
/// ```
pub fn format_one_decimal(value: f64) -> String {
    let formatted = format!("{:.1}", round_tie_away(value));
    if formatted == "-0.0" {
        "0.0".to_string()
    } else {
        formatted
    }
}

/// 小数点以下1桁のちょうど中間の値だけを0から遠い方へ寄せる
///
/// 中間になり得るのは 4倍すると奇数になる値（`0.25`, `0.75`, ...）のみ。
/// それ以外は `{:.1}` の最近接丸めにそのまま任せる。
fn round_tie_away(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        (value * 10.0).round() / 10.0
    } else {
        value
    }
}

/// 文字列先頭の数値を読み取る
///
/// 入力欄の値を読むときと同じく寛容に扱う:
/// 先頭の空白を飛ばし、符号・整数部・小数部・指数部を読める所まで読む。
/// `"12.5g"` は 12.5、数字が1つも無ければ `None`。
pub fn parse_leading_number(text: &str) -> Option<f64> {
    leading_number_text(text)?.parse::<f64>().ok()
}

/// 文字列先頭の数値部分を書かれたまま切り出す
pub(crate) fn leading_number_text(text: &str) -> Option<&str> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // 指数部は数字が続く場合のみ採用
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}
