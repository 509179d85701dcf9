//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// レシピデータ読み込みエラー
///
/// どちらもセッションにとって致命的で、再読み込みするまで計算できない。
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("レシピデータの解析に失敗しました: {0}")]
    ParseFailure(#[from] serde_json::Error),

    #[error("レシピデータの形式が不正です: {0}")]
    SchemaViolation(String),
}

/// 計算要求エラー（ユーザーが修正して再実行できる）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("材料の重量を入力してください")]
    InvalidInput,

    #[error("レシピが見つかりません: {0}")]
    UnknownRecipe(String),

    #[error("レシピデータを読み込み中です")]
    CatalogNotReady,

    #[error("レシピデータの読み込みに失敗しました。ページを再読み込みしてください。({0})")]
    CatalogUnavailable(String),
}

/// 計算式エラー
///
/// 調味料1件ごとに回復され、呼び出し元には伝播しない。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("計算式が空です")]
    Empty,

    #[error("不正な文字 '{ch}' ({position}文字目)")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("不正なトークン '{found}' ({position}文字目)")]
    UnexpectedToken { found: String, position: usize },

    #[error("計算式が途中で終わっています")]
    UnexpectedEnd,

    #[error("未知の変数: {0}")]
    UnknownVariable(String),

    #[error("値が割り当てられていない変数: {0}")]
    UnboundVariable(String),

    #[error("式が長すぎるか括弧の入れ子が深すぎます")]
    NestingTooDeep,

    #[error("計算結果が有限の数値ではありません")]
    NonFinite,

    #[error("固定値の数値が不正です: {0}")]
    InvalidFixedValue(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_load_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: LoadError = json_error.into();
        assert!(matches!(error, LoadError::ParseFailure(_)));
        assert!(error.to_string().contains("解析に失敗"));
    }

    #[test]
    fn test_error_transparent_load() {
        let error: Error = LoadError::SchemaViolation("condiments がありません".to_string()).into();
        assert_eq!(
            error.to_string(),
            "レシピデータの形式が不正です: condiments がありません"
        );
    }

    #[test]
    fn test_invalid_input_message() {
        let error: Error = EvaluationError::InvalidInput.into();
        assert_eq!(error.to_string(), "材料の重量を入力してください");
        assert!(matches!(error, Error::Evaluation(EvaluationError::InvalidInput)));
    }

    #[test]
    fn test_formula_error_display() {
        let error = FormulaError::UnexpectedCharacter { ch: '$', position: 3 };
        assert_eq!(error.to_string(), "不正な文字 '$' (3文字目)");
    }

    #[test]
    fn test_error_debug() {
        let error = EvaluationError::UnknownRecipe("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownRecipe"));
        assert!(debug.contains("テスト"));
    }
}
