use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error(transparent)]
    Common(#[from] seasoning_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("材料の指定が不正です: {0} (例: 鶏もも肉:250)")]
    InvalidIngredient(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<seasoning_common::LoadError> for CalcError {
    fn from(e: seasoning_common::LoadError) -> Self {
        CalcError::Common(e.into())
    }
}

impl From<seasoning_common::EvaluationError> for CalcError {
    fn from(e: seasoning_common::EvaluationError) -> Self {
        CalcError::Common(e.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
