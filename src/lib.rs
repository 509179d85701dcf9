//! seasoning-calc
//!
//! レシピJSONを読み込み、材料の総重量から調味料の分量を計算するCLI

pub mod cli;
pub mod config;
pub mod error;
pub mod ingredient;
pub mod interactive;
pub mod report;
