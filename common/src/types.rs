//! レシピデータの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - RecipeRecord / CondimentRecord: レシピJSONの1件分（コンパイル前）
//! - Cuisine: 料理ジャンル
//! - Role: 後続の計算式から名前で参照される調味料の役割
//! - DependencyMode: 前の調味料の値を後続へ渡す方式

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 料理ジャンル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Cuisine {
    Japanese,
    Western,
    Chinese,
    Korean,
    #[default]
    Other,
}

impl Cuisine {
    pub const ALL: [Cuisine; 5] = [
        Cuisine::Japanese,
        Cuisine::Western,
        Cuisine::Chinese,
        Cuisine::Korean,
        Cuisine::Other,
    ];

    /// JSON上のタグ
    pub fn tag(&self) -> &'static str {
        match self {
            Cuisine::Japanese => "japanese",
            Cuisine::Western => "western",
            Cuisine::Chinese => "chinese",
            Cuisine::Korean => "korean",
            Cuisine::Other => "other",
        }
    }

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Japanese => "和風",
            Cuisine::Western => "洋風",
            Cuisine::Chinese => "中華風",
            Cuisine::Korean => "韓国風",
            Cuisine::Other => "その他",
        }
    }
}

impl From<String> for Cuisine {
    /// 未知のタグは `Other` として扱う
    fn from(tag: String) -> Self {
        tag.parse().unwrap_or(Cuisine::Other)
    }
}

impl FromStr for Cuisine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Cuisine::ALL
            .into_iter()
            .find(|c| c.tag() == lower || c.label() == s.trim())
            .ok_or_else(|| {
                format!(
                    "Unknown cuisine: {}. Use japanese, western, chinese, korean, or other",
                    s
                )
            })
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 調味料の役割
///
/// 計算式の中では `variable_name()` の名前で参照される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Soy,
    Miso,
    Sugar,
    Sake,
    Mirin,
    Ginger,
    Garlic,
}

/// 役割推定のキーワード（優先順）
const ROLE_KEYWORDS: [(Role, &[&str]); 7] = [
    (Role::Soy, &["醤油", "しょうゆ", "しょう油", "soy"]),
    (Role::Miso, &["味噌", "みそ", "miso"]),
    (Role::Sugar, &["砂糖", "sugar"]),
    (Role::Sake, &["酒", "sake"]),
    (Role::Mirin, &["みりん", "味醂", "mirin"]),
    (Role::Ginger, &["生姜", "しょうが", "ショウガ", "ginger"]),
    (Role::Garlic, &["にんにく", "ニンニク", "大蒜", "garlic"]),
];

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Soy,
        Role::Miso,
        Role::Sugar,
        Role::Sake,
        Role::Mirin,
        Role::Ginger,
        Role::Garlic,
    ];

    /// 計算式中の変数名
    pub fn variable_name(&self) -> &'static str {
        match self {
            Role::Soy => "soy",
            Role::Miso => "miso",
            Role::Sugar => "sugar",
            Role::Sake => "sake",
            Role::Mirin => "mirin",
            Role::Ginger => "ginger",
            Role::Garlic => "garlic",
        }
    }

    /// 変数名から役割を引く
    pub fn from_variable(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.variable_name() == name)
    }

    /// 表示名から役割を推定する（部分一致、優先順で最初の一致）
    ///
    /// 明示的な `role` が無い調味料のためのフォールバック。
    pub fn infer(display_name: &str) -> Option<Role> {
        let lower = display_name.to_lowercase();
        ROLE_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(role, _)| *role)
    }

    /// 位置方式での参照スロット
    ///
    /// soy と miso は同じ先頭スロットを共有する。
    pub fn positional_slot(&self) -> Option<usize> {
        match self {
            Role::Soy | Role::Miso => Some(0),
            Role::Sake => Some(1),
            Role::Ginger => Some(2),
            Role::Sugar | Role::Mirin | Role::Garlic => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variable_name())
    }
}

/// 計算済みの値を後続の計算式へ渡す方式
///
/// カタログ単位で1つに固定される（スキーマバージョンで決まる）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyMode {
    /// 直前までの値を順番通りに渡す（スキーマ1）
    #[default]
    Positional,
    /// 役割ごとの値を名前で渡す（スキーマ2）
    Role,
}

impl DependencyMode {
    pub fn from_schema_version(version: u64) -> Option<Self> {
        match version {
            1 => Some(DependencyMode::Positional),
            2 => Some(DependencyMode::Role),
            _ => None,
        }
    }
}

/// レシピJSONの1件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub name: String,
    pub cuisine: Cuisine,
    pub default_salt_info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt_formula: Option<String>,
    pub condiments: Vec<CondimentRecord>,
}

/// 調味料JSONの1件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondimentRecord {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    pub formula: String,
    #[serde(default)]
    pub is_fixed_text: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}
