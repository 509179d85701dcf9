use clap::{Parser, Subcommand};
use seasoning_common::Cuisine;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seasoning-calc")]
#[command(about = "材料の重量からレシピ別の調味料の分量を計算するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// レシピJSONファイル（省略時は環境変数・設定ファイル・recipes.json の順）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レシピ一覧を表示
    List {
        /// ジャンルで絞り込み (all/japanese/western/chinese/korean/other)
        #[arg(short, long, default_value = "all")]
        cuisine: CuisineFilter,

        /// レシピ名で絞り込み（部分一致）
        #[arg(short, long)]
        search: Option<String>,
    },

    /// レシピの調味料と計算式を表示
    Show {
        /// レシピキー
        #[arg(required = true)]
        recipe: String,
    },

    /// 調味料の分量を計算
    Calc {
        /// レシピキー（省略時は設定の既定レシピ）
        recipe: Option<String>,

        /// 材料 (名前:重量)。複数指定可、省略時は対話入力
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// レシピデータの計算式を検査
    Check,

    /// 設定を表示/編集
    Config {
        /// カタログのパスを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 既定のレシピを設定
        #[arg(long)]
        set_default_recipe: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// ジャンルの絞り込み
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CuisineFilter {
    #[default]
    All,
    Only(Cuisine),
}

impl CuisineFilter {
    pub fn cuisine(&self) -> Option<Cuisine> {
        match self {
            CuisineFilter::All => None,
            CuisineFilter::Only(c) => Some(*c),
        }
    }
}

impl std::str::FromStr for CuisineFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(CuisineFilter::All),
            _ => s.parse::<Cuisine>().map(CuisineFilter::Only),
        }
    }
}

impl std::fmt::Display for CuisineFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CuisineFilter::All => write!(f, "all"),
            CuisineFilter::Only(c) => write!(f, "{}", c.tag()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuisine_filter_from_str() {
        assert_eq!("all".parse::<CuisineFilter>(), Ok(CuisineFilter::All));
        assert_eq!(
            "Chinese".parse::<CuisineFilter>(),
            Ok(CuisineFilter::Only(Cuisine::Chinese))
        );
        assert_eq!(
            "和風".parse::<CuisineFilter>(),
            Ok(CuisineFilter::Only(Cuisine::Japanese))
        );
        assert!("french".parse::<CuisineFilter>().is_err());
    }

    #[test]
    fn test_parse_calc_args() {
        let cli = Cli::parse_from([
            "seasoning-calc",
            "calc",
            "teriyaki",
            "-i",
            "鶏もも肉:250",
            "--ingredient",
            "玉ねぎ:50",
            "--json",
        ]);
        match cli.command {
            Commands::Calc { recipe, ingredients, json } => {
                assert_eq!(recipe.as_deref(), Some("teriyaki"));
                assert_eq!(ingredients, vec!["鶏もも肉:250", "玉ねぎ:50"]);
                assert!(json);
            }
            _ => panic!("calc として解釈されるべき"),
        }
    }

    #[test]
    fn test_global_catalog_flag() {
        let cli = Cli::parse_from(["seasoning-calc", "list", "--catalog", "my.json", "-c", "korean"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("my.json")));
        match cli.command {
            Commands::List { cuisine, search } => {
                assert_eq!(cuisine, CuisineFilter::Only(Cuisine::Korean));
                assert!(search.is_none());
            }
            _ => panic!("list として解釈されるべき"),
        }
    }
}
