use clap::Parser;
use seasoning_calc::{cli, config, error, ingredient, interactive, report};
use seasoning_common::{AppState, Catalog, EvaluationError, RecipeFilter, MAX_INGREDIENTS};
use cli::{Cli, Commands};
use config::Config;
use error::{CalcError, Result};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::List { cuisine, search } => {
            let catalog = open_catalog(&config, cli.catalog.as_deref())?;
            let filter = RecipeFilter {
                cuisine: cuisine.cuisine(),
                query: search.unwrap_or_default(),
            };
            let recipes: Vec<_> = catalog.filter(&filter).collect();

            println!("📖 レシピ一覧 ({}件 / 全{}件)\n", recipes.len(), catalog.len());
            print!("{}", report::render_recipe_list(&recipes));
        }

        Commands::Show { recipe } => {
            let catalog = open_catalog(&config, cli.catalog.as_deref())?;
            let recipe = catalog
                .get(&recipe)
                .ok_or(EvaluationError::UnknownRecipe(recipe.clone()))?;
            print!("{}", report::render_recipe(recipe));
        }

        Commands::Calc { recipe, ingredients, json } => {
            let catalog = open_catalog(&config, cli.catalog.as_deref())?;
            let mut state = AppState::with_default_recipe(config.default_recipe.as_str())
                .with_catalog(Ok(catalog));
            if let Some(key) = recipe {
                state = state.select_recipe(key);
            }

            let selected = state
                .selected_recipe()
                .ok_or_else(|| EvaluationError::UnknownRecipe(state.selected_key().to_string()))?;

            let rows = if ingredients.is_empty() {
                interactive::prompt_ingredients(selected)?
            } else {
                if ingredients.len() > MAX_INGREDIENTS {
                    tracing::warn!(
                        given = ingredients.len(),
                        max = MAX_INGREDIENTS,
                        "材料が多すぎるため先頭のみ使用します"
                    );
                }
                ingredient::parse_ingredients(&ingredients)?
            };

            let state = state.with_ingredients(rows);
            let result = state.calculate()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if let Some(recipe) = state.selected_recipe() {
                println!();
                print!("{}", report::render_result(recipe, &result));
            }
        }

        Commands::Check => {
            let path = config.resolve_catalog_path(cli.catalog.as_deref());
            let catalog = read_catalog(&path)?;
            let diagnostics = catalog.diagnostics();

            println!("🔍 {} を検査 (スキーマ{}, {}件)\n", path.display(), catalog.schema_version(), catalog.len());
            if diagnostics.is_empty() {
                println!("✔ 計算式に問題はありません");
            } else {
                print!("{}", report::render_diagnostics(&diagnostics));
                println!("\n{}件の計算式は評価時に 0.0 になります", diagnostics.len());
            }
        }

        Commands::Config { set_catalog, set_default_recipe, show } => {
            let mut config = config;

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ カタログのパスを設定しました");
            }

            if let Some(key) = set_default_recipe {
                config.set_default_recipe(key)?;
                println!("✔ 既定のレシピを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  カタログ: {}",
                    config.resolve_catalog_path(cli.catalog.as_deref()).display()
                );
                println!("  既定のレシピ: {}", config.default_recipe);
            }
        }
    }

    Ok(())
}

fn open_catalog(config: &Config, flag: Option<&Path>) -> Result<Catalog> {
    read_catalog(&config.resolve_catalog_path(flag))
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(CalcError::Config(format!(
            "レシピデータが見つかりません: {} (--catalog または {} で指定してください)",
            path.display(),
            config::CATALOG_ENV
        )));
    }
    tracing::debug!(path = %path.display(), "レシピデータを読み込み中");
    Ok(Catalog::from_file(path)?)
}
