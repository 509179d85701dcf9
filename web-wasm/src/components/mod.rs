pub mod filter_bar;
pub mod header;
pub mod ingredient_form;
pub mod recipe_tabs;
pub mod result_card;
pub mod status_banner;
