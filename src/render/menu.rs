use super::{format_amount, row, rule};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::domain::{Category, MenuItem};
use crate::ledger::{QuantitySelection, MAX_QUANTITY};

pub fn render_menu(
    catalog: &Catalog,
    selection: Option<&QuantitySelection>,
    only: Option<Category>,
    config: &Config,
) -> String {
    let mut out = Vec::new();
    out.push("Choose Your Favorites".to_string());
    out.push(rule('='));

    let popular: Vec<&str> = catalog
        .popular()
        .into_iter()
        .filter(|item| only.is_none() || item.category == only)
        .map(|item| item.name.as_str())
        .collect();
    if !popular.is_empty() {
        out.push(format!("★ Popular: {}", popular.join(", ")));
        out.push(String::new());
    }

    for (category, items) in catalog.partition_by_category() {
        if only.is_some() && category != only {
            continue;
        }

        out.push(category.map(|c| c.title()).unwrap_or("Other").to_string());
        out.push(rule('-'));
        for item in items {
            render_item(&mut out, item, selection, config);
        }
        out.push(String::new());
    }

    out.join("\n")
}

fn render_item(
    out: &mut Vec<String>,
    item: &MenuItem,
    selection: Option<&QuantitySelection>,
    config: &Config,
) {
    let name = if item.is_popular {
        format!("{} ★", item.name)
    } else {
        item.name.clone()
    };

    out.push(row(
        &name,
        &format_amount(&config.receipt.currency_symbol, item.unit_price),
    ));
    out.push(format!("  {}", item.description));

    let qty = selection.map(|s| s.get(&item.id)).unwrap_or(0);
    out.push(format!("  [{}]  qty {}/{}", item.id, qty, MAX_QUANTITY));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_every_item() {
        let catalog = Catalog::builtin();
        let text = render_menu(&catalog, None, None, &Config::default());

        for item in catalog.items() {
            assert!(text.contains(&item.name));
            assert!(text.contains(&format!("[{}]", item.id)));
        }
        assert!(text.contains("Food"));
        assert!(text.contains("Beverages"));
        assert!(text.contains("₹180"));
        assert!(text.contains("Big Mac ★"));
        assert!(text.contains("★ Popular: Big Mac, French Fries"));
    }

    #[test]
    fn test_menu_category_filter() {
        let catalog = Catalog::builtin();
        let text = render_menu(&catalog, None, Some(Category::Beverage), &Config::default());
        assert!(text.contains("Coca Cola"));
        assert!(!text.contains("Big Mac"));
        assert!(!text.contains("McFlurry"));
        assert!(!text.contains("★ Popular"));
    }

    #[test]
    fn test_menu_shows_selected_quantity() {
        let catalog = Catalog::builtin();
        let selection =
            crate::ledger::set_quantity(&QuantitySelection::new(), &catalog, "coke", 3).unwrap();
        let text = render_menu(&catalog, Some(&selection), None, &Config::default());
        assert!(text.contains("[coke]  qty 3/10"));
        assert!(text.contains("[fries]  qty 0/10"));
    }
}
