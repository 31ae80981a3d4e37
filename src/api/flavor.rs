use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::api::{extract_items, Endpoint};
use crate::config::planner::PlannerConfig;
use crate::state::app::AppState;

const SERVICE: &str = "flavordb";
const MAX_SUBSTITUTES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitute {
    pub name: String,
    pub flavor: String,
    pub similarity: u8,
    pub usage_ratio: String,
}

impl Substitute {
    fn new(name: &str, flavor: &str, similarity: u8, usage_ratio: &str) -> Self {
        Substitute {
            name: name.to_string(),
            flavor: flavor.to_string(),
            similarity,
            usage_ratio: usage_ratio.to_string(),
        }
    }
}

/// Curated swaps used when FlavorDB has nothing to offer.
/// Matched by substring of the lowercased ingredient name, first hit wins.
pub fn fallback_substitutes(ingredient: &str) -> Vec<Substitute> {
    let key = ingredient.to_lowercase();
    if key.contains("butter") {
        vec![
            Substitute::new("Ghee", "Rich, nutty", 88, "1:1"),
            Substitute::new("Coconut oil", "Mild, tropical", 72, "1:1"),
            Substitute::new("Olive oil", "Fruity", 68, "3/4:1"),
        ]
    } else if key.contains("milk") {
        vec![
            Substitute::new("Oat milk", "Creamy, neutral", 85, "1:1"),
            Substitute::new("Almond milk", "Nutty, light", 78, "1:1"),
            Substitute::new("Coconut milk", "Rich, tropical", 75, "1:1"),
        ]
    } else if key.contains("cream") {
        vec![
            Substitute::new("Greek yogurt", "Tangy, thick", 82, "1:1"),
            Substitute::new("Coconut cream", "Rich", 80, "1:1"),
        ]
    } else if key.contains("egg") {
        vec![
            Substitute::new("Flax egg (1 tbsp ground flax + 3 tbsp water)", "Neutral", 70, "1:1"),
            Substitute::new("Yogurt", "Moist", 65, "1/4 cup : 1 egg"),
        ]
    } else {
        vec![
            Substitute::new(&format!("{} alternative", ingredient), "Similar profile", 75, "1:1"),
            Substitute::new("Check pantry for similar item", "Varies", 70, "As needed"),
        ]
    }
}

fn str_field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| item.get(key).and_then(Value::as_str))
}

fn item_name(item: &Value) -> String {
    if let Some(name) = item.as_str() {
        return name.to_string();
    }
    for key in ["name", "entity_alias", "entity_alias_readable", "title"] {
        match item.get(key) {
            Some(Value::String(name)) => return name.clone(),
            Some(nested @ Value::Object(_)) => {
                return str_field(nested, &["name"]).unwrap_or("Substitute").to_string();
            }
            _ => {}
        }
    }
    "Alternative".to_string()
}

/// Turn pairing results into ranked substitutes
fn to_substitutes(items: &[Value]) -> Vec<Substitute> {
    items
        .iter()
        .take(MAX_SUBSTITUTES)
        .enumerate()
        .map(|(i, item)| Substitute {
            name: item_name(item),
            flavor: str_field(item, &["category", "flavor_profile"])
                .unwrap_or("Similar flavor profile")
                .to_string(),
            similarity: (75 + (i % 5) as u8 * 4).min(95),
            usage_ratio: str_field(item, &["ratio"]).unwrap_or("1:1").to_string(),
        })
        .collect()
}

/// FlavorDB lookups. Every call degrades to an empty or curated answer.
#[derive(Clone)]
pub struct FlavorDbClient {
    endpoint: Endpoint,
    state: AppState,
}

impl FlavorDbClient {
    pub fn new(config: &PlannerConfig, state: AppState) -> Self {
        FlavorDbClient {
            endpoint: Endpoint::new(
                SERVICE,
                config.flavor_db_base(),
                config.flavor_key(),
                config.request_timeout_secs,
            ),
            state,
        }
    }

    pub async fn search_ingredient(&self, name: &str, category: &str, page: u32, size: u32) -> Vec<Value> {
        let path = "/entities/by-name-and-category";
        let params = [
            ("entity_alias", name.to_string()),
            ("category", category.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ];
        match self.endpoint.get_json(&self.state, path, &params).await {
            Ok(value) => extract_items(value),
            Err(e) => self.endpoint.fallback(&self.state, path, &e, Vec::new()),
        }
    }

    pub async fn pairing_suggestions(&self, ingredient: &str) -> Vec<Value> {
        let path = "/food/by-alias";
        let params = [("food_pair", ingredient.to_string())];
        match self.endpoint.get_json(&self.state, path, &params).await {
            Ok(value) => extract_items(value),
            Err(e) => self.endpoint.fallback(&self.state, path, &e, Vec::new()),
        }
    }

    /// Pairing-based substitutes, or the curated table when the service has none
    pub async fn substitutes(&self, ingredient: &str) -> Vec<Substitute> {
        let path = "/food/by-alias";
        let params = [("food_pair", ingredient.to_string())];
        match self.endpoint.get_json(&self.state, path, &params).await {
            Ok(value) => {
                let items = extract_items(value);
                if items.is_empty() {
                    tracing::debug!(ingredient = ingredient, "No pairings returned, using curated substitutes");
                    fallback_substitutes(ingredient)
                } else {
                    to_substitutes(&items)
                }
            }
            Err(e) => self
                .endpoint
                .fallback(&self.state, path, &e, fallback_substitutes(ingredient)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn curated_table_matches_by_substring() {
        let subs = fallback_substitutes("Unsalted Butter");
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0].name, "Ghee");
        assert_eq!(subs[2].usage_ratio, "3/4:1");

        assert_eq!(fallback_substitutes("buttermilk")[0].name, "Ghee");
        assert_eq!(fallback_substitutes("Eggs")[1].usage_ratio, "1/4 cup : 1 egg");
    }

    #[test]
    fn unknown_ingredient_gets_generic_pair() {
        let subs = fallback_substitutes("Tamarind");
        assert_eq!(subs[0].name, "Tamarind alternative");
        assert_eq!(subs[0].similarity, 75);
        assert_eq!(subs[1].usage_ratio, "As needed");
    }

    #[test]
    fn api_items_are_ranked_and_capped() {
        let items: Vec<Value> = (0..10)
            .map(|i| json!({"entity_alias_readable": format!("Item {}", i), "category": "Spice"}))
            .collect();
        let subs = to_substitutes(&items);
        assert_eq!(subs.len(), 8);
        let scores: Vec<u8> = subs.iter().map(|s| s.similarity).collect();
        assert_eq!(scores, vec![75, 79, 83, 87, 91, 75, 79, 83]);
        assert_eq!(subs[0].name, "Item 0");
        assert_eq!(subs[0].flavor, "Spice");
        assert_eq!(subs[0].usage_ratio, "1:1");
    }

    #[test]
    fn names_resolve_from_strings_and_nested_objects() {
        assert_eq!(item_name(&json!("Cardamom")), "Cardamom");
        assert_eq!(item_name(&json!({"name": {"name": "Clove"}})), "Clove");
        assert_eq!(item_name(&json!({"id": 4})), "Alternative");
    }
}
