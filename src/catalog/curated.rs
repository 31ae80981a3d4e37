use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use lazy_static::lazy_static;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

impl Ingredient {
    pub fn new<N: Into<String>, A: Into<String>>(name: N, amount: A) -> Self {
        Ingredient { name: name.into(), amount: amount.into() }
    }
}

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("Masala Oats Upma", "Savory oats cooked with vegetables and aromatic spices"),
    ("Besan Chilla with Mint Chutney", "Protein-rich chickpea flour pancakes with fresh mint sauce"),
    ("Poha with Peanuts", "Light and fluffy flattened rice with crunchy peanuts"),
    ("Dal Tadka with Jeera Rice", "Comforting lentil curry with cumin-flavored rice"),
    ("Rajma Chawal", "Hearty kidney bean curry with steamed rice"),
    ("Roasted Makhana (Fox Nuts)", "Crunchy roasted lotus seeds with light spices"),
    ("Palak Paneer with Roti", "Creamy spinach curry with cottage cheese and whole wheat flatbread"),
    ("Mixed Vegetable Pulao", "Fragrant rice cooked with seasonal vegetables and whole spices"),
];

const INGREDIENTS: &[(&str, &[(&str, &str)])] = &[
    ("Masala Oats Upma", &[
        ("Rolled oats", "1 cup"),
        ("Onion", "1 medium"),
        ("Tomato", "1"),
        ("Mustard seeds", "1 tsp"),
        ("Curry leaves", "8-10"),
        ("Green chilli", "2"),
        ("Turmeric", "1/4 tsp"),
    ]),
    ("Besan Chilla with Mint Chutney", &[
        ("Besan (chickpea flour)", "1 cup"),
        ("Onion", "1"),
        ("Cumin seeds", "1 tsp"),
        ("Fresh mint", "1/2 cup"),
        ("Green chilli", "2"),
        ("Coriander", "1/4 cup"),
        ("Lemon juice", "1 tbsp"),
    ]),
    ("Poha with Peanuts", &[
        ("Flattened rice (poha)", "2 cups"),
        ("Peanuts", "2 tbsp"),
        ("Onion", "1"),
        ("Potato", "1 small"),
        ("Mustard seeds", "1 tsp"),
        ("Turmeric", "1/2 tsp"),
        ("Lemon juice", "1 tbsp"),
    ]),
    ("Dal Tadka with Jeera Rice", &[
        ("Toor dal", "1 cup"),
        ("Basmati rice", "1 cup"),
        ("Tomatoes", "2"),
        ("Cumin seeds", "2 tsp"),
        ("Garlic", "4 cloves"),
        ("Ghee", "2 tbsp"),
        ("Red chilli", "2"),
    ]),
    ("Rajma Chawal", &[
        ("Kidney beans (rajma)", "1.5 cups"),
        ("Rice", "1 cup"),
        ("Onion", "2"),
        ("Tomato puree", "1 cup"),
        ("Rajma masala", "2 tbsp"),
        ("Ginger-garlic paste", "1 tbsp"),
    ]),
    ("Chicken Biryani", &[
        ("Chicken", "500g"),
        ("Basmati rice", "2 cups"),
        ("Yogurt", "1/2 cup"),
        ("Biryani masala", "2 tbsp"),
        ("Saffron", "pinch"),
        ("Mint", "1/2 cup"),
        ("Onion", "2"),
    ]),
    ("Palak Paneer with Roti", &[
        ("Paneer", "250g"),
        ("Spinach", "2 bunches"),
        ("Onion", "2"),
        ("Garlic", "4 cloves"),
        ("Garam masala", "1 tsp"),
        ("Cream", "2 tbsp"),
        ("Whole wheat flour", "2 cups"),
    ]),
    ("Egg Bhurji with Toast", &[
        ("Eggs", "4"),
        ("Onion", "1"),
        ("Tomato", "1"),
        ("Green chilli", "2"),
        ("Bread slices", "4"),
        ("Turmeric", "1/4 tsp"),
        ("Butter", "1 tbsp"),
    ]),
    ("Roasted Makhana (Fox Nuts)", &[
        ("Makhana", "2 cups"),
        ("Ghee", "1 tbsp"),
        ("Salt", "to taste"),
        ("Chaat masala", "1/2 tsp"),
        ("Black pepper", "1/4 tsp"),
    ]),
    ("Fruit Chaat with Chaat Masala", &[
        ("Mixed seasonal fruits", "2 cups"),
        ("Chaat masala", "1 tsp"),
        ("Lemon juice", "1 tbsp"),
        ("Black salt", "pinch"),
        ("Coriander", "2 tbsp"),
    ]),
    ("Mixed Vegetable Pulao", &[
        ("Basmati rice", "1.5 cups"),
        ("Mixed vegetables", "2 cups"),
        ("Bay leaf", "2"),
        ("Cinnamon", "1 inch"),
        ("Cloves", "4"),
        ("Ghee", "2 tbsp"),
    ]),
    ("Dal Makhani with Roti", &[
        ("Whole urad dal", "1/2 cup"),
        ("Rajma", "1/4 cup"),
        ("Butter", "3 tbsp"),
        ("Cream", "1/4 cup"),
        ("Tomato", "3"),
        ("Ginger-garlic paste", "1 tbsp"),
    ]),
    ("Paneer Tikka Masala with Naan", &[
        ("Paneer", "300g"),
        ("Yogurt", "1/2 cup"),
        ("Tikka masala paste", "3 tbsp"),
        ("Cream", "1/4 cup"),
        ("Naan", "4 pieces"),
        ("Bell peppers", "2"),
    ]),
    ("Butter Chicken with Naan", &[
        ("Chicken", "500g"),
        ("Tomato puree", "2 cups"),
        ("Butter", "4 tbsp"),
        ("Cream", "1/2 cup"),
        ("Garam masala", "1 tbsp"),
        ("Kashmiri red chilli", "2 tsp"),
    ]),
];

const STEPS: &[(&str, &[&str])] = &[
    ("Masala Oats Upma", &[
        "Dry roast oats in a pan for 2-3 minutes. Set aside.",
        "Heat oil, add mustard seeds, curry leaves, and green chilli.",
        "Add chopped onion and sauté until translucent. Add tomato and turmeric.",
        "Add 2 cups water, salt, and bring to boil. Stir in oats, cover and cook for 5 minutes.",
        "Fluff with fork, garnish with coriander. Serve hot.",
    ]),
    ("Besan Chilla with Mint Chutney", &[
        "Mix besan with water, onion, cumin, salt to make a smooth batter.",
        "For chutney: blend mint, coriander, green chilli, lemon, salt.",
        "Heat a non-stick pan, pour ladle of batter, spread in circle.",
        "Drizzle oil, cook until golden on both sides.",
        "Serve chilla hot with mint chutney.",
    ]),
    ("Poha with Peanuts", &[
        "Rinse poha in water, drain and set aside for 5 mins.",
        "Heat oil, add mustard seeds, peanuts. Add onion, potato, turmeric.",
        "Sauté until potato is soft. Add poha, salt, mix gently.",
        "Cover 2 mins. Add lemon juice, coriander. Serve.",
    ]),
    ("Dal Tadka with Jeera Rice", &[
        "Pressure cook toor dal until soft. Cook rice with cumin seeds.",
        "For tadka: heat ghee, add cumin, garlic, red chilli, pour over dal.",
        "Mix tempered dal, serve with jeera rice and lemon wedge.",
    ]),
    ("Rajma Chawal", &[
        "Soak rajma overnight. Pressure cook with salt until soft.",
        "Sauté onion, add tomato puree, rajma masala. Add cooked rajma, simmer 15 mins.",
        "Cook rice. Serve rajma over steaming rice.",
    ]),
    ("Chicken Biryani", &[
        "Marinate chicken in yogurt and biryani masala for 1 hour.",
        "Parboil rice. Layer marinated chicken and rice in handi.",
        "Add saffron milk, mint, fried onions. Seal and dum cook 25 mins.",
        "Fluff and serve with raita.",
    ]),
    ("Palak Paneer with Roti", &[
        "Blanch spinach, blend to puree. Sauté onion-garlic, add spinach puree.",
        "Add spices, paneer cubes, cream. Simmer 5 mins.",
        "Make roti dough, roll and cook on tawa. Serve paneer with hot roti.",
    ]),
    ("Egg Bhurji with Toast", &[
        "Beat eggs with salt and pepper. Heat butter in pan.",
        "Sauté onion, tomato, chilli. Pour eggs, scramble until done.",
        "Toast bread. Serve bhurji with toast.",
    ]),
    ("Roasted Makhana (Fox Nuts)", &[
        "Heat ghee in pan. Add makhana, roast on low 8-10 mins until crisp.",
        "Add salt, chaat masala, pepper. Toss. Cool and store.",
    ]),
    ("Fruit Chaat with Chaat Masala", &[
        "Chop fruits into bite-sized pieces.",
        "Add chaat masala, lemon juice, black salt. Toss gently.",
        "Garnish with coriander. Serve chilled.",
    ]),
    ("Mixed Vegetable Pulao", &[
        "Sauté whole spices in ghee. Add onions, vegetables.",
        "Add washed rice, water (1:2 ratio), salt. Bring to boil.",
        "Cover and cook on low 15 mins. Fluff and serve.",
    ]),
    ("Dal Makhani with Roti", &[
        "Cook urad dal and rajma until very soft.",
        "Mash slightly, add tomato base, butter, cream. Simmer 20 mins.",
        "Make rotis. Serve dal with hot roti.",
    ]),
    ("Paneer Tikka Masala with Naan", &[
        "Marinate paneer in yogurt and spices. Grill until charred.",
        "Make masala: onion-tomato base, add cream, grilled paneer.",
        "Warm naan. Serve tikka masala with naan.",
    ]),
    ("Butter Chicken with Naan", &[
        "Marinate and grill chicken. Make tomato-butter gravy.",
        "Add cream, grilled chicken. Simmer. Warm naan, serve.",
    ]),
];
lazy_static! {
    static ref DESCRIPTION_TABLE: HashMap<&'static str, &'static str> =
        DESCRIPTIONS.iter().copied().collect();
    static ref INGREDIENT_TABLE: HashMap<&'static str, &'static [(&'static str, &'static str)]> =
        INGREDIENTS.iter().copied().collect();
    static ref STEP_TABLE: HashMap<&'static str, &'static [&'static str]> =
        STEPS.iter().copied().collect();
}

const STEP_VERBS: [&str; 5] = [
    "Wash and prepare",
    "Heat oil in pan",
    "Add and sauté",
    "Cook until done",
    "Season and serve",
];

/// Curated description, or a sentence naming the meal-type
pub fn description(name: &str, meal_type: &str) -> String {
    match DESCRIPTION_TABLE.get(name) {
        Some(text) => text.to_string(),
        None => format!("A delicious and nutritious {} option", meal_type),
    }
}

/// Curated ingredient list, or the first two words of the name plus pantry staples
pub fn ingredients(name: &str) -> Vec<Ingredient> {
    if let Some(items) = INGREDIENT_TABLE.get(name) {
        return items
            .iter()
            .map(|(item, amount)| Ingredient::new(*item, *amount))
            .collect();
    }

    let main = name.split(' ').take(2).collect::<Vec<_>>().join(" ");
    vec![
        Ingredient::new(main, "as per recipe"),
        Ingredient::new("Onion", "1-2"),
        Ingredient::new("Tomato", "1-2"),
        Ingredient::new("Spices (turmeric, cumin, etc.)", "to taste"),
        Ingredient::new("Oil/Ghee", "2 tbsp"),
        Ingredient::new("Salt", "to taste"),
    ]
}

/// Curated preparation steps, or a five-step template built around the first word
pub fn steps(name: &str) -> Vec<String> {
    if let Some(items) = STEP_TABLE.get(name) {
        return items.iter().map(|s| s.to_string()).collect();
    }

    let main = name.split(' ').next().filter(|w| !w.is_empty()).unwrap_or("ingredients");
    STEP_VERBS
        .iter()
        .enumerate()
        .map(|(i, verb)| {
            if i == 2 {
                format!("{} {}", verb, main)
            } else {
                format!("{}.", verb)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curated_entries_are_returned_verbatim() {
        assert_eq!(
            description("Rajma Chawal", "lunch"),
            "Hearty kidney bean curry with steamed rice"
        );
        let items = ingredients("Egg Bhurji with Toast");
        assert_eq!(items.len(), 7);
        assert_eq!(items[0], Ingredient::new("Eggs", "4"));
        assert_eq!(steps("Rajma Chawal").len(), 3);
    }

    #[test]
    fn unknown_recipe_gets_templated_text() {
        assert_eq!(
            description("Quinoa Upma", "breakfast"),
            "A delicious and nutritious breakfast option"
        );

        let items = ingredients("Quinoa Upma Special");
        assert_eq!(items[0], Ingredient::new("Quinoa Upma", "as per recipe"));
        assert_eq!(items.len(), 6);

        let generated = steps("Quinoa Upma");
        assert_eq!(generated.len(), 5);
        assert_eq!(generated[0], "Wash and prepare.");
        assert_eq!(generated[2], "Add and sauté Quinoa");
        assert_eq!(generated[4], "Season and serve.");
    }

    #[test]
    fn empty_name_falls_back_to_ingredients_word() {
        assert_eq!(steps("")[2], "Add and sauté ingredients");
    }
}
