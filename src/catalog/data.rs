use super::{Catalog, Difficulty, MealType, Recipe};
use super::Difficulty::{Easy, Hard, Medium};

/// `macros` is calories, protein, carbs, fat, fiber
fn row(name: &str, vegetarian: bool, macros: [u32; 5], minutes: u32, cost_inr: u32, difficulty: Difficulty) -> Recipe {
    let [calories, protein, carbs, fat, fiber] = macros;
    Recipe::new(name, vegetarian)
        .with_macros(calories, protein, carbs, fat, fiber)
        .with_prep(minutes, cost_inr, difficulty)
}

fn cheat(name: &str, vegetarian: bool, calories: u32, score: u8, tip: &str) -> Recipe {
    Recipe::new(name, vegetarian)
        .with_macros(calories, 0, 0, 0, 0)
        .with_indulgence(score, tip)
}

pub(super) fn builtin_catalog() -> Catalog {
    let breakfast = vec![
        row("Masala Oats Upma", true, [320, 12, 52, 8, 6], 15, 60, Easy),
        row("Besan Chilla with Mint Chutney", true, [280, 15, 38, 7, 8], 20, 50, Easy),
        row("Poha with Peanuts", true, [350, 9, 58, 10, 4], 15, 45, Easy),
        row("Idli with Sambar", true, [265, 8, 48, 4, 6], 25, 55, Medium),
        row("Vegetable Upma", true, [295, 10, 45, 9, 5], 20, 50, Easy),
        row("Moong Dal Cheela", true, [270, 16, 35, 6, 9], 18, 48, Easy),
        row("Egg Bhurji with Toast", false, [320, 18, 28, 14, 2], 12, 55, Easy),
        row("Chicken Omelette with Vegetables", false, [380, 28, 12, 24, 3], 15, 70, Easy),
        row("Oats Idli", true, [240, 9, 42, 5, 7], 30, 60, Medium),
        row("Ragi Dosa with Coconut Chutney", true, [310, 11, 50, 8, 8], 25, 55, Medium),
        row("Quinoa Upma", true, [330, 14, 48, 10, 6], 20, 70, Easy),
        row("Vegetable Poha", true, [320, 8, 55, 9, 5], 15, 45, Easy),
        row("Suji Upma with Vegetables", true, [305, 9, 50, 8, 4], 18, 42, Easy),
        row("Multigrain Dosa", true, [290, 12, 46, 7, 9], 22, 58, Medium),
        row("Sprouted Moong Salad", true, [220, 14, 32, 4, 10], 10, 40, Easy),
        row("Paneer Paratha with Curd", true, [380, 18, 45, 14, 5], 25, 75, Medium),
        row("Methi Thepla", true, [295, 10, 48, 7, 6], 20, 50, Easy),
        row("Chicken Sandwich with Avocado", false, [420, 30, 35, 18, 6], 15, 90, Easy),
    ];

    let lunch = vec![
        row("Dal Tadka with Jeera Rice", true, [420, 18, 72, 8, 12], 30, 80, Medium),
        row("Rajma Chawal", true, [480, 22, 78, 9, 15], 45, 90, Medium),
        row("Chole Bhature", true, [520, 20, 75, 16, 14], 40, 95, Medium),
        row("Chicken Biryani", false, [550, 32, 65, 18, 6], 50, 130, Hard),
        row("Fish Curry with Rice", false, [480, 38, 55, 14, 5], 40, 120, Medium),
        row("Kadhi Chawal", true, [390, 14, 65, 10, 6], 35, 75, Medium),
        row("Vegetable Biryani", true, [450, 12, 70, 14, 8], 40, 100, Hard),
        row("Paneer Tikka Masala with Naan", true, [510, 24, 58, 20, 7], 35, 120, Medium),
        row("Mixed Dal with Brown Rice", true, [410, 19, 68, 9, 13], 32, 85, Medium),
        row("Palak Chole with Rice", true, [430, 21, 70, 10, 15], 35, 88, Medium),
        row("Sambhar Rice", true, [395, 15, 66, 8, 11], 30, 78, Easy),
        row("Vegetable Pulao with Raita", true, [420, 13, 68, 11, 7], 30, 85, Easy),
        row("Moong Dal Khichdi", true, [360, 16, 60, 7, 10], 25, 70, Easy),
        row("Aloo Gobi with Roti", true, [385, 11, 62, 12, 9], 35, 75, Medium),
        row("Bhindi Masala with Rice", true, [370, 10, 64, 9, 12], 30, 72, Easy),
        row("Butter Chicken with Naan", false, [580, 35, 52, 26, 5], 45, 140, Medium),
        row("Chana Masala with Jeera Rice", true, [425, 20, 71, 9, 14], 32, 82, Medium),
    ];

    let snack = vec![
        row("Roasted Makhana (Fox Nuts)", true, [180, 5, 28, 6, 3], 10, 40, Easy),
        row("Fruit Chaat with Chaat Masala", true, [150, 2, 38, 1, 5], 5, 50, Easy),
        row("Masala Roasted Chickpeas", true, [210, 12, 32, 5, 9], 15, 35, Easy),
        row("Chicken Kebabs", false, [280, 24, 8, 18, 2], 25, 85, Medium),
        row("Vegetable Cutlet", true, [230, 8, 35, 7, 6], 20, 55, Medium),
        row("Sprouts Chaat", true, [195, 10, 30, 4, 8], 10, 38, Easy),
        row("Roasted Peanuts with Spices", true, [220, 9, 18, 14, 4], 12, 30, Easy),
        row("Cucumber Raita", true, [85, 4, 12, 2, 2], 5, 25, Easy),
        row("Masala Corn Bhel", true, [205, 6, 38, 5, 5], 10, 45, Easy),
        row("Moong Dal Pakora", true, [245, 11, 28, 10, 7], 18, 50, Medium),
        row("Green Smoothie Bowl", true, [185, 5, 35, 4, 7], 8, 55, Easy),
        row("Roasted Almonds Mix", true, [195, 7, 15, 13, 4], 10, 60, Easy),
        row("Paneer Tikka Bites", true, [260, 16, 12, 18, 2], 22, 75, Medium),
        row("Masala Buttermilk", true, [95, 4, 14, 2, 1], 5, 20, Easy),
        row("Sweet Potato Chaat", true, [215, 4, 42, 4, 6], 15, 45, Easy),
        row("Mixed Fruit Yogurt", true, [170, 6, 32, 3, 4], 5, 48, Easy),
    ];

    let dinner = vec![
        row("Palak Paneer with Roti", true, [480, 24, 52, 18, 10], 35, 120, Medium),
        row("Mixed Vegetable Pulao", true, [390, 11, 68, 8, 6], 30, 85, Easy),
        row("Dal Makhani with Roti", true, [445, 20, 58, 15, 12], 40, 110, Medium),
        row("Grilled Chicken with Herbed Rice", false, [520, 42, 45, 20, 4], 40, 135, Medium),
        row("Baingan Bharta with Phulka", true, [365, 9, 55, 12, 9], 32, 75, Medium),
        row("Vegetable Khichdi with Curd", true, [350, 14, 62, 7, 8], 25, 70, Easy),
        row("Paneer Butter Masala with Naan", true, [520, 26, 54, 22, 6], 38, 130, Medium),
        row("Aloo Palak with Roti", true, [375, 12, 60, 10, 11], 30, 72, Easy),
        row("Mushroom Masala with Rice", true, [395, 15, 58, 12, 8], 32, 95, Medium),
        row("Tofu Curry with Quinoa", true, [410, 22, 52, 14, 9], 30, 105, Medium),
        row("Matar Paneer with Paratha", true, [465, 21, 56, 18, 8], 35, 115, Medium),
        row("Vegetable Jalfrezi with Roti", true, [355, 11, 58, 9, 10], 28, 80, Easy),
        row("Kadai Vegetables with Rice", true, [385, 10, 64, 10, 9], 30, 82, Easy),
        row("Lauki Chana Dal", true, [340, 17, 56, 7, 11], 32, 68, Easy),
        row("Soya Chunks Curry with Roti", true, [420, 28, 48, 12, 10], 30, 85, Medium),
        row("Methi Matar Malai with Roti", true, [435, 18, 52, 16, 8], 35, 98, Medium),
        row("Fish Tikka with Salad", false, [380, 40, 15, 18, 4], 35, 125, Medium),
    ];

    let indulgent = vec![
        cheat("Mini Samosa Chaat Bowl", true, 450, 8, "Air-fry samosas instead of deep-frying to save 150 calories"),
        cheat("Chocolate Peanut Butter Smoothie Bowl", true, 380, 7, "Use unsweetened cocoa and natural peanut butter"),
        cheat("Tandoori Paneer Pizza", true, 520, 9, "Use part-skim mozzarella and load up on vegetables"),
        cheat("Pav Bhaji", true, 465, 8, "Use whole wheat pav and extra vegetables"),
        cheat("Chicken Pizza Slice", false, 520, 9, "Pair with a side salad for balance"),
        cheat("Veg Cheese Burger", true, 490, 8, "Use multigrain bun and baked patty"),
        cheat("Pasta Arrabbiata", true, 425, 7, "Use whole wheat pasta and add extra vegetables"),
        cheat("Veg Manchurian with Fried Rice", true, 510, 9, "Bake the manchurian instead of frying"),
        cheat("Loaded Nachos", true, 485, 8, "Use baked chips and add black beans for protein"),
    ];

    Catalog::new()
        .with_bucket(MealType::Breakfast, breakfast)
        .with_bucket(MealType::Lunch, lunch)
        .with_bucket(MealType::Snack, snack)
        .with_bucket(MealType::Dinner, dinner)
        .with_bucket(MealType::Cheat, indulgent)
}
