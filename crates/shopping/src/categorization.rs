use serde::Serialize;
use strum::{AsRefStr, Display, VariantArray};

/// Grocery store section. Declaration order is the order sections are
/// tested in and displayed.
#[derive(
    Display, AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
pub enum Category {
    Produce,
    Proteins,
    Dairy,
    Pantry,
    Other,
}

const PRODUCE: &[&str] = &[
    // Vegetables
    "lettuce",
    "tomato",
    "onion",
    "garlic",
    "potato",
    "carrot",
    "celery",
    "bell pepper",
    "cucumber",
    "zucchini",
    "broccoli",
    "cauliflower",
    "spinach",
    "kale",
    "cabbage",
    "mushroom",
    "eggplant",
    "squash",
    "leek",
    "shallot",
    "scallion",
    "green bean",
    "peas",
    "avocado",
    // Fruits
    "apple",
    "banana",
    "orange",
    "lemon",
    "lime",
    "berries",
    "berry",
    "grape",
    "mango",
    "pineapple",
    "peach",
    // Herbs
    "cilantro",
    "parsley",
    "basil",
    "mint",
    "ginger",
    "thyme",
    "rosemary",
];

const PROTEINS: &[&str] = &[
    "chicken", "beef", "pork", "turkey", "bacon", "sausage", "ham", "lamb", "steak", "fish",
    "salmon", "tuna", "cod", "shrimp", "prawn", "egg", "tofu", "tempeh",
];

const DAIRY: &[&str] = &[
    "milk",
    "cheese",
    "butter",
    "cream",
    "yogurt",
    "yoghurt",
    "parmesan",
    "mozzarella",
    "cheddar",
    "feta",
    "ricotta",
];

const PANTRY: &[&str] = &[
    // Grains & baking
    "flour",
    "sugar",
    "rice",
    "pasta",
    "spaghetti",
    "noodle",
    "oats",
    "bread",
    "baking",
    "yeast",
    "vanilla",
    "cocoa",
    "chocolate",
    // Oils, condiments & canned goods
    "oil",
    "vinegar",
    "sauce",
    "honey",
    "syrup",
    "stock",
    "broth",
    "beans",
    "lentil",
    "chickpea",
    // Spices
    "salt",
    "pepper",
    "spice",
    "cumin",
    "paprika",
    "cinnamon",
    "oregano",
];

/// Categorization Service
///
/// Stateless keyword heuristic: the lowercased ingredient text is checked
/// for a substring of each section's keywords, sections in [`Category`]
/// order, first match wins. Misclassifications are expected.
pub struct CategorizationService;

impl CategorizationService {
    pub fn categorize(ingredient: &str) -> Category {
        let normalized = ingredient.trim().to_lowercase();

        Category::VARIANTS
            .iter()
            .copied()
            .find(|category| {
                Self::keywords(*category)
                    .iter()
                    .any(|keyword| normalized.contains(keyword))
            })
            .unwrap_or(Category::Other)
    }

    fn keywords(category: Category) -> &'static [&'static str] {
        match category {
            Category::Produce => PRODUCE,
            Category::Proteins => PROTEINS,
            Category::Dairy => DAIRY,
            Category::Pantry => PANTRY,
            Category::Other => &[],
        }
    }
}
