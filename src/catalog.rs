//! Static content catalogs.
//!
//! Languages, categories, recommendation cards, and trending topics are
//! fixed at compile time. The recommendation titles and trending topics
//! together form the autosuggest pool.

/// A language the backend can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// A recommendation category. `all` is synthetic and matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

/// A card on the for-you view. `icon` is a symbolic key resolved to a
/// glyph at render time.
#[derive(Debug, Clone, Copy)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Español" },
    Language { code: "hi", name: "हिन्दी" },
    Language { code: "fr", name: "Français" },
    Language { code: "de", name: "Deutsch" },
];

pub const CATEGORIES: &[Category] = &[
    Category { id: "all", name: "All" },
    Category { id: "tech", name: "Technology" },
    Category { id: "science", name: "Science" },
    Category { id: "arts", name: "Arts" },
    Category { id: "history", name: "History" },
    Category { id: "skills", name: "Life Skills" },
];

pub const RECOMMENDATIONS: &[Recommendation] = &[
    Recommendation {
        title: "Introduction to Python",
        description: "Start your programming journey.",
        icon: "code",
        category: "tech",
    },
    Recommendation {
        title: "How Do Neural Networks Work?",
        description: "Explore the core concepts behind AI.",
        icon: "hub",
        category: "tech",
    },
    Recommendation {
        title: "Fundamentals of UI/UX",
        description: "Principles of user-friendly design.",
        icon: "design",
        category: "tech",
    },
    Recommendation {
        title: "What is Blockchain?",
        description: "Understand the tech behind crypto.",
        icon: "link",
        category: "tech",
    },
    Recommendation {
        title: "JavaScript ES6 Features",
        description: "Unlock modern JavaScript capabilities.",
        icon: "code",
        category: "tech",
    },
    Recommendation {
        title: "The Theory of Relativity",
        description: "Grasp Einstein's ideas on space and time.",
        icon: "rocket",
        category: "science",
    },
    Recommendation {
        title: "Quantum Computing Explained",
        description: "Dive into the world of quantum bits.",
        icon: "memory",
        category: "science",
    },
    Recommendation {
        title: "CRISPR Gene Editing",
        description: "Learn how scientists can edit DNA.",
        icon: "biotech",
        category: "science",
    },
    Recommendation {
        title: "The Human Brain",
        description: "A journey into the complexities of our mind.",
        icon: "psychology",
        category: "science",
    },
    Recommendation {
        title: "The Roman Empire",
        description: "Explore the rise and fall of a great civilization.",
        icon: "castle",
        category: "history",
    },
    Recommendation {
        title: "Ancient Egypt Mythology",
        description: "Discover the gods and myths of the pharaohs.",
        icon: "monument",
        category: "history",
    },
    Recommendation {
        title: "Basics of Personal Finance",
        description: "Master budgeting, saving, and investing.",
        icon: "money",
        category: "skills",
    },
    Recommendation {
        title: "The Art of Storytelling",
        description: "Craft compelling and memorable narratives.",
        icon: "stories",
        category: "arts",
    },
    Recommendation {
        title: "Public Speaking Mastery",
        description: "Build confidence and deliver powerful speeches.",
        icon: "campaign",
        category: "skills",
    },
    Recommendation {
        title: "Introduction to Philosophy",
        description: "Think about life's biggest questions.",
        icon: "lotus",
        category: "arts",
    },
];

pub const TRENDING_TOPICS: &[&str] = &[
    "History of Ancient Rome",
    "Quantum Computing Explained",
    "Basics of Stoic Philosophy",
    "The Art of Japanese Woodblock Prints",
    "Neural Networks for Beginners",
];

/// Minimum trimmed query length before suggestions are offered.
const MIN_SUGGEST_LEN: usize = 2;

/// Maximum suggestions shown at once.
const MAX_SUGGESTIONS: usize = 5;

/// Look up a language by code, if it exists in the catalog.
pub fn language_by_code(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// Look up a category by id, if it exists in the catalog.
pub fn category_by_id(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Recommendations visible under a category filter, capped to 10.
///
/// The synthetic `all` id disables the filter.
pub fn recommendations_for(category_id: &str) -> Vec<&'static Recommendation> {
    RECOMMENDATIONS
        .iter()
        .filter(|r| category_id == "all" || r.category == category_id)
        .take(10)
        .collect()
}

/// Filter the autosuggest pool (recommendation titles ∪ trending topics)
/// by case-insensitive substring match.
///
/// Queries shorter than two trimmed characters yield nothing, and results
/// are capped to five entries in pool order.
pub fn suggestions(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < MIN_SUGGEST_LEN {
        return Vec::new();
    }

    RECOMMENDATIONS
        .iter()
        .map(|r| r.title)
        .chain(TRENDING_TOPICS.iter().copied())
        .filter(|title| title.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_consistent() {
        // Every recommendation points at a real (non-synthetic) category.
        for rec in RECOMMENDATIONS {
            let cat = category_by_id(rec.category);
            assert!(cat.is_some(), "unknown category for '{}'", rec.title);
            assert_ne!(rec.category, "all");
        }
        assert!(category_by_id("all").is_some());
        assert!(language_by_code("en").is_some());
    }

    #[test]
    fn test_recommendations_for_all_is_unfiltered() {
        let all = recommendations_for("all");
        assert_eq!(all.len(), 10.min(RECOMMENDATIONS.len()));
    }

    #[test]
    fn test_recommendations_for_science_only_science() {
        let science = recommendations_for("science");
        assert!(!science.is_empty());
        assert!(science.iter().all(|r| r.category == "science"));
        assert!(science.len() <= 10);
    }

    #[test]
    fn test_recommendations_unknown_category_empty() {
        assert!(recommendations_for("nonsense").is_empty());
    }

    #[test]
    fn test_suggestions_single_char_hidden() {
        assert!(suggestions("q").is_empty());
        assert!(suggestions("  q  ").is_empty());
    }

    #[test]
    fn test_suggestions_blank_hidden() {
        assert!(suggestions("").is_empty());
        assert!(suggestions("   ").is_empty());
    }

    #[test]
    fn test_suggestions_case_insensitive_substring() {
        let hits = suggestions("qu");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|t| t.to_lowercase().contains("qu")));
        // "Quantum Computing Explained" is in both the recommendations and
        // the trending list; pool order keeps the recommendation first.
        assert!(hits.contains(&"Quantum Computing Explained"));
    }

    #[test]
    fn test_suggestions_capped_at_five() {
        // "e" appears in nearly every pool entry.
        assert!(suggestions("es").len() <= 5);
        assert_eq!(suggestions("the").len().min(5), suggestions("the").len());
    }

    #[test]
    fn test_suggestions_query_is_trimmed() {
        assert_eq!(suggestions("  quantum  "), suggestions("quantum"));
    }
}
