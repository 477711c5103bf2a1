use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// Transliterates to ASCII, lowercases and joins words with hyphens.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_cyrillic_titles() {
        let slug = DefaultSlugGenerator.slugify("Новини тижня");
        assert!(!slug.is_empty());
        assert!(crate::domain::slug::is_slug(&slug));
    }

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(DefaultSlugGenerator.slugify("Test Category"), "test-category");
    }
}
