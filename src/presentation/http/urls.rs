// src/presentation/http/urls.rs
//! Named URL patterns for the public pages.
//!
//! One table drives both directions: incoming paths are resolved against it,
//! outgoing links are reversed from it, and the router registers its paths
//! from it. `articles-list` has no trailing slash while the other patterns
//! do; a path that differs only in its trailing slash does not resolve.

use crate::domain::{article::PublicationDay, slug::is_slug};
use crate::presentation::http::error::PageError;
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

pub const HOME: &str = "home";
pub const ARTICLES_LIST: &str = "articles-list";
pub const ARTICLES_CATEGORY_LIST: &str = "articles-category-list";
pub const NEWS_DETAIL: &str = "news-detail";

/// How a path parameter is matched and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// One or more ASCII digits.
    Int,
    /// `[-a-zA-Z0-9_]+`
    Slug,
}

impl Converter {
    pub fn matches(self, value: &str) -> bool {
        match self {
            Converter::Int => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            Converter::Slug => is_slug(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    Param(&'static str, Converter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlPattern {
    pub name: &'static str,
    pub segments: &'static [Segment],
    pub trailing_slash: bool,
}

pub static PATTERNS: [UrlPattern; 4] = [
    UrlPattern {
        name: HOME,
        segments: &[],
        trailing_slash: true,
    },
    UrlPattern {
        name: ARTICLES_LIST,
        segments: &[Segment::Literal("articles")],
        trailing_slash: false,
    },
    UrlPattern {
        name: ARTICLES_CATEGORY_LIST,
        segments: &[
            Segment::Literal("articles"),
            Segment::Literal("category"),
            Segment::Param("slug", Converter::Slug),
        ],
        trailing_slash: true,
    },
    UrlPattern {
        name: NEWS_DETAIL,
        segments: &[
            Segment::Literal("articles"),
            Segment::Param("year", Converter::Int),
            Segment::Param("month", Converter::Int),
            Segment::Param("day", Converter::Int),
            Segment::Param("slug", Converter::Slug),
        ],
        trailing_slash: true,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoReverseMatch {
    #[error("no URL pattern named {0:?}")]
    UnknownName(String),
    #[error("{name}: missing argument {arg:?}")]
    MissingArgument { name: &'static str, arg: &'static str },
    #[error("{name}: unexpected argument {arg:?}")]
    UnexpectedArgument { name: &'static str, arg: String },
    #[error("{name}: {value:?} is not a valid {arg}")]
    InvalidArgument {
        name: &'static str,
        arg: &'static str,
        value: String,
    },
}

impl UrlPattern {
    pub fn by_name(name: &str) -> Option<&'static UrlPattern> {
        PATTERNS.iter().find(|pattern| pattern.name == name)
    }

    /// Captured `(parameter, raw value)` pairs when `path` matches.
    pub fn match_path<'p>(&self, path: &'p str) -> Option<Vec<(&'static str, &'p str)>> {
        let rest = path.strip_prefix('/')?;
        if self.segments.is_empty() {
            return rest.is_empty().then(Vec::new);
        }

        let body = if self.trailing_slash {
            rest.strip_suffix('/')?
        } else {
            rest
        };
        let parts: Vec<&str> = body.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captures = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if *literal == part => {}
                Segment::Param(name, converter) if converter.matches(part) => {
                    captures.push((*name, part));
                }
                _ => return None,
            }
        }
        Some(captures)
    }

    /// Build a path from keyword arguments, validating each one.
    pub fn reverse(&self, kwargs: &BTreeMap<&str, String>) -> Result<String, NoReverseMatch> {
        for key in kwargs.keys() {
            let known = self
                .segments
                .iter()
                .any(|segment| matches!(segment, Segment::Param(name, _) if name == key));
            if !known {
                return Err(NoReverseMatch::UnexpectedArgument {
                    name: self.name,
                    arg: (*key).to_string(),
                });
            }
        }

        for segment in self.segments {
            if let Segment::Param(arg, converter) = *segment {
                let value = kwargs.get(arg).ok_or(NoReverseMatch::MissingArgument {
                    name: self.name,
                    arg,
                })?;
                if !converter.matches(value) {
                    return Err(NoReverseMatch::InvalidArgument {
                        name: self.name,
                        arg,
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(self.render(|arg| kwargs.get(arg).cloned().unwrap_or_default()))
    }

    /// The path in the router's `{param}` syntax.
    pub fn router_path(&self) -> String {
        self.render(|arg| format!("{{{arg}}}"))
    }

    fn render(&self, mut value_of: impl FnMut(&str) -> String) -> String {
        let mut path = String::from("/");
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                path.push('/');
            }
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(arg, _) => path.push_str(&value_of(arg)),
            }
        }
        if self.trailing_slash && !self.segments.is_empty() {
            path.push('/');
        }
        path
    }
}

/// Framework-style reverse by pattern name and keyword arguments.
pub fn reverse_by_name(name: &str, kwargs: &BTreeMap<&str, String>) -> Result<String, NoReverseMatch> {
    UrlPattern::by_name(name)
        .ok_or_else(|| NoReverseMatch::UnknownName(name.to_string()))?
        .reverse(kwargs)
}

/// A resolved public page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ArticlesList,
    ArticlesCategoryList {
        slug: String,
    },
    NewsDetail {
        year: i32,
        month: u32,
        day: u32,
        slug: String,
    },
}

impl Route {
    /// The single route `path` addresses, if any. Integers that overflow do
    /// not resolve.
    pub fn resolve(path: &str) -> Option<Route> {
        PATTERNS.iter().find_map(|pattern| {
            let captures = pattern.match_path(path)?;
            Self::from_captures(pattern.name, &captures)
        })
    }

    fn from_captures(name: &str, captures: &[(&'static str, &str)]) -> Option<Route> {
        let raw = |arg: &str| {
            captures
                .iter()
                .find(|(name, _)| *name == arg)
                .map(|(_, value)| *value)
        };

        match name {
            HOME => Some(Route::Home),
            ARTICLES_LIST => Some(Route::ArticlesList),
            ARTICLES_CATEGORY_LIST => Some(Route::ArticlesCategoryList {
                slug: raw("slug")?.to_string(),
            }),
            NEWS_DETAIL => Some(Route::NewsDetail {
                year: raw("year")?.parse().ok()?,
                month: raw("month")?.parse().ok()?,
                day: raw("day")?.parse().ok()?,
                slug: raw("slug")?.to_string(),
            }),
            _ => None,
        }
    }

    /// Detail route for an article published at `pub_date`, dated by the
    /// site's calendar day.
    pub fn news_detail(pub_date: DateTime<Utc>, offset: FixedOffset, slug: impl Into<String>) -> Route {
        let day = PublicationDay::of(pub_date, offset);
        Route::NewsDetail {
            year: day.year(),
            month: day.month(),
            day: day.day(),
            slug: slug.into(),
        }
    }

    pub fn category(slug: impl Into<String>) -> Route {
        Route::ArticlesCategoryList { slug: slug.into() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => HOME,
            Route::ArticlesList => ARTICLES_LIST,
            Route::ArticlesCategoryList { .. } => ARTICLES_CATEGORY_LIST,
            Route::NewsDetail { .. } => NEWS_DETAIL,
        }
    }

    pub fn kwargs(&self) -> BTreeMap<&'static str, String> {
        let mut kwargs = BTreeMap::new();
        match self {
            Route::Home | Route::ArticlesList => {}
            Route::ArticlesCategoryList { slug } => {
                kwargs.insert("slug", slug.clone());
            }
            Route::NewsDetail {
                year,
                month,
                day,
                slug,
            } => {
                kwargs.insert("year", year.to_string());
                kwargs.insert("month", month.to_string());
                kwargs.insert("day", day.to_string());
                kwargs.insert("slug", slug.clone());
            }
        }
        kwargs
    }

    /// The reversed path. Values are written as held, integers unpadded.
    pub fn path(&self) -> String {
        let kwargs = self.kwargs();
        match UrlPattern::by_name(self.name()) {
            Some(pattern) => pattern.render(|arg| kwargs.get(arg).cloned().unwrap_or_default()),
            None => String::from("/"),
        }
    }
}

impl<S> FromRequestParts<S> for Route
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Route::resolve(parts.uri.path()).ok_or_else(PageError::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kwargs(pairs: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn pattern_roots_are_reserved_from_media() {
        for pattern in &PATTERNS {
            if let Some(Segment::Literal(root)) = pattern.segments.first() {
                assert!(
                    crate::config::ROUTED_PATH_ROOTS.contains(root),
                    "{} starts with unreserved {root}",
                    pattern.name
                );
            }
        }
    }

    #[test]
    fn resolves_each_pattern() {
        assert_eq!(Route::resolve("/"), Some(Route::Home));
        assert_eq!(Route::resolve("/articles"), Some(Route::ArticlesList));
        assert_eq!(
            Route::resolve("/articles/category/tech-news/"),
            Some(Route::category("tech-news"))
        );
        assert_eq!(
            Route::resolve("/articles/2024/1/15/test-article/"),
            Some(Route::NewsDetail {
                year: 2024,
                month: 1,
                day: 15,
                slug: "test-article".into()
            })
        );
    }

    #[test]
    fn zero_padded_integers_resolve() {
        assert_eq!(
            Route::resolve("/articles/2024/01/05/x/"),
            Some(Route::NewsDetail {
                year: 2024,
                month: 1,
                day: 5,
                slug: "x".into()
            })
        );
    }

    #[test]
    fn trailing_slash_mismatch_does_not_resolve() {
        assert_eq!(Route::resolve("/articles/"), None);
        assert_eq!(Route::resolve("/articles/category/x"), None);
        assert_eq!(Route::resolve("/articles/2024/1/15/x"), None);
        assert_eq!(Route::resolve(""), None);
    }

    #[test]
    fn malformed_parameters_do_not_resolve() {
        assert_eq!(Route::resolve("/articles/20x4/1/1/s/"), None);
        assert_eq!(Route::resolve("/articles/-1/1/1/s/"), None);
        assert_eq!(Route::resolve("/articles/99999999999/1/1/s/"), None);
        assert_eq!(Route::resolve("/articles/category/bad slug/"), None);
        assert_eq!(Route::resolve("/articles/category//"), None);
        assert_eq!(Route::resolve("/articles/2024/1/1/s/extra/"), None);
    }

    #[test]
    fn reverses_without_padding() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::ArticlesList.path(), "/articles");
        assert_eq!(Route::category("x").path(), "/articles/category/x/");
        assert_eq!(
            Route::NewsDetail {
                year: 2024,
                month: 1,
                day: 15,
                slug: "test-article".into()
            }
            .path(),
            "/articles/2024/1/15/test-article/"
        );
    }

    #[test]
    fn reversed_paths_resolve_to_the_same_route() {
        let routes = [
            Route::Home,
            Route::ArticlesList,
            Route::category("news"),
            Route::NewsDetail {
                year: 2023,
                month: 12,
                day: 31,
                slug: "year_end".into(),
            },
        ];
        for route in routes {
            assert_eq!(Route::resolve(&route.path()), Some(route.clone()));
        }
    }

    #[test]
    fn reverse_by_name_validates_arguments() {
        assert_eq!(reverse_by_name(HOME, &BTreeMap::new()).unwrap(), "/");
        assert_eq!(
            reverse_by_name(ARTICLES_CATEGORY_LIST, &kwargs(&[("slug", "x")])).unwrap(),
            "/articles/category/x/"
        );
        assert_eq!(
            reverse_by_name(
                NEWS_DETAIL,
                &kwargs(&[("year", "2024"), ("month", "1"), ("day", "15"), ("slug", "a")])
            )
            .unwrap(),
            "/articles/2024/1/15/a/"
        );

        assert!(matches!(
            reverse_by_name("missing", &BTreeMap::new()),
            Err(NoReverseMatch::UnknownName(_))
        ));
        assert!(matches!(
            reverse_by_name(ARTICLES_CATEGORY_LIST, &BTreeMap::new()),
            Err(NoReverseMatch::MissingArgument { arg: "slug", .. })
        ));
        assert!(matches!(
            reverse_by_name(ARTICLES_LIST, &kwargs(&[("slug", "x")])),
            Err(NoReverseMatch::UnexpectedArgument { .. })
        ));
        assert!(matches!(
            reverse_by_name(
                NEWS_DETAIL,
                &kwargs(&[("year", "20x4"), ("month", "1"), ("day", "15"), ("slug", "a")])
            ),
            Err(NoReverseMatch::InvalidArgument { arg: "year", .. })
        ));
    }

    #[test]
    fn router_paths_use_braces() {
        let paths: Vec<String> = PATTERNS.iter().map(UrlPattern::router_path).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/articles",
                "/articles/category/{slug}/",
                "/articles/{year}/{month}/{day}/{slug}/",
            ]
        );
    }

    #[test]
    fn news_detail_uses_site_calendar_day() {
        let pub_date = DateTime::parse_from_rfc3339("2024-01-15T23:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let utc = FixedOffset::east_opt(0).unwrap();
        let kyiv = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            Route::news_detail(pub_date, utc, "a").path(),
            "/articles/2024/1/15/a/"
        );
        assert_eq!(
            Route::news_detail(pub_date, kyiv, "a").path(),
            "/articles/2024/1/16/a/"
        );
    }
}
