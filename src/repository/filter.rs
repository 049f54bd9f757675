use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Listing mode. The two scopes are mutually exclusive: a listing is either
/// the public feed or one author's own snippets, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetScope {
    Public,
    Author(Uuid),
}

/// Filter parameters for a snippet listing. Fields combine with AND; only
/// the search term fans out (OR over title and description). Empty strings
/// are dropped at construction so `?language=` adds no clause.
#[derive(Debug, Clone)]
pub struct SnippetFilter {
    scope: SnippetScope,
    search: Option<String>,
    language: Option<String>,
    framework: Option<String>,
    category: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SnippetFilter {
    pub fn public() -> Self {
        Self {
            scope: SnippetScope::Public,
            search: None,
            language: None,
            framework: None,
            category: None,
        }
    }

    pub fn authored_by(author_id: Uuid) -> Self {
        Self {
            scope: SnippetScope::Author(author_id),
            ..Self::public()
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = non_empty(search);
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = non_empty(language);
        self
    }

    pub fn with_framework(mut self, framework: Option<String>) -> Self {
        self.framework = non_empty(framework);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = non_empty(category);
        self
    }

    /// Append the WHERE clause to a query whose FROM aliases snippets as `s`.
    /// The scope always contributes the first condition, so every later
    /// fragment can start with AND unconditionally.
    pub fn push_where<'a>(&'a self, qb: &mut QueryBuilder<'a, Postgres>) {
        match self.scope {
            SnippetScope::Public => {
                qb.push(" WHERE s.is_public = TRUE");
            }
            SnippetScope::Author(author_id) => {
                qb.push(" WHERE s.author_id = ").push_bind(author_id);
            }
        }

        if let Some(language) = &self.language {
            qb.push(" AND s.language = ").push_bind(language);
        }
        if let Some(framework) = &self.framework {
            qb.push(" AND s.framework = ").push_bind(framework);
        }
        if let Some(category) = &self.category {
            qb.push(" AND s.category = ").push_bind(category);
        }
        if let Some(term) = &self.search {
            let pattern = format!("%{term}%");
            // Parenthesized so the OR never leaks into the AND chain.
            qb.push(" AND (s.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR s.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}
