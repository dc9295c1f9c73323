//! Declarative find requests.

use bson::{Bson, Document, doc};
use mongodb::options::FindOptions;
use podcat_model::ModelInfo;

/// A find request: filter, sort, projection and limit.
///
/// The filter is passed to the store untouched. Selected and omitted fields
/// are merged into one projection, so callers should use one or the other per
/// field; the store rejects mixed inclusion/exclusion projections.
///
/// ```rust,ignore
/// let query = Query::new()
///     .filter(doc! { "category": "Comedy" })
///     .sort_by("modification_time", true)
///     .select(["title", "url"])
///     .limit(25);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Store-native filter document.
    pub filter: Document,
    /// Field to sort by. Empty for natural order.
    pub sort_field: String,
    /// Sort descending.
    pub sort_desc: bool,
    /// Fields to include.
    pub selected_fields: Vec<String>,
    /// Fields to exclude.
    pub omitted_fields: Vec<String>,
    /// Maximum number of results. Ignored unless positive.
    pub limit: i64,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter document.
    pub fn filter(mut self, filter: Document) -> Self {
        self.filter = filter;
        self
    }

    /// Sort by a field.
    pub fn sort_by(mut self, field: impl Into<String>, desc: bool) -> Self {
        self.sort_field = field.into();
        self.sort_desc = desc;
        self
    }

    /// Include only these fields.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Exclude these fields.
    pub fn omit<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omitted_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Limit the number of results.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Rewrite field names given in external (API) names to storage names.
    ///
    /// Covers the sort field and the projection; names the model doesn't know
    /// are left as they are.
    pub fn with_api_names(mut self, info: &ModelInfo) -> Self {
        let to_db = |name: &mut String| {
            if let Some(field) = info.lookup_api_name(name) {
                *name = field.bson_name.clone();
            }
        };

        if !self.sort_field.is_empty() {
            to_db(&mut self.sort_field);
        }
        self.selected_fields.iter_mut().for_each(to_db);
        self.omitted_fields.iter_mut().for_each(to_db);
        self
    }

    /// The merged projection, or `None` when no fields were listed.
    pub fn projection(&self) -> Option<Document> {
        let mut projection = Document::new();
        for field in &self.selected_fields {
            projection.insert(field.as_str(), 1);
        }
        for field in &self.omitted_fields {
            projection.insert(field.as_str(), 0);
        }
        (!projection.is_empty()).then_some(projection)
    }

    /// The sort document, or `None` for natural order.
    pub fn sort(&self) -> Option<Document> {
        if self.sort_field.is_empty() {
            return None;
        }
        let direction = if self.sort_desc { -1 } else { 1 };
        let mut sort = Document::new();
        sort.insert(self.sort_field.as_str(), direction);
        Some(sort)
    }
}

/// A query translated into the driver's filter and options.
#[derive(Debug, Clone, Default)]
pub struct FindSpec {
    /// Filter document. Empty matches everything.
    pub filter: Document,
    /// Sort, projection and limit.
    pub options: FindOptions,
}

impl FindSpec {
    /// Translate an optional query. `None` is an unconstrained find.
    pub fn from_query(query: Option<&Query>) -> Self {
        let Some(query) = query else {
            return Self::default();
        };

        let mut options = FindOptions::default();
        options.projection = query.projection();
        options.sort = query.sort();
        if query.limit > 0 {
            options.limit = Some(query.limit);
        }

        Self {
            filter: query.filter.clone(),
            options,
        }
    }

    /// A find matching exactly one identifier.
    pub fn by_id(id: impl Into<Bson>) -> Self {
        let id: Bson = id.into();
        Self {
            filter: doc! { "_id": id },
            options: FindOptions::default(),
        }
    }

    /// Check if this find has no filter, sort, projection or limit.
    pub fn is_unconstrained(&self) -> bool {
        self.filter.is_empty()
            && self.options.sort.is_none()
            && self.options.projection.is_none()
            && self.options.limit.is_none()
    }
}
