//! Identifiers for the backend resources the client acts on.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, endpoints};

/// The kinds of resource that can be deleted from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A recorded expense or income.
    Transaction,
    /// A user-defined grouping of transactions.
    Category,
}

impl ResourceKind {
    /// The singular, lowercase name, as used in `data-kind` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Transaction => "transaction",
            ResourceKind::Category => "category",
        }
    }

    /// The capitalised name, for the start of a message.
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Transaction => "Transaction",
            ResourceKind::Category => "Category",
        }
    }

    /// The route that deletes a resource of this kind.
    pub fn delete_endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Transaction => endpoints::DELETE_TRANSACTION,
            ResourceKind::Category => endpoints::DELETE_CATEGORY,
        }
    }

    /// The id of the table that lists resources of this kind.
    pub fn table_id(&self) -> &'static str {
        match self {
            ResourceKind::Transaction => "transactionsTable",
            ResourceKind::Category => "categoriesTable",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transaction" => Ok(ResourceKind::Transaction),
            "category" => Ok(ResourceKind::Category),
            other => Err(Error::UnknownResourceKind(other.to_owned())),
        }
    }
}

/// The backend's identifier for a transaction or category.
///
/// IDs are opaque strings: transactions use UUIDs and categories use four
/// character codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a resource ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyResourceId] if `id` is empty or only whitespace.
    pub fn new(id: &str) -> Result<Self, Error> {
        let id = id.trim();

        if id.is_empty() {
            Err(Error::EmptyResourceId)
        } else {
            Ok(Self(id.to_owned()))
        }
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CategoryId> for ResourceId {
    fn from(value: CategoryId) -> Self {
        Self(value.0)
    }
}

/// The number of characters a category ID must have.
pub const CATEGORY_ID_LENGTH: usize = 4;

/// A category ID of exactly [CATEGORY_ID_LENGTH] characters.
///
/// Characters are counted as grapheme clusters, so what the user sees is what
/// is counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCategoryId] if `id` does not have exactly four
    /// characters.
    pub fn new(id: &str) -> Result<Self, Error> {
        if id.graphemes(true).count() == CATEGORY_ID_LENGTH {
            Ok(Self(id.to_owned()))
        } else {
            Err(Error::InvalidCategoryId(id.to_owned()))
        }
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
