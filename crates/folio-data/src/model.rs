//! Topic and article records.

use serde::{Deserialize, Deserializer, Serialize};

use crate::codeblock::CodeBlock;

/// Heading used above a parameter list when an article sets none.
pub const DEFAULT_PARAMETERS_TITLE: &str = "Параметры:";

/// A whole data file: topics in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub topics: Vec<Topic>,
}

/// A top-level group of articles; one page section and one sidebar group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Anchor and element id
    pub id: String,

    /// Display heading
    pub name: String,

    /// Articles in order
    pub sections: Vec<Article>,
}

/// A single documented item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Anchor and element id
    pub id: String,

    pub title: String,

    /// Body text
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,

    /// Heading for the parameter list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters_title: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub code: Vec<CodeBlock>,
}

/// One documented parameter of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Document {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// Every article paired with its topic, in document order.
    pub fn articles(&self) -> impl Iterator<Item = (&Topic, &Article)> {
        self.topics
            .iter()
            .flat_map(|topic| topic.sections.iter().map(move |article| (topic, article)))
    }

    /// Find an article by id.
    pub fn find_article(&self, id: &str) -> Option<&Article> {
        self.articles()
            .map(|(_, article)| article)
            .find(|article| article.id == id)
    }
}

impl Article {
    /// Heading for the parameter list, or `fallback` when unset or empty.
    pub fn parameters_heading<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.parameters_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback)
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
        }
    }

    /// Description, treating an empty string as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
