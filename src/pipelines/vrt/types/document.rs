//! Input records.
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// A recipe record, as found in the source dump.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "de_display")]
    id: String,
    title: String,
    #[serde(default)]
    url: String,
    author: String,
    category: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    rating: Option<Rating>,
    #[serde(default, deserialize_with = "de_display_list")]
    keywords: Vec<String>,
    #[serde(default, deserialize_with = "de_display_list")]
    related: Vec<String>,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    text: String,
    #[serde(default)]
    comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Rating {
    #[serde(default)]
    value: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ingredient {
    name: String,
}

/// A user comment on a [Document].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    author: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    text: String,
}

impl Document {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Publication date. Empty strings are considered absent.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating_number().and_then(Number::as_f64)
    }

    /// Rating as written in the record.
    pub fn rating_number(&self) -> Option<&Number> {
        self.rating.as_ref().and_then(|r| r.value.as_ref())
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn related(&self) -> &[String] {
        &self.related
    }

    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.name.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

impl Comment {
    pub fn new(author: &str, date: Option<&str>, text: &str) -> Self {
        Self {
            author: author.to_string(),
            date: date.map(String::from),
            text: text.to_string(),
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Raw timestamp. Empty strings are considered absent.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn value_to_string(v: Value) -> String {
    match v {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Accept strings and numbers alike.
fn de_display<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(value_to_string)
}

fn de_display_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let values: Option<Vec<Value>> = Option::deserialize(d)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(value_to_string)
        .collect())
}
