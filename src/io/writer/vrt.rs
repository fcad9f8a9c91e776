/*! VRT serialization.

The recipe tree is written as

```text
<recipe title="…" id="…" …>
<s id="s0">
Äpfel	NN	Apfel
schälen	VVINF	schälen
</s>
</recipe>
```

and comments as a `comments` root holding one `comment` element per comment.
Tokens are written one per line as `form<TAB>tag<TAB>lemma`.
List attributes are written as feature sets (`|a|b|`).
!*/
use std::borrow::Cow;
use std::io::Write;

use itertools::Itertools;
use quick_xml::escape::{escape, partial_escape};

use crate::error::Error;
use crate::pipelines::vrt::types::{CommentNode, RecipeNode, SentenceNode};

/// `|a|b|c|`
pub fn feature_set<S: AsRef<str>>(values: &[S]) -> String {
    format!("|{}|", values.iter().map(AsRef::as_ref).join("|"))
}

/// Escape an attribute value, keeping line breaks and tabs as character references.
fn attr_value(raw: &str) -> Cow<'_, str> {
    let escaped = escape(raw);
    if escaped.contains(|c: char| matches!(c, '\n' | '\r' | '\t')) {
        Cow::Owned(
            escaped
                .replace('\n', "&#10;")
                .replace('\r', "&#13;")
                .replace('\t', "&#9;"),
        )
    } else {
        escaped
    }
}

fn write_start<W: Write>(w: &mut W, name: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    write!(w, "<{}", name)?;
    for (key, value) in attrs {
        write!(w, " {}=\"{}\"", key, attr_value(value))?;
    }
    writeln!(w, ">")?;
    Ok(())
}

fn write_sentence<W: Write>(w: &mut W, sentence: &SentenceNode) -> Result<(), Error> {
    writeln!(w, "<s id=\"s{}\">", sentence.id)?;
    for token in &sentence.tokens {
        writeln!(
            w,
            "{}\t{}\t{}",
            partial_escape(token.form.as_str()),
            partial_escape(token.tag.as_str()),
            partial_escape(token.lemma.as_str())
        )?;
    }
    writeln!(w, "</s>")?;
    Ok(())
}

pub fn write_recipe<W: Write>(w: &mut W, recipe: &RecipeNode) -> Result<(), Error> {
    let rating = recipe.rating_raw();
    let rating_int = recipe.rating_int().to_string();
    let keywords = feature_set(&recipe.keywords);
    let related = feature_set(&recipe.related);
    let ingredients = feature_set(&recipe.ingredients);

    write_start(
        w,
        "recipe",
        &[
            ("title", recipe.title.as_str()),
            ("id", recipe.id.as_str()),
            ("url", recipe.url.as_str()),
            ("author", recipe.author.as_str()),
            ("date", recipe.date.date()),
            ("yearmonth", recipe.date.yearmonth()),
            ("year", recipe.date.year()),
            ("rating", rating.as_str()),
            ("rating_int", rating_int.as_str()),
            ("category", recipe.category.as_str()),
            ("category_orig", recipe.category_orig.as_str()),
            ("keywords", keywords.as_str()),
            ("related", related.as_str()),
            ("ingredients", ingredients.as_str()),
        ],
    )?;
    for sentence in &recipe.sentences {
        write_sentence(w, sentence)?;
    }
    writeln!(w, "</recipe>")?;
    Ok(())
}

pub fn write_comment<W: Write>(w: &mut W, comment: &CommentNode) -> Result<(), Error> {
    let id = format!("c{}", comment.id);
    write_start(
        w,
        "comment",
        &[
            ("id", id.as_str()),
            ("parent", comment.parent.as_str()),
            ("author", comment.author.as_str()),
            ("date", comment.date.date()),
            ("yearmonth", comment.date.yearmonth()),
            ("year", comment.date.year()),
            ("datetime_orig", comment.datetime_orig.as_deref().unwrap_or("")),
        ],
    )?;
    for sentence in &comment.sentences {
        write_sentence(w, sentence)?;
    }
    writeln!(w, "</comment>")?;
    Ok(())
}

pub fn write_comments<W: Write>(w: &mut W, comments: &[CommentNode]) -> Result<(), Error> {
    writeln!(w, "<comments>")?;
    for comment in comments {
        write_comment(w, comment)?;
    }
    writeln!(w, "</comments>")?;
    Ok(())
}
