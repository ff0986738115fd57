use maud::Markup;
use scraper::Html;

use crate::registry::Dataset;

pub(crate) fn parse_html_document(markup: Markup) -> Html {
    Html::parse_document(&markup.into_string())
}

pub(crate) fn parse_html_fragment(markup: Markup) -> Html {
    Html::parse_fragment(&markup.into_string())
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The data attributes of a clicked element, without the `data-` prefix.
pub(crate) fn dataset(pairs: &[(&str, &str)]) -> Dataset {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}
