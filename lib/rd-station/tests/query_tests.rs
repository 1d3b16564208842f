//! Tests for `#[derive(Query)]` and the query encoder.

use std::borrow::Cow;

use assert2::check;
use rd_station::{Query, QueryElement, ToQueryPairs, to_query_string};

#[derive(Debug, Default, Query)]
struct SearchFilter {
    page: u32,
    limit: u32,
    order: String,
    direction: String,
}

#[derive(Debug, Default, Query)]
struct MixedFilter {
    name: String,
    #[query(rename = "user")]
    user_id: i64,
    archived: bool,
    tags: Vec<String>,
    score: f64,
    cursor: Option<String>,
    #[query(skip)]
    internal: String,
}

#[derive(Debug, Default, Query)]
struct FallbackFilter {
    #[query(rename = "-")]
    exact_name: String,
    #[query(rename = "")]
    stage: String,
    r#type: String,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Open,
    Won,
}

impl QueryElement for Stage {
    fn to_query_value(&self) -> Cow<'_, str> {
        match self {
            Self::Open => "open".into(),
            Self::Won => "won".into(),
        }
    }
}

#[derive(Debug, Default, Query)]
struct StageFilter {
    #[query(rename = "stage")]
    stages: Vec<Stage>,
}

#[derive(Query)]
struct Empty;

fn decode(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[test]
fn all_zero_record_encodes_to_empty_string() {
    check!(to_query_string(&SearchFilter::default()) == "");
    check!(to_query_string(&MixedFilter::default()) == "");
    check!(to_query_string(&Empty) == "");
}

#[test]
fn listing_scenario_sends_exactly_four_pairs() {
    let filter = SearchFilter {
        limit: 5,
        page: 1,
        order: "name".to_string(),
        direction: "asc".to_string(),
    };

    let mut pairs = decode(&to_query_string(&filter));
    pairs.sort();
    check!(
        pairs
            == vec![
                ("direction".to_string(), "asc".to_string()),
                ("limit".to_string(), "5".to_string()),
                ("order".to_string(), "name".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
    );
}

#[test]
fn mixed_zero_and_non_zero_fields() {
    let filter = MixedFilter {
        name: "Ana Maria".to_string(),
        user_id: 0,
        archived: true,
        score: 9.5,
        internal: "hidden".to_string(),
        ..Default::default()
    };

    check!(to_query_string(&filter) == "name=Ana+Maria&archived=true");
}

#[test]
fn tag_override_wins() {
    let filter = MixedFilter {
        user_id: 42,
        ..Default::default()
    };

    check!(to_query_string(&filter) == "user=42");
}

#[test]
fn ignore_marker_and_empty_tag_fall_back_to_field_name() {
    let filter = FallbackFilter {
        exact_name: "x".to_string(),
        stage: "y".to_string(),
        r#type: "z".to_string(),
    };

    check!(to_query_string(&filter) == "exact_name=x&stage=y&type=z");
}

#[test]
fn sequences_repeat_the_key() {
    let filter = MixedFilter {
        tags: vec!["a".to_string(), "b c".to_string()],
        ..Default::default()
    };
    check!(to_query_string(&filter) == "tags=a&tags=b+c");

    let filter = StageFilter {
        stages: vec![Stage::Open, Stage::Won],
    };
    check!(to_query_string(&filter) == "stage=open&stage=won");

    check!(to_query_string(&StageFilter::default()) == "");
}

#[test]
fn present_option_is_sent_even_if_empty() {
    let filter = MixedFilter {
        cursor: Some(String::new()),
        ..Default::default()
    };

    check!(to_query_string(&filter) == "cursor=");
}

#[test]
fn encoding_is_idempotent() {
    let filter = MixedFilter {
        name: "a&b=c d".to_string(),
        user_id: -3,
        archived: true,
        tags: vec!["x/y".to_string(), "ç".to_string()],
        cursor: Some("next+1".to_string()),
        ..Default::default()
    };

    let query = to_query_string(&filter);
    let decoded = decode(&query);

    check!(decoded == filter.to_query_pairs());
    check!(rd_station::encode_pairs(decoded) == query);
}
