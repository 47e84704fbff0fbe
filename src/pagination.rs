//! Pagination calculator: page boundaries, navigation targets and the
//! visible slice, derived from a content collection and a stored config.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Error, Result};
use crate::instance::PaginationConfig;

/// Page numbers are one-based
pub const FIRST_PAGE: usize = 1;

/// Config enriched with derived navigation fields and the visible slice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaginationResult<'a, T> {
    /// Input config, `current-page` replaced by the clamped page
    #[serde(flatten)]
    pub config: PaginationConfig,
    /// Length of the whole collection
    pub total_items: usize,
    /// At least 1, even for an empty collection
    pub page_count: usize,
    /// A quarter of the pages back, not before the first page
    pub jump_back_page: usize,
    /// A quarter of the pages forward, not past the last page
    pub jump_forward_page: usize,
    /// Previous page, 1 on the first page
    pub prev_page: usize,
    /// Next page, `page_count` on the last page
    pub next_page: usize,
    /// Always 1
    pub first_page: usize,
    /// Equals `page_count`
    pub last_page: usize,
    /// On the first page
    pub at_first: bool,
    /// On the last page
    pub at_last: bool,
    /// Items of the current page
    pub content: &'a [T],
}

impl<T> PaginationResult<'_, T> {
    /// Current page after clamping
    #[must_use]
    pub fn current_page(&self) -> usize {
        // `calculate` always writes a positive page back
        self.config.current_page.and_then(|p| usize::try_from(p).ok()).unwrap_or(FIRST_PAGE)
    }

    /// Config to feed back into [`calculate`]
    #[must_use]
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }
}

/// Number of pages needed for `total_items`, never less than one
#[must_use]
pub fn page_count(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1)).max(1)
}

/// Bring a possibly stale requested page into `1..=page_count`
#[must_use]
pub fn clamp_page(requested: i64, page_count: usize) -> usize {
    if requested <= 0 {
        return FIRST_PAGE;
    }
    let last = page_count.max(FIRST_PAGE);
    usize::try_from(requested).map_or(last, |page| page.min(last))
}

/// Compute pagination of `content` for `config`.
///
/// Out-of-range pages are clamped, never reported: the config may come
/// from UI state that predates the current content.
/// # Errors
/// `InvalidConfig` when `items_per_page` is absent or not positive
pub fn calculate<'a, T>(content: &'a [T], config: &PaginationConfig) -> Result<PaginationResult<'a, T>> {
    let items_per_page = config
        .items_per_page
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            warn!(id = %config.id, items_per_page = ?config.items_per_page, "cannot paginate");
            Error::InvalidConfig(format!(
                "`{}`: items-per-page must be a positive integer, got {:?}",
                config.id, config.items_per_page
            ))
        })?;

    let total_items = content.len();
    let page_count = page_count(total_items, items_per_page);
    let current_page = clamp_page(config.current_page.unwrap_or(1), page_count);
    let jump_length = page_count / 4;

    let start = items_per_page.saturating_mul(current_page - FIRST_PAGE).min(total_items);
    let end = start.saturating_add(items_per_page).min(total_items);
    let visible = content.get(start..end).unwrap_or(&[]);

    let mut clamped = config.clone();
    clamped.current_page = Some(i64::try_from(current_page).unwrap_or(i64::MAX));

    Ok(PaginationResult {
        config: clamped,
        total_items,
        page_count,
        jump_back_page: current_page.saturating_sub(jump_length).max(FIRST_PAGE),
        jump_forward_page: current_page.saturating_add(jump_length).min(page_count),
        prev_page: current_page.saturating_sub(1).max(FIRST_PAGE),
        next_page: current_page.saturating_add(1).min(page_count),
        first_page: FIRST_PAGE,
        last_page: page_count,
        at_first: current_page == FIRST_PAGE,
        at_last: current_page == page_count,
        content: visible,
    })
}

/// [`calculate`] over untyped JSON.
///
/// The result is the original config object with the derived fields merged
/// over it; keys the typed config does not know about are kept.
/// # Errors
/// `TypeMismatch` when `content` is not an array, `config` is not an
/// object, or a known field has the wrong type.
/// `InvalidConfig` as for [`calculate`]
pub fn calculate_value(content: &Value, config: &Value) -> Result<Value> {
    let Value::Array(items) = content else {
        return Err(Error::TypeMismatch(format!("content must be an array, got {}", kind(content))));
    };
    let Value::Object(fields) = config else {
        return Err(Error::TypeMismatch(format!("config must be an object, got {}", kind(config))));
    };
    // The calculator has no use for the id, so an anonymous mapping is fine
    let mut typed_fields = fields.clone();
    let _ = typed_fields.entry("id").or_insert_with(|| Value::String(String::new()));
    let typed: PaginationConfig = serde_json::from_value(Value::Object(typed_fields))
        .map_err(|e| Error::TypeMismatch(format!("config: {e}")))?;

    let result = calculate(items, &typed)?;
    let Value::Object(mut derived) =
        serde_json::to_value(&result).map_err(|e| Error::TypeMismatch(e.to_string()))?
    else {
        return Err(Error::TypeMismatch("result did not serialize to an object".to_string()));
    };

    let _ = derived.remove("id");
    let mut merged: Map<String, Value> = fields.clone();
    merged.extend(derived);
    Ok(Value::Object(merged))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(current_page: i64, items_per_page: i64) -> PaginationConfig {
        PaginationConfig {
            current_page: Some(current_page),
            items_per_page: Some(items_per_page),
            ..PaginationConfig::bare("test")
        }
    }

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn first_page_of_95_items() {
        let content = items(95);
        let res = calculate(&content, &config(1, 20)).unwrap();

        assert_eq!(res.total_items, 95);
        assert_eq!(res.page_count, 5);
        assert_eq!(res.content, &content[0..20]);
        assert!(res.at_first);
        assert!(!res.at_last);
        assert_eq!(res.prev_page, 1);
        assert_eq!(res.next_page, 2);
        assert_eq!(res.jump_back_page, 1);
        assert_eq!(res.jump_forward_page, 2);
        assert_eq!(res.first_page, 1);
        assert_eq!(res.last_page, 5);
    }

    #[test]
    fn last_page_of_95_items() {
        let content = items(95);
        let res = calculate(&content, &config(5, 20)).unwrap();

        assert!(res.at_last);
        assert!(!res.at_first);
        assert_eq!(res.content, &content[80..95]);
        assert_eq!(res.content.len(), 15);
        assert_eq!(res.prev_page, 4);
        assert_eq!(res.next_page, 5);
        assert_eq!(res.last_page, 5);
    }

    #[test]
    fn empty_content_has_one_page() {
        let content: Vec<usize> = Vec::new();
        let res = calculate(&content, &config(1, 10)).unwrap();

        assert_eq!(res.page_count, 1);
        assert_eq!(res.current_page(), 1);
        assert!(res.content.is_empty());
        assert!(res.at_first);
        assert!(res.at_last);
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let content = items(100);
        let res = calculate(&content, &config(9, 50)).unwrap();

        assert_eq!(res.page_count, 2);
        assert_eq!(res.current_page(), 2);
        assert_eq!(res.config.current_page, Some(2));
        assert_eq!(res.content, &content[50..100]);
        assert!(res.at_last);
    }

    #[test]
    fn non_positive_page_is_clamped_to_first() {
        let content = items(30);
        for requested in [0, -1, i64::MIN] {
            let res = calculate(&content, &config(requested, 10)).unwrap();
            assert_eq!(res.current_page(), 1);
            assert_eq!(res.content, &content[0..10]);
        }
    }

    #[test]
    fn missing_page_defaults_to_first() {
        let content = items(30);
        let cfg = PaginationConfig { items_per_page: Some(10), ..PaginationConfig::bare("t") };
        let res = calculate(&content, &cfg).unwrap();
        assert_eq!(res.current_page(), 1);
    }

    #[test]
    fn missing_or_non_positive_page_size_is_invalid() {
        let content = items(3);
        let cfg = PaginationConfig::bare("t");
        assert!(matches!(calculate(&content, &cfg), Err(Error::InvalidConfig(_))));
        assert!(matches!(calculate(&content, &config(1, 0)), Err(Error::InvalidConfig(_))));
        assert!(matches!(calculate(&content, &config(1, -5)), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn page_count_is_ceiling_with_floor_of_one() {
        for total in 0..120 {
            for per_page in 1..25 {
                let expected = if total == 0 { 1 } else { (total + per_page - 1) / per_page };
                assert_eq!(page_count(total, per_page), expected);
            }
        }
    }

    #[test]
    fn slices_are_contiguous_and_bounded() {
        let content = items(57);
        for per_page in [1, 7, 10, 57, 100] {
            let pages = page_count(content.len(), per_page);
            let mut seen = Vec::new();
            for page in 1..=pages {
                let cfg = config(i64::try_from(page).unwrap(), i64::try_from(per_page).unwrap());
                let res = calculate(&content, &cfg).unwrap();
                assert!(res.content.len() <= per_page);
                assert!(res.content.len() <= res.total_items);
                assert_eq!(res.at_first, page == 1);
                assert_eq!(res.at_last, page == pages);
                seen.extend_from_slice(res.content);
            }
            assert_eq!(seen, content);
        }
    }

    #[test]
    fn jumps_move_a_quarter_of_the_pages() {
        let content = items(200);
        let res = calculate(&content, &config(10, 10)).unwrap();
        assert_eq!(res.page_count, 20);
        assert_eq!(res.jump_back_page, 5);
        assert_eq!(res.jump_forward_page, 15);

        let near_start = calculate(&content, &config(2, 10)).unwrap();
        assert_eq!(near_start.jump_back_page, 1);
        let near_end = calculate(&content, &config(19, 10)).unwrap();
        assert_eq!(near_end.jump_forward_page, 20);
    }

    #[test]
    fn refeeding_the_result_is_stable() {
        let content = items(95);
        let once = calculate(&content, &config(42, 20)).unwrap();
        let twice = calculate(&content, once.config()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn shrinking_content_clamps_stale_page() {
        use crate::instance::Overrides;
        use crate::store::ConfigStore;

        let mut store = ConfigStore::default();
        let _ = store.register(Overrides::with_id("x")).unwrap();
        store.set_current_page("x", 9);
        store.set_items_per_page("x", 50);

        let content = items(80);
        let res = calculate(&content, &store.get_config("x")).unwrap();
        assert_eq!(res.page_count, 2);
        assert_eq!(res.current_page(), 2);
        assert_eq!(res.content, &content[50..80]);
    }

    #[test]
    fn result_serializes_with_kebab_case_fields() {
        let content = vec!["a", "b", "c"];
        let res = calculate(&content, &config(2, 2)).unwrap();
        let value = serde_json::to_value(&res).unwrap();

        assert_eq!(value["id"], json!("test"));
        assert_eq!(value["current-page"], json!(2));
        assert_eq!(value["page-count"], json!(2));
        assert_eq!(value["at-last"], json!(true));
        assert_eq!(value["content"], json!(["c"]));
    }

    #[test]
    fn value_calculation_keeps_unknown_keys() {
        let content = json!([1, 2, 3, 4, 5]);
        let cfg = json!({ "id": "t", "items-per-page": 2, "current-page": 7, "label": "numbers" });
        let res = calculate_value(&content, &cfg).unwrap();

        assert_eq!(res["label"], json!("numbers"));
        assert_eq!(res["current-page"], json!(3));
        assert_eq!(res["content"], json!([5]));
        assert_eq!(res["total-items"], json!(5));
    }

    #[test]
    fn value_calculation_checks_shapes() {
        let cfg = json!({ "id": "t", "items-per-page": 2 });
        assert!(matches!(calculate_value(&json!({ "a": 1 }), &cfg), Err(Error::TypeMismatch(_))));
        assert!(matches!(calculate_value(&json!([1]), &json!([cfg])), Err(Error::TypeMismatch(_))));
        assert!(matches!(
            calculate_value(&json!([1]), &json!({ "id": "t", "items-per-page": "ten" })),
            Err(Error::TypeMismatch(_))
        ));
        assert!(matches!(
            calculate_value(&json!([1]), &json!({ "id": "t" })),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn value_calculation_does_not_need_an_id() {
        let res = calculate_value(&json!([1, 2, 3]), &json!({ "items-per-page": 2 })).unwrap();

        assert!(res.get("id").is_none());
        assert_eq!(res["current-page"], json!(1));
        assert_eq!(res["page-count"], json!(2));
        assert_eq!(res["content"], json!([1, 2]));

        let err = calculate_value(&json!([1]), &json!({ "id": 7, "items-per-page": 2 }));
        assert!(matches!(err, Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn value_output_can_be_refed() {
        let content = json!(["a", "b", "c", "d", "e"]);
        let cfg = json!({ "id": "t", "items-per-page": 2, "current-page": 3 });
        let once = calculate_value(&content, &cfg).unwrap();
        let twice = calculate_value(&content, &once).unwrap();
        assert_eq!(once, twice);
    }
}
