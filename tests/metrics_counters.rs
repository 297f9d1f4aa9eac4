use anyhow::Result;
use serde_json::json;
use url::Url;

use forage_pager::metrics;
use forage_pager::{PageTokenAdapter, WidgetConfig};

// Счётчики глобальные, тесты идут параллельно — проверяем только приращения (>=).
#[test]
fn counters_track_builder_and_recorder() -> Result<()> {
    let before = metrics::snapshot();

    let base = Url::parse("https://forage.example/api/users")?;
    let mut a = PageTokenAdapter::new(WidgetConfig::new(base, "name"));

    a.request_params(Some(1), Some("ab"));
    a.record_response(Some(1), Some("ab"), json!({"pagination": {"after": "X"}}));
    a.request_params(Some(2), Some("ab")); // attached
    a.request_params(Some(2), Some("abc")); // dropped: term changed
    a.record_response(Some(2), Some("ab"), json!({"results": []})); // no token

    let after = metrics::snapshot();
    assert!(after.requests_built >= before.requests_built + 3);
    assert!(after.tokens_attached >= before.tokens_attached + 1);
    assert!(after.tokens_dropped_term_changed >= before.tokens_dropped_term_changed + 1);
    assert!(after.responses_recorded >= before.responses_recorded + 2);
    assert!(after.responses_without_token >= before.responses_without_token + 1);
    assert!(after.token_hit_ratio() > 0.0);
    Ok(())
}
