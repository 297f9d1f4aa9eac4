use anyhow::Result;
use serde_json::json;
use url::Url;

use forage_pager::{PageTokenAdapter, WidgetConfig, AFTER_PARAM};

fn adapter(field: &str) -> Result<PageTokenAdapter> {
    let base = Url::parse("https://forage.example/admin/users/select")?;
    Ok(PageTokenAdapter::new(WidgetConfig::new(base, field)))
}

fn page_body(after: serde_json::Value) -> serde_json::Value {
    json!({
        "results": [{"id": 1, "text": "Abby"}, {"id": 2, "text": "Abe"}],
        "pagination": {"after": after, "more": true}
    })
}

#[test]
fn first_page_never_carries_token() -> Result<()> {
    let mut a = adapter("name")?;
    assert!(a.request_params(None, None).after_token().is_none());
    assert!(a.request_params(Some(1), Some("ab")).after_token().is_none());

    // Даже после нескольких ответов страница 1 остаётся без токена
    a.record_response(Some(1), Some("ab"), page_body(json!("X")));
    a.record_response(Some(2), Some("ab"), page_body(json!("Y")));
    assert!(a.request_params(Some(1), Some("ab")).after_token().is_none());
    assert!(a.request_params(Some(0), Some("ab")).after_token().is_none());
    Ok(())
}

#[test]
fn search_filter_is_always_present() -> Result<()> {
    let a = adapter("email")?;
    let q = a.request_params(Some(3), None);
    assert_eq!(q.get("_search[email][op]"), Some("contains"));
    assert_eq!(q.get("_search[email][val]"), Some(""));
    assert_eq!(q.len(), 2);
    Ok(())
}

#[test]
fn documented_scenario() -> Result<()> {
    let mut a = adapter("name")?;

    // page 1, "ab" -> без токена
    let q1 = a.request_params(Some(1), Some("ab"));
    assert!(!q1.contains(AFTER_PARAM));

    // ответ для page 1 приносит after = "X"
    let body = page_body(json!("X"));
    let echoed = a.record_response(Some(1), Some("ab"), body.clone());
    assert_eq!(echoed, body, "payload must pass through unchanged");

    // page 2, "ab" -> _pagination[after]=X
    let q2 = a.request_params(Some(2), Some("ab"));
    assert_eq!(q2.after_token(), Some("X"));

    // page 2, "abc" -> терм сменился, токен не отправляем
    let q3 = a.request_params(Some(2), Some("abc"));
    assert!(q3.after_token().is_none());
    assert_eq!(q3.get("_search[name][val]"), Some("abc"));
    Ok(())
}

#[test]
fn token_chain_follows_recorded_pages() -> Result<()> {
    let mut a = adapter("name")?;
    for (page, tok) in [(1u32, "t2"), (2, "t3"), (3, "t4")] {
        a.record_response(Some(page), Some("jo"), page_body(json!(tok)));
    }
    assert_eq!(a.request_params(Some(2), Some("jo")).after_token(), Some("t2"));
    assert_eq!(a.request_params(Some(3), Some("jo")).after_token(), Some("t3"));
    assert_eq!(a.request_params(Some(4), Some("jo")).after_token(), Some("t4"));
    // Страница 5 ещё не запрашивалась
    assert!(a.request_params(Some(5), Some("jo")).after_token().is_none());
    Ok(())
}

#[test]
fn term_change_then_restart_reuses_new_tokens() -> Result<()> {
    let mut a = adapter("name")?;
    a.record_response(Some(1), Some("ab"), page_body(json!("X")));

    // Новый терм: page 1 заново, ответ перезаписывает токен страницы 2
    assert!(a.request_params(Some(2), Some("abc")).after_token().is_none());
    a.record_response(Some(1), Some("abc"), page_body(json!("Y")));
    assert_eq!(a.request_params(Some(2), Some("abc")).after_token(), Some("Y"));

    // Старый терм больше не совпадает с last_term
    assert!(a.request_params(Some(2), Some("ab")).after_token().is_none());
    Ok(())
}

#[test]
fn missing_or_null_token_is_stored_as_null() -> Result<()> {
    let mut a = adapter("name")?;
    a.record_response(Some(1), Some("ab"), json!({"results": []}));
    assert!(a.state().has_entry(2));
    assert_eq!(a.state().token_for(2), None);
    assert!(a.request_params(Some(2), Some("ab")).after_token().is_none());

    a.record_response(Some(1), Some("ab"), page_body(json!(null)));
    assert_eq!(a.state().token_for(2), None);
    Ok(())
}

#[test]
fn empty_token_is_never_sent() -> Result<()> {
    let mut a = adapter("name")?;
    a.record_response(Some(1), Some("ab"), page_body(json!("")));
    assert_eq!(a.state().token_for(2), Some(""));
    assert!(a.request_params(Some(2), Some("ab")).after_token().is_none());
    Ok(())
}

#[test]
fn numeric_token_is_sent_as_decimal() -> Result<()> {
    let mut a = adapter("name")?;
    a.record_response(Some(1), None, page_body(json!(1200)));
    assert_eq!(a.request_params(Some(2), None).after_token(), Some("1200"));
    Ok(())
}

#[test]
fn request_url_appends_to_base_query() -> Result<()> {
    let base = Url::parse("https://forage.example/api/users?scope=active")?;
    let mut a = PageTokenAdapter::new(WidgetConfig::new(base, "name"));
    a.record_response(Some(1), Some("a b"), page_body(json!("X/1")));

    let url = a.request_url(Some(2), Some("a b"));
    assert_eq!(
        url.as_str(),
        "https://forage.example/api/users?scope=active\
         &_search%5Bname%5D%5Bop%5D=contains\
         &_search%5Bname%5D%5Bval%5D=a+b\
         &_pagination%5Bafter%5D=X%2F1"
    );
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs.last(), Some(&("_pagination[after]".to_string(), "X/1".to_string())));
    Ok(())
}

#[test]
fn reset_forgets_everything() -> Result<()> {
    let mut a = adapter("name")?;
    a.record_response(Some(1), Some("ab"), page_body(json!("X")));
    a.reset();
    assert_eq!(a.state().last_term(), "");
    assert_eq!(a.state().len(), 1);
    assert!(a.request_params(Some(2), Some("")).after_token().is_none());
    Ok(())
}

#[test]
fn instances_do_not_share_state() -> Result<()> {
    let mut a = adapter("name")?;
    let b = adapter("name")?;
    a.record_response(Some(1), Some("ab"), page_body(json!("X")));
    assert_eq!(a.request_params(Some(2), Some("ab")).after_token(), Some("X"));
    assert!(b.request_params(Some(2), Some("ab")).after_token().is_none());
    Ok(())
}
