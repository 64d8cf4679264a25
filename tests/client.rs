// End-to-end behaviour of `ToastClient` over a scripted transport.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use serde_json::json;
use tempfile::TempDir;
use toast_client::{ClientConfig, Environment, Result, ToastClient, ToastError};
use toast_client::transport::Transport;

const BASE: &str = "https://ws-api.toasttab.com/";
const AUTH_URL: &str = "https://ws-api.toasttab.com/usermgmt/v1/oauth/token";

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Get {
        url: String,
        authorization: Option<String>,
        restaurant: Option<String>,
        content_type: Option<String>,
    },
    Auth {
        url: String,
    },
}

/// Replays canned bodies in order and records every request.
#[derive(Default)]
struct Scripted {
    gets: RefCell<VecDeque<String>>,
    tokens: RefCell<VecDeque<String>>,
    calls: RefCell<Vec<Call>>,
}

impl Scripted {
    fn get_returns(self, body: &str) -> Self {
        self.gets.borrow_mut().push_back(body.to_string());
        self
    }

    fn auth_returns(self, token: &str) -> Self {
        self.tokens
            .borrow_mut()
            .push_back(json!({ "access_token": token }).to_string());
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn auth_count(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Auth { .. })).count()
    }

    fn gets(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Get { .. }))
            .collect()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

impl Transport for Scripted {
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<String> {
        self.calls.borrow_mut().push(Call::Get {
            url: url.to_string(),
            authorization: header(headers, AUTHORIZATION.as_str()),
            restaurant: header(headers, "Toast-Restaurant-External-ID"),
            content_type: header(headers, CONTENT_TYPE.as_str()),
        });
        Ok(self
            .gets
            .borrow_mut()
            .pop_front()
            .expect("unexpected GET: no scripted response left"))
    }

    fn post_form(&self, url: &str, _form: &[(&str, &str)]) -> Result<String> {
        self.calls.borrow_mut().push(Call::Auth { url: url.to_string() });
        Ok(self
            .tokens
            .borrow_mut()
            .pop_front()
            .expect("unexpected auth call: no scripted token left"))
    }
}

struct Fixture {
    _dir: TempDir,
    token_path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let token_path = dir.path().join("toast-token.txt");
        Fixture { _dir: dir, token_path }
    }

    fn with_token(token: &str) -> Self {
        let f = Self::new();
        std::fs::write(&f.token_path, token).unwrap();
        f
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::new("cid", "secret").with_token_path(&self.token_path)
    }

    fn client(&self, transport: Scripted) -> ToastClient<Scripted> {
        ToastClient::with_transport(self.config(), transport).unwrap()
    }
}

#[test]
fn existing_token_file_skips_authentication() {
    let f = Fixture::with_token("stored-token");
    let mut client = f.client(Scripted::default().get_returns(r#"{"guid": "o-1"}"#));

    assert_eq!(client.token(), "stored-token");
    let body = client.get_order("o-1", None).unwrap();
    assert_eq!(body, json!({"guid": "o-1"}));

    let t = client.transport();
    assert_eq!(t.auth_count(), 0);
    assert_eq!(
        t.gets(),
        vec![Call::Get {
            url: format!("{}orders/v2/orders/o-1", BASE),
            authorization: Some("Bearer stored-token".into()),
            restaurant: None,
            content_type: Some("application/json".into()),
        }]
    );
}

#[test]
fn missing_token_file_bootstraps_and_persists() {
    let f = Fixture::new();
    let client = f.client(Scripted::default().auth_returns("fresh-token"));

    assert_eq!(client.token(), "fresh-token");
    assert_eq!(client.transport().calls(), vec![Call::Auth { url: AUTH_URL.into() }]);
    assert_eq!(std::fs::read_to_string(&f.token_path).unwrap(), "fresh-token");
}

#[test]
fn bootstrap_without_access_token_fails() {
    let f = Fixture::new();
    let transport = Scripted::default();
    transport
        .tokens
        .borrow_mut()
        .push_back(r#"{"message": "Unauthorized"}"#.into());

    let err = ToastClient::with_transport(f.config(), transport).err().unwrap();
    assert!(matches!(err, ToastError::MissingAccessToken));
    assert!(!f.token_path.exists());
}

#[test]
fn sandbox_uses_sandbox_base_url() {
    let f = Fixture::new();
    let config = f.config().with_environment(Environment::Sandbox);
    let transport = Scripted::default().auth_returns("t").get_returns("[]");
    let mut client = ToastClient::with_transport(config, transport).unwrap();

    client.get_jobs(None).unwrap();
    let calls = client.transport().calls();
    assert_eq!(
        calls[0],
        Call::Auth { url: "https://ws-sandbox-api.eng.toasttab.com/usermgmt/v1/oauth/token".into() }
    );
    assert!(matches!(&calls[1], Call::Get { url, .. } if url == "https://ws-sandbox-api.eng.toasttab.com/jobs/"));
}

#[test]
fn invalid_token_triggers_one_reauth_and_one_retry() {
    let f = Fixture::with_token("stale");
    let transport = Scripted::default()
        .get_returns(r#"{"status": 401, "message": "invalid_token"}"#)
        .auth_returns("renewed")
        .get_returns(r#"[{"guid": "e-1"}]"#);
    let mut client = f.client(transport);

    let body = client.get_employees(None).unwrap();
    assert_eq!(body, json!([{"guid": "e-1"}]));
    assert_eq!(client.token(), "renewed");

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(&calls[0], Call::Get { authorization: Some(a), .. } if a == "Bearer stale"));
    assert_eq!(calls[1], Call::Auth { url: AUTH_URL.into() });
    match (&calls[0], &calls[2]) {
        (Call::Get { url: first, .. }, Call::Get { url: second, authorization, .. }) => {
            assert_eq!(first, second);
            assert_eq!(authorization.as_deref(), Some("Bearer renewed"));
        }
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[test]
fn second_invalid_token_is_returned_without_another_retry() {
    let f = Fixture::with_token("stale");
    let transport = Scripted::default()
        .get_returns(r#"{"message": "invalid_token"}"#)
        .auth_returns("renewed")
        .get_returns(r#"{"message": "invalid_token"}"#);
    let mut client = f.client(transport);

    let body = client.get_jobs(None).unwrap();
    assert_eq!(body, json!({"message": "invalid_token"}));
    assert_eq!(client.transport().auth_count(), 1);
    assert_eq!(client.transport().gets().len(), 2);
}

#[test]
fn refreshed_token_is_used_and_persisted() {
    let f = Fixture::with_token("stale");
    let transport = Scripted::default()
        .get_returns(r#"{"message": "invalid_token"}"#)
        .auth_returns("renewed")
        .get_returns("{}")
        .get_returns("{}");
    let mut client = f.client(transport);

    client.get_jobs(None).unwrap();
    client.get_employees(None).unwrap();

    let gets = client.transport().gets();
    assert!(matches!(&gets[2], Call::Get { authorization: Some(a), .. } if a == "Bearer renewed"));
    assert_eq!(std::fs::read_to_string(&f.token_path).unwrap(), "renewed");
}

#[test]
fn non_expiry_bodies_pass_through() {
    for body in [r#"{"message": "ok"}"#, r#"[1, 2, 3]"#, r#""invalid_token""#, "null"] {
        let f = Fixture::with_token("tok");
        let mut client = f.client(Scripted::default().get_returns(body));

        let value = client.get_orders_by_business_date("20240101", None).unwrap();
        assert_eq!(value, serde_json::from_str::<serde_json::Value>(body).unwrap());
        assert_eq!(client.transport().calls().len(), 1, "body {} caused extra calls", body);
    }
}

#[test]
fn unparseable_body_is_an_error() {
    let f = Fixture::with_token("tok");
    let mut client = f.client(Scripted::default().get_returns("<html>502 Bad Gateway</html>"));

    let err = client.get_jobs(None).unwrap_err();
    assert!(matches!(err, ToastError::Json(_)));
    assert_eq!(client.transport().calls().len(), 1);
}

#[test]
fn restaurant_override_carries_over_to_later_calls() {
    let f = Fixture::with_token("tok");
    let transport = Scripted::default()
        .get_returns("[]")
        .get_returns("[]")
        .get_returns("[]");
    let config = f.config().with_restaurant("default-r");
    let mut client = ToastClient::with_transport(config, transport).unwrap();

    client.get_jobs(None).unwrap();
    client.get_jobs(Some("r-2")).unwrap();
    client.get_employees(None).unwrap();

    let restaurants: Vec<Option<String>> = client
        .transport()
        .gets()
        .into_iter()
        .map(|c| match c {
            Call::Get { restaurant, .. } => restaurant,
            Call::Auth { .. } => unreachable!(),
        })
        .collect();
    assert_eq!(
        restaurants,
        vec![
            Some("default-r".to_string()),
            Some("r-2".to_string()),
            Some("r-2".to_string()),
        ]
    );
    assert_eq!(client.restaurant_guid(), Some("r-2"));
}

#[test]
fn orders_in_range_formats_bounds() {
    let f = Fixture::with_token("tok");
    let mut client = f.client(Scripted::default().get_returns("[]"));

    client.get_orders_in_range("2024-01-01", "2024-01-02", None).unwrap();

    let gets = client.transport().gets();
    assert!(matches!(
        &gets[0],
        Call::Get { url, .. } if url == &format!(
            "{}orders/v2/orders/?startDate=2024-01-01T00:00:00.000-0400&endDate=2024-01-02T00:00:00.000-0400",
            BASE
        )
    ));
}

#[test]
fn orders_in_range_rejects_bad_dates_before_any_request() {
    let f = Fixture::with_token("tok");
    let mut client = f.client(Scripted::default());

    let err = client.get_orders_in_range("not a date", "2024-01-02", None).unwrap_err();
    assert!(matches!(err, ToastError::InvalidDate(_)));
    assert!(client.transport().calls().is_empty());
}

#[test]
fn employee_endpoints_use_labor_paths() {
    let f = Fixture::with_token("tok");
    let mut client = f.client(
        Scripted::default()
            .get_returns(r#"{"guid": "e-7"}"#)
            .get_returns("[]"),
    );

    client.get_employee("e-7", None).unwrap();
    client.get_employees(None).unwrap();

    let urls: Vec<String> = client
        .transport()
        .gets()
        .into_iter()
        .filter_map(|c| match c {
            Call::Get { url, .. } => Some(url),
            Call::Auth { .. } => None,
        })
        .collect();
    assert_eq!(
        urls,
        vec![
            format!("{}labor/v1/employee/e-7", BASE),
            format!("{}labor/v1/employees/", BASE),
        ]
    );
}
