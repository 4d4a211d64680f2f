#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use apicors_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
apicors:
  allow_origins: ["http://a.com"]
  actions:
    whitelizt: ["*"] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config_uses_defaults() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.server.action_param, "api_action");

    let c = &cfg.apicors;
    assert!(!c.disabled);
    assert_eq!(c.allow_origins, vec!["*".to_string()]);
    assert!(!c.allow_credentials);
    assert_eq!(c.max_age, -1);
    assert_eq!(c.actions.whitelist, vec!["*".to_string()]);
    assert!(c.actions.blacklist.is_empty());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
  action_param: "action"
apicors:
  disabled: false
  allow_origins: ["http://a.com", "http://b.com"]
  allow_credentials: true
  max_age: 600
  actions:
    whitelist: ["User.*"]
    blacklist: ["User.Delete"]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9000);
    assert_eq!(cfg.apicors.allow_origins.len(), 2);
    assert!(cfg.apicors.allow_credentials);
    assert_eq!(cfg.apicors.max_age, 600);
    assert_eq!(cfg.apicors.actions.blacklist, vec!["User.Delete".to_string()]);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn bad_listen_addr() {
    let bad = r#"
version: 1
server:
  listen: "not-an-addr"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}
