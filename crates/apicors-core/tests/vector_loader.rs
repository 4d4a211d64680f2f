//! JSON decision vector loader.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use serde::Deserialize;

use apicors_core::policy::CorsSettings;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub settings: CorsSettings,
    pub cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
pub struct Case {
    pub method: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub request_method: Option<String>,
    #[serde(default)]
    pub request_headers: Option<String>,
    pub expect: Expect,
}

#[derive(Debug, Deserialize)]
pub struct Expect {
    pub forward: bool,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}
