//! Blocking API tests, run with `--features blocking`
#![cfg(feature = "blocking")]

use restkit::{HttpClient, Request, Url};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PersonInfo {
    name: String,
    address: String,
}

#[test]
fn test_respond_as_blocking() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/person")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"Ada","address":"London"}"#)
        .create();

    let url = Url::parse(&format!("{}/person", server.url())).expect("Valid mock URL");
    let mut response = HttpClient::new()
        .get(url)
        .respond_as_blocking::<PersonInfo>()
        .expect("Request should succeed");

    assert_eq!(response.code(), 200);
    let person = response.body_blocking().expect("Body should decode");
    assert_eq!(person.name, "Ada");
    assert_eq!(person.address, "London");

    mock.assert();
}
