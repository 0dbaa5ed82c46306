//! Tests for TrelloClient over the real reqwest transport against a mock server

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};

use trello_cli::application::{ApplicationError, TrelloClient};
use trello_cli::domain::{CardUpdate, Credentials, NewCard};
use trello_cli::infrastructure::{HttpTransport, ReqwestTransport};
use trello_cli::util::testing;

fn client_for(server: &Server) -> TrelloClient {
    testing::init_test_setup();
    let transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::new(&server.url(), Duration::from_secs(2), Duration::from_secs(5))
            .expect("build transport"),
    );
    TrelloClient::new(transport, Credentials::new("k", "t").unwrap())
}

fn auth_and(extra: Vec<Matcher>) -> Matcher {
    let mut all = vec![
        Matcher::UrlEncoded("key".into(), "k".into()),
        Matcher::UrlEncoded("token".into(), "t".into()),
    ];
    all.extend(extra);
    Matcher::AllOf(all)
}

#[test]
fn given_two_boards_when_listing_then_returns_them_in_order() {
    // Arrange
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/members/me/boards")
        .match_query(auth_and(vec![Matcher::UrlEncoded(
            "fields".into(),
            "name,id".into(),
        )]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"b1","name":"Alpha"},{"id":"b2","name":"Beta","closed":false}]"#)
        .create();

    // Act
    let boards = client_for(&server).list_boards().unwrap();

    // Assert
    mock.assert();
    let names: Vec<&str> = boards.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn given_labels_without_name_or_color_when_listing_then_defaults_apply() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/boards/b1/labels")
        .match_query(auth_and(vec![Matcher::UrlEncoded(
            "fields".into(),
            "name,id,color".into(),
        )]))
        .with_status(200)
        .with_body(r#"[{"id":"l1","name":"","color":null},{"id":"l2","name":"Bug","color":"red"}]"#)
        .create();

    let labels = client_for(&server).list_labels("b1").unwrap();

    assert_eq!(labels[0].name, "Unnamed Label");
    assert_eq!(labels[0].color, "No Color");
    assert_eq!(labels[1].name, "Bug");
    assert_eq!(labels[1].color, "red");
}

#[test]
fn given_cards_in_list_when_listing_then_projects_short_url() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/lists/l1/cards")
        .match_query(auth_and(vec![Matcher::UrlEncoded(
            "fields".into(),
            "id,name,shortUrl".into(),
        )]))
        .with_status(200)
        .with_body(r#"[{"id":"c1","name":"Task","shortUrl":"https://trello.com/c/abc"}]"#)
        .create();

    let cards = client_for(&server).list_cards("l1").unwrap();

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].short_url, "https://trello.com/c/abc");
}

#[test]
fn given_no_matches_when_searching_then_returns_empty() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/search")
        .match_query(auth_and(vec![
            Matcher::UrlEncoded("query".into(), "nothing here".into()),
            Matcher::UrlEncoded("modelTypes".into(), "cards".into()),
            Matcher::UrlEncoded("card_fields".into(), "name,shortUrl".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"options":{"terms":[]},"cards":[]}"#)
        .create();

    let cards = client_for(&server).search_cards("nothing here").unwrap();

    assert!(cards.is_empty());
}

#[test]
fn given_labels_and_comment_when_creating_card_then_posts_card_then_comment() {
    let mut server = Server::new();
    let create = server
        .mock("POST", "/cards")
        .match_query(auth_and(vec![
            Matcher::UrlEncoded("idList".into(), "L1".into()),
            Matcher::UrlEncoded("name".into(), "Task".into()),
            Matcher::UrlEncoded("idLabels".into(), "X,Y".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"id":"c9","name":"Task","shortUrl":"https://trello.com/c/new"}"#)
        .expect(1)
        .create();
    let comment = server
        .mock("POST", "/cards/c9/actions/comments")
        .match_query(auth_and(vec![Matcher::UrlEncoded(
            "text".into(),
            "first!".into(),
        )]))
        .with_status(200)
        .with_body(r#"{"id":"a1","type":"commentCard","data":{"text":"first!"}}"#)
        .expect(1)
        .create();

    let card = NewCard::new("L1", "Task")
        .with_labels(["X", "Y"])
        .with_comment("first!");
    let created = client_for(&server).create_card(&card).unwrap();

    create.assert();
    comment.assert();
    assert_eq!(created.short_url, "https://trello.com/c/new");
}

#[test]
fn given_rejected_creation_when_creating_card_then_no_comment_is_posted() {
    let mut server = Server::new();
    let _create = server
        .mock("POST", "/cards")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("invalid value for idList")
        .create();
    let comment = server
        .mock("POST", Matcher::Regex(r"^/cards/.+/actions/comments$".into()))
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let err = client_for(&server)
        .create_card(&NewCard::new("bad", "Task").with_comment("hi"))
        .unwrap_err();

    comment.assert();
    assert!(matches!(err, ApplicationError::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "HTTP 400: invalid value for idList");
}

#[test]
fn given_unarchive_when_updating_card_then_sends_closed_false() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", "/cards/c1")
        .match_query(auth_and(vec![
            Matcher::UrlEncoded("closed".into(), "false".into()),
            Matcher::UrlEncoded("idList".into(), "L2".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"id":"c1","name":"Task","shortUrl":"https://trello.com/c/abc"}"#)
        .create();

    let update = CardUpdate::new().list_id("L2").archive(false);
    client_for(&server).update_card("c1", &update).unwrap();

    mock.assert();
}

#[test]
fn given_server_error_when_getting_list_name_then_surfaces_status_and_body() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/lists/l1")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create();

    let err = client_for(&server).get_list_name("l1").unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("upstream unavailable"));
}

#[test]
fn given_html_body_when_listing_boards_then_decode_error_names_operation() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/members/me/boards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let err = client_for(&server).list_boards().unwrap_err();

    assert!(matches!(err, ApplicationError::Decode { .. }));
    assert!(err.to_string().contains("list boards"));
}

#[test]
fn given_unreachable_server_when_listing_then_transport_error() {
    // Port 9 (discard) is almost never listening locally.
    let transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::new(
            "http://127.0.0.1:9",
            Duration::from_millis(500),
            Duration::from_secs(1),
        )
        .unwrap(),
    );
    let client = TrelloClient::new(transport, Credentials::new("k", "t").unwrap());

    let err = client.list_boards().unwrap_err();

    assert!(matches!(err, ApplicationError::Transport { .. }));
    assert!(!err.to_string().contains("token=t"));
}
