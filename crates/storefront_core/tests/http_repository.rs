use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use storefront_core::{
    ApiClient, CategoryRecord, CategoryRepository, CategoryService, Credential,
    HttpCategoryRepository, HttpProductRepository, NetError, ProductService, RepoError,
    LOAD_FAILED_MESSAGE,
};

/// Serves exactly one canned HTTP response on a loopback port.
///
/// The join handle yields the raw request head the client sent.
fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).expect("read request") == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        stream.write_all(response.as_bytes()).expect("write response");
        head
    });
    (base_url, handle)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::with_timeout(base_url, Duration::from_secs(5)).expect("valid base url")
}

#[test]
fn lists_categories_from_backend_without_credential() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"[
            {"id": 1, "name": "Books", "parent": null, "children": []},
            {"id": 2, "name": "Fiction", "parent": 1, "children": []}
        ]"#,
    );
    let client = client(&base_url);
    let repo = HttpCategoryRepository::new(&client, None);

    let records = repo.list_categories().unwrap();
    let head = server.join().unwrap();

    assert_eq!(
        records,
        vec![
            CategoryRecord::root(1, "Books"),
            CategoryRecord::child(2, "Fiction", 1)
        ]
    );
    assert!(head.starts_with("GET /products/categories/ HTTP/1.1"), "{head}");
    assert!(!head.to_ascii_lowercase().contains("authorization"));
}

#[test]
fn forwards_bearer_credential() {
    let (base_url, server) = serve_once("200 OK", "[]");
    let client = client(&base_url);
    let repo = HttpCategoryRepository::new(&client, Credential::bearer("tok-123"));

    assert!(repo.list_categories().unwrap().is_empty());
    let head = server.join().unwrap();
    assert!(head.contains("Bearer tok-123"), "{head}");
}

#[test]
fn non_success_status_maps_to_status_error() {
    let (base_url, server) = serve_once("500 Internal Server Error", "{}");
    let client = client(&base_url);
    let repo = HttpCategoryRepository::new(&client, None);

    let err = repo.list_categories().unwrap_err();
    server.join().unwrap();
    assert!(matches!(
        err,
        RepoError::Net(NetError::Status { status: 500, .. })
    ));
}

#[test]
fn undecodable_body_maps_to_decode_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"detail": "not a list"}"#);
    let client = client(&base_url);
    let repo = HttpCategoryRepository::new(&client, None);

    let err = repo.list_categories().unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, RepoError::Net(NetError::Decode(_))));
}

#[test]
fn service_reports_fixed_message_on_http_failure() {
    let (base_url, server) = serve_once("503 Service Unavailable", "{}");
    let client = client(&base_url);
    let service = CategoryService::new(HttpCategoryRepository::new(&client, None));

    let err = service.load_forest().unwrap_err();
    server.join().unwrap();
    assert_eq!(err.user_message(), LOAD_FAILED_MESSAGE);
}

#[test]
fn get_category_maps_not_found_to_none() {
    let (base_url, server) = serve_once("404 Not Found", r#"{"detail": "Not found."}"#);
    let client = client(&base_url);
    let repo = HttpCategoryRepository::new(&client, None);

    assert_eq!(repo.get_category(12).unwrap(), None);
    let head = server.join().unwrap();
    assert!(head.starts_with("GET /products/categories/12/ "), "{head}");
}

#[test]
fn get_category_rejects_mismatched_id() {
    let (base_url, server) = serve_once("200 OK", r#"{"id": 13, "name": "Other", "parent": null}"#);
    let client = client(&base_url);
    let repo = HttpCategoryRepository::new(&client, None);

    let err = repo.get_category(12).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn product_listing_passes_category_filter() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"[{"id": 8, "name": "Atlas", "price": "12.00", "stock": 2, "available": true,
             "categories": [{"id": 4, "name": "Comics"}]}]"#,
    );
    let client = client(&base_url);
    let service = ProductService::new(HttpProductRepository::new(&client, None));

    let products = service.list_for_category(Some(4)).unwrap();
    let head = server.join().unwrap();

    assert_eq!(products.len(), 1);
    assert!(products[0].belongs_to(4));
    assert!(
        head.starts_with("GET /products/products/?category=4 HTTP/1.1"),
        "{head}"
    );
}

#[test]
fn unreachable_backend_maps_to_transport_error() {
    // Bind then drop to get a port with no listener.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = client(&format!("http://127.0.0.1:{port}"));
    let repo = HttpCategoryRepository::new(&client, None);

    let err = repo.list_categories().unwrap_err();
    assert!(matches!(err, RepoError::Net(NetError::Transport(_))));
}
