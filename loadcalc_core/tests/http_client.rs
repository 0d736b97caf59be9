//! The reqwest client against a one-shot local HTTP server.

use loadcalc_core::config::ClientConfig;
use loadcalc_core::errors::GENERIC_SERVICE_ERROR;
use loadcalc_core::page::Page;
use loadcalc_core::render::ResultContent;
use loadcalc_core::units::UnitTag;
use loadcalc_core::HttpCalculationClient;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Read one HTTP request and return its body
async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return Vec::new();
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let length: usize = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|v| v.trim().parse().unwrap())
            .unwrap_or(0);
        let body_start = header_end + 4;
        if buf.len() >= body_start + length {
            return buf[body_start..body_start + length].to_vec();
        }
    }
}

/// Serve one response; the handle yields the request body that was received
async fn serve_once(status: &str, body: Value) -> (String, JoinHandle<Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/api/calculate", listener.local_addr().unwrap());
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        serde_json::from_slice(&request).unwrap()
    });
    (endpoint, handle)
}

fn client_for(endpoint: String) -> HttpCalculationClient {
    HttpCalculationClient::new(&ClientConfig::default().with_endpoint(endpoint)).unwrap()
}

fn sfd_page() -> Page {
    let mut page = Page::standard(&[UnitTag::new("SFD")]);
    page.set_unit_selected("unitToggle_SFD", true);
    page.set_value("livingArea_SFD", "140");
    page
}

#[tokio::test]
async fn error_field_of_a_rejection_is_shown_verbatim() {
    let (endpoint, server) = serve_once("400 Bad Request", json!({"error": "X"})).await;
    let mut page = sfd_page();

    let region = page.submit(&client_for(endpoint)).await;
    assert!(region.visible);
    assert_eq!(region.content, Some(ResultContent::error("X")));

    let sent = server.await.unwrap();
    assert_eq!(sent["num_units"], json!(1));
    assert_eq!(sent["units"][0]["area_m2"], json!(140.0));
}

#[tokio::test]
async fn rejection_without_error_field_shows_generic_message() {
    let (endpoint, server) =
        serve_once("500 Internal Server Error", json!({"message": "No valid units provided."})).await;
    let mut page = sfd_page();

    let region = page.submit(&client_for(endpoint)).await;
    assert_eq!(region.content, Some(ResultContent::error(GENERIC_SERVICE_ERROR)));
    server.await.unwrap();
}

#[tokio::test]
async fn success_body_is_rendered() {
    let (endpoint, server) = serve_once(
        "200 OK",
        json!({
            "Total Calculated Load (Watts)": 12000,
            "Total Amps": 50,
            "Service OCP size (Amps)": "100A",
            "Service Conductor Type and Size": "#3, Copper (Rated 100A)"
        }),
    )
    .await;
    let mut page = sfd_page();

    let region = page.submit(&client_for(endpoint)).await;
    let content = region.content.as_ref().unwrap();
    assert!(!content.is_error());
    assert!(content.render_text().contains("Total Amps: 50.00"));
    server.await.unwrap();
}
