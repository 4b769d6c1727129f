use std::net::SocketAddr;

use mock_server::{BAD_REQUEST_RESPONSE, OK_RESPONSE};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

/// Send `request`, close the write half, and collect the reply.
async fn round_trip(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    stream.shutdown().await.unwrap();
    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    reply
}

// --- success ---

#[tokio::test]
async fn full_request_gets_ok() {
    let addr = start().await;
    let reply = round_trip(addr, b"GET / HTTP/1.1\r\nHost: 127.0.0.1 \r\nConnection: close\r\n\r\n").await;
    assert_eq!(reply, OK_RESPONSE);
}

#[tokio::test]
async fn bare_request_line_gets_ok() {
    let addr = start().await;
    let reply = round_trip(addr, b"HELLO\n").await;
    assert_eq!(reply, OK_RESPONSE);
}

#[tokio::test]
async fn ok_reply_without_closing_write_half() {
    let addr = start().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: 127.0.0.1 \r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    assert_eq!(reply, OK_RESPONSE);
}

// --- failure ---

#[tokio::test]
async fn cut_off_request_line_gets_bad_request() {
    let addr = start().await;
    let reply = round_trip(addr, b"GET / HTTP/1.1").await;
    assert_eq!(reply, BAD_REQUEST_RESPONSE);
}

#[tokio::test]
async fn empty_connection_gets_bad_request() {
    let addr = start().await;
    let reply = round_trip(addr, b"").await;
    assert_eq!(reply, BAD_REQUEST_RESPONSE);
}

#[tokio::test]
async fn non_utf8_request_line_gets_bad_request() {
    let addr = start().await;
    let reply = round_trip(addr, b"GET \xff\xfe HTTP/1.1\r\n\r\n").await;
    assert_eq!(reply, BAD_REQUEST_RESPONSE);
}

// --- concurrency ---

#[tokio::test]
async fn connections_are_served_independently() {
    let addr = start().await;

    // An idle connection must not hold up the others.
    let _idle = TcpStream::connect(addr).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..16 {
        tasks.push(tokio::spawn(async move {
            let request = format!("GET / HTTP/1.1\r\nHost: client{i}.test \r\n\r\n");
            round_trip(addr, request.as_bytes()).await
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), OK_RESPONSE);
    }
}

// --- third-party client ---

#[test]
fn standard_http_client_reads_close_delimited_body() {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let mut response = ureq::get(&format!("http://{addr}/")).call().unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body = response.body_mut().read_to_string().unwrap();
    assert_eq!(body, "received your msg.");
}
