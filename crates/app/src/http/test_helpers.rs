//! Canned HTTP responses for client tests.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serve a single request with `status` and `body`, returning the base url to point a client at.
pub(crate) async fn serve_once(status: u16, body: &'static str) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Ok((mut stream, _peer)) = listener.accept().await {
            let mut request = [0_u8; 4096];
            let _read = stream.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );

            let _written = stream.write_all(response.as_bytes()).await;
            let _shutdown = stream.shutdown().await;
        }
    });

    Ok(format!("http://{addr}/api"))
}
