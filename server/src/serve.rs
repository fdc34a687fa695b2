//! Connection Loop: accept, read, handle, respond, close.

use std::io;
use std::net::SocketAddr;

use stack_core::{Framing, Handler, HttpResponse, RequestBuffer, StackStore, MAX_REQUEST_BYTES};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Serve connections on `listener` forever, one at a time.
///
/// Accept errors and per-connection failures are logged and skipped; none
/// of them stops the loop.
pub async fn run<S: StackStore>(listener: TcpListener, handler: Handler<S>) {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "accepting connections");
    }
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => handle_connection(stream, peer, &handler).await,
            Err(err) => warn!(%err, "accept failed"),
        }
    }
}

async fn handle_connection<S: StackStore>(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: &Handler<S>,
) {
    let raw = match read_request(&mut stream, MAX_REQUEST_BYTES).await {
        Ok(raw) => raw,
        Err(err) => {
            debug!(%peer, %err, "connection closed without a request");
            return;
        }
    };

    let response = handler.handle(&raw).await;

    match write_response(&mut stream, &response).await {
        Ok(written) if written < response.to_bytes().len() => {
            warn!(%peer, written, "short write, response truncated");
        }
        Ok(_) => {}
        Err(err) => warn!(%peer, %err, "failed to send response"),
    }
    if let Err(err) = stream.shutdown().await {
        debug!(%peer, %err, "shutdown failed");
    }
}

/// Read one request from `reader`, stopping once it is framed.
///
/// The bytes go through a `RequestBuffer`, which also decides what a close
/// or a failed read yields.
pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    capacity: usize,
) -> io::Result<Vec<u8>> {
    let mut buffer = RequestBuffer::with_capacity(capacity);
    let mut chunk = vec![0u8; buffer.read_len()];
    while buffer.remaining() > 0 {
        let want = buffer.read_len();
        let n = match reader.read(&mut chunk[..want]).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                debug!(%err, received = buffer.len(), "read failed");
                return buffer.read_failed(err);
            }
        };
        if buffer.feed(&chunk[..n]) == Framing::Complete {
            return Ok(buffer.into_bytes());
        }
    }
    buffer.closed()
}

/// Send `response` with a single write call and return the bytes written.
/// A short write is not retried.
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &HttpResponse,
) -> io::Result<usize> {
    let written = writer.write(&response.to_bytes()).await?;
    writer.flush().await?;
    Ok(written)
}
